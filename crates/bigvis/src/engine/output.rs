//! The condensed table produced by binning and smoothing.
//!
//! ## Purpose
//!
//! This module defines `CondensedTable`, the columnar result of a condense:
//! one row per bin (or per output point, after smoothing), its grid
//! coordinates, and the summary columns (`.count`, `.sum`, `.mean`, `.sd`,
//! `.median`) computed for it.
//!
//! ## Design notes
//!
//! * **Missing slot**: Every axis of a condensed table reserves slot 0 for
//!   observations whose grouping value was NaN. Rows belonging to such a slot
//!   carry a NaN coordinate on that axis. In one dimension this is exactly
//!   row 0.
//! * **Row order**: Rows follow the flat slot order, first axis fastest, so
//!   the table of a 1-D condense is sorted by bin.
//! * **Binners**: Tables built by a condense remember how each axis was
//!   binned, which is what `breaks` and `midpoints` report.
//! * **Ergonomics**: Implements `Display` for human-readable output.
//!
//! ## Invariants
//!
//! * Every column has exactly one value per row.
//! * Rows are never reordered after construction (only selected).
//!
//! ## Non-goals
//!
//! * This module does not bin or smooth anything itself.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::{format, string::String, vec::Vec};
#[cfg(feature = "std")]
use std::{string::String, vec::Vec};

// External dependencies
use core::fmt::{Debug, Display, Formatter, Result as FmtResult};
use num_traits::Float;

// Internal dependencies
use crate::algorithms::accumulator::{Summary, SummaryClass, Variable};
use crate::algorithms::binning::Binner;
use crate::engine::validator::Validator;
use crate::evaluation::peel::peel_rows;
use crate::primitives::errors::BigvisError;
use crate::primitives::grid::{Dim, Points, SmoothGrid};

// ============================================================================
// Condensed Table
// ============================================================================

/// Per-bin summaries keyed by grid coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct CondensedTable<T> {
    keys: Points<T>,
    columns: Vec<(Variable, Vec<T>)>,
    summary: Summary,
    binners: Vec<Binner<T>>,
}

impl<T: Float> CondensedTable<T> {
    /// Assemble a table; every column must have one value per key.
    pub(crate) fn new(
        keys: Points<T>,
        columns: Vec<(Variable, Vec<T>)>,
        summary: Summary,
        binners: Vec<Binner<T>>,
    ) -> Self {
        debug_assert!(columns.iter().all(|(_, c)| c.len() == keys.len()));
        Self {
            keys,
            columns,
            summary,
            binners,
        }
    }

    // ========================================================================
    // Query Methods
    // ========================================================================

    /// Number of rows.
    #[inline]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Returns `true` if the table has no rows.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Number of grouping dimensions.
    #[inline]
    pub fn dims(&self) -> usize {
        self.keys.dims()
    }

    /// The summary that produced the table.
    #[inline]
    pub fn summary(&self) -> Summary {
        self.summary
    }

    /// The summary class tag.
    #[inline]
    pub fn class(&self) -> SummaryClass {
        self.summary.class()
    }

    /// Row coordinates (left bin edges; NaN marks the missing slot).
    #[inline]
    pub fn keys(&self) -> &Points<T> {
        &self.keys
    }

    /// Binning of each axis (empty for tables produced by smoothing onto a
    /// caller-supplied grid).
    #[inline]
    pub fn binners(&self) -> &[Binner<T>] {
        &self.binners
    }

    /// The columns present, in order.
    pub fn variables(&self) -> impl Iterator<Item = Variable> + '_ {
        self.columns.iter().map(|(v, _)| *v)
    }

    /// Whether the table has a column for `variable`.
    pub fn has(&self, variable: Variable) -> bool {
        self.columns.iter().any(|(v, _)| *v == variable)
    }

    /// The values of one column.
    pub fn column(&self, variable: Variable) -> Result<&[T], BigvisError> {
        self.columns
            .iter()
            .find(|(v, _)| *v == variable)
            .map(|(_, c)| c.as_slice())
            .ok_or(BigvisError::UnknownVariable {
                variable: variable.name(),
            })
    }

    /// Whether row `i` belongs to a missing slot on any axis.
    #[inline]
    pub fn is_missing_row(&self, i: usize) -> bool {
        self.keys.point(i).iter().any(|c| c.is_nan())
    }

    /// Bin boundaries of axis `dim`.
    pub fn breaks(&self, dim: Dim) -> Result<Vec<T>, BigvisError> {
        Ok(self.binner(dim)?.boundaries())
    }

    /// Bin centres of axis `dim`.
    pub fn midpoints(&self, dim: Dim) -> Result<Vec<T>, BigvisError> {
        let binner = self.binner(dim)?;
        Ok((0..binner.nbins()).map(|i| binner.midpoint(i)).collect())
    }

    fn binner(&self, dim: Dim) -> Result<&Binner<T>, BigvisError> {
        self.keys.check_dim(dim)?;
        self.binners
            .get(dim.index())
            .ok_or(BigvisError::MissingParameter { parameter: "breaks" })
    }

    // ========================================================================
    // Transformations
    // ========================================================================

    /// Divide `variable` by its finite total, so that the column sums to 1.
    ///
    /// A column whose finite total is zero (or not finite) is left unchanged.
    pub fn standardise(&self, variable: Variable) -> Result<Self, BigvisError> {
        let column = self.column(variable)?;
        let total = column
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .fold(T::zero(), |acc, v| acc + v);

        let mut out = self.clone();
        if total.is_finite() && total != T::zero() {
            for (v, c) in out.columns.iter_mut() {
                if *v == variable {
                    c.iter_mut().for_each(|x| *x = *x / total);
                }
            }
        }
        Ok(out)
    }

    /// The table restricted to the given rows, in the given order.
    pub fn select_rows(&self, rows: &[usize]) -> Self {
        Self {
            keys: self.keys.select(rows),
            columns: self
                .columns
                .iter()
                .map(|(v, c)| (*v, rows.iter().map(|&r| c[r]).collect()))
                .collect(),
            summary: self.summary,
            binners: self.binners.clone(),
        }
    }

    /// Keep the densest bins that together hold at least `keep` of the
    /// total count; the missing-slot rows are always dropped.
    pub fn peel(&self, keep: T) -> Result<Self, BigvisError> {
        Validator::validate_fraction(keep)?;
        let counts = self.column(Variable::Count)?;
        let rows = peel_rows(counts, keep, |i| self.is_missing_row(i));
        Ok(self.select_rows(&rows))
    }

    /// Rows that can take part in smoothing `variable`: not in a missing
    /// slot and with a non-NaN value.
    pub fn smoothable_rows(&self, variable: Variable) -> Result<Vec<usize>, BigvisError> {
        let values = self.column(variable)?;
        Ok((0..self.len())
            .filter(|&i| !self.is_missing_row(i) && !values[i].is_nan())
            .collect())
    }

    /// Smoothing input for `variable`.
    ///
    /// When the table has a `.count` column and `variable` is not `.count`
    /// itself, the counts become the grid weights.
    pub fn to_grid(&self, variable: Variable) -> Result<SmoothGrid<T>, BigvisError> {
        let rows = self.smoothable_rows(variable)?;
        let values = self.column(variable)?;
        let weights = match self.column(Variable::Count) {
            Ok(counts) if variable != Variable::Count => {
                Some(rows.iter().map(|&r| counts[r]).collect())
            }
            _ => None,
        };

        SmoothGrid::new(
            self.keys.select(&rows),
            rows.iter().map(|&r| values[r]).collect(),
            weights,
        )
    }
}

// ============================================================================
// Display Implementation
// ============================================================================

impl<T: Float + Display + Debug> Display for CondensedTable<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        writeln!(f, "Summary:")?;
        writeln!(f, "  Statistic:  {} ({})", self.summary.name(), self.class().name())?;
        writeln!(f, "  Rows:       {}", self.len())?;
        writeln!(f, "  Dimensions: {}", self.dims())?;
        writeln!(f)?;

        writeln!(f, "Condensed Data:")?;

        // Header
        for d in 0..self.dims() {
            if d > 0 {
                write!(f, " ")?;
            }
            let label: String = if self.dims() == 1 {
                "x".into()
            } else {
                format!("x{}", d)
            };
            write!(f, "{:>10}", label)?;
        }
        for (v, _) in &self.columns {
            write!(f, " {:>12}", v.name())?;
        }
        writeln!(f)?;

        let line_width = 11 * self.dims() - 1 + 13 * self.columns.len();
        writeln!(f, "{:-<width$}", "", width = line_width)?;

        // Data rows (show first 10 and last 10 if more than 20 rows)
        let n = self.len();
        let rows_to_show: Vec<usize> = if n <= 20 {
            (0..n).collect()
        } else {
            (0..10).chain(n - 10..n).collect()
        };

        let mut prev_idx = 0;
        for (i, &idx) in rows_to_show.iter().enumerate() {
            if i > 0 && idx != prev_idx + 1 {
                writeln!(f, "{:>10}", "...")?;
            }
            prev_idx = idx;

            for (d, c) in self.keys.point(idx).iter().enumerate() {
                if d > 0 {
                    write!(f, " ")?;
                }
                if c.is_nan() {
                    write!(f, "{:>10}", "NA")?;
                } else {
                    write!(f, "{:>10.4}", c)?;
                }
            }
            for (_, col) in &self.columns {
                write!(f, " {:>12.6}", col[idx])?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}
