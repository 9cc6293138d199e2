//! Single-pass binned summaries.
//!
//! ## Purpose
//!
//! This module turns raw observations into a [`CondensedTable`]: every
//! observation is mapped to a bin (one bin index per grouping column), and
//! the bin's accumulator absorbs its value and weight.
//!
//! ## Design notes
//!
//! * **Flat slots**: Each axis `k` contributes a digit in `0..=nbins_k`, with
//!   digit 0 reserved for NaN grouping values. Digits are combined in mixed
//!   radix, first axis fastest, into one flat slot per observation.
//! * **Accumulators**: Count/Sum and Mean/Sd keep one small accumulator per
//!   slot. Median gathers all values of each slot into a [`BinArena`] first.
//! * **Dropping**: Observations outside the bins on any axis (including ±∞)
//!   are dropped and appear in no row.
//!
//! ## Invariants
//!
//! * The table has `Π (nbins_k + 1)` rows.
//! * Σ `.count` equals the total weight of observations not dropped.
//! * Results do not depend on input order, up to floating-point rounding of
//!   the running moments.
//!
//! ## Non-goals
//!
//! * This module does not validate its inputs (see `Validator`).

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::algorithms::accumulator::{
    Accumulator, MomentsAcc, SumAcc, Summary, SummaryClass, Variable, bin_median,
};
use crate::algorithms::binning::{BinIndex, BinSpec, Binner, MAX_BINS, too_many_bins};
use crate::engine::output::CondensedTable;
use crate::engine::validator::Validator;
use crate::primitives::arena::BinArena;
use crate::primitives::errors::BigvisError;
use crate::primitives::grid::Points;

// ============================================================================
// Slot Layout
// ============================================================================

/// Mixed-radix layout of the flat slots of an n-dimensional condense.
#[derive(Debug, Clone)]
pub struct SlotLayout<T> {
    binners: Vec<Binner<T>>,
    strides: Vec<usize>,
    total: usize,
}

impl<T: Float> SlotLayout<T> {
    /// Lay out slots for the given per-axis binners.
    pub fn new(binners: Vec<Binner<T>>) -> Result<Self, BigvisError> {
        let mut strides = Vec::with_capacity(binners.len());
        let mut total = 1usize;
        for b in &binners {
            strides.push(total);
            total = total
                .checked_mul(b.nbins() + 1)
                .filter(|&t| t <= MAX_BINS)
                .ok_or_else(too_many_bins)?;
        }
        Ok(Self {
            binners,
            strides,
            total,
        })
    }

    /// Number of flat slots.
    #[inline]
    pub fn total(&self) -> usize {
        self.total
    }

    /// The per-axis binners.
    #[inline]
    pub fn binners(&self) -> &[Binner<T>] {
        &self.binners
    }

    /// Flat slot of observation `i`, or `None` if it is dropped.
    #[inline]
    pub fn slot_of(&self, xs: &[&[T]], i: usize) -> Option<usize> {
        let mut slot = 0;
        for ((binner, x), &stride) in self.binners.iter().zip(xs).zip(&self.strides) {
            let digit = match binner.index(x[i]) {
                BinIndex::Missing => 0,
                BinIndex::Bin(b) => b + 1,
                BinIndex::OutOfRange => return None,
            };
            slot += digit * stride;
        }
        Some(slot)
    }

    /// Grid coordinates of every slot: the left edge of each axis' bin, NaN
    /// for the missing digit.
    pub fn keys(&self) -> Result<Points<T>, BigvisError> {
        let dims = self.binners.len();
        let mut coords = Vec::with_capacity(self.total * dims);
        for flat in 0..self.total {
            let mut rem = flat;
            for b in &self.binners {
                let radix = b.nbins() + 1;
                let digit = rem % radix;
                rem /= radix;
                coords.push(if digit == 0 {
                    T::nan()
                } else {
                    b.left(digit - 1)
                });
            }
        }
        Points::new(coords, dims)
    }
}

// ============================================================================
// Condense
// ============================================================================

/// Bin `xs` (one slice per grouping column) and summarise `z` per bin.
///
/// `z` may be omitted for [`Summary::Count`]; `w` defaults to unit weights.
pub fn condense<T: Float>(
    xs: &[&[T]],
    z: Option<&[T]>,
    w: Option<&[T]>,
    specs: &[BinSpec<T>],
    summary: Summary,
) -> Result<CondensedTable<T>, BigvisError> {
    Validator::validate_condense(xs, z, w, specs, summary)?;

    let binners = specs
        .iter()
        .zip(xs)
        .map(|(spec, x)| spec.resolve(x))
        .collect::<Result<Vec<_>, _>>()?;
    let layout = SlotLayout::new(binners)?;

    let n = xs[0].len();
    let value = |i: usize| z.map_or_else(T::zero, |z| z[i]);
    let weight = |i: usize| w.map_or_else(T::one, |w| w[i]);

    let columns = match summary.class() {
        SummaryClass::Sum => {
            let power = if summary == Summary::Sum { 1 } else { 0 };
            let accs = accumulate(&layout, xs, n, SumAcc::new(power), value, weight);
            columns_from(&accs, summary)
        }
        SummaryClass::Moments => {
            let order = if summary == Summary::Sd { 2 } else { 1 };
            let accs = accumulate(&layout, xs, n, MomentsAcc::new(order), value, weight);
            columns_from(&accs, summary)
        }
        SummaryClass::Median => {
            // Validated above: Median always has values
            let values = z.ok_or(BigvisError::MissingParameter { parameter: "z" })?;
            let mut arena = BinArena::build(layout.total(), n, values, |i| layout.slot_of(xs, i));
            let medians = (0..layout.total())
                .map(|s| bin_median(arena.bin_mut(s)))
                .collect();
            vec![(Variable::Median, medians)]
        }
    };

    let keys = layout.keys()?;
    Ok(CondensedTable::new(
        keys,
        columns,
        summary,
        layout.binners().to_vec(),
    ))
}

/// Run every observation through the accumulator of its slot.
fn accumulate<T, A, V, W>(
    layout: &SlotLayout<T>,
    xs: &[&[T]],
    n: usize,
    init: A,
    value: V,
    weight: W,
) -> Vec<A>
where
    T: Float,
    A: Accumulator<T>,
    V: Fn(usize) -> T,
    W: Fn(usize) -> T,
{
    let mut accs = vec![init; layout.total()];
    for i in 0..n {
        if let Some(slot) = layout.slot_of(xs, i) {
            accs[slot].push(value(i), weight(i));
        }
    }
    accs
}

/// Columns of a count/sum or moments table.
fn columns_from<T: Float, A: Accumulator<T>>(
    accs: &[A],
    summary: Summary,
) -> Vec<(Variable, Vec<T>)> {
    summary
        .variables()
        .iter()
        .map(|&v| {
            let col = match v {
                Variable::Count => accs.iter().map(|a| a.count()).collect(),
                _ => accs.iter().map(|a| a.finalize()).collect(),
            };
            (v, col)
        })
        .collect()
}
