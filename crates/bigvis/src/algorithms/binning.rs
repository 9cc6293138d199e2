//! Bin indexing for fixed-width and break-defined bins.
//!
//! ## Purpose
//!
//! This module maps raw scalar values to integer bin indices. Bins are the
//! half-open intervals `[b_i, b_{i+1})` of a partition of the real line,
//! described either by a width and an origin or by explicit boundaries.
//!
//! ## Design notes
//!
//! * **Closed dispatch**: [`Binner`] is an enum over the two strategies, so
//!   every caller matches exhaustively instead of going through a trait object.
//! * **Fixed width**: `idx = floor((x - origin) / width)`; the bin count is
//!   derived from the largest finite observation so that it always lands in
//!   the last bin.
//! * **Breaks**: Binary search over the boundaries; the final boundary is
//!   closed so `x == breaks[last]` belongs to the last bin.
//!
//! ## Invariants
//!
//! * `Bin(i)` always satisfies `i < nbins()`.
//! * A bin layout never exceeds [`MAX_BINS`] bins; larger layouts are
//!   rejected instead of silently truncated.
//! * Values below the origin or outside the breaks are never clamped.
//! * NaN is reported as `Missing`, ±∞ as `OutOfRange`.
//!
//! ## Non-goals
//!
//! * This module does not choose widths or origins.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::{format, vec::Vec};
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::primitives::errors::BigvisError;

/// Largest number of bins (or flat slots) a condense may lay out.
pub const MAX_BINS: usize = 1 << 24;

/// Error for a layout that would need more than [`MAX_BINS`] bins.
pub(crate) fn too_many_bins() -> BigvisError {
    BigvisError::InvalidBinSpec(format!("too many bins (more than {MAX_BINS})"))
}

// ============================================================================
// Bin Specification
// ============================================================================

/// Description of a partition of one axis into bins.
#[derive(Debug, Clone, PartialEq)]
pub enum BinSpec<T> {
    /// Bins of equal `width` starting at `origin`.
    Fixed {
        /// Width of every bin (> 0).
        width: T,
        /// Left edge of the first bin.
        origin: T,
    },

    /// Bins delimited by strictly increasing boundaries (at least two).
    Breaks(Vec<T>),
}

impl<T: Float> BinSpec<T> {
    /// Fixed-width bins, validated.
    pub fn fixed(width: T, origin: T) -> Result<Self, BigvisError> {
        let spec = Self::Fixed { width, origin };
        spec.validate()?;
        Ok(spec)
    }

    /// Break-defined bins, validated.
    pub fn breaks(breaks: Vec<T>) -> Result<Self, BigvisError> {
        let spec = Self::Breaks(breaks);
        spec.validate()?;
        Ok(spec)
    }

    /// Check that the specification describes a proper partition.
    pub fn validate(&self) -> Result<(), BigvisError> {
        match self {
            Self::Fixed { width, origin } => {
                if !width.is_finite() || *width <= T::zero() {
                    return Err(BigvisError::InvalidBinSpec(format!(
                        "width must be positive and finite, got {}",
                        width.to_f64().unwrap_or(f64::NAN)
                    )));
                }
                if !origin.is_finite() {
                    return Err(BigvisError::InvalidBinSpec(format!(
                        "origin must be finite, got {}",
                        origin.to_f64().unwrap_or(f64::NAN)
                    )));
                }
                Ok(())
            }
            Self::Breaks(breaks) => {
                if breaks.len() < 2 {
                    return Err(BigvisError::InvalidBinSpec(format!(
                        "need at least 2 breaks, got {}",
                        breaks.len()
                    )));
                }
                if let Some(b) = breaks.iter().find(|b| !b.is_finite()) {
                    return Err(BigvisError::InvalidBinSpec(format!(
                        "breaks must be finite, got {}",
                        b.to_f64().unwrap_or(f64::NAN)
                    )));
                }
                if let Some(i) = breaks.windows(2).position(|w| w[0] >= w[1]) {
                    return Err(BigvisError::InvalidBinSpec(format!(
                        "breaks must be strictly increasing (breaks[{}] >= breaks[{}])",
                        i,
                        i + 1
                    )));
                }
                Ok(())
            }
        }
    }

    /// Validate and turn the specification into an indexer for data `x`.
    ///
    /// Fixed-width bins take their count from the largest finite value of `x`.
    pub fn resolve(&self, x: &[T]) -> Result<Binner<T>, BigvisError> {
        self.validate()?;
        Ok(match self {
            Self::Fixed { width, origin } => {
                Binner::Fixed(FixedBins::from_data(*width, *origin, x)?)
            }
            Self::Breaks(breaks) => Binner::Breaks(BreakBins {
                breaks: breaks.clone(),
            }),
        })
    }
}

// ============================================================================
// Bin Index
// ============================================================================

/// Where a value lands relative to the bins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinIndex {
    /// The value is NaN.
    Missing,

    /// The value lies in bin `i` (zero-based).
    Bin(usize),

    /// The value lies outside every bin.
    OutOfRange,
}

// ============================================================================
// Fixed-width Bins
// ============================================================================

/// Fixed-width bins with a known count.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedBins<T> {
    width: T,
    origin: T,
    nbins: usize,
}

impl<T: Float> FixedBins<T> {
    /// Fixed-width bins with an explicit count.
    pub fn new(width: T, origin: T, nbins: usize) -> Result<Self, BigvisError> {
        BinSpec::Fixed { width, origin }.validate()?;
        if nbins > MAX_BINS {
            return Err(too_many_bins());
        }
        Ok(Self {
            width,
            origin,
            nbins,
        })
    }

    /// Fixed-width bins just wide enough to cover the largest finite `x`.
    pub fn from_data(width: T, origin: T, x: &[T]) -> Result<Self, BigvisError> {
        let max = x
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .fold(T::neg_infinity(), T::max);

        let nbins = if max.is_finite() && max >= origin {
            // Index of the last bin; unrepresentable spans are too many bins
            let last = ((max - origin) / width)
                .floor()
                .to_usize()
                .filter(|&i| i < MAX_BINS)
                .ok_or_else(too_many_bins)?;
            last + 1
        } else {
            0
        };
        Self::new(width, origin, nbins)
    }

    /// Index of the bin containing `x`.
    #[inline]
    pub fn index(&self, x: T) -> BinIndex {
        if x.is_nan() {
            return BinIndex::Missing;
        }
        let pos = ((x - self.origin) / self.width).floor();
        if !pos.is_finite() || pos < T::zero() {
            return BinIndex::OutOfRange;
        }
        match pos.to_usize() {
            Some(i) if i < self.nbins => BinIndex::Bin(i),
            _ => BinIndex::OutOfRange,
        }
    }

    /// Bin width.
    #[inline]
    pub fn width(&self) -> T {
        self.width
    }

    /// Left edge of the first bin.
    #[inline]
    pub fn origin(&self) -> T {
        self.origin
    }
}

// ============================================================================
// Break-defined Bins
// ============================================================================

/// Bins delimited by explicit boundaries.
#[derive(Debug, Clone, PartialEq)]
pub struct BreakBins<T> {
    breaks: Vec<T>,
}

impl<T: Float> BreakBins<T> {
    /// Break-defined bins, validated.
    pub fn new(breaks: Vec<T>) -> Result<Self, BigvisError> {
        BinSpec::Breaks(breaks.clone()).validate()?;
        Ok(Self { breaks })
    }

    /// Index of the bin containing `x`.
    #[inline]
    pub fn index(&self, x: T) -> BinIndex {
        if x.is_nan() {
            return BinIndex::Missing;
        }
        let last = self.breaks.len() - 1;
        if x < self.breaks[0] || x > self.breaks[last] {
            return BinIndex::OutOfRange;
        }
        if x == self.breaks[last] {
            return BinIndex::Bin(last - 1);
        }
        // Number of boundaries <= x, at least 1 since x >= breaks[0]
        BinIndex::Bin(self.breaks.partition_point(|&b| b <= x) - 1)
    }

    /// The boundaries.
    #[inline]
    pub fn boundaries(&self) -> &[T] {
        &self.breaks
    }
}

// ============================================================================
// Binner
// ============================================================================

/// A resolved bin indexer for one axis.
#[derive(Debug, Clone, PartialEq)]
pub enum Binner<T> {
    /// Fixed-width bins.
    Fixed(FixedBins<T>),

    /// Break-defined bins.
    Breaks(BreakBins<T>),
}

impl<T: Float> Binner<T> {
    /// Index of the bin containing `x`.
    #[inline]
    pub fn index(&self, x: T) -> BinIndex {
        match self {
            Self::Fixed(b) => b.index(x),
            Self::Breaks(b) => b.index(x),
        }
    }

    /// Number of bins.
    #[inline]
    pub fn nbins(&self) -> usize {
        match self {
            Self::Fixed(b) => b.nbins,
            Self::Breaks(b) => b.breaks.len() - 1,
        }
    }

    /// Left edge of bin `i`.
    #[inline]
    pub fn left(&self, i: usize) -> T {
        match self {
            Self::Fixed(b) => b.origin + b.width * T::from(i).unwrap_or_else(T::zero),
            Self::Breaks(b) => b.breaks[i],
        }
    }

    /// Right edge of bin `i`.
    #[inline]
    pub fn right(&self, i: usize) -> T {
        match self {
            Self::Fixed(_) => self.left(i + 1),
            Self::Breaks(b) => b.breaks[i + 1],
        }
    }

    /// Centre of bin `i`.
    #[inline]
    pub fn midpoint(&self, i: usize) -> T {
        (self.left(i) + self.right(i)) / (T::one() + T::one())
    }

    /// All `nbins + 1` boundaries (empty when there are no bins).
    pub fn boundaries(&self) -> Vec<T> {
        let n = self.nbins();
        if n == 0 {
            return Vec::new();
        }
        let mut out: Vec<T> = (0..n).map(|i| self.left(i)).collect();
        out.push(self.right(n - 1));
        out
    }
}
