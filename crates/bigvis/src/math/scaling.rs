//! Robust scale estimation and exact medians.
//!
//! This module provides the quickselect median shared by the Median summary
//! and the robust local regression, plus the residual scale estimators used
//! to tune robustness weights.

// External dependencies
use core::cmp::Ordering::Equal;
use num_traits::Float;

/// Method for measuring the scale of residuals.
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ScalingMethod {
    /// Median Absolute Residual: `median(|r|)`.
    #[default]
    MAR,

    /// Median Absolute Deviation: `median(|r - median(r)|)`.
    MAD,
}

impl ScalingMethod {
    /// Compute the scale of the given values; `vals` is used as scratch.
    pub fn compute<T: Float>(&self, vals: &mut [T]) -> T {
        if vals.is_empty() {
            return T::zero();
        }
        match self {
            Self::MAR => {
                for val in vals.iter_mut() {
                    *val = val.abs();
                }
                median_inplace(vals)
            }
            Self::MAD => {
                let median = median_inplace(vals);
                for val in vals.iter_mut() {
                    *val = (*val - median).abs();
                }
                median_inplace(vals)
            }
        }
    }
}

/// Exact median by quickselect, reordering `vals`.
///
/// Even lengths average the two middle values; an empty slice yields NaN.
pub fn median_inplace<T: Float>(vals: &mut [T]) -> T {
    let n = vals.len();
    if n == 0 {
        return T::nan();
    }

    let mid = n / 2;
    vals.select_nth_unstable_by(mid, |a, b| a.partial_cmp(b).unwrap_or(Equal));
    let upper = vals[mid];

    if n % 2 == 1 {
        return upper;
    }

    // The lower middle is the largest value left of the pivot
    let lower = vals[..mid].iter().copied().fold(T::neg_infinity(), T::max);
    (lower + upper) / (T::one() + T::one())
}
