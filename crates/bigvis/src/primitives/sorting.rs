//! Sorting utilities for one-dimensional smoothing input.
//!
//! ## Purpose
//!
//! The 1-D kernel smoother locates the support of a bounded kernel with a
//! binary search, which needs the input sorted by coordinate. This module
//! sorts coordinate, value and weight columns together.
//!
//! ## Design notes
//!
//! * **Stability**: Uses stable sorting to preserve the relative order of equal x-values.
//! * **Fast path**: Already sorted input is copied without sorting.
//! * **Weights**: Missing weights are materialised as ones so the smoother has
//!   a single code path.
//!
//! ## Invariants
//!
//! * Sorted x-values are non-decreasing (NaN compares equal and stays in place).
//! * All three output columns have the same length.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

// External dependencies
use core::cmp::Ordering;
use num_traits::Float;

// ============================================================================
// Data Structures
// ============================================================================

/// Coordinate, value and weight columns sorted by coordinate.
#[derive(Debug, Clone, PartialEq)]
pub struct SortedSeries<T> {
    /// Sorted coordinates.
    pub x: Vec<T>,

    /// Values reordered to match `x`.
    pub values: Vec<T>,

    /// Weights reordered to match `x` (ones when none were given).
    pub weights: Vec<T>,
}

impl<T: Float> SortedSeries<T> {
    /// Number of points.
    #[inline]
    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// Returns `true` if the series is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }
}

// ============================================================================
// Sorting Functions
// ============================================================================

/// Sort coordinate, value and weight columns by coordinate.
pub fn sort_series<T: Float>(x: &[T], values: &[T], weights: Option<&[T]>) -> SortedSeries<T> {
    let n = x.len();
    let weight_at = |i: usize| weights.map_or_else(T::one, |w| w[i]);

    // Fast path: check if data is already sorted by x
    if x.windows(2).all(|w| w[0] <= w[1]) {
        return SortedSeries {
            x: x.to_vec(),
            values: values.to_vec(),
            weights: (0..n).map(weight_at).collect(),
        };
    }

    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| x[a].partial_cmp(&x[b]).unwrap_or(Ordering::Equal));

    SortedSeries {
        x: order.iter().map(|&i| x[i]).collect(),
        values: order.iter().map(|&i| values[i]).collect(),
        weights: order.iter().map(|&i| weight_at(i)).collect(),
    }
}
