//! Leave-one-out cross-validation for bandwidth selection.
//!
//! ## Purpose
//!
//! This module scores a smoother on a grid by leaving each point out in turn,
//! predicting it from the remaining points, and reporting the root mean
//! squared prediction error. Scoring several candidate bandwidths this way
//! lets callers pick the one that generalises best.
//!
//! ## Design notes
//!
//! * **Callback**: The smoothing itself is supplied by the caller as a
//!   closure, so this module knows nothing about estimators or strategies.
//! * **Prediction grid**: A factored n-D smoother needs the whole output grid
//!   to form its later passes, so it can ask for predictions on every grid
//!   point and the held-out one is read off; a 1-D or joint smoother only
//!   needs the held-out point itself.
//! * **Weights**: Squared errors are averaged with the grid weights, so a
//!   dense bin counts as much as the observations inside it.
//!
//! ## Invariants
//!
//! * Training and test sets are disjoint in each fold.
//! * Points whose value or prediction is NaN do not contribute.
//!
//! ## Non-goals
//!
//! * This module does not generate bandwidths beyond a geometric helper.
//! * No claim of statistical optimality is made for the selected bandwidth.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use core::cmp::Ordering::Equal;
use num_traits::Float;

// Internal dependencies
use crate::primitives::errors::BigvisError;
use crate::primitives::grid::{Points, SmoothGrid};

// ============================================================================
// Prediction Grid
// ============================================================================

/// Where the smoother is asked for predictions in each fold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PredictOn {
    /// Only the held-out point.
    HeldOut,

    /// Every point of the full grid; the held-out one is read off.
    FullGrid,
}

// ============================================================================
// Leave-one-out RMSE
// ============================================================================

/// Leave-one-out root mean squared error of `smoother` on `grid`.
///
/// Returns NaN when no point could be predicted.
pub fn rmse_cv<T, F>(
    grid: &SmoothGrid<T>,
    predict_on: PredictOn,
    mut smoother: F,
) -> Result<T, BigvisError>
where
    T: Float,
    F: FnMut(&SmoothGrid<T>, &Points<T>) -> Result<Vec<T>, BigvisError>,
{
    let n = grid.len();
    if n < 2 {
        return Err(BigvisError::EmptyInput);
    }

    let mut sse = T::zero();
    let mut total_weight = T::zero();
    let mut train_rows: Vec<usize> = Vec::with_capacity(n - 1);

    for i in 0..n {
        let actual = grid.values()[i];
        let weight = grid.weight(i);
        if actual.is_nan() || weight <= T::zero() {
            continue;
        }

        let train = build_training_grid(grid, i, &mut train_rows)?;
        let predicted = match predict_on {
            PredictOn::HeldOut => {
                let out = grid.points().select(&[i]);
                smoother(&train, &out)?[0]
            }
            PredictOn::FullGrid => smoother(&train, grid.points())?[i],
        };

        if predicted.is_nan() {
            continue;
        }
        let err = actual - predicted;
        sse = sse + weight * err * err;
        total_weight = total_weight + weight;
    }

    if total_weight > T::zero() {
        Ok((sse / total_weight).sqrt())
    } else {
        Ok(T::nan())
    }
}

/// The grid without row `held_out`; `rows` is reused scratch.
fn build_training_grid<T: Float>(
    grid: &SmoothGrid<T>,
    held_out: usize,
    rows: &mut Vec<usize>,
) -> Result<SmoothGrid<T>, BigvisError> {
    rows.clear();
    rows.extend((0..grid.len()).filter(|&r| r != held_out));

    SmoothGrid::new(
        grid.points().select(rows),
        rows.iter().map(|&r| grid.values()[r]).collect(),
        grid.weights()
            .map(|w| rows.iter().map(|&r| w[r]).collect()),
    )
}

// ============================================================================
// Bandwidth Selection
// ============================================================================

/// Score every candidate with `score` and return the best with all scores.
///
/// NaN scores never win; if every score is NaN the first candidate is
/// returned.
pub fn best_bandwidth<T, F>(
    candidates: &[Vec<T>],
    mut score: F,
) -> Result<(Vec<T>, Vec<T>), BigvisError>
where
    T: Float,
    F: FnMut(&[T]) -> Result<T, BigvisError>,
{
    if candidates.is_empty() {
        return Err(BigvisError::MissingParameter {
            parameter: "bandwidth candidates",
        });
    }

    let scores = candidates
        .iter()
        .map(|h| score(h.as_slice()))
        .collect::<Result<Vec<T>, _>>()?;

    let best_idx = scores
        .iter()
        .enumerate()
        .filter(|(_, s)| !s.is_nan())
        .min_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap_or(Equal))
        .map(|(i, _)| i)
        .unwrap_or(0);

    Ok((candidates[best_idx].clone(), scores))
}

/// `n` geometrically spaced values from `lo` to `hi` inclusive.
pub fn bandwidth_candidates<T: Float>(lo: T, hi: T, n: usize) -> Result<Vec<T>, BigvisError> {
    for h in [lo, hi] {
        if !h.is_finite() || h <= T::zero() {
            return Err(BigvisError::InvalidBandwidth(h.to_f64().unwrap_or(f64::NAN)));
        }
    }
    match n {
        0 => Ok(Vec::new()),
        1 => Ok(vec![lo]),
        _ => {
            let steps = T::from(n - 1).unwrap_or_else(T::one);
            let ratio = (hi / lo).ln() / steps;
            let mut out: Vec<T> = (0..n)
                .map(|i| lo * (ratio * T::from(i).unwrap_or_else(T::zero)).exp())
                .collect();
            // Land exactly on the upper end
            out[n - 1] = hi;
            Ok(out)
        }
    }
}
