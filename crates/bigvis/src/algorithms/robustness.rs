//! Robustness weights for iteratively reweighted local regression.
//!
//! ## Purpose
//!
//! After a local line is fitted, the residuals of the points in its
//! neighbourhood are turned into bounded-influence weights. Refitting with
//! those weights limits how far a single outlying bin can pull the estimate.
//!
//! ## Design notes
//!
//! * **Scale**: Residuals are scaled by a robust estimate (MAR by default),
//!   falling back to the mean absolute residual when that collapses to zero.
//! * **Methods**: Bisquare (default), Huber and Talwar.
//!
//! ## Invariants
//!
//! * Robustness weights are in [0, 1].
//! * A zero residual scale leaves every weight at 1.
//!
//! ## Non-goals
//!
//! * This module does not fit lines or decide the number of iterations.

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::math::scaling::ScalingMethod;

// ============================================================================
// Robustness Method
// ============================================================================

/// Robustness weighting method for outlier downweighting.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum RobustnessMethod {
    /// Tukey's bisquare with c = 6 times the residual scale.
    #[default]
    Bisquare,

    /// Huber weights with c = 1.345; never rejects a point completely.
    Huber,

    /// Hard threshold at c = 2.5.
    Talwar,
}

impl RobustnessMethod {
    const BISQUARE_C: f64 = 6.0;
    const HUBER_C: f64 = 1.345;
    const TALWAR_C: f64 = 2.5;

    /// If the robust scale is below this fraction of the mean absolute
    /// residual, the mean absolute residual is used instead.
    const SCALE_THRESHOLD: f64 = 1e-7;

    /// Get the name of the method.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Bisquare => "Bisquare",
            Self::Huber => "Huber",
            Self::Talwar => "Talwar",
        }
    }

    /// Overwrite `weights` with robustness weights derived from `residuals`.
    ///
    /// `scratch` must be at least as long as `residuals`.
    pub fn apply_robustness_weights<T: Float>(
        &self,
        residuals: &[T],
        weights: &mut [T],
        scaling_method: ScalingMethod,
        scratch: &mut [T],
    ) {
        if residuals.is_empty() {
            return;
        }

        let scale = Self::compute_scale(residuals, scaling_method, scratch);
        let c = T::from(match self {
            Self::Bisquare => Self::BISQUARE_C,
            Self::Huber => Self::HUBER_C,
            Self::Talwar => Self::TALWAR_C,
        })
        .unwrap_or_else(T::one);

        for (w, &r) in weights.iter_mut().zip(residuals) {
            *w = if scale > T::zero() {
                self.weight(r / scale, c)
            } else {
                T::one()
            };
        }
    }

    /// Robust residual scale with a mean-absolute fallback.
    fn compute_scale<T: Float>(
        residuals: &[T],
        scaling_method: ScalingMethod,
        scratch: &mut [T],
    ) -> T {
        let n = residuals.len();
        let scratch = &mut scratch[..n];
        scratch.copy_from_slice(residuals);
        let scale = scaling_method.compute(scratch);

        let mean_abs = residuals
            .iter()
            .fold(T::zero(), |acc, r| acc + r.abs())
            / T::from(n).unwrap_or_else(T::one);

        let threshold = T::from(Self::SCALE_THRESHOLD).unwrap_or_else(T::zero) * mean_abs;
        if scale <= threshold { mean_abs } else { scale }
    }

    /// Weight of a scaled residual `u` with tuning constant `c`.
    #[inline]
    fn weight<T: Float>(&self, u: T, c: T) -> T {
        let u = u.abs();
        match self {
            Self::Bisquare => {
                if u >= c {
                    T::zero()
                } else {
                    let t = u / c;
                    let tmp = T::one() - t * t;
                    tmp * tmp
                }
            }
            Self::Huber => {
                if u <= c {
                    T::one()
                } else {
                    c / u
                }
            }
            Self::Talwar => {
                if u <= c {
                    T::one()
                } else {
                    T::zero()
                }
            }
        }
    }
}
