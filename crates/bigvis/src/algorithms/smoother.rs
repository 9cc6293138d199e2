//! One-dimensional kernel estimators.
//!
//! ## Purpose
//!
//! This module computes a single smoothed value at an output coordinate `x0`
//! from a sorted series of `(x, value, weight)` triples, using one of three
//! estimators:
//!
//! * **Mean**: `Σ K(x_i - x0) w_i v_i / Σ K(x_i - x0) w_i`.
//! * **Regression**: weighted local line `a + b (x_i - x0)`; the intercept `a`
//!   is the estimate.
//! * **RobustRegression**: the local line refitted with bisquare (or other)
//!   robustness weights derived from its own residuals.
//!
//! ## Design notes
//!
//! * **Windowing**: For bounded kernels only the points within one bandwidth
//!   of `x0` are visited, found by binary search on the sorted coordinates.
//! * **Fallbacks**: A regression whose x-spread is degenerate returns the
//!   kernel mean; a neighbourhood without weight returns NaN.
//! * **Buffers**: All per-estimate scratch lives in a reusable `LocalBuffer`.
//!
//! ## Invariants
//!
//! * Every estimate is total: it yields a value (possibly NaN), never an error.
//! * Points with NaN values are ignored.
//! * The returned weight is the kernel weight mass Σ K w of the neighbourhood.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::algorithms::regression::{LinearFit, WLSSolver};
use crate::algorithms::robustness::RobustnessMethod;
use crate::math::kernel::WeightFunction;
use crate::math::scaling::ScalingMethod;
use crate::primitives::sorting::SortedSeries;

// ============================================================================
// Smoothing Method
// ============================================================================

/// Estimator used at each output point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SmoothMethod {
    /// Kernel-weighted mean.
    #[default]
    Mean,

    /// Kernel-weighted local linear regression.
    Regression,

    /// Local linear regression with iterative robustness reweighting.
    RobustRegression,
}

impl SmoothMethod {
    /// Get the name of the method.
    pub const fn name(&self) -> &'static str {
        match self {
            SmoothMethod::Mean => "mean",
            SmoothMethod::Regression => "regression",
            SmoothMethod::RobustRegression => "robust_regression",
        }
    }
}

// ============================================================================
// Estimate
// ============================================================================

/// A smoothed value and the kernel weight mass behind it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Estimate<T> {
    /// Smoothed value (NaN if no input point carries weight).
    pub value: T,

    /// Σ K(x_i - x0) w_i over the neighbourhood.
    pub weight: T,
}

impl<T: Float> Estimate<T> {
    /// The estimate of an empty neighbourhood.
    #[inline]
    pub fn empty() -> Self {
        Self {
            value: T::nan(),
            weight: T::zero(),
        }
    }
}

// ============================================================================
// Working Buffers
// ============================================================================

/// Reusable scratch space for local estimates.
#[derive(Debug, Clone)]
pub struct LocalBuffer<T> {
    dx: Vec<T>,
    values: Vec<T>,
    kernel: Vec<T>,
    combined: Vec<T>,
    robust: Vec<T>,
    residuals: Vec<T>,
    scratch: Vec<T>,
}

impl<T> Default for LocalBuffer<T> {
    fn default() -> Self {
        Self {
            dx: Vec::new(),
            values: Vec::new(),
            kernel: Vec::new(),
            combined: Vec::new(),
            robust: Vec::new(),
            residuals: Vec::new(),
            scratch: Vec::new(),
        }
    }
}

impl<T: Float> LocalBuffer<T> {
    /// Buffers pre-sized for neighbourhoods of up to `capacity` points.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            dx: Vec::with_capacity(capacity),
            values: Vec::with_capacity(capacity),
            kernel: Vec::with_capacity(capacity),
            combined: Vec::with_capacity(capacity),
            robust: Vec::with_capacity(capacity),
            residuals: Vec::with_capacity(capacity),
            scratch: Vec::with_capacity(capacity),
        }
    }

    fn clear(&mut self) {
        self.dx.clear();
        self.values.clear();
        self.kernel.clear();
    }
}

// ============================================================================
// Local Smoother
// ============================================================================

/// Kernel, estimator and robustness settings for local estimates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalSmoother<T> {
    /// Kernel shape.
    pub kernel: WeightFunction,

    /// Estimator.
    pub method: SmoothMethod,

    /// Robustness reweightings after the initial fit (RobustRegression only).
    pub iterations: usize,

    /// Stop reweighting once the estimate moves by less than this.
    pub tolerance: Option<T>,

    /// Robustness weight function.
    pub robustness_method: RobustnessMethod,

    /// Residual scale estimator.
    pub scaling_method: ScalingMethod,
}

impl<T: Float> Default for LocalSmoother<T> {
    fn default() -> Self {
        Self {
            kernel: WeightFunction::default(),
            method: SmoothMethod::default(),
            iterations: 3,
            tolerance: None,
            robustness_method: RobustnessMethod::default(),
            scaling_method: ScalingMethod::default(),
        }
    }
}

impl<T: WLSSolver> LocalSmoother<T> {
    /// Smoothed value at `x0` with bandwidth `h`.
    pub fn estimate(
        &self,
        series: &SortedSeries<T>,
        x0: T,
        h: T,
        buf: &mut LocalBuffer<T>,
    ) -> Estimate<T> {
        let (lo, hi) = self.window(&series.x, x0, h);
        buf.clear();

        // Gather the neighbourhood, centred on x0
        let mut mass = T::zero();
        let mut scale = T::zero();
        for i in lo..hi {
            let v = series.values[i];
            if v.is_nan() {
                continue;
            }
            let dx = series.x[i] - x0;
            let k = self.kernel.weight_at(dx, h) * series.weights[i];
            if k > T::zero() {
                buf.dx.push(dx);
                buf.values.push(v);
                buf.kernel.push(k);
                mass = mass + k;
                scale = scale.max(dx.abs());
            }
        }

        if !(mass > T::zero()) {
            return Estimate::empty();
        }

        let value = match self.method {
            SmoothMethod::Mean => Self::kernel_mean(&buf.values, &buf.kernel, mass),
            SmoothMethod::Regression => {
                LinearFit::fit_wls(&buf.dx, &buf.values, &buf.kernel, scale)
                    .map_or_else(T::nan, |fit| fit.intercept())
            }
            SmoothMethod::RobustRegression => self.robust_fit(buf, scale),
        };

        Estimate {
            value,
            weight: mass,
        }
    }

    /// Index range `[lo, hi)` of points that can carry weight at `x0`.
    fn window(&self, x: &[T], x0: T, h: T) -> (usize, usize) {
        if !self.kernel.is_bounded() {
            return (0, x.len());
        }
        let lo = x.partition_point(|&xi| xi < x0 - h);
        let hi = x.partition_point(|&xi| xi <= x0 + h);
        (lo, hi.max(lo))
    }

    #[inline]
    fn kernel_mean(values: &[T], kernel: &[T], mass: T) -> T {
        values
            .iter()
            .zip(kernel)
            .fold(T::zero(), |acc, (&v, &k)| acc + v * k)
            / mass
    }

    /// Iteratively reweighted local line; returns its intercept.
    fn robust_fit(&self, buf: &mut LocalBuffer<T>, scale: T) -> T {
        let n = buf.dx.len();
        buf.robust.clear();
        buf.robust.resize(n, T::one());
        buf.combined.clear();
        buf.combined.extend_from_slice(&buf.kernel);
        buf.residuals.resize(n, T::zero());
        buf.scratch.resize(n, T::zero());

        let Some(mut fit) = LinearFit::fit_wls(&buf.dx, &buf.values, &buf.combined, scale)
        else {
            return T::nan();
        };
        let mut value = fit.intercept();

        for _ in 0..self.iterations {
            for i in 0..n {
                buf.residuals[i] = buf.values[i] - fit.predict(buf.dx[i]);
            }
            self.robustness_method.apply_robustness_weights(
                &buf.residuals,
                &mut buf.robust,
                self.scaling_method,
                &mut buf.scratch,
            );
            for i in 0..n {
                buf.combined[i] = buf.kernel[i] * buf.robust[i];
            }

            // Every point rejected: keep the last usable fit
            let Some(next) = LinearFit::fit_wls(&buf.dx, &buf.values, &buf.combined, scale)
            else {
                break;
            };
            let next_value = next.intercept();
            let change = (next_value - value).abs();
            fit = next;
            value = next_value;

            if let Some(tol) = self.tolerance {
                if change <= tol {
                    break;
                }
            }
        }

        value
    }
}
