//! Weighted least-squares line fits for local regression.
//!
//! ## Purpose
//!
//! This module fits `y = a + b * x` by weighted least squares. The smoother
//! calls it with coordinates already centred on the output point, so the
//! intercept of the fit is the smoothed value there.
//!
//! ## Design notes
//!
//! * **Single pass**: The five weighted sums are accumulated in one sweep;
//!   f64 and f32 use `wide` SIMD lanes, other `Float`s a scalar loop.
//! * **Degenerate systems**: When the weighted spread of x vanishes (all weight
//!   on one coordinate, or fewer than two weighted points) the slope is set to
//!   zero, which makes the prediction the weighted mean.
//!
//! ## Invariants
//!
//! * A fit is only produced when the total weight is positive.
//! * Predictions are formed around the weighted means for stability.

// External dependencies
use num_traits::Float;
use wide::{f32x4, f64x2};

// ============================================================================
// Weighted Sums
// ============================================================================

/// Weighted sums needed for a least-squares line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WlsSums<T> {
    /// Σw
    pub w: T,
    /// Σw·x
    pub wx: T,
    /// Σw·y
    pub wy: T,
    /// Σw·x²
    pub wxx: T,
    /// Σw·x·y
    pub wxy: T,
}

impl<T: Float> WlsSums<T> {
    /// All-zero sums.
    pub fn zero() -> Self {
        Self {
            w: T::zero(),
            wx: T::zero(),
            wy: T::zero(),
            wxx: T::zero(),
            wxy: T::zero(),
        }
    }
}

/// Scalar accumulation of the weighted sums.
#[inline]
pub fn accumulate_wls_scalar<T: Float>(x: &[T], y: &[T], weights: &[T]) -> WlsSums<T> {
    let mut s = WlsSums::zero();
    for ((&xi, &yi), &wi) in x.iter().zip(y).zip(weights) {
        let wx = wi * xi;
        s.w = s.w + wi;
        s.wx = s.wx + wx;
        s.wy = s.wy + wi * yi;
        s.wxx = s.wxx + wx * xi;
        s.wxy = s.wxy + wx * yi;
    }
    s
}

/// SIMD accumulation of the weighted sums (f64, two lanes).
#[inline]
pub fn accumulate_wls_simd_f64(x: &[f64], y: &[f64], weights: &[f64]) -> WlsSums<f64> {
    let n = x.len().min(y.len()).min(weights.len());
    let split = n - n % 2;

    let mut s_w = f64x2::splat(0.0);
    let mut s_wx = f64x2::splat(0.0);
    let mut s_wy = f64x2::splat(0.0);
    let mut s_wxx = f64x2::splat(0.0);
    let mut s_wxy = f64x2::splat(0.0);

    for i in (0..split).step_by(2) {
        let w = f64x2::new([weights[i], weights[i + 1]]);
        let xv = f64x2::new([x[i], x[i + 1]]);
        let yv = f64x2::new([y[i], y[i + 1]]);
        let wx = w * xv;

        s_w += w;
        s_wx += wx;
        s_wy += w * yv;
        s_wxx += wx * xv;
        s_wxy += wx * yv;
    }

    let tail = accumulate_wls_scalar(&x[split..n], &y[split..n], &weights[split..n]);
    WlsSums {
        w: s_w.reduce_add() + tail.w,
        wx: s_wx.reduce_add() + tail.wx,
        wy: s_wy.reduce_add() + tail.wy,
        wxx: s_wxx.reduce_add() + tail.wxx,
        wxy: s_wxy.reduce_add() + tail.wxy,
    }
}

/// SIMD accumulation of the weighted sums (f32, four lanes).
#[inline]
pub fn accumulate_wls_simd_f32(x: &[f32], y: &[f32], weights: &[f32]) -> WlsSums<f32> {
    let n = x.len().min(y.len()).min(weights.len());
    let split = n - n % 4;

    let mut s_w = f32x4::splat(0.0);
    let mut s_wx = f32x4::splat(0.0);
    let mut s_wy = f32x4::splat(0.0);
    let mut s_wxx = f32x4::splat(0.0);
    let mut s_wxy = f32x4::splat(0.0);

    for i in (0..split).step_by(4) {
        let w = f32x4::new([weights[i], weights[i + 1], weights[i + 2], weights[i + 3]]);
        let xv = f32x4::new([x[i], x[i + 1], x[i + 2], x[i + 3]]);
        let yv = f32x4::new([y[i], y[i + 1], y[i + 2], y[i + 3]]);
        let wx = w * xv;

        s_w += w;
        s_wx += wx;
        s_wy += w * yv;
        s_wxx += wx * xv;
        s_wxy += wx * yv;
    }

    let tail = accumulate_wls_scalar(&x[split..n], &y[split..n], &weights[split..n]);
    WlsSums {
        w: s_w.reduce_add() + tail.w,
        wx: s_wx.reduce_add() + tail.wx,
        wy: s_wy.reduce_add() + tail.wy,
        wxx: s_wxx.reduce_add() + tail.wxx,
        wxy: s_wxy.reduce_add() + tail.wxy,
    }
}

// ============================================================================
// Solver Trait
// ============================================================================

/// Type-specific weighted least-squares accumulation.
pub trait WLSSolver: Float {
    /// Accumulate weighted statistics.
    #[inline]
    fn accumulate_wls(x: &[Self], y: &[Self], weights: &[Self]) -> WlsSums<Self> {
        accumulate_wls_scalar(x, y, weights)
    }
}

impl WLSSolver for f64 {
    #[inline]
    fn accumulate_wls(x: &[f64], y: &[f64], weights: &[f64]) -> WlsSums<f64> {
        accumulate_wls_simd_f64(x, y, weights)
    }
}

impl WLSSolver for f32 {
    #[inline]
    fn accumulate_wls(x: &[f32], y: &[f32], weights: &[f32]) -> WlsSums<f32> {
        accumulate_wls_simd_f32(x, y, weights)
    }
}

// ============================================================================
// LinearFit
// ============================================================================

/// Weighted least-squares line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFit<T> {
    /// Slope (beta_1); zero for degenerate fits.
    pub slope: T,

    /// Weighted mean of x-values.
    pub x_mean: T,

    /// Weighted mean of y-values.
    pub y_mean: T,

    /// `false` when the spread of x was too small and the fit fell back to the mean.
    pub well_conditioned: bool,
}

impl<T: Float> LinearFit<T> {
    /// Relative spread below which the slope is considered unidentifiable.
    const SPREAD_TOLERANCE: f64 = 1024.0;

    /// Solve the normal equations from accumulated sums.
    ///
    /// `scale` is the largest |x| taking part in the fit; spreads below
    /// `epsilon * 1024 * scale^2` per unit weight are treated as degenerate.
    pub fn from_sums(sums: WlsSums<T>, scale: T) -> Option<Self> {
        if !(sums.w > T::zero()) {
            return None;
        }

        let x_mean = sums.wx / sums.w;
        let y_mean = sums.wy / sums.w;
        let spread = sums.wxx - sums.wx * x_mean;

        let tol_factor = T::from(Self::SPREAD_TOLERANCE).unwrap_or_else(T::one);
        let tol = T::epsilon() * tol_factor * scale * scale * sums.w;

        if !(spread > tol) {
            return Some(Self {
                slope: T::zero(),
                x_mean,
                y_mean,
                well_conditioned: false,
            });
        }

        let covariance = sums.wxy - sums.wx * y_mean;
        Some(Self {
            slope: covariance / spread,
            x_mean,
            y_mean,
            well_conditioned: true,
        })
    }

    /// Predict y at `x`.
    #[inline]
    pub fn predict(&self, x: T) -> T {
        self.y_mean + self.slope * (x - self.x_mean)
    }

    /// Intercept (prediction at x = 0).
    #[inline]
    pub fn intercept(&self) -> T {
        self.predict(T::zero())
    }
}

impl<T: WLSSolver> LinearFit<T> {
    /// Fit a weighted least-squares line.
    pub fn fit_wls(x: &[T], y: &[T], weights: &[T], scale: T) -> Option<Self> {
        Self::from_sums(T::accumulate_wls(x, y, weights), scale)
    }
}
