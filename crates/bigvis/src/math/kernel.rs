//! Kernels that weight neighbouring bins.
//!
//! ## Purpose
//!
//! When a condensed grid is smoothed, every bin near an output position lends
//! its value to the estimate there. A kernel decides how much: it maps the
//! distance between the bin and the output position, measured in bandwidths,
//! to a non-negative weight.
//!
//! ## Design notes
//!
//! * **Scaled distance**: Kernels take `u = (x_bin - x_out) / h`; callers with
//!   raw distances use [`WeightFunction::weight_at`].
//! * **Windows**: Apart from the Gaussian, a bin one bandwidth or more away
//!   gets no weight, so the 1-D smoother only visits the bins inside
//!   `[x_out - h, x_out + h]` of a sorted line.
//! * **Separability**: The Gaussian of a scaled Euclidean distance is the
//!   product of per-axis Gaussians, which is why factored and joint smoothing
//!   agree for it on product grids.
//!
//! ## Invariants
//!
//! * K(0) = 1, K(u) = K(-u) and K(u) >= 0.
//! * Weights never grow with |u|.
//! * A NaN distance has weight zero.

// External dependencies
use core::f64::consts::FRAC_PI_2;
use num_traits::Float;

// ============================================================================
// Weight Function Enum
// ============================================================================

/// Kernel shape used to weight bins around an output position.
///
/// | Kernel       | K(u), \|u\| < 1   | Beyond one bandwidth |
/// |--------------|-------------------|----------------------|
/// | Cosine       | cos(pi u / 2)     | 0                    |
/// | Epanechnikov | 1 - u^2           | 0                    |
/// | Gaussian     | exp(-u^2 / 2)     | exp(-u^2 / 2)        |
/// | Biweight     | (1 - u^2)^2       | 0                    |
/// | Triangle     | 1 - \|u\|         | 0                    |
/// | Tricube      | (1 - \|u\|^3)^3   | 0                    |
/// | Uniform      | 1                 | 0                    |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WeightFunction {
    /// Half a cosine wave.
    Cosine,

    /// Parabola.
    Epanechnikov,

    /// Bell curve; every bin on the grid gets some weight.
    Gaussian,

    /// Squared parabola.
    Biweight,

    /// Linear decay.
    Triangle,

    /// Flat near the centre, smooth at the edge of the window.
    #[default]
    Tricube,

    /// Unweighted average of the bins in the window.
    Uniform,
}

impl WeightFunction {
    /// Display name.
    #[inline]
    pub const fn name(&self) -> &'static str {
        match self {
            WeightFunction::Cosine => "Cosine",
            WeightFunction::Epanechnikov => "Epanechnikov",
            WeightFunction::Gaussian => "Gaussian",
            WeightFunction::Biweight => "Biweight",
            WeightFunction::Triangle => "Triangle",
            WeightFunction::Tricube => "Tricube",
            WeightFunction::Uniform => "Uniform",
        }
    }

    /// Scaled distances that can carry weight, or `None` for the Gaussian.
    #[inline]
    pub fn support(&self) -> Option<(f64, f64)> {
        match self {
            WeightFunction::Gaussian => None,
            _ => Some((-1.0, 1.0)),
        }
    }

    /// Whether bins beyond one bandwidth are ignored.
    #[inline]
    pub fn is_bounded(&self) -> bool {
        !matches!(self, WeightFunction::Gaussian)
    }

    /// Weight of a bin at scaled distance `u`.
    #[inline]
    pub fn compute_weight<T: Float>(&self, u: T) -> T {
        let a = u.abs();
        if a.is_nan() || (self.is_bounded() && a >= T::one()) {
            return T::zero();
        }

        let one = T::one();
        match self {
            WeightFunction::Uniform => one,
            WeightFunction::Triangle => one - a,
            WeightFunction::Epanechnikov => one - a * a,
            WeightFunction::Biweight => (one - a * a).powi(2),
            WeightFunction::Tricube => (one - a * a * a).powi(3),
            WeightFunction::Cosine => {
                let quarter_turn = T::from(FRAC_PI_2).unwrap_or(one);
                (quarter_turn * a).cos()
            }
            WeightFunction::Gaussian => {
                let half = T::from(0.5).unwrap_or(one);
                (-(half * a * a)).exp()
            }
        }
    }

    /// Weight of a bin `distance` away under bandwidth `h`.
    #[inline]
    pub fn weight_at<T: Float>(&self, distance: T, h: T) -> T {
        self.compute_weight(distance / h)
    }
}
