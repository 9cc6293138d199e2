//! High-level API for condensing and smoothing.
//!
//! ## Purpose
//!
//! This module provides the primary user-facing entry points. Two fluent
//! builders configure the two stages of the pipeline:
//!
//! * [`CondenseBuilder`] (`Condense::new()` in the prelude) bins raw data and
//!   summarises it per bin.
//! * [`SmoothBuilder`] (`Smooth::new()` in the prelude) smooths condensed
//!   tables or plain grids with a kernel estimator.
//!
//! ## Design notes
//!
//! * **Ergonomic**: Fluent builders with sensible defaults for all parameters.
//! * **Validated**: Parameters are validated when `.build()` is called; data
//!   is validated by every call that receives it.
//! * **Type-Safe**: Generic over `Float` types for flexible precision.
//!
//! ### Configuration Flow
//!
//! 1. Create a builder via `Condense::new()` or `Smooth::new()`.
//! 2. Chain configuration methods (`.binwidth()`, `.bandwidth()`, etc.).
//! 3. Call `.build()` to get a reusable [`Condenser`] or [`Smoother`].

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::algorithms::binning::BinSpec;
use crate::algorithms::regression::WLSSolver;
use crate::engine::condense::condense;
use crate::engine::executor::{SmoothConfig, SmoothExecutor};
use crate::engine::validator::Validator;
use crate::evaluation::cv::{self, PredictOn};
use crate::evaluation::peel::DEFAULT_KEEP;

// Publicly re-exported types
pub use crate::algorithms::accumulator::{Summary, SummaryClass, Variable};
pub use crate::algorithms::robustness::RobustnessMethod;
pub use crate::algorithms::smoother::SmoothMethod;
pub use crate::engine::output::CondensedTable;
pub use crate::evaluation::cv::bandwidth_candidates;
pub use crate::math::kernel::WeightFunction;
pub use crate::math::scaling::ScalingMethod;
pub use crate::primitives::errors::BigvisError;
pub use crate::primitives::grid::{Dim, Points, SmoothGrid};

// ============================================================================
// Axis Specification
// ============================================================================

/// How one grouping column is binned.
///
/// Exactly one of `binwidth` and `breaks` must be set. `origin` only applies
/// to fixed-width bins and defaults to the smallest finite value of the
/// column being condensed.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisSpec<T> {
    /// Width of fixed-width bins.
    pub binwidth: Option<T>,

    /// Left edge of the first fixed-width bin.
    pub origin: Option<T>,

    /// Explicit bin boundaries.
    pub breaks: Option<Vec<T>>,
}

impl<T: Float> AxisSpec<T> {
    /// Fixed-width bins with a data-derived origin.
    pub fn width(binwidth: T) -> Self {
        Self {
            binwidth: Some(binwidth),
            origin: None,
            breaks: None,
        }
    }

    /// Bins delimited by explicit boundaries.
    pub fn breaks(breaks: Vec<T>) -> Self {
        Self {
            binwidth: None,
            origin: None,
            breaks: Some(breaks),
        }
    }

    /// Set the origin of fixed-width bins.
    pub fn origin(mut self, origin: T) -> Self {
        self.origin = Some(origin);
        self
    }

    /// Check that the axis is fully and consistently specified.
    fn validate(&self) -> Result<(), BigvisError> {
        match (self.binwidth, &self.breaks) {
            (Some(_), Some(_)) => Err(BigvisError::DuplicateParameter {
                parameter: "binwidth/breaks",
            }),
            (None, None) => Err(BigvisError::MissingParameter {
                parameter: "binwidth or breaks",
            }),
            (Some(width), None) => {
                BinSpec::Fixed {
                    width,
                    origin: self.origin.unwrap_or_else(T::zero),
                }
                .validate()
            }
            (None, Some(breaks)) => {
                if self.origin.is_some() {
                    return Err(BigvisError::InvalidBinSpec(
                        "origin cannot be combined with breaks".into(),
                    ));
                }
                BinSpec::Breaks(breaks.clone()).validate()
            }
        }
    }

    /// The bin specification for data `x`.
    fn resolve(&self, x: &[T]) -> Result<BinSpec<T>, BigvisError> {
        self.validate()?;
        match (self.binwidth, &self.breaks) {
            (Some(width), _) => {
                let origin = self.origin.unwrap_or_else(|| min_finite(x));
                BinSpec::fixed(width, origin)
            }
            (None, Some(breaks)) => BinSpec::breaks(breaks.clone()),
            (None, None) => Err(BigvisError::MissingParameter {
                parameter: "binwidth or breaks",
            }),
        }
    }
}

/// Smallest finite value of `x` (zero if there is none).
fn min_finite<T: Float>(x: &[T]) -> T {
    let min = x
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold(T::infinity(), T::min);
    if min.is_finite() { min } else { T::zero() }
}

// ============================================================================
// Condense Builder
// ============================================================================

/// Fluent builder for binned summaries.
#[derive(Debug, Clone)]
pub struct CondenseBuilder<T> {
    /// Width of fixed-width bins (1-D shorthand).
    pub binwidth: Option<T>,

    /// Origin of fixed-width bins (1-D shorthand).
    pub origin: Option<T>,

    /// Explicit bin boundaries (1-D shorthand).
    pub breaks: Option<Vec<T>>,

    /// One specification per grouping column (n-D).
    pub axes: Option<Vec<AxisSpec<T>>>,

    /// Summary statistic (default: Count).
    pub summary: Option<Summary>,

    /// Tracks if any parameter was set multiple times (for validation).
    #[doc(hidden)]
    pub duplicate_param: Option<&'static str>,
}

impl<T: Float> Default for CondenseBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float> CondenseBuilder<T> {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            binwidth: None,
            origin: None,
            breaks: None,
            axes: None,
            summary: None,
            duplicate_param: None,
        }
    }

    /// Set the width of fixed-width bins.
    pub fn binwidth(mut self, binwidth: T) -> Self {
        if self.binwidth.is_some() {
            self.duplicate_param = Some("binwidth");
        }
        self.binwidth = Some(binwidth);
        self
    }

    /// Set the left edge of the first fixed-width bin.
    pub fn origin(mut self, origin: T) -> Self {
        if self.origin.is_some() {
            self.duplicate_param = Some("origin");
        }
        self.origin = Some(origin);
        self
    }

    /// Set explicit bin boundaries.
    pub fn breaks(mut self, breaks: Vec<T>) -> Self {
        if self.breaks.is_some() {
            self.duplicate_param = Some("breaks");
        }
        self.breaks = Some(breaks);
        self
    }

    /// Set one bin specification per grouping column.
    pub fn axes(mut self, axes: Vec<AxisSpec<T>>) -> Self {
        if self.axes.is_some() {
            self.duplicate_param = Some("axes");
        }
        self.axes = Some(axes);
        self
    }

    /// Set the summary statistic.
    pub fn summary(mut self, summary: Summary) -> Self {
        if self.summary.is_some() {
            self.duplicate_param = Some("summary");
        }
        self.summary = Some(summary);
        self
    }

    /// Validate the configuration and create a condenser.
    pub fn build(self) -> Result<Condenser<T>, BigvisError> {
        // Check for duplicate parameter configuration
        Validator::validate_no_duplicates(self.duplicate_param)?;

        let shorthand_used =
            self.binwidth.is_some() || self.origin.is_some() || self.breaks.is_some();
        let axes = match self.axes {
            Some(_) if shorthand_used => {
                return Err(BigvisError::DuplicateParameter { parameter: "axes" });
            }
            Some(axes) if axes.is_empty() => {
                return Err(BigvisError::MissingParameter { parameter: "axes" });
            }
            Some(axes) => axes,
            None => vec![AxisSpec {
                binwidth: self.binwidth,
                origin: self.origin,
                breaks: self.breaks,
            }],
        };

        for axis in &axes {
            axis.validate()?;
        }

        Ok(Condenser {
            axes,
            summary: self.summary.unwrap_or_default(),
        })
    }
}

// ============================================================================
// Condenser
// ============================================================================

/// A validated binning configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Condenser<T> {
    axes: Vec<AxisSpec<T>>,
    summary: Summary,
}

impl<T: Float> Condenser<T> {
    /// The summary statistic.
    pub fn summary(&self) -> Summary {
        self.summary
    }

    /// The per-axis bin specifications.
    pub fn axes(&self) -> &[AxisSpec<T>] {
        &self.axes
    }

    /// Condense one grouping column `x`, summarising `z` with weights `w`.
    pub fn condense(
        &self,
        x: &[T],
        z: Option<&[T]>,
        w: Option<&[T]>,
    ) -> Result<CondensedTable<T>, BigvisError> {
        self.condense_nd(&[x], z, w)
    }

    /// Condense several grouping columns jointly.
    pub fn condense_nd(
        &self,
        xs: &[&[T]],
        z: Option<&[T]>,
        w: Option<&[T]>,
    ) -> Result<CondensedTable<T>, BigvisError> {
        if xs.len() != self.axes.len() {
            return Err(BigvisError::DimensionMismatch {
                expected: self.axes.len(),
                got: xs.len(),
            });
        }
        let specs = self
            .axes
            .iter()
            .zip(xs)
            .map(|(axis, x)| axis.resolve(x))
            .collect::<Result<Vec<_>, _>>()?;

        condense(xs, z, w, &specs, self.summary)
    }
}

// ============================================================================
// Smooth Builder
// ============================================================================

/// Fluent builder for kernel smoothing.
#[derive(Debug, Clone)]
pub struct SmoothBuilder<T> {
    /// Bandwidth per dimension.
    pub bandwidth: Option<Vec<T>>,

    /// Estimator (default: kernel mean).
    pub method: Option<SmoothMethod>,

    /// Kernel shape (default: Tricube).
    pub kernel: Option<WeightFunction>,

    /// Factored (default) or joint n-D smoothing.
    pub factored: Option<bool>,

    /// Robustness reweightings for RobustRegression (default: 3).
    pub iterations: Option<usize>,

    /// Early-stop tolerance for robustness reweighting.
    pub tolerance: Option<T>,

    /// Robustness weight function (default: Bisquare).
    pub robustness_method: Option<RobustnessMethod>,

    /// Residual scale estimator (default: MAR).
    pub scaling_method: Option<ScalingMethod>,

    /// Tracks if any parameter was set multiple times (for validation).
    #[doc(hidden)]
    pub duplicate_param: Option<&'static str>,
}

impl<T: Float> Default for SmoothBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float> SmoothBuilder<T> {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            bandwidth: None,
            method: None,
            kernel: None,
            factored: None,
            iterations: None,
            tolerance: None,
            robustness_method: None,
            scaling_method: None,
            duplicate_param: None,
        }
    }

    /// Set the bandwidth of each dimension.
    pub fn bandwidth(mut self, bandwidth: Vec<T>) -> Self {
        if self.bandwidth.is_some() {
            self.duplicate_param = Some("bandwidth");
        }
        self.bandwidth = Some(bandwidth);
        self
    }

    /// Set the estimator.
    pub fn method(mut self, method: SmoothMethod) -> Self {
        if self.method.is_some() {
            self.duplicate_param = Some("method");
        }
        self.method = Some(method);
        self
    }

    /// Set the kernel.
    pub fn kernel(mut self, kernel: WeightFunction) -> Self {
        if self.kernel.is_some() {
            self.duplicate_param = Some("kernel");
        }
        self.kernel = Some(kernel);
        self
    }

    /// Choose factored (per-dimension) or joint n-D smoothing.
    pub fn factored(mut self, factored: bool) -> Self {
        if self.factored.is_some() {
            self.duplicate_param = Some("factored");
        }
        self.factored = Some(factored);
        self
    }

    /// Set the number of robustness reweightings.
    pub fn iterations(mut self, iterations: usize) -> Self {
        if self.iterations.is_some() {
            self.duplicate_param = Some("iterations");
        }
        self.iterations = Some(iterations);
        self
    }

    /// Stop reweighting once the estimate changes by at most `tolerance`.
    pub fn tolerance(mut self, tolerance: T) -> Self {
        if self.tolerance.is_some() {
            self.duplicate_param = Some("tolerance");
        }
        self.tolerance = Some(tolerance);
        self
    }

    /// Set the robustness weighting method.
    pub fn robustness_method(mut self, rm: RobustnessMethod) -> Self {
        if self.robustness_method.is_some() {
            self.duplicate_param = Some("robustness_method");
        }
        self.robustness_method = Some(rm);
        self
    }

    /// Set the scaling method for robust scale estimation.
    pub fn scaling_method(mut self, sm: ScalingMethod) -> Self {
        if self.scaling_method.is_some() {
            self.duplicate_param = Some("scaling_method");
        }
        self.scaling_method = Some(sm);
        self
    }

    /// The configuration described by this builder (bandwidth may be empty).
    fn config(&self) -> SmoothConfig<T> {
        let defaults: SmoothConfig<T> = SmoothConfig::default();
        SmoothConfig {
            bandwidth: self.bandwidth.clone().unwrap_or_default(),
            factored: self.factored.unwrap_or(defaults.factored),
            kernel: self.kernel.unwrap_or(defaults.kernel),
            method: self.method.unwrap_or(defaults.method),
            iterations: self.iterations.unwrap_or(defaults.iterations),
            tolerance: self.tolerance,
            robustness_method: self.robustness_method.unwrap_or(defaults.robustness_method),
            scaling_method: self.scaling_method.unwrap_or(defaults.scaling_method),
        }
    }
}

impl<T: WLSSolver + Send + Sync> SmoothBuilder<T> {
    /// Validate the configuration and create a smoother.
    pub fn build(self) -> Result<Smoother<T>, BigvisError> {
        // Check for duplicate parameter configuration
        Validator::validate_no_duplicates(self.duplicate_param)?;

        if self.bandwidth.is_none() {
            return Err(BigvisError::MissingParameter {
                parameter: "bandwidth",
            });
        }

        let config = self.config();
        let executor = SmoothExecutor::from_config(&config)?;
        Ok(Smoother { config, executor })
    }
}

// ============================================================================
// Smoother
// ============================================================================

/// A validated smoothing configuration.
#[derive(Debug, Clone)]
pub struct Smoother<T> {
    config: SmoothConfig<T>,
    executor: SmoothExecutor<T>,
}

impl<T: WLSSolver + Send + Sync> Smoother<T> {
    /// The configuration in use.
    pub fn config(&self) -> &SmoothConfig<T> {
        &self.config
    }

    /// Smooth 1-D data `(x, z, w)` at the positions `x_out`.
    pub fn smooth_1d(
        &self,
        x: &[T],
        z: &[T],
        w: Option<&[T]>,
        x_out: &[T],
    ) -> Result<Vec<T>, BigvisError> {
        self.executor.smooth_1d(x, z, w, x_out)
    }

    /// Smooth `grid` onto the points of `out`.
    pub fn smooth_nd(&self, grid: &SmoothGrid<T>, out: &Points<T>) -> Result<Vec<T>, BigvisError> {
        self.executor.run(grid, out)
    }

    /// Smooth one column of a condensed table.
    ///
    /// With `out = None` the table's own bins are the output grid.
    pub fn smooth_table(
        &self,
        table: &CondensedTable<T>,
        variable: Variable,
        out: Option<&Points<T>>,
    ) -> Result<CondensedTable<T>, BigvisError> {
        self.executor.smooth_table(table, variable, out)
    }

    /// Leave-one-out RMSE of this smoother on `grid`.
    pub fn rmse_cv(&self, grid: &SmoothGrid<T>) -> Result<T, BigvisError> {
        Self::rmse_with(&self.executor, self.config.factored, grid)
    }

    /// Score every candidate bandwidth by leave-one-out RMSE.
    ///
    /// Returns the best candidate and the score of every candidate, in order.
    pub fn best_bandwidth(
        &self,
        grid: &SmoothGrid<T>,
        candidates: &[Vec<T>],
    ) -> Result<(Vec<T>, Vec<T>), BigvisError> {
        cv::best_bandwidth(candidates, |h| {
            let mut config = self.config.clone();
            config.bandwidth = h.to_vec();
            let executor = SmoothExecutor::from_config(&config)?;
            Self::rmse_with(&executor, config.factored, grid)
        })
    }

    fn rmse_with(
        executor: &SmoothExecutor<T>,
        factored: bool,
        grid: &SmoothGrid<T>,
    ) -> Result<T, BigvisError> {
        let predict_on = if factored && grid.dims() > 1 {
            PredictOn::FullGrid
        } else {
            PredictOn::HeldOut
        };
        cv::rmse_cv(grid, predict_on, |train, out| executor.run(train, out))
    }
}

// ============================================================================
// Table Utilities
// ============================================================================

/// Keep the densest bins holding at least `keep` (default 0.99) of the
/// total count, dropping the missing-slot rows.
pub fn peel<T: Float>(
    table: &CondensedTable<T>,
    keep: Option<T>,
) -> Result<CondensedTable<T>, BigvisError> {
    let keep = match keep {
        Some(keep) => keep,
        None => T::from(DEFAULT_KEEP).ok_or(BigvisError::InvalidFraction(DEFAULT_KEEP))?,
    };
    table.peel(keep)
}
