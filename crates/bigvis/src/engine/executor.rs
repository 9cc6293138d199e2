//! Execution engine for kernel smoothing.
//!
//! ## Purpose
//!
//! This module orchestrates smoothing of gridded values onto an output grid.
//! It owns the smoothing configuration, dispatches between the factored and
//! the joint strategy, and evaluates the per-point estimates, in parallel
//! when the `parallel` feature is enabled.
//!
//! ## Design notes
//!
//! * **Factored**: One 1-D pass per dimension. Pass `k` groups its input into
//!   lines that agree on every axis but `k`, and smooths each output point
//!   along the line it lies on. The output grid of every pass is the final
//!   output grid; pass `k + 1` takes pass `k`'s estimates as values and
//!   their kernel weight mass as weights.
//! * **Joint**: Every output point is the kernel mean over all input points,
//!   weighted by the kernel of the bandwidth-scaled Euclidean distance. Only
//!   the Mean estimator is available this way.
//! * **Scratch**: Each worker reuses one `LocalBuffer` across output points.
//!
//! ## Invariants
//!
//! * The output has exactly one value per output point.
//! * An output point with no weighted input in reach gets NaN.
//! * Sequential and parallel execution give identical results.
//!
//! ## Non-goals
//!
//! * This module does not bin data or select bandwidths.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use core::cmp::Ordering;
use num_traits::Float;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

// Internal dependencies
use crate::algorithms::accumulator::Variable;
use crate::algorithms::regression::WLSSolver;
use crate::algorithms::robustness::RobustnessMethod;
use crate::algorithms::smoother::{Estimate, LocalBuffer, LocalSmoother, SmoothMethod};
use crate::engine::output::CondensedTable;
use crate::engine::validator::Validator;
use crate::math::distance::{cmp_except, scaled_euclidean};
use crate::math::kernel::WeightFunction;
use crate::math::scaling::ScalingMethod;
use crate::primitives::errors::BigvisError;
use crate::primitives::grid::{Dim, Points, SmoothGrid};
use crate::primitives::sorting::{SortedSeries, sort_series};

// ============================================================================
// Configuration
// ============================================================================

/// Configuration for a smoothing run.
#[derive(Debug, Clone, PartialEq)]
pub struct SmoothConfig<T> {
    /// Bandwidth per dimension.
    pub bandwidth: Vec<T>,

    /// One 1-D pass per dimension (`true`) or a joint n-D kernel (`false`).
    pub factored: bool,

    /// Kernel shape.
    pub kernel: WeightFunction,

    /// Estimator.
    pub method: SmoothMethod,

    /// Robustness reweightings (RobustRegression only).
    pub iterations: usize,

    /// Early-stop tolerance for robustness reweighting.
    pub tolerance: Option<T>,

    /// Robustness weight function.
    pub robustness_method: RobustnessMethod,

    /// Residual scale estimator for robustness weights.
    pub scaling_method: ScalingMethod,
}

impl<T: Float> Default for SmoothConfig<T> {
    fn default() -> Self {
        Self {
            bandwidth: Vec::new(),
            factored: true,
            kernel: WeightFunction::default(),
            method: SmoothMethod::default(),
            iterations: 3,
            tolerance: None,
            robustness_method: RobustnessMethod::default(),
            scaling_method: ScalingMethod::default(),
        }
    }
}

impl<T: Float> SmoothConfig<T> {
    /// Check the configuration on its own (independent of any grid).
    pub fn validate(&self) -> Result<(), BigvisError> {
        Validator::validate_smooth_config(
            &self.bandwidth,
            self.method,
            self.factored,
            self.iterations,
            self.tolerance,
        )
    }

    /// The per-point estimator described by this configuration.
    pub fn local(&self) -> LocalSmoother<T> {
        LocalSmoother {
            kernel: self.kernel,
            method: self.method,
            iterations: self.iterations,
            tolerance: self.tolerance,
            robustness_method: self.robustness_method,
            scaling_method: self.scaling_method,
        }
    }
}

// ============================================================================
// Executor
// ============================================================================

/// Runs smoothing passes for a validated configuration.
#[derive(Debug, Clone)]
pub struct SmoothExecutor<T> {
    bandwidth: Vec<T>,
    factored: bool,
    local: LocalSmoother<T>,
}

impl<T: WLSSolver + Send + Sync> SmoothExecutor<T> {
    /// Create an executor, validating the configuration.
    pub fn from_config(config: &SmoothConfig<T>) -> Result<Self, BigvisError> {
        config.validate()?;
        Ok(Self {
            bandwidth: config.bandwidth.clone(),
            factored: config.factored,
            local: config.local(),
        })
    }

    /// Bandwidth per dimension.
    pub fn bandwidth(&self) -> &[T] {
        &self.bandwidth
    }

    // ========================================================================
    // Entry Points
    // ========================================================================

    /// Smooth one-dimensional data `(x, z, w)` at the positions `x_out`.
    ///
    /// Needs a single bandwidth. Input need not be sorted.
    pub fn smooth_1d(
        &self,
        x: &[T],
        z: &[T],
        w: Option<&[T]>,
        x_out: &[T],
    ) -> Result<Vec<T>, BigvisError> {
        let grid = SmoothGrid::new(Points::from_1d(x), z.to_vec(), w.map(<[T]>::to_vec))?;
        self.run(&grid, &Points::from_1d(x_out))
    }

    /// Smooth `grid` onto the points of `out`.
    pub fn run(&self, grid: &SmoothGrid<T>, out: &Points<T>) -> Result<Vec<T>, BigvisError> {
        Validator::validate_smooth_inputs(grid, out, &self.bandwidth)?;
        if out.is_empty() {
            return Ok(Vec::new());
        }

        if self.factored {
            Ok(self.run_factored(grid, out))
        } else {
            Ok(self.run_joint(grid, out))
        }
    }

    /// Smooth one column of a condensed table.
    ///
    /// Without `out`, the table's own rows are the output grid and the result
    /// keeps the table's row layout: missing-slot rows get NaN. With `out`,
    /// the result has one row per output point and no binning information.
    pub fn smooth_table(
        &self,
        table: &CondensedTable<T>,
        variable: Variable,
        out: Option<&Points<T>>,
    ) -> Result<CondensedTable<T>, BigvisError> {
        let grid = table.to_grid(variable)?;

        match out {
            Some(out) => {
                let values = self.run(&grid, out)?;
                Ok(CondensedTable::new(
                    out.clone(),
                    vec![(variable, values)],
                    table.summary(),
                    Vec::new(),
                ))
            }
            None => {
                let rows: Vec<usize> = (0..table.len())
                    .filter(|&i| !table.is_missing_row(i))
                    .collect();
                let smoothed = self.run(&grid, &table.keys().select(&rows))?;

                let mut values = vec![T::nan(); table.len()];
                for (&r, v) in rows.iter().zip(smoothed) {
                    values[r] = v;
                }
                Ok(CondensedTable::new(
                    table.keys().clone(),
                    vec![(variable, values)],
                    table.summary(),
                    table.binners().to_vec(),
                ))
            }
        }
    }

    // ========================================================================
    // Strategies
    // ========================================================================

    /// One 1-D pass per dimension, carrying kernel weight mass forward.
    fn run_factored(&self, grid: &SmoothGrid<T>, out: &Points<T>) -> Vec<T> {
        let n = grid.len();
        let first_weights: Vec<T> = (0..n).map(|i| grid.weight(i)).collect();

        let mut estimates: Vec<Estimate<T>> = Vec::new();
        for (dim, &h) in self.bandwidth.iter().enumerate() {
            let lines = if dim == 0 {
                Lines::group(grid.points(), grid.values(), &first_weights, dim)
            } else {
                let values: Vec<T> = estimates.iter().map(|e| e.value).collect();
                let weights: Vec<T> = estimates.iter().map(|e| e.weight).collect();
                Lines::group(out, &values, &weights, dim)
            };

            let local = &self.local;
            estimates = map_outputs(out.len(), |j, buf| {
                let p = out.point(j);
                match lines.find(p, dim) {
                    Some(series) => local.estimate(series, p[dim], h, buf),
                    None => Estimate::empty(),
                }
            });
        }

        estimates.into_iter().map(|e| e.value).collect()
    }

    /// Kernel mean over all input points by scaled Euclidean distance.
    fn run_joint(&self, grid: &SmoothGrid<T>, out: &Points<T>) -> Vec<T> {
        let kernel = self.local.kernel;
        let bandwidth = &self.bandwidth;
        let points = grid.points();
        let values = grid.values();

        let estimates = map_outputs(out.len(), |j, _buf| {
            let p = out.point(j);
            let mut mass = T::zero();
            let mut total = T::zero();
            for (i, &v) in values.iter().enumerate() {
                if v.is_nan() {
                    continue;
                }
                let d = scaled_euclidean(points.point(i), p, bandwidth);
                let k = kernel.compute_weight(d) * grid.weight(i);
                if k > T::zero() {
                    mass = mass + k;
                    total = total + k * v;
                }
            }
            if mass > T::zero() {
                Estimate {
                    value: total / mass,
                    weight: mass,
                }
            } else {
                Estimate::empty()
            }
        });

        estimates.into_iter().map(|e| e.value).collect()
    }
}

// ============================================================================
// Output Evaluation
// ============================================================================

/// Evaluate `f` at every output index, reusing one buffer per worker.
#[cfg(feature = "parallel")]
fn map_outputs<T, F>(m: usize, f: F) -> Vec<Estimate<T>>
where
    T: Float + Send + Sync,
    F: Fn(usize, &mut LocalBuffer<T>) -> Estimate<T> + Send + Sync,
{
    (0..m)
        .into_par_iter()
        .map_init(LocalBuffer::default, |buf, j| f(j, buf))
        .collect()
}

/// Evaluate `f` at every output index, reusing one buffer.
#[cfg(not(feature = "parallel"))]
fn map_outputs<T, F>(m: usize, f: F) -> Vec<Estimate<T>>
where
    T: Float,
    F: Fn(usize, &mut LocalBuffer<T>) -> Estimate<T>,
{
    let mut buf = LocalBuffer::default();
    (0..m).map(|j| f(j, &mut buf)).collect()
}

// ============================================================================
// Lines
// ============================================================================

/// Input points grouped into lines along one dimension.
///
/// Lines are kept in lexicographic order of their fixed coordinates, so the
/// line through an output point is found by binary search.
struct Lines<'a, T> {
    points: &'a Points<T>,
    representatives: Vec<usize>,
    series: Vec<SortedSeries<T>>,
}

impl<'a, T: Float> Lines<'a, T> {
    fn group(points: &'a Points<T>, values: &[T], weights: &[T], dim: usize) -> Self {
        let n = points.len();
        let mut order: Vec<usize> = (0..n).collect();
        order.sort_by(|&a, &b| cmp_except(points.point(a), points.point(b), dim));

        let mut representatives = Vec::new();
        let mut series = Vec::new();
        let mut start = 0;
        while start < n {
            let head = points.point(order[start]);
            let end = start
                + order[start..]
                    .iter()
                    .take_while(|&&i| cmp_except(head, points.point(i), dim) == Ordering::Equal)
                    .count();

            let members = &order[start..end];
            let x: Vec<T> = members.iter().map(|&i| points.coord(i, Dim(dim))).collect();
            let v: Vec<T> = members.iter().map(|&i| values[i]).collect();
            let w: Vec<T> = members.iter().map(|&i| weights[i]).collect();

            representatives.push(order[start]);
            series.push(sort_series(&x, &v, Some(&w)));
            start = end;
        }

        Self {
            points,
            representatives,
            series,
        }
    }

    fn find(&self, p: &[T], dim: usize) -> Option<&SortedSeries<T>> {
        self.representatives
            .binary_search_by(|&r| cmp_except(self.points.point(r), p, dim))
            .ok()
            .map(|k| &self.series[k])
    }
}
