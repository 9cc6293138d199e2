#![cfg(feature = "dev")]
//! Tests for the smoothing executor.
//!
//! These tests verify the orchestration of kernel smoothing:
//! - Configuration validation
//! - One-dimensional smoothing of unsorted data
//! - Factored and joint n-dimensional strategies
//! - Smoothing the columns of condensed tables
//!
//! ## Test Organization
//!
//! 1. **Configuration** - Defaults and rejected configurations
//! 2. **One Dimension** - Direct smoothing of series
//! 3. **Several Dimensions** - Factored and joint smoothing
//! 4. **Condensed Tables** - Row layout, weights and output grids

use approx::assert_relative_eq;

use bigvis::internals::algorithms::accumulator::{Summary, Variable};
use bigvis::internals::algorithms::binning::BinSpec;
use bigvis::internals::algorithms::smoother::SmoothMethod;
use bigvis::internals::engine::condense::condense;
use bigvis::internals::engine::executor::{SmoothConfig, SmoothExecutor};
use bigvis::internals::math::kernel::WeightFunction;
use bigvis::internals::primitives::errors::BigvisError;
use bigvis::internals::primitives::grid::{Dim, Points, SmoothGrid};

fn executor(
    bandwidth: Vec<f64>,
    kernel: WeightFunction,
    method: SmoothMethod,
    factored: bool,
) -> SmoothExecutor<f64> {
    SmoothExecutor::from_config(&SmoothConfig {
        bandwidth,
        kernel,
        method,
        factored,
        ..Default::default()
    })
    .unwrap()
}

/// A 6 x 5 product grid with values from `f`.
fn product_grid(f: impl Fn(f64, f64) -> f64) -> SmoothGrid<f64> {
    let xs: Vec<f64> = (0..6).map(f64::from).collect();
    let ys: Vec<f64> = (0..5).map(f64::from).collect();
    let points = Points::product(&[xs, ys]).unwrap();
    let values = points.iter().map(|p| f(p[0], p[1])).collect();
    let weights = (0..points.len()).map(|i| 1.0 + (i % 3) as f64).collect();
    SmoothGrid::new(points, values, Some(weights)).unwrap()
}

// ============================================================================
// Configuration Tests
// ============================================================================

/// Test the default configuration.
#[test]
fn test_config_defaults() {
    let config = SmoothConfig::<f64>::default();

    assert!(config.factored);
    assert_eq!(config.kernel, WeightFunction::Tricube);
    assert_eq!(config.method, SmoothMethod::Mean);
    assert_eq!(config.iterations, 3);
    assert!(config.tolerance.is_none());
}

/// Test that a bandwidth is required.
#[test]
fn test_config_requires_bandwidth() {
    let err = SmoothExecutor::<f64>::from_config(&SmoothConfig::default()).unwrap_err();
    assert_eq!(err, BigvisError::MissingParameter { parameter: "bandwidth" });
}

/// Test that joint smoothing only offers the kernel mean.
#[test]
fn test_config_joint_regression_rejected() {
    let config = SmoothConfig {
        bandwidth: vec![1.0, 1.0],
        factored: false,
        method: SmoothMethod::Regression,
        ..Default::default()
    };
    let err = SmoothExecutor::<f64>::from_config(&config).unwrap_err();

    assert_eq!(
        err,
        BigvisError::UnsupportedConfiguration {
            method: "regression",
            feature: "non-factored smoothing"
        }
    );
}

/// Test rejection of invalid numeric settings.
#[test]
fn test_config_invalid_values() {
    let bad_h = SmoothConfig {
        bandwidth: vec![0.0],
        ..Default::default()
    };
    assert_eq!(
        SmoothExecutor::<f64>::from_config(&bad_h).unwrap_err(),
        BigvisError::InvalidBandwidth(0.0)
    );

    let bad_iter = SmoothConfig {
        bandwidth: vec![1.0],
        iterations: 0,
        ..Default::default()
    };
    assert_eq!(
        SmoothExecutor::<f64>::from_config(&bad_iter).unwrap_err(),
        BigvisError::InvalidIterations(0)
    );
}

// ============================================================================
// One Dimension Tests
// ============================================================================

/// Test smoothing of unsorted one-dimensional data.
#[test]
fn test_smooth_1d_unsorted_input() {
    let exec = executor(vec![1.5], WeightFunction::Uniform, SmoothMethod::Mean, true);
    let x = [4.0, 0.0, 2.0, 1.0, 3.0];
    let z = [5.0, 1.0, 3.0, 2.0, 4.0];

    let out = exec.smooth_1d(&x, &z, None, &[2.0, 0.0]).unwrap();

    assert_relative_eq!(out[0], 3.0);
    assert_relative_eq!(out[1], 1.5);
}

/// Test that output points out of reach get NaN.
#[test]
fn test_smooth_1d_far_point_is_nan() {
    let exec = executor(vec![1.0], WeightFunction::Tricube, SmoothMethod::Regression, true);

    let out = exec.smooth_1d(&[0.0, 1.0, 2.0], &[1.0, 2.0, 3.0], None, &[50.0]).unwrap();

    assert!(out[0].is_nan());
}

/// Test that grids must match the bandwidth's dimension.
#[test]
fn test_run_dimension_checks() {
    let exec = executor(vec![1.0], WeightFunction::Tricube, SmoothMethod::Mean, true);
    let grid = product_grid(|x, y| x + y);

    let err = exec.run(&grid, grid.points()).unwrap_err();
    assert_eq!(err, BigvisError::DimensionMismatch { expected: 2, got: 1 });

    let empty = exec.smooth_1d(&[0.0], &[1.0], None, &[]).unwrap();
    assert!(empty.is_empty());
}

/// Test that non-finite output coordinates are rejected.
#[test]
fn test_run_rejects_nan_output() {
    let exec = executor(vec![1.0], WeightFunction::Tricube, SmoothMethod::Mean, true);

    let err = exec.smooth_1d(&[0.0, 1.0], &[1.0, 2.0], None, &[f64::NAN]);
    assert!(matches!(err, Err(BigvisError::InvalidNumericValue(_))));
}

// ============================================================================
// Several Dimensions Tests
// ============================================================================

/// Test that factored and joint Gaussian means agree on a full grid.
///
/// Verifies that carrying kernel weight mass between passes reproduces the
/// product kernel, which for the Gaussian equals the radial kernel.
#[test]
fn test_factored_matches_joint_gaussian_mean() {
    let grid = product_grid(|x, y| (x * 0.7).sin() + y * y * 0.1);
    let factored = executor(vec![1.0, 1.5], WeightFunction::Gaussian, SmoothMethod::Mean, true);
    let joint = executor(vec![1.0, 1.5], WeightFunction::Gaussian, SmoothMethod::Mean, false);

    let a = factored.run(&grid, grid.points()).unwrap();
    let b = joint.run(&grid, grid.points()).unwrap();

    assert_eq!(a.len(), grid.len());
    for (fa, jb) in a.iter().zip(&b) {
        assert_relative_eq!(*fa, *jb, epsilon = 1e-10);
    }
}

/// Test that factored local regression reproduces a plane.
#[test]
fn test_factored_regression_reproduces_plane() {
    let grid = product_grid(|x, y| 1.0 + 2.0 * x + 3.0 * y);
    let exec = executor(vec![2.0, 2.0], WeightFunction::Tricube, SmoothMethod::Regression, true);
    let ys: Vec<f64> = (0..5).map(f64::from).collect();
    let out = Points::product(&[vec![0.5, 2.5], ys]).unwrap();

    let smoothed = exec.run(&grid, &out).unwrap();

    for (p, v) in out.iter().zip(&smoothed) {
        assert_relative_eq!(*v, 1.0 + 2.0 * p[0] + 3.0 * p[1], epsilon = 1e-9);
    }
}

/// Test that a wide joint kernel returns the weighted mean everywhere.
#[test]
fn test_joint_wide_kernel_is_weighted_mean() {
    let grid = product_grid(|x, y| x * y);
    let exec = executor(vec![1e3, 1e3], WeightFunction::Uniform, SmoothMethod::Mean, false);
    let weights = grid.weights().unwrap();
    let expected = grid
        .values()
        .iter()
        .zip(weights)
        .map(|(v, w)| v * w)
        .sum::<f64>()
        / weights.iter().sum::<f64>();

    let out = Points::new(vec![0.0, 0.0, 10.0, -3.0], 2).unwrap();
    for v in exec.run(&grid, &out).unwrap() {
        assert_relative_eq!(v, expected, epsilon = 1e-10);
    }
}

// ============================================================================
// Condensed Table Tests
// ============================================================================

fn mean_table() -> bigvis::internals::engine::output::CondensedTable<f64> {
    let x = [0.2, 0.7, 1.1, 1.4, 1.9, 2.5, 2.6, 3.8, f64::NAN];
    let z = [1.0, 2.0, 2.5, 3.5, 3.0, 4.0, 5.0, 6.5, 100.0];
    let spec = BinSpec::fixed(1.0, 0.0).unwrap();
    condense(&[&x], Some(&z), None, &[spec], Summary::Mean).unwrap()
}

/// Test smoothing a table onto its own rows.
///
/// Verifies that the row layout and binning survive, the missing row is
/// NaN, and bins are weighted by their counts.
#[test]
fn test_smooth_table_keeps_layout() {
    let table = mean_table();
    let exec = executor(vec![100.0], WeightFunction::Uniform, SmoothMethod::Mean, true);

    let smoothed = exec.smooth_table(&table, Variable::Mean, None).unwrap();

    assert_eq!(smoothed.len(), table.len());
    assert!(smoothed.is_missing_row(0));
    assert_eq!(
        smoothed.keys().column(Dim(0))[1..],
        table.keys().column(Dim(0))[1..]
    );
    assert_eq!(smoothed.breaks(Dim(0)).unwrap(), table.breaks(Dim(0)).unwrap());

    let values = smoothed.column(Variable::Mean).unwrap();
    assert!(values[0].is_nan());
    for v in &values[1..] {
        assert_relative_eq!(*v, 27.5 / 8.0, epsilon = 1e-12);
    }
}

/// Test smoothing a table onto a caller-supplied grid.
#[test]
fn test_smooth_table_onto_output_grid() {
    let table = mean_table();
    let exec = executor(vec![1.5], WeightFunction::Tricube, SmoothMethod::Regression, true);
    let out = Points::from_1d(&[0.5, 1.5, 2.5]);

    let smoothed = exec.smooth_table(&table, Variable::Mean, Some(&out)).unwrap();

    assert_eq!(smoothed.len(), 3);
    assert_eq!(smoothed.keys(), &out);
    assert!(smoothed.binners().is_empty());
    assert_eq!(
        smoothed.breaks(Dim(0)).unwrap_err(),
        BigvisError::MissingParameter { parameter: "breaks" }
    );
    assert!(smoothed.column(Variable::Mean).unwrap().iter().all(|v| v.is_finite()));
}

/// Test that smoothing an absent column fails.
#[test]
fn test_smooth_table_unknown_variable() {
    let table = mean_table();
    let exec = executor(vec![1.0], WeightFunction::Tricube, SmoothMethod::Mean, true);

    let err = exec.smooth_table(&table, Variable::Median, None).unwrap_err();
    assert_eq!(err, BigvisError::UnknownVariable { variable: ".median" });
}
