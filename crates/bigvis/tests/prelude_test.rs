#![cfg(feature = "dev")]
//! Tests for the prelude module.
//!
//! These tests verify that the prelude exports everything needed for the
//! common bin-summarise-smooth workflow, so that a single glob import is
//! enough.
//!
//! ## Test Organization
//!
//! 1. **Import Verification** - All prelude exports are accessible
//! 2. **Type Usage** - Enum variants can be used without qualification
//! 3. **Workflows** - Complete workflows work with prelude imports

use bigvis::prelude::*;

// ============================================================================
// Import Verification Tests
// ============================================================================

/// Test that a basic condense works with prelude imports.
#[test]
fn test_prelude_imports() {
    let x = vec![1.0, 2.0, 3.0, 4.0, 5.0];

    let result = Condense::new().binwidth(1.0).build().unwrap().condense(&x, None, None);

    assert!(result.is_ok(), "Basic condense should work with prelude imports");
}

// ============================================================================
// Type Usage Tests
// ============================================================================

/// Test that summaries are available.
#[test]
fn test_prelude_summaries() {
    for summary in [Count, Sum, Mean, Sd, Median] {
        let _ = Condense::<f64>::new().binwidth(1.0).summary(summary);
    }
}

/// Test that kernels are available.
#[test]
fn test_prelude_weight_functions() {
    for kernel in [Cosine, Epanechnikov, Gaussian, Biweight, Triangle, Tricube, Uniform] {
        let _ = Smooth::<f64>::new().kernel(kernel);
    }
}

/// Test that estimators and robustness settings are available.
#[test]
fn test_prelude_methods() {
    let _ = Smooth::<f64>::new().method(KernelMean);
    let _ = Smooth::<f64>::new().method(Regression);
    let _ = Smooth::<f64>::new().method(RobustRegression);
    let _ = Smooth::<f64>::new().robustness_method(Bisquare);
    let _ = Smooth::<f64>::new().robustness_method(Huber);
    let _ = Smooth::<f64>::new().robustness_method(Talwar);
    let _ = Smooth::<f64>::new().scaling_method(MAR);
    let _ = Smooth::<f64>::new().scaling_method(MAD);
}

// ============================================================================
// Workflow Tests
// ============================================================================

/// Test the full condense, smooth, peel workflow.
#[test]
fn test_prelude_workflow() {
    let x = vec![0.2, 0.7, 1.1, 1.4, 1.9, 2.5, 2.6, 3.8];
    let y = vec![0.1, 0.3, 0.2, 0.8, 0.6, 0.4, 0.9, 0.7];
    let z = vec![1.0, 2.0, 2.5, 3.5, 3.0, 4.0, 5.0, 6.5];

    let table: CondensedTable<f64> = Condense::new()
        .axes(vec![
            AxisSpec::width(1.0).origin(0.0),
            AxisSpec::width(0.5).origin(0.0),
        ])
        .summary(Mean)
        .build()
        .unwrap()
        .condense_nd(&[&x[..], &y[..]], Some(&z), None)
        .unwrap();

    let smoother: Smoother<f64> = Smooth::new()
        .bandwidth(vec![1.5, 1.0])
        .method(Regression)
        .build()
        .unwrap();
    let smoothed = smoother.smooth_table(&table, Variable::Mean, None).unwrap();
    assert_eq!(smoothed.len(), table.len());

    let peeled = peel(&table, None).unwrap();
    assert!(peeled.len() <= table.len());

    let grid: SmoothGrid<f64> = table.to_grid(Variable::Mean).unwrap();
    assert_eq!(grid.dims(), 2);
    let _: Result<Vec<f64>, BigvisError> = bandwidth_candidates(0.5, 2.0, 4);
    let _: &Points<f64> = table.keys();
    let _ = table.midpoints(Dim(0)).unwrap();
}
