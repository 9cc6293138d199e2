#![cfg(feature = "dev")]
//! Tests for condensing observations into binned summaries.
//!
//! These tests verify the condense engine end to end:
//! - Slot layout of one- and n-dimensional tables
//! - Counts, sums, means, standard deviations and medians per bin
//! - Handling of missing, out-of-range and infinite grouping values
//! - Weighted summaries
//!
//! ## Test Organization
//!
//! 1. **Slot Layout** - Flat slots and table keys
//! 2. **Counts and Sums** - Conservation and weighting
//! 3. **Moments and Medians** - Per-bin statistics
//! 4. **Missing Values** - NaN, infinities and out-of-range data
//! 5. **Multiple Dimensions** - Mixed-radix tables

use approx::assert_relative_eq;

use bigvis::internals::algorithms::accumulator::{Summary, SummaryClass, Variable};
use bigvis::internals::algorithms::binning::{BinSpec, Binner, BreakBins, FixedBins};
use bigvis::internals::engine::condense::{SlotLayout, condense};
use bigvis::internals::primitives::errors::BigvisError;
use bigvis::internals::primitives::grid::Dim;

fn fixed(width: f64, origin: f64) -> BinSpec<f64> {
    BinSpec::fixed(width, origin).unwrap()
}

// ============================================================================
// Slot Layout Tests
// ============================================================================

/// Test the mixed-radix layout with a missing slot per axis.
#[test]
fn test_slot_layout_two_axes() {
    let layout = SlotLayout::new(vec![
        Binner::Fixed(FixedBins::new(1.0, 0.0, 2).unwrap()),
        Binner::Breaks(BreakBins::new(vec![0.0, 10.0, 20.0, 30.0]).unwrap()),
    ])
    .unwrap();

    assert_eq!(layout.total(), 12);

    let x = [0.5, f64::NAN, 1.5, 5.0];
    let y = [25.0, 5.0, f64::NAN, 5.0];
    let xs: [&[f64]; 2] = [&x, &y];
    assert_eq!(layout.slot_of(&xs, 0), Some(1 + 3 * 3));
    assert_eq!(layout.slot_of(&xs, 1), Some(3));
    assert_eq!(layout.slot_of(&xs, 2), Some(2));
    assert_eq!(layout.slot_of(&xs, 3), None);
}

/// Test that layouts too large to allocate are rejected.
#[test]
fn test_slot_layout_too_many_slots() {
    let wide = || Binner::Fixed(FixedBins::new(1.0, 0.0, 5000).unwrap());

    assert!(SlotLayout::new(vec![wide()]).is_ok());
    assert!(matches!(
        SlotLayout::new(vec![wide(), wide()]),
        Err(BigvisError::InvalidBinSpec(_))
    ));
}

/// Test that an unrepresentable bin count fails instead of dropping data.
#[test]
fn test_condense_too_many_bins() {
    let x = [0.0, 500.0, 1000.0];
    let err = condense(&[&x], None, None, &[fixed(1e-20, 0.0)], Summary::Count).unwrap_err();

    assert!(matches!(err, BigvisError::InvalidBinSpec(_)));
}

/// Test table keys: left edges, NaN in the missing slot.
#[test]
fn test_slot_layout_keys() {
    let binner = Binner::Fixed(FixedBins::<f64>::new(0.5, 1.0, 3).unwrap());
    let layout = SlotLayout::new(vec![binner]).unwrap();
    let keys = layout.keys().unwrap();

    assert_eq!(keys.len(), 4);
    assert!(keys.coord(0, Dim(0)).is_nan());
    assert_eq!(keys.column(Dim(0))[1..], [1.0, 1.5, 2.0]);
}

// ============================================================================
// Counts and Sums Tests
// ============================================================================

/// Test that counts add up to the number of in-range observations.
#[test]
fn test_count_conserves_observations() {
    let x: Vec<f64> = (0..1000).map(|i| (i as f64 * 0.37).sin() * 10.0 + 10.0).collect();
    let table = condense(&[&x], None, None, &[fixed(0.5, 0.0)], Summary::Count).unwrap();

    let total: f64 = table.column(Variable::Count).unwrap().iter().sum();
    assert_relative_eq!(total, 1000.0);
    assert_eq!(table.class(), SummaryClass::Sum);
}

/// Test counts over break-defined bins.
///
/// Verifies that the last break closes the final bin.
#[test]
fn test_count_with_breaks() {
    let x = [0.0, 0.5, 1.5, 2.9, 3.0];
    let spec = BinSpec::breaks(vec![0.0, 1.0, 2.0, 3.0]).unwrap();
    let table = condense(&[&x], None, None, &[spec], Summary::Count).unwrap();

    assert_eq!(table.column(Variable::Count).unwrap(), &[0.0, 2.0, 1.0, 2.0]);
}

/// Test that weighted counts sum the weights.
#[test]
fn test_weighted_count_and_sum() {
    let x = [0.1, 0.2, 1.5];
    let z = [1.0, 2.0, 3.0];
    let w = [2.0, 0.5, 1.0];

    let table = condense(&[&x], Some(&z), Some(&w), &[fixed(1.0, 0.0)], Summary::Sum).unwrap();

    assert_eq!(table.column(Variable::Count).unwrap(), &[0.0, 2.5, 1.0]);
    assert_eq!(table.column(Variable::Sum).unwrap(), &[0.0, 3.0, 3.0]);
}

/// Condense one bin of `z` (all at x = 0.5) forwards and reversed.
fn both_orders(
    z: &[f64],
    w: Option<&[f64]>,
    summary: Summary,
    variable: Variable,
) -> (f64, f64) {
    let x = vec![0.5; z.len()];
    let run = |z: &[f64], w: Option<&[f64]>| {
        let table = condense(&[&x[..]], Some(z), w, &[fixed(1.0, 0.0)], summary).unwrap();
        table.column(variable).unwrap()[1]
    };

    let z_rev: Vec<f64> = z.iter().rev().copied().collect();
    let w_rev: Option<Vec<f64>> = w.map(|w| w.iter().rev().copied().collect());
    (run(z, w), run(&z_rev, w_rev.as_deref()))
}

/// Test that sums survive cancellation in any update order.
#[test]
fn test_sum_independent_of_order() {
    let z = [1e16, 1.0, -1e16, 1.0];

    let (forward, reversed) = both_orders(&z, None, Summary::Sum, Variable::Sum);

    assert_eq!(forward, 2.0);
    assert_eq!(reversed, 2.0);
}

/// Test that weighted counts do not depend on update order.
#[test]
fn test_weighted_count_independent_of_order() {
    let z = [1.0; 4];
    let w = [1e16, 1.0, 1.0, 1.0];

    let (forward, reversed) = both_orders(&z, Some(&w), Summary::Count, Variable::Count);

    assert_eq!(forward, reversed);
    assert_relative_eq!(forward, 1e16 + 3.0);
}

/// Test that medians do not depend on update order.
#[test]
fn test_median_independent_of_order() {
    let z = [3.0, 1.0, 2.0, 5.0, 4.0, 0.5];

    let (forward, reversed) = both_orders(&z, None, Summary::Median, Variable::Median);

    assert_eq!(forward, 2.5);
    assert_eq!(reversed, 2.5);
}

// ============================================================================
// Moments and Medians Tests
// ============================================================================

/// Test per-bin means, with NaN for empty bins.
#[test]
fn test_mean_per_bin() {
    let x = [0.2, 0.7, 2.5, 2.6];
    let z = [1.0, 2.0, 4.0, 5.0];
    let table = condense(&[&x], Some(&z), None, &[fixed(1.0, 0.0)], Summary::Mean).unwrap();

    let mean: &[f64] = table.column(Variable::Mean).unwrap();
    assert_eq!(table.len(), 4);
    assert!(mean[0].is_nan());
    assert_relative_eq!(mean[1], 1.5);
    assert!(mean[2].is_nan());
    assert_relative_eq!(mean[3], 4.5);
    assert!(table.column(Variable::Sum).is_err());
}

/// Test per-bin standard deviations.
#[test]
fn test_sd_per_bin() {
    let x = [0.1, 0.2, 0.3, 1.5];
    let z = [1.0, 2.0, 3.0, 10.0];
    let table = condense(&[&x], Some(&z), None, &[fixed(1.0, 0.0)], Summary::Sd).unwrap();

    let sd: &[f64] = table.column(Variable::Sd).unwrap();
    assert_relative_eq!(sd[1], 1.0, epsilon = 1e-12);
    assert!(sd[2].is_nan());
    assert_eq!(table.column(Variable::Count).unwrap()[1], 3.0);
}

/// Test exact per-bin medians.
#[test]
fn test_median_per_bin() {
    let x = [0.1, 0.9, 0.5, 1.2, 1.8, f64::NAN];
    let z = [9.0, 1.0, 5.0, 2.0, 4.0, 7.0];
    let table = condense(&[&x], Some(&z), None, &[fixed(1.0, 0.0)], Summary::Median).unwrap();

    let median = table.column(Variable::Median).unwrap();
    assert_eq!(median, &[7.0, 5.0, 3.0]);
    assert_eq!(table.class(), SummaryClass::Median);
    assert!(!table.has(Variable::Count));
}

/// Test that medians accept uniform weights only.
#[test]
fn test_median_rejects_varying_weights() {
    let x = [0.1, 0.2];
    let z = [1.0, 2.0];

    let spec = [fixed(1.0, 0.0)];

    let ok = condense(&[&x], Some(&z), Some(&[3.0, 3.0]), &spec, Summary::Median);
    assert!(ok.is_ok());

    let err = condense(&[&x], Some(&z), Some(&[1.0, 2.0]), &spec, Summary::Median).unwrap_err();
    assert_eq!(err, BigvisError::UnsupportedWeighting { summary: "median" });
}

// ============================================================================
// Missing Values Tests
// ============================================================================

/// Test that NaN grouping values collect in row 0.
#[test]
fn test_nan_goes_to_missing_row() {
    let x = [f64::NAN, 0.5, f64::NAN];
    let table = condense(&[&x], None, None, &[fixed(1.0, 0.0)], Summary::Count).unwrap();

    assert_eq!(table.column(Variable::Count).unwrap(), &[2.0, 1.0]);
    assert!(table.is_missing_row(0));
    assert!(!table.is_missing_row(1));
}

/// Test that infinities and values left of the origin are dropped.
#[test]
fn test_out_of_range_dropped() {
    let x = [f64::INFINITY, f64::NEG_INFINITY, -0.5, 0.5, 1.5];
    let table = condense(&[&x], None, None, &[fixed(1.0, 0.0)], Summary::Count).unwrap();

    assert_eq!(table.column(Variable::Count).unwrap(), &[0.0, 1.0, 1.0]);
}

/// Test that values beyond the last break are dropped.
#[test]
fn test_beyond_breaks_dropped() {
    let x = [-1.0, 0.5, 4.0];
    let spec = BinSpec::breaks(vec![0.0, 1.0]).unwrap();
    let table = condense(&[&x], None, None, &[spec], Summary::Count).unwrap();

    assert_eq!(table.column(Variable::Count).unwrap(), &[0.0, 1.0]);
}

/// Test input validation of the condense engine.
#[test]
fn test_condense_validation() {
    let x = [0.5, 1.5];

    assert_eq!(
        condense(&[&x], None, None, &[fixed(1.0, 0.0)], Summary::Mean).unwrap_err(),
        BigvisError::MissingParameter { parameter: "z" }
    );
    assert!(matches!(
        condense(&[&x], Some(&[1.0, f64::NAN]), None, &[fixed(1.0, 0.0)], Summary::Sum),
        Err(BigvisError::InvalidNumericValue(_))
    ));
    assert!(matches!(
        condense(&[&x], None, Some(&[1.0, -1.0]), &[fixed(1.0, 0.0)], Summary::Count),
        Err(BigvisError::InvalidNumericValue(_))
    ));
    assert!(matches!(
        condense(&[&x], Some(&[1.0]), None, &[fixed(1.0, 0.0)], Summary::Sum),
        Err(BigvisError::LengthMismatch { what: "z", .. })
    ));
    assert_eq!(
        condense::<f64>(&[&[]], None, None, &[fixed(1.0, 0.0)], Summary::Count).unwrap_err(),
        BigvisError::EmptyInput
    );
}

// ============================================================================
// Multiple Dimensions Tests
// ============================================================================

/// Test a two-dimensional count table.
///
/// Verifies (nbins + 1) slots per axis with the first axis varying fastest.
#[test]
fn test_two_dimensional_counts() {
    let x = [0.5, 1.5, 0.5, 1.5, 0.5];
    let y = [0.5, 0.5, 1.5, 1.5, 1.5];
    let table = condense(
        &[&x, &y],
        None,
        None,
        &[fixed(1.0, 0.0), fixed(1.0, 0.0)],
        Summary::Count,
    )
    .unwrap();

    assert_eq!(table.len(), 9);
    assert_eq!(table.dims(), 2);
    assert_eq!(
        table.column(Variable::Count).unwrap(),
        &[0.0, 0.0, 0.0, 0.0, 1.0, 1.0, 0.0, 2.0, 1.0]
    );
    assert_eq!(table.keys().point(4), &[0.0, 0.0]);
    assert_eq!(table.keys().point(7), &[0.0, 1.0]);
    assert!(table.keys().point(3)[0].is_nan());
}

/// Test that mismatched grouping columns are rejected.
#[test]
fn test_two_dimensional_length_mismatch() {
    let x = [0.5, 1.5];
    let y = [0.5];
    let err = condense(
        &[&x, &y],
        None,
        None,
        &[fixed(1.0, 0.0), fixed(1.0, 0.0)],
        Summary::Count,
    )
    .unwrap_err();

    assert!(matches!(err, BigvisError::LengthMismatch { what: "x", .. }));
}
