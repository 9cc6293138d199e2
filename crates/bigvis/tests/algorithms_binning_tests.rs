#![cfg(feature = "dev")]
//! Tests for bin assignment.
//!
//! These tests verify how values are mapped to bins:
//! - Validation of fixed-width and break-defined specifications
//! - Bin indices, including missing and out-of-range values
//! - Bin edges, midpoints and boundaries
//!
//! ## Test Organization
//!
//! 1. **Specification** - Validation and resolution against data
//! 2. **Fixed-width Bins** - Indexing and edges
//! 3. **Break-defined Bins** - Indexing and edges

use approx::assert_relative_eq;

use bigvis::internals::algorithms::binning::{
    BinIndex, BinSpec, Binner, BreakBins, FixedBins, MAX_BINS,
};
use bigvis::internals::primitives::errors::BigvisError;

// ============================================================================
// Specification Tests
// ============================================================================

/// Test rejection of invalid fixed-width specifications.
#[test]
fn test_fixed_spec_validation() {
    assert!(BinSpec::fixed(1.0, 0.0).is_ok());
    assert!(matches!(
        BinSpec::fixed(0.0, 0.0),
        Err(BigvisError::InvalidBinSpec(_))
    ));
    assert!(BinSpec::fixed(-1.0, 0.0).is_err());
    assert!(BinSpec::fixed(f64::NAN, 0.0).is_err());
    assert!(BinSpec::fixed(1.0, f64::INFINITY).is_err());
}

/// Test rejection of invalid break specifications.
#[test]
fn test_breaks_spec_validation() {
    assert!(BinSpec::breaks(vec![0.0, 1.0]).is_ok());
    assert!(BinSpec::breaks(vec![0.0]).is_err());
    assert!(BinSpec::breaks(vec![0.0, 2.0, 1.0]).is_err());
    assert!(BinSpec::breaks(vec![0.0, 1.0, 1.0]).is_err());
    assert!(BinSpec::breaks(vec![0.0, f64::NAN]).is_err());
}

/// Test that fixed-width bins take their count from the data.
///
/// Verifies nbins = floor((max - origin) / width) + 1.
#[test]
fn test_fixed_resolve_counts_bins_from_data() {
    let spec = BinSpec::fixed(1.0, 0.0).unwrap();
    let binner = spec.resolve(&[0.2, 3.8, f64::NAN, f64::INFINITY]).unwrap();
    assert_eq!(binner.nbins(), 4);

    // A maximum on an edge opens a new bin
    let binner = spec.resolve(&[0.0, 2.0]).unwrap();
    assert_eq!(binner.nbins(), 3);
}

/// Test resolution when no value is usable.
#[test]
fn test_fixed_resolve_without_finite_data() {
    let spec = BinSpec::fixed(1.0, 5.0).unwrap();
    assert_eq!(spec.resolve(&[f64::NAN]).unwrap().nbins(), 0);
    assert_eq!(spec.resolve(&[1.0, 2.0]).unwrap().nbins(), 0);
}

/// Test that a bin count too large to lay out is an error.
///
/// Verifies that no observation is silently dropped by a truncated count.
#[test]
fn test_fixed_resolve_too_many_bins() {
    let x = [0.0, 500.0, 1000.0];

    // Span not representable as a bin index
    let spec = BinSpec::fixed(1e-20, 0.0).unwrap();
    assert!(matches!(spec.resolve(&x), Err(BigvisError::InvalidBinSpec(_))));

    // Representable, but far too many bins to allocate
    let spec = BinSpec::fixed(1e-9, 0.0).unwrap();
    assert!(matches!(spec.resolve(&x), Err(BigvisError::InvalidBinSpec(_))));
    assert!(FixedBins::from_data(1e-9, 0.0, &x).is_err());

    assert!(FixedBins::new(1.0, 0.0, MAX_BINS).is_ok());
    assert!(FixedBins::new(1.0, 0.0, MAX_BINS + 1).is_err());
}

// ============================================================================
// Fixed-width Bin Tests
// ============================================================================

/// Test indices of fixed-width bins.
#[test]
fn test_fixed_index() {
    let bins = FixedBins::new(0.5, 1.0, 4).unwrap();

    assert_eq!(bins.index(1.0), BinIndex::Bin(0));
    assert_eq!(bins.index(1.49), BinIndex::Bin(0));
    assert_eq!(bins.index(1.5), BinIndex::Bin(1));
    assert_eq!(bins.index(2.99), BinIndex::Bin(3));
    assert_eq!(bins.index(3.0), BinIndex::OutOfRange);
    assert_eq!(bins.index(0.99), BinIndex::OutOfRange);
    assert_eq!(bins.index(f64::NAN), BinIndex::Missing);
    assert_eq!(bins.index(f64::INFINITY), BinIndex::OutOfRange);
    assert_eq!(bins.index(f64::NEG_INFINITY), BinIndex::OutOfRange);
}

/// Test edges and midpoints of fixed-width bins.
#[test]
fn test_fixed_edges() {
    let binner = Binner::Fixed(FixedBins::new(2.0, -1.0, 3).unwrap());

    assert_relative_eq!(binner.left(0), -1.0);
    assert_relative_eq!(binner.right(0), 1.0);
    assert_relative_eq!(binner.midpoint(2), 4.0);
    assert_eq!(binner.boundaries(), vec![-1.0, 1.0, 3.0, 5.0]);
}

// ============================================================================
// Break-defined Bin Tests
// ============================================================================

/// Test indices of break-defined bins.
///
/// Verifies left-closed bins with the last bin closed on the right.
#[test]
fn test_breaks_index() {
    let bins = BreakBins::new(vec![0.0, 1.0, 2.0, 3.0]).unwrap();

    assert_eq!(bins.index(0.0), BinIndex::Bin(0));
    assert_eq!(bins.index(0.5), BinIndex::Bin(0));
    assert_eq!(bins.index(1.0), BinIndex::Bin(1));
    assert_eq!(bins.index(2.9), BinIndex::Bin(2));
    assert_eq!(bins.index(3.0), BinIndex::Bin(2));
    assert_eq!(bins.index(3.1), BinIndex::OutOfRange);
    assert_eq!(bins.index(-0.1), BinIndex::OutOfRange);
    assert_eq!(bins.index(f64::NAN), BinIndex::Missing);
}

/// Test uneven break-defined bins.
#[test]
fn test_breaks_edges() {
    let binner = Binner::Breaks(BreakBins::new(vec![0.0, 1.0, 4.0]).unwrap());

    assert_eq!(binner.nbins(), 2);
    assert_relative_eq!(binner.left(1), 1.0);
    assert_relative_eq!(binner.right(1), 4.0);
    assert_relative_eq!(binner.midpoint(1), 2.5);
    assert_eq!(binner.boundaries(), vec![0.0, 1.0, 4.0]);
    assert_eq!(binner.index(3.0), BinIndex::Bin(1));
}
