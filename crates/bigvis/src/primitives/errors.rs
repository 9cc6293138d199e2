//! Error types for binning and smoothing operations.
//!
//! ## Purpose
//!
//! This module defines the error conditions that can occur while condensing
//! raw vectors into per-bin summaries or while kernel-smoothing a condensed
//! grid.
//!
//! ## Design notes
//!
//! * **Contextual**: Errors carry the offending values (lengths, bandwidths, names).
//! * **Deferred**: Builder misuse is recorded and reported when `.build()` is called.
//! * **No-std**: Supports `no_std` environments by using `alloc` for dynamic messages.
//! * **Trait Implementation**: Implements `Display` and `std::error::Error` (when `std` is enabled).
//!
//! ## Key concepts
//!
//! 1. **Bin specification**: Non-positive widths, unordered or too-short breaks.
//! 2. **Paired vectors**: `z`, `w` and coordinate columns must match `x` in length.
//! 3. **Capability limits**: Weighted medians and non-factored local regression
//!    are rejected up front instead of silently producing something else.
//!
//! ## Invariants
//!
//! * All variants provide sufficient context for diagnosis.
//! * Numerical degeneracies of local fits never appear here; they fall back
//!   to the kernel mean inside the smoother.
//!
//! ## Non-goals
//!
//! * This module does not perform the validation logic itself.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::string::String;
#[cfg(feature = "std")]
use std::error::Error;
#[cfg(feature = "std")]
use std::string::String;

// External dependencies
use core::fmt::{Display, Formatter, Result};

// ============================================================================
// Error Type
// ============================================================================

/// Error type for condensing and smoothing operations.
#[derive(Debug, Clone, PartialEq)]
pub enum BigvisError {
    /// No observations (or no grid points) were supplied.
    EmptyInput,

    /// Malformed bin specification (width, origin or breaks).
    InvalidBinSpec(String),

    /// A paired vector does not have the expected number of elements.
    LengthMismatch {
        /// Which vector was checked (e.g. "z", "weights", "coordinates").
        what: &'static str,
        /// Required number of elements.
        expected: usize,
        /// Number of elements provided.
        got: usize,
    },

    /// Weights were supplied for a summary that cannot honour them.
    UnsupportedWeighting {
        /// Name of the summary statistic.
        summary: &'static str,
    },

    /// The requested combination of smoothing options is not available.
    UnsupportedConfiguration {
        /// Name of the smoothing method.
        method: &'static str,
        /// Name of the unsupported option.
        feature: &'static str,
    },

    /// Input data contains a value that is not allowed at that position.
    InvalidNumericValue(String),

    /// Bandwidths must be positive and finite.
    InvalidBandwidth(f64),

    /// Number of dimensions does not agree between grid, bandwidth or axis index.
    DimensionMismatch {
        /// Expected number of dimensions.
        expected: usize,
        /// Number of dimensions provided.
        got: usize,
    },

    /// Robust iterations must be in [1, 1000].
    InvalidIterations(usize),

    /// Convergence tolerance must be positive and finite.
    InvalidTolerance(f64),

    /// A proportion must lie in (0, 1].
    InvalidFraction(f64),

    /// A required builder parameter was never set.
    MissingParameter {
        /// Name of the missing parameter.
        parameter: &'static str,
    },

    /// Parameter was set multiple times (or conflicts with another) in the builder.
    DuplicateParameter {
        /// Name of the parameter that was set multiple times.
        parameter: &'static str,
    },

    /// A condensed table does not contain the requested column.
    UnknownVariable {
        /// Name of the requested column.
        variable: &'static str,
    },
}

// ============================================================================
// Display Implementation
// ============================================================================

impl Display for BigvisError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Self::EmptyInput => write!(f, "Input arrays are empty"),
            Self::InvalidBinSpec(msg) => write!(f, "Invalid bin specification: {msg}"),
            Self::LengthMismatch {
                what,
                expected,
                got,
            } => {
                write!(f, "Length mismatch: {what} has {got} elements, expected {expected}")
            }
            Self::UnsupportedWeighting { summary } => {
                write!(f, "Summary '{summary}' does not support non-uniform weights")
            }
            Self::UnsupportedConfiguration { method, feature } => {
                write!(f, "Smoothing method '{method}' does not support: {feature}")
            }
            Self::InvalidNumericValue(s) => write!(f, "Invalid numeric value: {s}"),
            Self::InvalidBandwidth(h) => {
                write!(f, "Invalid bandwidth: {h} (must be > 0 and finite)")
            }
            Self::DimensionMismatch { expected, got } => {
                write!(f, "Dimension mismatch: got {got}, expected {expected}")
            }
            Self::InvalidIterations(iter) => {
                write!(f, "Invalid iterations: {iter} (must be in [1, 1000])")
            }
            Self::InvalidTolerance(tol) => {
                write!(f, "Invalid tolerance: {tol} (must be > 0 and finite)")
            }
            Self::InvalidFraction(frac) => {
                write!(f, "Invalid fraction: {frac} (must be > 0 and <= 1)")
            }
            Self::MissingParameter { parameter } => {
                write!(f, "Missing required parameter '{parameter}'")
            }
            Self::DuplicateParameter { parameter } => {
                write!(
                    f,
                    "Parameter '{parameter}' was set multiple times. Each parameter can only be configured once."
                )
            }
            Self::UnknownVariable { variable } => {
                write!(f, "Condensed table has no column '{variable}'")
            }
        }
    }
}

// ============================================================================
// Standard Error Trait
// ============================================================================

#[cfg(feature = "std")]
impl Error for BigvisError {}
