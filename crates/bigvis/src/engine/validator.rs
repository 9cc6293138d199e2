//! Input validation for condensing and smoothing.
//!
//! ## Purpose
//!
//! This module checks every precondition of the condense and smoothing
//! engines before any work starts, so a call either fails with the first
//! violation found or runs to completion.
//!
//! ## Design notes
//!
//! * **Fail-Fast**: Validation stops at the first error encountered.
//! * **Efficiency**: Checks are ordered from cheap to expensive.
//! * **Generics**: Validation is generic over `Float` types.
//!
//! ## Invariants
//!
//! * Validation is deterministic and side-effect free.
//!
//! ## Non-goals
//!
//! * This module does not clean, sort or filter data.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::format;

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::algorithms::accumulator::Summary;
use crate::algorithms::binning::BinSpec;
use crate::algorithms::smoother::SmoothMethod;
use crate::primitives::errors::BigvisError;
use crate::primitives::grid::{Points, SmoothGrid};

// ============================================================================
// Validator
// ============================================================================

/// Validation utility for condense and smoothing inputs.
///
/// All methods return `Result<(), BigvisError>` and fail fast upon
/// identifying the first violation.
pub struct Validator;

impl Validator {
    // ========================================================================
    // Condense Validation
    // ========================================================================

    /// Validate the inputs of a (possibly n-dimensional) condense.
    pub fn validate_condense<T: Float>(
        xs: &[&[T]],
        z: Option<&[T]>,
        w: Option<&[T]>,
        specs: &[BinSpec<T>],
        summary: Summary,
    ) -> Result<(), BigvisError> {
        // Check 1: One bin specification per grouping column
        if xs.is_empty() {
            return Err(BigvisError::EmptyInput);
        }
        if specs.len() != xs.len() {
            return Err(BigvisError::DimensionMismatch {
                expected: xs.len(),
                got: specs.len(),
            });
        }

        // Check 2: Non-empty, equally long grouping columns
        let n = xs[0].len();
        if n == 0 {
            return Err(BigvisError::EmptyInput);
        }
        for x in xs.iter().skip(1) {
            Self::validate_length(x.len(), n, "x")?;
        }

        // Check 3: Well-formed bins
        for spec in specs {
            spec.validate()?;
        }

        // Check 4: Values
        match z {
            Some(z) => {
                Self::validate_length(z.len(), n, "z")?;
                if let Some(i) = z.iter().position(|v| !v.is_finite()) {
                    return Err(BigvisError::InvalidNumericValue(format!(
                        "z[{}]={}",
                        i,
                        z[i].to_f64().unwrap_or(f64::NAN)
                    )));
                }
            }
            None if summary.needs_values() => {
                return Err(BigvisError::MissingParameter { parameter: "z" });
            }
            None => {}
        }

        // Check 5: Weights
        if let Some(w) = w {
            Self::validate_weights(w, n)?;
            if !summary.supports_weights() && w.windows(2).any(|p| p[0] != p[1]) {
                return Err(BigvisError::UnsupportedWeighting {
                    summary: summary.name(),
                });
            }
        }

        Ok(())
    }

    /// Validate a paired vector's length.
    pub fn validate_length(
        got: usize,
        expected: usize,
        what: &'static str,
    ) -> Result<(), BigvisError> {
        if got != expected {
            return Err(BigvisError::LengthMismatch {
                what,
                expected,
                got,
            });
        }
        Ok(())
    }

    /// Validate weights: matching length, finite and non-negative.
    pub fn validate_weights<T: Float>(w: &[T], n: usize) -> Result<(), BigvisError> {
        Self::validate_length(w.len(), n, "weights")?;
        if let Some(i) = w.iter().position(|v| !v.is_finite() || *v < T::zero()) {
            return Err(BigvisError::InvalidNumericValue(format!(
                "weights[{}]={} (must be finite and >= 0)",
                i,
                w[i].to_f64().unwrap_or(f64::NAN)
            )));
        }
        Ok(())
    }

    // ========================================================================
    // Smoothing Validation
    // ========================================================================

    /// Validate the configuration of a smoother.
    pub fn validate_smooth_config<T: Float>(
        bandwidth: &[T],
        method: SmoothMethod,
        factored: bool,
        iterations: usize,
        tolerance: Option<T>,
    ) -> Result<(), BigvisError> {
        if bandwidth.is_empty() {
            return Err(BigvisError::MissingParameter {
                parameter: "bandwidth",
            });
        }
        for &h in bandwidth {
            Self::validate_bandwidth(h)?;
        }
        if !factored && method != SmoothMethod::Mean {
            return Err(BigvisError::UnsupportedConfiguration {
                method: method.name(),
                feature: "non-factored smoothing",
            });
        }
        Self::validate_iterations(iterations)?;
        if let Some(tol) = tolerance {
            Self::validate_tolerance(tol)?;
        }
        Ok(())
    }

    /// Validate a single bandwidth.
    pub fn validate_bandwidth<T: Float>(h: T) -> Result<(), BigvisError> {
        if !h.is_finite() || h <= T::zero() {
            return Err(BigvisError::InvalidBandwidth(
                h.to_f64().unwrap_or(f64::NAN),
            ));
        }
        Ok(())
    }

    /// Validate the number of robustness iterations.
    pub fn validate_iterations(iterations: usize) -> Result<(), BigvisError> {
        const MAX_ITERATIONS: usize = 1000;
        if iterations == 0 || iterations > MAX_ITERATIONS {
            return Err(BigvisError::InvalidIterations(iterations));
        }
        Ok(())
    }

    /// Validate the convergence tolerance.
    pub fn validate_tolerance<T: Float>(tol: T) -> Result<(), BigvisError> {
        if !tol.is_finite() || tol <= T::zero() {
            return Err(BigvisError::InvalidTolerance(
                tol.to_f64().unwrap_or(f64::NAN),
            ));
        }
        Ok(())
    }

    /// Validate an input grid and an output grid against `bandwidth`.
    pub fn validate_smooth_inputs<T: Float>(
        grid: &SmoothGrid<T>,
        out: &Points<T>,
        bandwidth: &[T],
    ) -> Result<(), BigvisError> {
        if grid.is_empty() {
            return Err(BigvisError::EmptyInput);
        }
        let d = grid.dims();
        if bandwidth.len() != d {
            return Err(BigvisError::DimensionMismatch {
                expected: d,
                got: bandwidth.len(),
            });
        }
        if out.dims() != d {
            return Err(BigvisError::DimensionMismatch {
                expected: d,
                got: out.dims(),
            });
        }
        Self::validate_coordinates(grid.points(), "input grid")?;
        Self::validate_coordinates(out, "output grid")?;
        if let Some(w) = grid.weights() {
            Self::validate_weights(w, grid.len())?;
        }
        Ok(())
    }

    /// Validate that every coordinate is finite.
    pub fn validate_coordinates<T: Float>(
        points: &Points<T>,
        what: &str,
    ) -> Result<(), BigvisError> {
        if let Some(i) = points.as_slice().iter().position(|v| !v.is_finite()) {
            let d = points.dims();
            return Err(BigvisError::InvalidNumericValue(format!(
                "{} point {} dim {} = {}",
                what,
                i / d,
                i % d,
                points.as_slice()[i].to_f64().unwrap_or(f64::NAN)
            )));
        }
        Ok(())
    }

    /// Validate a proportion in (0, 1].
    pub fn validate_fraction<T: Float>(fraction: T) -> Result<(), BigvisError> {
        if !fraction.is_finite() || fraction <= T::zero() || fraction > T::one() {
            return Err(BigvisError::InvalidFraction(
                fraction.to_f64().unwrap_or(f64::NAN),
            ));
        }
        Ok(())
    }

    /// Validate that no parameters were set multiple times in a builder.
    pub fn validate_no_duplicates(
        duplicate_param: Option<&'static str>,
    ) -> Result<(), BigvisError> {
        if let Some(param) = duplicate_param {
            return Err(BigvisError::DuplicateParameter { parameter: param });
        }
        Ok(())
    }
}
