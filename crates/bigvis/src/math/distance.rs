//! Bandwidth-scaled distances between grid points.
//!
//! ## Purpose
//!
//! The joint (non-factored) smoother weights every input point by the kernel
//! of its distance to the output point, with each axis measured in units of
//! that axis' bandwidth:
//!
//! ```text
//! d(x, x0) = sqrt( Σ_k ((x_k - x0_k) / h_k)^2 )
//! ```
//!
//! Because the result is already bandwidth-normalised, it is fed to the
//! kernel with a unit bandwidth.
//!
//! ## Invariants
//!
//! * Distance is non-negative and symmetric.
//! * In one dimension it reduces to |x - x0| / h.

// External dependencies
use core::cmp::Ordering;
use num_traits::Float;

/// Euclidean distance with each axis divided by its bandwidth.
#[inline]
pub fn scaled_euclidean<T: Float>(a: &[T], b: &[T], bandwidths: &[T]) -> T {
    debug_assert_eq!(a.len(), b.len(), "Points must have same dimension");
    debug_assert_eq!(a.len(), bandwidths.len());

    a.iter()
        .zip(b.iter())
        .zip(bandwidths.iter())
        .map(|((&ai, &bi), &h)| {
            let diff = (ai - bi) / h;
            diff * diff
        })
        .fold(T::zero(), |acc, x| acc + x)
        .sqrt()
}

/// Lexicographic order of `a` and `b` ignoring axis `skip`.
///
/// Points that compare `Equal` lie on the same line along `skip`; the
/// factored smoother groups its input into such lines. Coordinates are
/// expected to be finite.
#[inline]
pub fn cmp_except<T: Float>(a: &[T], b: &[T], skip: usize) -> Ordering {
    a.iter()
        .zip(b.iter())
        .enumerate()
        .filter(|(k, _)| *k != skip)
        .map(|(_, (ai, bi))| ai.partial_cmp(bi).unwrap_or(Ordering::Equal))
        .find(|o| *o != Ordering::Equal)
        .unwrap_or(Ordering::Equal)
}
