//! Density-based bin selection ("peeling").
//!
//! ## Purpose
//!
//! Plots of condensed data are often dominated by a few sparse bins far out
//! in the tails. Peeling keeps the densest bins that together hold at least
//! a fraction `keep` of all observations and discards the rest.
//!
//! ## Design notes
//!
//! * **Greedy**: Bins are taken in order of decreasing count until the kept
//!   total reaches `keep` of the grand total. Ties keep their row order.
//! * **Row order**: The selected rows are reported in their original order.
//!
//! ## Invariants
//!
//! * Missing-slot rows are never selected.
//! * Empty bins are never selected.
//!
//! ## Non-goals
//!
//! * This module does not build tables; it only selects rows.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use core::cmp::Ordering::Equal;
use num_traits::Float;

/// Default share of observations kept by [`peel_rows`].
pub const DEFAULT_KEEP: f64 = 0.99;

/// Rows of the densest bins holding at least `keep` of the total count.
///
/// `excluded(i)` marks rows that never take part (the missing slot).
pub fn peel_rows<T, E>(counts: &[T], keep: T, excluded: E) -> Vec<usize>
where
    T: Float,
    E: Fn(usize) -> bool,
{
    let mut candidates: Vec<usize> = (0..counts.len())
        .filter(|&i| !excluded(i) && counts[i] > T::zero())
        .collect();

    let total = candidates
        .iter()
        .fold(T::zero(), |acc, &i| acc + counts[i]);
    if !(total > T::zero()) {
        return Vec::new();
    }

    // Densest first; the sort is stable so ties keep row order
    candidates.sort_by(|&a, &b| counts[b].partial_cmp(&counts[a]).unwrap_or(Equal));

    let target = keep * total;
    let mut kept = Vec::new();
    let mut running = T::zero();
    for i in candidates {
        if running >= target {
            break;
        }
        running = running + counts[i];
        kept.push(i);
    }

    kept.sort_unstable();
    kept
}
