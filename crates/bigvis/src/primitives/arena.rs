//! Contiguous per-bin value storage.
//!
//! ## Purpose
//!
//! Exact per-bin medians need every value that fell into a bin. Instead of one
//! growable vector per bin, `BinArena` lays all values out in a single buffer
//! grouped by bin, sized by a counting pass before anything is copied.
//!
//! ## Design notes
//!
//! * **Two passes**: Pass one counts occupancy, pass two scatters values.
//! * **Stable**: Within a bin, values keep their input order.
//! * **No reallocation**: The buffer and offsets are allocated exactly once.
//!
//! ## Invariants
//!
//! * `offsets.len() == nbins + 1`, `offsets[0] == 0`, non-decreasing.
//! * `values[offsets[i]..offsets[i + 1]]` holds exactly the values of bin `i`.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

/// Values of every bin stored contiguously, grouped by bin index.
#[derive(Debug, Clone, PartialEq)]
pub struct BinArena<T> {
    values: Vec<T>,
    offsets: Vec<usize>,
}

impl<T: Copy> BinArena<T> {
    /// Build the arena from the first `n` samples of `values`.
    ///
    /// `slot_of(i)` returns the bin of sample `i`, or `None` to drop it.
    pub fn build<S>(nbins: usize, n: usize, values: &[T], slot_of: S) -> Self
    where
        S: Fn(usize) -> Option<usize>,
    {
        // Pass 1: occupancy
        let slots: Vec<Option<usize>> = (0..n).map(slot_of).collect();
        let mut offsets = vec![0usize; nbins + 1];
        for slot in slots.iter().flatten() {
            offsets[slot + 1] += 1;
        }
        for b in 0..nbins {
            offsets[b + 1] += offsets[b];
        }

        // Pass 2: scatter sample indices, then gather their values
        let mut cursor: Vec<usize> = offsets[..nbins].to_vec();
        let mut order = vec![0usize; offsets[nbins]];
        for (i, slot) in slots.iter().enumerate() {
            if let Some(slot) = *slot {
                order[cursor[slot]] = i;
                cursor[slot] += 1;
            }
        }

        Self {
            values: order.iter().map(|&i| values[i]).collect(),
            offsets,
        }
    }

    /// Number of bins.
    #[inline]
    pub fn nbins(&self) -> usize {
        self.offsets.len() - 1
    }

    /// Number of values stored for bin `i`.
    #[inline]
    pub fn occupancy(&self, i: usize) -> usize {
        self.offsets[i + 1] - self.offsets[i]
    }

    /// Values of bin `i`.
    #[inline]
    pub fn bin(&self, i: usize) -> &[T] {
        &self.values[self.offsets[i]..self.offsets[i + 1]]
    }

    /// Mutable values of bin `i` (used for in-place selection).
    #[inline]
    pub fn bin_mut(&mut self, i: usize) -> &mut [T] {
        let (lo, hi) = (self.offsets[i], self.offsets[i + 1]);
        &mut self.values[lo..hi]
    }

    /// Total number of stored values.
    #[inline]
    pub fn total(&self) -> usize {
        self.values.len()
    }
}
