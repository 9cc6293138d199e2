//! Layer 3: Algorithms
//!
//! This layer implements the core logic: mapping values to bins, per-bin
//! running statistics, weighted least-squares lines, robustness weights and
//! the one-dimensional kernel estimators. It is orchestrated by the engine
//! layer.

// Bin indexing for fixed-width and break-defined bins.
pub mod binning;

// Per-bin running statistics.
pub mod accumulator;

// Weighted least-squares line fits.
pub mod regression;

// Robustness weights for outlier downweighting.
pub mod robustness;

// One-dimensional kernel estimators.
pub mod smoother;
