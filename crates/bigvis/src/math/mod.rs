//! Layer 2: Math
//!
//! # Purpose
//!
//! This layer provides pure mathematical functions:
//! - Kernel functions for distance-based weighting
//! - Exact medians and robust scale estimation
//! - Bandwidth-scaled n-D distances
//!
//! These are reusable building blocks with no binning- or smoothing-specific
//! state.
//!
//! # Architecture
//!
//! ```text
//! Layer 6: API
//!   ↓
//! Layer 5: Engine
//!   ↓
//! Layer 4: Evaluation
//!   ↓
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math ← You are here
//!   ↓
//! Layer 1: Primitives
//! ```

/// Kernel (weight) functions for distance-based weighting.
pub mod kernel;

/// Medians and robust scale estimation (MAR/MAD).
pub mod scaling;

/// Bandwidth-scaled distances.
pub mod distance;
