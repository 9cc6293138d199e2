//! Layer 4: Evaluation
//!
//! # Purpose
//!
//! This layer assesses and post-processes smoothing and condensing results:
//! - Leave-one-out cross-validation for bandwidth selection
//! - Peeling of sparse outlying bins
//!
//! # Architecture
//!
//! ```text
//! Layer 6: API
//!   ↓
//! Layer 5: Engine
//!   ↓
//! Layer 4: Evaluation ← You are here
//!   ↓
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// Cross-validation for bandwidth selection.
pub mod cv;

/// Density-based bin selection.
pub mod peel;
