//! Layer 1: Primitives
//!
//! # Purpose
//!
//! This layer provides the primitive data structures and utility functions
//! used throughout the crate. It has zero internal dependencies within the
//! crate apart from the shared error type.
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
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives ← You are here
//! ```

/// Shared error types.
pub mod errors;

/// Coordinate matrices and smoothing grids.
pub mod grid;

/// Contiguous per-bin value storage.
pub mod arena;

/// Sorting utilities.
pub mod sorting;
