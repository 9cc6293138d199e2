//! Layer 5: Engine
//!
//! # Purpose
//!
//! This layer orchestrates condensing and smoothing by coordinating between
//! primitives (grids, arenas) and algorithms (binning, accumulators, local
//! estimators). It validates inputs, runs the passes and assembles the
//! condensed tables handed back to callers.
//!
//! # Architecture
//!
//! ```text
//! Layer 6: API
//!   ↓
//! Layer 5: Engine ← You are here
//!   ↓
//! Layer 4: Evaluation
//!   ↓
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// Single-pass binned summaries.
pub mod condense;

/// Execution engine for kernel smoothing.
pub mod executor;

/// Validation utilities.
pub mod validator;

/// Condensed table type.
pub mod output;
