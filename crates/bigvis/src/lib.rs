//! # bigvis: condense and smooth large datasets for visualisation
//!
//! Millions of points are too many to plot or summarise one by one. This
//! crate reduces them to one row per bin, computing a summary statistic
//! (count, sum, mean, standard deviation or median) for each bin, and then
//! optionally smooths the binned values with a kernel estimator.
//!
//! ## How it works
//!
//! 1. **Condense**: Every observation is assigned to a bin, either fixed-width
//!    (`binwidth` and `origin`) or delimited by explicit `breaks`, and the
//!    bin's accumulator absorbs its value and weight in a single pass.
//! 2. **Smooth**: The per-bin values are smoothed with a kernel-weighted mean,
//!    a local linear regression, or a robust local regression. In several
//!    dimensions the smoother is applied one dimension at a time (factored)
//!    or with a joint kernel.
//!
//! ## Quick Start
//!
//! ### Typical Use
//!
//! ```rust
//! use bigvis::prelude::*;
//!
//! let x = vec![0.2, 0.7, 1.1, 1.4, 1.9, 2.5, 2.6, 3.8];
//! let z = vec![1.0, 2.0, 2.5, 3.5, 3.0, 4.0, 5.0, 6.5];
//!
//! // Mean of z in bins of width 1 starting at 0
//! let condenser = Condense::new()
//!     .binwidth(1.0)
//!     .origin(0.0)
//!     .summary(Mean)
//!     .build()?;
//!
//! let table = condenser.condense(&x, Some(&z), None)?;
//!
//! // Smooth the bin means, weighting each bin by its count
//! let smoother = Smooth::new()
//!     .bandwidth(vec![1.5])
//!     .method(Regression)
//!     .build()?;
//!
//! let smoothed = smoother.smooth_table(&table, Variable::Mean, None)?;
//!
//! println!("{}", table);
//! println!("{}", smoothed);
//! # Result::<(), BigvisError>::Ok(())
//! ```
//!
//! ```text
//! Summary:
//!   Statistic:  mean (moments)
//!   Rows:       5
//!   Dimensions: 1
//!
//! Condensed Data:
//!          x       .count        .mean
//! ------------------------------------
//!         NA     0.000000          NaN
//!     0.0000     2.000000     1.500000
//!     1.0000     3.000000     3.000000
//!     2.0000     2.000000     4.500000
//!     3.0000     1.000000     6.500000
//! ```
//!
//! Row 0 collects the observations whose `x` is NaN ("missing").
//!
//! ### Several dimensions
//!
//! ```rust
//! use bigvis::prelude::*;
//!
//! let x = vec![0.5, 1.5, 0.5, 1.5, 0.5];
//! let y = vec![0.5, 0.5, 1.5, 1.5, 1.5];
//!
//! let condenser = Condense::new()
//!     .axes(vec![AxisSpec::width(1.0).origin(0.0), AxisSpec::width(1.0).origin(0.0)])
//!     .build()?;
//!
//! // (nbins + 1) rows per axis, first axis fastest
//! let table = condenser.condense_nd(&[&x[..], &y[..]], None, None)?;
//! assert_eq!(table.len(), 9);
//! # Result::<(), BigvisError>::Ok(())
//! ```
//!
//! ### Result and Error Handling
//!
//! Every fallible call returns `Result<_, BigvisError>`. Inputs are validated
//! completely before any work starts, so an error never comes with a partial
//! result:
//!
//! ```rust
//! use bigvis::prelude::*;
//!
//! let condenser = Condense::new().binwidth(1.0).summary(Median).build()?;
//!
//! // Medians cannot honour non-uniform weights
//! let err = condenser
//!     .condense(&[1.0, 2.0], Some(&[1.0, 2.0]), Some(&[1.0, 2.0]))
//!     .unwrap_err();
//! assert_eq!(err, BigvisError::UnsupportedWeighting { summary: "median" });
//! # Result::<(), BigvisError>::Ok(())
//! ```
//!
//! ## Minimal Usage (no_std / Embedded)
//!
//! The crate supports `no_std` environments with `alloc`. Disable default
//! features to remove the standard library dependency:
//!
//! ```toml
//! [dependencies]
//! bigvis = { version = "0.3", default-features = false }
//! ```
//!
//! ## Parallel execution
//!
//! With the `parallel` feature, smoothing evaluates output points on the
//! `rayon` thread pool. Results are identical to sequential execution.
//!
//! ## References
//!
//! - Wickham, H. (2013). "Bin-summarise-smooth: a framework for visualising
//!   large data"

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
#[macro_use]
extern crate alloc;

// Layer 1: Primitives - data structures and basic utilities.
mod primitives;

// Layer 2: Math - pure mathematical functions.
mod math;

// Layer 3: Algorithms - binning, accumulators and local estimators.
mod algorithms;

// Layer 4: Evaluation - cross-validation and peeling.
mod evaluation;

// Layer 5: Engine - orchestration and execution control.
mod engine;

// High-level fluent API for condensing and smoothing.
mod api;

// Standard bigvis prelude.
pub mod prelude {
    pub use crate::api::{
        AxisSpec, BigvisError, CondenseBuilder as Condense, CondensedTable, Condenser, Dim,
        Points, RobustnessMethod::Bisquare, RobustnessMethod::Huber, RobustnessMethod::Talwar,
        ScalingMethod::MAD, ScalingMethod::MAR, SmoothBuilder as Smooth, SmoothGrid,
        SmoothMethod::Mean as KernelMean, SmoothMethod::Regression,
        SmoothMethod::RobustRegression, Smoother, Summary::Count, Summary::Mean,
        Summary::Median, Summary::Sd, Summary::Sum, Variable, WeightFunction::Biweight,
        WeightFunction::Cosine, WeightFunction::Epanechnikov, WeightFunction::Gaussian,
        WeightFunction::Triangle, WeightFunction::Tricube, WeightFunction::Uniform,
        bandwidth_candidates, peel,
    };
}

// Internal modules for development and testing.
//
// This module re-exports internal modules for development and testing purposes.
// It is only available with the `dev` feature enabled.
#[cfg(feature = "dev")]
pub mod internals {
    pub mod primitives {
        pub use crate::primitives::*;
    }
    pub mod math {
        pub use crate::math::*;
    }
    pub mod algorithms {
        pub use crate::algorithms::*;
    }
    pub mod engine {
        pub use crate::engine::*;
    }
    pub mod evaluation {
        pub use crate::evaluation::*;
    }
    pub mod api {
        pub use crate::api::*;
    }
}
