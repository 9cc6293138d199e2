//! Per-bin running statistics.
//!
//! ## Purpose
//!
//! This module defines the summary statistics a bin can report and the
//! accumulators that compute them in a single pass:
//!
//! * `SumAcc`: weighted count (power 0) or weighted sum (power 1).
//! * `MomentsAcc`: weighted Welford mean and sample standard deviation.
//! * Median: exact, from the bin's values gathered in a [`BinArena`].
//!
//! ## Design notes
//!
//! * **Closed set**: [`Summary`] is an enum; its [`SummaryClass`] decides which
//!   accumulator runs and which columns the condensed table gets.
//! * **Empty bins**: count = 0, sum = 0, mean/sd/median = NaN.
//! * **Order**: Median results do not depend on update order. `SumAcc` keeps
//!   Neumaier-compensated totals, so cancellation between large and small
//!   terms is recovered whatever order they arrive in. The Welford update of
//!   `MomentsAcc` is exact in real arithmetic, but its floating-point rounding
//!   depends on the order samples arrive; results may differ in the last bits
//!   between permutations of the same data.
//!
//! ## Invariants
//!
//! * An accumulator only ever sees values of one bin.
//! * Zero weights leave an accumulator unchanged.
//!
//! ## Non-goals
//!
//! * Weighted medians are not supported.
//!
//! [`BinArena`]: crate::primitives::arena::BinArena

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::math::scaling::median_inplace;

// ============================================================================
// Summary Kinds
// ============================================================================

/// Summary statistic computed for every bin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Summary {
    /// Number of observations (sum of weights).
    #[default]
    Count,

    /// Sum of values (weighted).
    Sum,

    /// Mean of values (weighted).
    Mean,

    /// Sample standard deviation of values (weighted).
    Sd,

    /// Exact median of values (unweighted).
    Median,
}

/// Family of accumulator behind a summary; tags condensed tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryClass {
    /// Count and sum.
    Sum,

    /// Mean and standard deviation.
    Moments,

    /// Median.
    Median,
}

/// A column of a condensed table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variable {
    /// `.count`
    Count,

    /// `.sum`
    Sum,

    /// `.mean`
    Mean,

    /// `.sd`
    Sd,

    /// `.median`
    Median,
}

impl Variable {
    /// Column name as printed in tables.
    pub const fn name(&self) -> &'static str {
        match self {
            Variable::Count => ".count",
            Variable::Sum => ".sum",
            Variable::Mean => ".mean",
            Variable::Sd => ".sd",
            Variable::Median => ".median",
        }
    }
}

impl Summary {
    /// Get the name of the summary.
    pub const fn name(&self) -> &'static str {
        match self {
            Summary::Count => "count",
            Summary::Sum => "sum",
            Summary::Mean => "mean",
            Summary::Sd => "sd",
            Summary::Median => "median",
        }
    }

    /// The accumulator family.
    pub const fn class(&self) -> SummaryClass {
        match self {
            Summary::Count | Summary::Sum => SummaryClass::Sum,
            Summary::Mean | Summary::Sd => SummaryClass::Moments,
            Summary::Median => SummaryClass::Median,
        }
    }

    /// Columns produced, in output order.
    pub const fn variables(&self) -> &'static [Variable] {
        match self {
            Summary::Count => &[Variable::Count],
            Summary::Sum => &[Variable::Count, Variable::Sum],
            Summary::Mean => &[Variable::Count, Variable::Mean],
            Summary::Sd => &[Variable::Count, Variable::Sd],
            Summary::Median => &[Variable::Median],
        }
    }

    /// Whether the summary reads the value vector `z`.
    pub const fn needs_values(&self) -> bool {
        !matches!(self, Summary::Count)
    }

    /// Whether non-uniform weights can be honoured.
    pub const fn supports_weights(&self) -> bool {
        !matches!(self, Summary::Median)
    }
}

impl SummaryClass {
    /// Get the name of the class.
    pub const fn name(&self) -> &'static str {
        match self {
            SummaryClass::Sum => "sum",
            SummaryClass::Moments => "moments",
            SummaryClass::Median => "median",
        }
    }
}

// ============================================================================
// Accumulator Trait
// ============================================================================

/// Running statistic of a single bin.
pub trait Accumulator<T: Float>: Clone {
    /// Add one observation.
    fn push(&mut self, value: T, weight: T);

    /// Total weight seen so far.
    fn count(&self) -> T;

    /// The statistic of everything pushed so far.
    fn finalize(&self) -> T;
}

// ============================================================================
// Sum Accumulator
// ============================================================================

/// Running sum with a Neumaier compensation term.
#[derive(Debug, Clone, Copy, PartialEq)]
struct CompensatedSum<T> {
    sum: T,
    compensation: T,
}

impl<T: Float> CompensatedSum<T> {
    fn zero() -> Self {
        Self {
            sum: T::zero(),
            compensation: T::zero(),
        }
    }

    #[inline]
    fn add(&mut self, x: T) {
        let t = self.sum + x;
        // Low-order bits lost by whichever operand is smaller
        if self.sum.abs() >= x.abs() {
            self.compensation = self.compensation + ((self.sum - t) + x);
        } else {
            self.compensation = self.compensation + ((x - t) + self.sum);
        }
        self.sum = t;
    }

    #[inline]
    fn value(&self) -> T {
        self.sum + self.compensation
    }
}

/// Weighted count (power 0) or weighted sum (power 1).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SumAcc<T> {
    count: CompensatedSum<T>,
    total: CompensatedSum<T>,
    power: u8,
}

impl<T: Float> SumAcc<T> {
    /// A fresh accumulator; `power` is 0 (count) or 1 (sum).
    pub fn new(power: u8) -> Self {
        debug_assert!(power <= 1, "SumAcc::new: power must be 0 or 1");
        Self {
            count: CompensatedSum::zero(),
            total: CompensatedSum::zero(),
            power,
        }
    }
}

impl<T: Float> Accumulator<T> for SumAcc<T> {
    #[inline]
    fn push(&mut self, value: T, weight: T) {
        self.count.add(weight);
        if self.power == 1 {
            self.total.add(value * weight);
        }
    }

    #[inline]
    fn count(&self) -> T {
        self.count.value()
    }

    #[inline]
    fn finalize(&self) -> T {
        if self.power == 0 {
            self.count.value()
        } else {
            self.total.value()
        }
    }
}

// ============================================================================
// Moments Accumulator
// ============================================================================

/// Weighted Welford mean (order 1) or standard deviation (order 2).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MomentsAcc<T> {
    count: T,
    mean: T,
    m2: T,
    order: u8,
}

impl<T: Float> MomentsAcc<T> {
    /// A fresh accumulator; `order` is 1 (mean) or 2 (sd).
    pub fn new(order: u8) -> Self {
        debug_assert!(
            order == 1 || order == 2,
            "MomentsAcc::new: order must be 1 or 2"
        );
        Self {
            count: T::zero(),
            mean: T::zero(),
            m2: T::zero(),
            order,
        }
    }

    /// Running mean (NaN while empty).
    #[inline]
    pub fn mean(&self) -> T {
        if self.count > T::zero() {
            self.mean
        } else {
            T::nan()
        }
    }

    /// Sample standard deviation, NaN with fewer than two observations.
    #[inline]
    pub fn sd(&self) -> T {
        let two = T::one() + T::one();
        if self.count < two {
            return T::nan();
        }
        (self.m2 / (self.count - T::one())).sqrt()
    }
}

impl<T: Float> Accumulator<T> for MomentsAcc<T> {
    #[inline]
    fn push(&mut self, value: T, weight: T) {
        if weight == T::zero() {
            return;
        }
        self.count = self.count + weight;
        let delta = value - self.mean;
        self.mean = self.mean + delta * weight / self.count;
        self.m2 = self.m2 + weight * delta * (value - self.mean);
    }

    #[inline]
    fn count(&self) -> T {
        self.count
    }

    #[inline]
    fn finalize(&self) -> T {
        if self.order == 1 { self.mean() } else { self.sd() }
    }
}

// ============================================================================
// Median
// ============================================================================

/// Exact median of one bin's values, reordering them; NaN when empty.
#[inline]
pub fn bin_median<T: Float>(values: &mut [T]) -> T {
    median_inplace(values)
}
