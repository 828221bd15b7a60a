//! Running aggregate (sum, count, min, max)
//!
//! O(1) per observation. The sum is accumulated with Kahan compensation so
//! the mean of a long stream does not drift.

use crate::traits::{Observation, Statistic};

/// Compensated running sum
#[derive(Clone, Copy, Debug, Default)]
struct KahanSum {
    sum: f64,
    /// Low-order bits lost by the last addition
    compensation: f64,
}

impl KahanSum {
    fn add(&mut self, x: f64) {
        let y = x - self.compensation;
        let t = self.sum + y;
        // Past overflow the correction term is meaningless; fall back to
        // plain summation so the sum stays at ±inf instead of going NaN
        self.compensation = if t.is_finite() {
            (t - self.sum) - y
        } else {
            0.0
        };
        self.sum = t;
    }

    fn value(&self) -> f64 {
        self.sum
    }
}

/// Running sum, count, minimum and maximum of every observation recorded
///
/// Extrema use explicit sentinels rather than `Option`: before any data,
/// `min()` is `+∞` and `max()` is `-∞`, and `mean()` is `0.0`. Callers that
/// need to tell "no data" apart check [`Statistic::is_empty`].
///
/// # Example
///
/// ```
/// use streamstats::statistics::RunningAggregate;
/// use streamstats::traits::Statistic;
///
/// let mut agg = RunningAggregate::new();
/// assert_eq!(agg.min(), f64::INFINITY);
///
/// for value in [5.0, 1.0, 9.0, 2.0] {
///     agg.try_record(value).unwrap();
/// }
///
/// assert!((agg.mean() - 4.25).abs() < 1e-12);
/// assert_eq!(agg.min(), 1.0);
/// assert_eq!(agg.max(), 9.0);
/// ```
#[derive(Clone, Debug)]
pub struct RunningAggregate {
    sum: KahanSum,
    count: u64,
    min: f64,
    max: f64,
}

impl Default for RunningAggregate {
    fn default() -> Self {
        Self::new()
    }
}

impl RunningAggregate {
    /// Create a new empty aggregate
    pub fn new() -> Self {
        Self {
            sum: KahanSum::default(),
            count: 0,
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
        }
    }

    /// Arithmetic mean, or `0.0` when empty
    pub fn mean(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.sum.value() / self.count as f64
        }
    }

    /// Smallest observation, or `+∞` when empty
    pub fn min(&self) -> f64 {
        self.min
    }

    /// Largest observation, or `-∞` when empty
    pub fn max(&self) -> f64 {
        self.max
    }

    /// Sum of all observations
    pub fn sum(&self) -> f64 {
        self.sum.value()
    }
}

impl Statistic for RunningAggregate {
    fn record(&mut self, observation: Observation) {
        let value = observation.get();

        self.sum.add(value);
        self.count += 1;

        if value < self.min {
            self.min = value;
        }
        if value > self.max {
            self.max = value;
        }
    }

    fn clear(&mut self) {
        *self = Self::new();
    }

    fn size_bytes(&self) -> usize {
        core::mem::size_of::<Self>()
    }

    fn count(&self) -> u64 {
        self.count
    }
}
