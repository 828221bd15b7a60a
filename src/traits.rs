//! Core traits and input types for streaming statistics
//!
//! All leaf structures implement the base [`Statistic`] trait. Values enter
//! the crate through two validated newtypes: [`Observation`] (a finite `f64`)
//! and [`Rank`] (a percentile rank in `(0, 100]`).

use core::fmt::Debug;

#[cfg(feature = "std")]
use std::string::String;

#[cfg(not(feature = "std"))]
extern crate alloc;
#[cfg(not(feature = "std"))]
use alloc::string::String;

/// Error raised when input violates the caller contract
///
/// Empty-state queries are never errors; they return neutral values
/// (0 for mean/median/percentile, ±∞ for min/max).
#[derive(Debug, Clone, PartialEq)]
pub enum StatsError {
    /// Observation was NaN or infinite
    NonFiniteValue(f64),
    /// Percentile rank outside `(0, 100]`
    InvalidRank(f64),
    /// Window capacity of zero
    ZeroCapacity,
    /// Configuration could not be parsed
    Config(String),
}

impl core::fmt::Display for StatsError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            StatsError::NonFiniteValue(v) => write!(f, "non-finite observation: {}", v),
            StatsError::InvalidRank(p) => {
                write!(f, "invalid percentile rank: {} (expected 0 < rank <= 100)", p)
            }
            StatsError::ZeroCapacity => write!(f, "window capacity must be positive"),
            StatsError::Config(msg) => write!(f, "invalid config: {}", msg),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for StatsError {}

/// A single finite observation
///
/// Comparison-based structures (the median heaps, the sorted window) have no
/// defined order under NaN, so non-finite values are rejected here, before
/// any state is touched.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Observation(f64);

impl Observation {
    /// Validate a raw value
    pub fn new(value: f64) -> Result<Self, StatsError> {
        if value.is_finite() {
            Ok(Self(value))
        } else {
            Err(StatsError::NonFiniteValue(value))
        }
    }

    /// The underlying value
    #[inline]
    pub fn get(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for Observation {
    type Error = StatsError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Observation> for f64 {
    fn from(obs: Observation) -> f64 {
        obs.0
    }
}

/// A percentile rank in `(0, 100]`
///
/// `Rank::new(100.0)` selects the window maximum; ranks approaching zero
/// select the minimum.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Rank(f64);

impl Rank {
    /// 50th percentile
    pub const P50: Rank = Rank(50.0);
    /// 95th percentile
    pub const P95: Rank = Rank(95.0);
    /// 99th percentile
    pub const P99: Rank = Rank(99.0);
    /// Window maximum
    pub const MAX: Rank = Rank(100.0);

    /// Validate a raw rank. Out-of-range ranks are rejected, never clamped.
    pub fn new(rank: f64) -> Result<Self, StatsError> {
        if rank > 0.0 && rank <= 100.0 {
            Ok(Self(rank))
        } else {
            Err(StatsError::InvalidRank(rank))
        }
    }

    /// The rank as a percentage
    #[inline]
    pub fn get(self) -> f64 {
        self.0
    }

    /// The rank as a fraction in `(0, 1]`
    #[inline]
    pub fn fraction(self) -> f64 {
        self.0 / 100.0
    }
}

impl TryFrom<f64> for Rank {
    type Error = StatsError;

    fn try_from(rank: f64) -> Result<Self, Self::Error> {
        Self::new(rank)
    }
}

/// Core trait for all streaming statistics
pub trait Statistic: Clone + Debug {
    /// Add an observation
    fn record(&mut self, observation: Observation);

    /// Validate and add a raw value
    ///
    /// Returns an error, leaving the statistic untouched, if `value` is
    /// not finite.
    fn try_record(&mut self, value: f64) -> Result<(), StatsError> {
        self.record(Observation::new(value)?);
        Ok(())
    }

    /// Reset to the empty state
    fn clear(&mut self);

    /// Memory usage in bytes
    fn size_bytes(&self) -> usize;

    /// Number of observations recorded
    fn count(&self) -> u64;

    /// Check if nothing has been recorded
    fn is_empty(&self) -> bool {
        self.count() == 0
    }
}
