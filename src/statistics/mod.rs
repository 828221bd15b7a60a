//! Running aggregates over the full stream
//!
//! This module provides O(1) statistics that never evict: every observation
//! ever recorded contributes to the sum, count and extrema.
//!
//! # Example
//!
//! ```
//! use streamstats::statistics::RunningAggregate;
//! use streamstats::traits::Statistic;
//!
//! let mut agg = RunningAggregate::new();
//!
//! for value in [1.0, 2.0, 3.0, 4.0, 5.0] {
//!     agg.try_record(value).unwrap();
//! }
//!
//! println!("Mean: {}", agg.mean());
//! println!("Min: {}", agg.min());
//! println!("Max: {}", agg.max());
//! ```

mod aggregate;

pub use aggregate::RunningAggregate;
