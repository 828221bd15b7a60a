//! Exact streaming median
//!
//! - [`MedianTracker`]: two-heap median over every observation ever recorded
//!
//! # Example
//!
//! ```
//! use streamstats::median::MedianTracker;
//! use streamstats::traits::Statistic;
//!
//! let mut tracker = MedianTracker::new();
//!
//! for value in [3.0, 1.0, 4.0, 1.0, 5.0] {
//!     tracker.try_record(value).unwrap();
//! }
//!
//! assert_eq!(tracker.median(), 3.0);
//! ```

mod heap;
mod two_heap;

pub use two_heap::MedianTracker;
