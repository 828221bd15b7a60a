//! Percentiles over a bounded window of recent data
//!
//! - [`BoundedWindow`]: circular buffer of the last N observations
//! - [`nearest_rank`]: nearest-rank percentile of a sorted slice
//!
//! # Example
//!
//! ```
//! use streamstats::traits::{Rank, Statistic};
//! use streamstats::window::BoundedWindow;
//!
//! let mut window = BoundedWindow::new(100);
//!
//! for i in 1..=1000 {
//!     window.try_record(i as f64).unwrap();
//! }
//!
//! // Only 901..=1000 are retained
//! let p95 = window.percentile(Rank::new(95.0).unwrap());
//! assert_eq!(p95, 995.0);
//! ```

mod ring;

pub use ring::{nearest_rank, BoundedWindow};

#[cfg(feature = "engine")]
pub(crate) use ring::sort_values;
