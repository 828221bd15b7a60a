//! # Streamstats
//!
//! Online descriptive statistics for unbounded numeric streams.
//!
//! Observations arrive one at a time; each update costs O(log n) or better
//! and every statistic can be read at any moment without rescanning history.
//!
//! ## Features
//!
//! - **Running aggregate**: mean, min and max of the full stream in O(1)
//! - **Exact median**: two-heap median of the full stream, O(log n) update
//! - **Windowed percentiles**: nearest-rank percentiles over the last N values
//! - **Concurrent engine**: all of the above behind one thread-safe surface,
//!   with a snapshot cache that is never served stale
//!
//! ## Quick Start
//!
//! ```rust
//! use streamstats::prelude::*;
//!
//! let engine = StatsEngine::new(1000);
//! for i in 1..=10_000 {
//!     engine.record(i as f64).unwrap();
//! }
//!
//! println!("Mean: {}", engine.mean());
//! println!("Median: {}", engine.median());
//! println!("p99 of last 1000: {}", engine.percentile(99.0).unwrap());
//! ```
//!
//! ## Empty state and errors
//!
//! Queries on empty structures are not errors: mean, median and percentiles
//! return `0.0`, min returns `+∞` and max returns `-∞`. Contract violations
//! are rejected before any state changes:
//!
//! ```rust
//! use streamstats::{StatsEngine, StatsError};
//!
//! let engine = StatsEngine::new(10);
//! assert_eq!(engine.mean(), 0.0);
//! assert_eq!(engine.min(), f64::INFINITY);
//!
//! assert!(engine.record(f64::NAN).is_err());
//! assert_eq!(engine.percentile(0.0), Err(StatsError::InvalidRank(0.0)));
//! ```
//!
//! ## Feature Flags
//!
//! - `std` (default): Standard library support. Without it, the leaf
//!   structures build on `alloc`
//! - `engine` (default): The thread-safe [`StatsEngine`] (requires `std`)
//! - `serde`: Serialization of configs and snapshots
//! - `config`: YAML loading of [`EngineConfig`](engine::EngineConfig)
//! - `cli`: The `streamstats` binary
//! - `full`: Enable everything

#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]

#[cfg(not(feature = "std"))]
extern crate alloc;

// Core traits always available
pub mod traits;

mod math;

pub mod median;
pub mod statistics;
pub mod window;

#[cfg(feature = "engine")]
#[cfg_attr(docsrs, doc(cfg(feature = "engine")))]
pub mod engine;

pub mod prelude {
    pub use crate::traits::*;

    pub use crate::median::MedianTracker;
    pub use crate::statistics::RunningAggregate;
    pub use crate::window::BoundedWindow;

    #[cfg(feature = "engine")]
    pub use crate::engine::{EngineConfig, Snapshot, StatsEngine};
}

pub use traits::{Observation, Rank, StatsError};

#[cfg(feature = "engine")]
pub use engine::{EngineConfig, Snapshot, StatsEngine};
