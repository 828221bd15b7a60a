//! Concurrent statistics engine
//!
//! [`StatsEngine`] combines a [`RunningAggregate`](crate::statistics::RunningAggregate),
//! a [`MedianTracker`](crate::median::MedianTracker) and a
//! [`BoundedWindow`](crate::window::BoundedWindow) behind one update/query
//! surface, with a snapshot cache for read-heavy consumers.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use std::thread;
//! use streamstats::engine::StatsEngine;
//!
//! let engine = Arc::new(StatsEngine::new(1000));
//!
//! let producers: Vec<_> = (0..4)
//!     .map(|t| {
//!         let engine = Arc::clone(&engine);
//!         thread::spawn(move || {
//!             for i in 0..250 {
//!                 engine.record((t * 250 + i) as f64).unwrap();
//!             }
//!         })
//!     })
//!     .collect();
//! for p in producers {
//!     p.join().unwrap();
//! }
//!
//! let snapshot = engine.cached_snapshot();
//! assert_eq!(snapshot.count, 1000);
//! assert_eq!(snapshot.median, 499.5);
//! ```

mod config;
mod snapshot;
mod stats_engine;

pub use config::{EngineConfig, DEFAULT_CACHED_RANKS, DEFAULT_WINDOW_CAPACITY};
pub use snapshot::Snapshot;
pub use stats_engine::StatsEngine;
