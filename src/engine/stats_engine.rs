//! Thread-safe composition of aggregate, median and window
//!
//! # Locking
//!
//! All three structures live behind a single `RwLock`, so a `record()` is
//! observed by every query either completely or not at all. Queries share
//! the read lock and never wait on each other, only on writers. Window
//! sorting happens on a copy taken under the read lock, after release.
//!
//! The snapshot cache sits behind its own `Mutex` and is tagged with the
//! state generation it was computed from. Every mutation bumps the
//! generation under the write lock, so a cache entry is valid exactly while
//! no write has happened since its capture. A write racing a refresh leaves
//! an entry whose generation is already behind: invalid, never stale.
//!
//! Lock order is cache, then state. `record()` only ever takes the state
//! lock and never reenters the engine.

use super::config::{EngineConfig, DEFAULT_WINDOW_CAPACITY};
use super::snapshot::{CachedSnapshot, Capture, Snapshot};
use crate::median::MedianTracker;
use crate::statistics::RunningAggregate;
use crate::traits::{Observation, Rank, Statistic, StatsError};
use crate::window::{nearest_rank, sort_values, BoundedWindow};
use log::{debug, trace};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Debug)]
struct EngineState {
    aggregate: RunningAggregate,
    median: MedianTracker,
    window: BoundedWindow,
    /// Bumped by every mutation
    generation: u64,
}

impl EngineState {
    fn new(window_capacity: usize) -> Self {
        Self {
            aggregate: RunningAggregate::new(),
            median: MedianTracker::new(),
            window: BoundedWindow::new(window_capacity),
            generation: 0,
        }
    }

    fn record(&mut self, observation: Observation) {
        self.aggregate.record(observation);
        self.median.record(observation);
        self.window.record(observation);
        self.generation = self.generation.wrapping_add(1);
    }

    fn capture(&self) -> Capture {
        Capture {
            generation: self.generation,
            count: self.aggregate.count(),
            mean: self.aggregate.mean(),
            median: self.median.median(),
            min: self.aggregate.min(),
            max: self.aggregate.max(),
            window: self.window.as_slice().to_vec(),
        }
    }
}

/// Online statistics engine
///
/// Tracks the mean, min, max and exact median of every observation recorded,
/// plus nearest-rank percentiles over the most recent `window_capacity`
/// observations. Shareable across threads (`Arc<StatsEngine>`); every method
/// takes `&self`.
///
/// Queries on an empty engine return neutral values: `0.0` for mean, median
/// and percentiles, `+∞` for min and `-∞` for max. Use [`count`](Self::count)
/// to tell "no data" apart.
///
/// # Example
///
/// ```
/// use streamstats::StatsEngine;
///
/// let engine = StatsEngine::new(3);
/// for value in [5.0, 1.0, 9.0, 2.0] {
///     engine.record(value).unwrap();
/// }
///
/// assert_eq!(engine.mean(), 4.25);
/// assert_eq!(engine.median(), 3.5);
/// assert_eq!(engine.min(), 1.0);
/// assert_eq!(engine.max(), 9.0);
/// assert_eq!(engine.percentile(100.0).unwrap(), 9.0);
///
/// let snapshot = engine.cached_snapshot();
/// assert_eq!(snapshot.percentile(95.0), Some(9.0));
/// ```
#[derive(Debug)]
pub struct StatsEngine {
    config: EngineConfig,
    ranks: Vec<Rank>,
    state: RwLock<EngineState>,
    cache: Mutex<Option<CachedSnapshot>>,
}

impl Default for StatsEngine {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW_CAPACITY)
    }
}

impl StatsEngine {
    /// Create an engine whose window retains `window_capacity` observations,
    /// caching the 95th and 99th percentiles
    ///
    /// # Panics
    ///
    /// Panics if `window_capacity` is zero. Use [`with_config`](Self::with_config)
    /// for a fallible constructor.
    pub fn new(window_capacity: usize) -> Self {
        assert!(window_capacity > 0, "window capacity must be positive");
        Self::from_parts(EngineConfig::new(window_capacity), vec![Rank::P95, Rank::P99])
    }

    /// Create an engine from a validated config
    pub fn with_config(config: EngineConfig) -> Result<Self, StatsError> {
        let ranks = config.ranks()?;
        Ok(Self::from_parts(config, ranks))
    }

    fn from_parts(config: EngineConfig, ranks: Vec<Rank>) -> Self {
        debug!(
            "created stats engine: window_capacity={}, cached_ranks={:?}",
            config.window_capacity, config.cached_ranks
        );
        Self {
            state: RwLock::new(EngineState::new(config.window_capacity)),
            cache: Mutex::new(None),
            ranks,
            config,
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, EngineState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, EngineState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_cache(&self) -> MutexGuard<'_, Option<CachedSnapshot>> {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// The configuration this engine was built from
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Record one observation
    ///
    /// Non-finite values are rejected with [`StatsError::NonFiniteValue`]
    /// before any state changes.
    pub fn record(&self, value: f64) -> Result<(), StatsError> {
        let observation = validate(value)?;
        self.write().record(observation);
        Ok(())
    }

    /// Record a batch under one write lock
    ///
    /// Stops at the first non-finite value and returns its error; values
    /// before it stay recorded. Each value is still applied atomically.
    /// `values` is consumed under the write lock and must not call back
    /// into this engine.
    pub fn record_many<I>(&self, values: I) -> Result<(), StatsError>
    where
        I: IntoIterator<Item = f64>,
    {
        let mut state = self.write();
        for value in values {
            state.record(validate(value)?);
        }
        Ok(())
    }

    /// Number of observations recorded
    pub fn count(&self) -> u64 {
        self.read().aggregate.count()
    }

    /// Check if nothing has been recorded
    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// Arithmetic mean of every observation, or `0.0` when empty
    pub fn mean(&self) -> f64 {
        self.read().aggregate.mean()
    }

    /// Smallest observation, or `+∞` when empty
    pub fn min(&self) -> f64 {
        self.read().aggregate.min()
    }

    /// Largest observation, or `-∞` when empty
    pub fn max(&self) -> f64 {
        self.read().aggregate.max()
    }

    /// Exact median of every observation, or `0.0` when empty
    pub fn median(&self) -> f64 {
        self.read().median.median()
    }

    /// Nearest-rank percentile over the retained window
    ///
    /// `rank` must lie in `(0, 100]`; anything else is rejected with
    /// [`StatsError::InvalidRank`]. Returns `0.0` when empty.
    pub fn percentile(&self, rank: f64) -> Result<f64, StatsError> {
        let rank = Rank::new(rank)?;
        let mut values = self.read().window.as_slice().to_vec();
        sort_values(&mut values);
        Ok(nearest_rank(&values, rank))
    }

    /// Number of observations currently in the window
    pub fn window_len(&self) -> usize {
        self.read().window.len()
    }

    /// Window capacity
    pub fn capacity(&self) -> usize {
        self.config.window_capacity
    }

    /// Approximate heap memory held by the three structures
    pub fn size_bytes(&self) -> usize {
        let state = self.read();
        state.aggregate.size_bytes() + state.median.size_bytes() + state.window.size_bytes()
    }

    /// Mean, median, extrema and the configured percentiles in one summary
    ///
    /// Served from the cache when nothing was recorded since the last call;
    /// otherwise recomputed (one window sort for all ranks) and cached.
    pub fn cached_snapshot(&self) -> Arc<Snapshot> {
        let mut cache = self.lock_cache();

        let capture = {
            let state = self.read();
            if let Some(cached) = cache.as_ref() {
                if cached.generation == state.generation {
                    trace!("snapshot cache hit at generation {}", cached.generation);
                    return Arc::clone(&cached.snapshot);
                }
            }
            state.capture()
        };

        let generation = capture.generation;
        let snapshot = Arc::new(capture.into_snapshot(&self.ranks));
        trace!("snapshot cache refreshed at generation {}", generation);

        *cache = Some(CachedSnapshot {
            generation,
            snapshot: Arc::clone(&snapshot),
        });
        snapshot
    }

    /// Check if the next `cached_snapshot()` would be served from cache
    pub fn is_cache_valid(&self) -> bool {
        let cache = self.lock_cache();
        let state = self.read();
        cache
            .as_ref()
            .map_or(false, |cached| cached.generation == state.generation)
    }

    /// Discard every observation and invalidate the cache
    pub fn clear(&self) {
        let mut state = self.write();
        state.aggregate.clear();
        state.median.clear();
        state.window.clear();
        state.generation = state.generation.wrapping_add(1);
        debug!("stats engine cleared");
    }
}

fn validate(value: f64) -> Result<Observation, StatsError> {
    Observation::new(value).map_err(|e| {
        debug!("rejected observation: {}", e);
        e
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine_with(capacity: usize, values: &[f64]) -> StatsEngine {
        let engine = StatsEngine::new(capacity);
        for &v in values {
            engine.record(v).unwrap();
        }
        engine
    }

    #[test]
    fn test_reference_example() {
        let engine = engine_with(3, &[5.0, 1.0, 9.0, 2.0]);

        assert_eq!(engine.count(), 4);
        assert_eq!(engine.window_len(), 3);
        assert_eq!(engine.percentile(100.0).unwrap(), 9.0);
        assert_eq!(engine.median(), 3.5);
        assert_eq!(engine.mean(), 4.25);
        assert_eq!(engine.min(), 1.0);
        assert_eq!(engine.max(), 9.0);
    }

    #[test]
    fn test_empty() {
        let engine = StatsEngine::new(10);

        assert!(engine.is_empty());
        assert_eq!(engine.mean(), 0.0);
        assert_eq!(engine.min(), f64::INFINITY);
        assert_eq!(engine.max(), f64::NEG_INFINITY);
        assert_eq!(engine.median(), 0.0);
        assert_eq!(engine.percentile(50.0), Ok(0.0));

        let snapshot = engine.cached_snapshot();
        assert_eq!(snapshot.count, 0);
        assert_eq!(snapshot.percentiles, vec![(95.0, 0.0), (99.0, 0.0)]);
    }

    #[test]
    #[should_panic(expected = "window capacity must be positive")]
    fn test_zero_capacity_panics() {
        StatsEngine::new(0);
    }

    #[test]
    fn test_with_config_rejects_invalid() {
        assert_eq!(
            StatsEngine::with_config(EngineConfig::new(0)).unwrap_err(),
            StatsError::ZeroCapacity
        );
        assert_eq!(
            StatsEngine::with_config(EngineConfig::new(5).with_cached_ranks([-1.0])).unwrap_err(),
            StatsError::InvalidRank(-1.0)
        );
    }

    #[test]
    fn test_invalid_rank_rejected() {
        let engine = engine_with(5, &[1.0, 2.0]);
        assert_eq!(engine.percentile(0.0), Err(StatsError::InvalidRank(0.0)));
        assert_eq!(engine.percentile(100.01), Err(StatsError::InvalidRank(100.01)));
        assert!(engine.percentile(f64::NAN).is_err());
    }

    #[test]
    fn test_non_finite_rejected_without_mutation() {
        let engine = engine_with(5, &[1.0, 2.0]);
        engine.cached_snapshot();

        assert!(engine.record(f64::NAN).is_err());
        assert_eq!(
            engine.record(f64::INFINITY),
            Err(StatsError::NonFiniteValue(f64::INFINITY))
        );

        assert_eq!(engine.count(), 2);
        assert_eq!(engine.window_len(), 2);
        assert_eq!(engine.max(), 2.0);
        assert!(engine.is_cache_valid());
    }

    #[test]
    fn test_record_many_stops_at_first_invalid() {
        let engine = StatsEngine::new(10);
        let result = engine.record_many([1.0, 2.0, f64::NAN, 4.0]);

        assert!(matches!(result, Err(StatsError::NonFiniteValue(_))));
        assert_eq!(engine.count(), 2);
        assert_eq!(engine.max(), 2.0);
    }

    #[test]
    fn test_cache_hit_returns_same_snapshot() {
        let engine = engine_with(10, &[1.0, 2.0, 3.0]);

        let first = engine.cached_snapshot();
        assert!(engine.is_cache_valid());
        let second = engine.cached_snapshot();

        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_record_invalidates_cache() {
        let engine = engine_with(10, &[1.0, 2.0, 3.0]);

        let before = engine.cached_snapshot();
        engine.record(100.0).unwrap();
        assert!(!engine.is_cache_valid());

        let after = engine.cached_snapshot();
        assert!(!Arc::ptr_eq(&before, &after));
        assert_eq!(after.count, 4);
        assert_eq!(after.max, 100.0);
        assert_eq!(after.percentile(99.0), Some(100.0));
        assert_eq!(before.count, 3);
    }

    #[test]
    fn test_custom_ranks() {
        let config = EngineConfig::new(100).with_cached_ranks([50.0, 90.0]);
        let engine = StatsEngine::with_config(config).unwrap();
        engine.record_many((1..=100).map(|i| i as f64)).unwrap();

        let snapshot = engine.cached_snapshot();
        assert_eq!(snapshot.percentiles, vec![(50.0, 50.0), (90.0, 90.0)]);
        assert_eq!(snapshot.median, 50.5);
        assert_eq!(snapshot.mean, 50.5);
    }

    #[test]
    fn test_clear() {
        let engine = engine_with(3, &[1.0, 2.0, 3.0]);
        engine.cached_snapshot();

        engine.clear();

        assert!(engine.is_empty());
        assert!(!engine.is_cache_valid());
        assert_eq!(engine.window_len(), 0);
        assert_eq!(engine.median(), 0.0);
        assert_eq!(engine.cached_snapshot().count, 0);
    }

    #[test]
    fn test_huge_window_capacity() {
        let engine = StatsEngine::with_config(EngineConfig::new(1 << 60)).unwrap();
        engine.record_many([4.0, 8.0]).unwrap();

        assert_eq!(engine.capacity(), 1 << 60);
        assert_eq!(engine.window_len(), 2);
        assert_eq!(engine.percentile(100.0), Ok(8.0));
    }

    #[test]
    fn test_default() {
        let engine = StatsEngine::default();
        assert_eq!(engine.capacity(), 1000);
        assert_eq!(engine.config().cached_ranks, vec![95.0, 99.0]);
    }

    #[test]
    fn test_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<StatsEngine>();
    }
}
