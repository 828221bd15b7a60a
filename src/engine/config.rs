//! Engine configuration

use crate::traits::{Rank, StatsError};

/// Window capacity used by [`EngineConfig::default`]
pub const DEFAULT_WINDOW_CAPACITY: usize = 1000;

/// Percentile ranks precomputed by the snapshot cache by default
pub const DEFAULT_CACHED_RANKS: [f64; 2] = [95.0, 99.0];

/// Configuration for a [`StatsEngine`](super::StatsEngine)
///
/// With the `config` feature, loadable from YAML:
///
/// ```yaml
/// window_capacity: 500
/// cached_ranks: [50.0, 90.0, 99.9]
/// ```
///
/// Missing fields take their defaults.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EngineConfig {
    /// Number of recent observations retained for percentiles
    pub window_capacity: usize,
    /// Ranks, in `(0, 100]`, precomputed by `cached_snapshot()`
    pub cached_ranks: Vec<f64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            window_capacity: DEFAULT_WINDOW_CAPACITY,
            cached_ranks: DEFAULT_CACHED_RANKS.to_vec(),
        }
    }
}

impl EngineConfig {
    /// Config with the given window capacity and the default cached ranks
    pub fn new(window_capacity: usize) -> Self {
        Self {
            window_capacity,
            ..Self::default()
        }
    }

    /// Replace the cached percentile ranks
    pub fn with_cached_ranks(mut self, ranks: impl IntoIterator<Item = f64>) -> Self {
        self.cached_ranks = ranks.into_iter().collect();
        self
    }

    /// Check capacity and every cached rank
    pub fn validate(&self) -> Result<(), StatsError> {
        self.ranks().map(|_| ())
    }

    /// Validated cached ranks, in configured order
    pub(crate) fn ranks(&self) -> Result<Vec<Rank>, StatsError> {
        if self.window_capacity == 0 {
            return Err(StatsError::ZeroCapacity);
        }
        self.cached_ranks.iter().map(|&p| Rank::new(p)).collect()
    }

    /// Parse and validate a YAML config
    #[cfg(feature = "config")]
    #[cfg_attr(docsrs, doc(cfg(feature = "config")))]
    pub fn from_yaml(s: &str) -> Result<Self, StatsError> {
        let config: EngineConfig =
            serde_yaml::from_str(s).map_err(|e| StatsError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}
