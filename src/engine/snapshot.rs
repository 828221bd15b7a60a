//! Point-in-time summaries and the snapshot cache

use crate::traits::Rank;
use crate::window::{nearest_rank, sort_values};
use std::sync::Arc;

/// Summary of an engine at one generation
///
/// `mean`, `median`, `min`, `max` cover the full stream; `percentiles` are
/// `(rank, value)` pairs over the retained window, in configured rank order.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Snapshot {
    pub count: u64,
    pub mean: f64,
    pub median: f64,
    pub min: f64,
    pub max: f64,
    pub percentiles: Vec<(f64, f64)>,
}

impl Snapshot {
    /// Precomputed value for `rank`, if it was one of the cached ranks
    pub fn percentile(&self, rank: f64) -> Option<f64> {
        self.percentiles
            .iter()
            .find(|(r, _)| *r == rank)
            .map(|&(_, v)| v)
    }
}

/// Values captured under the state lock, before any sorting
pub(crate) struct Capture {
    pub(crate) generation: u64,
    pub(crate) count: u64,
    pub(crate) mean: f64,
    pub(crate) median: f64,
    pub(crate) min: f64,
    pub(crate) max: f64,
    pub(crate) window: Vec<f64>,
}

impl Capture {
    /// Sort the captured window once and read every rank from it
    pub(crate) fn into_snapshot(self, ranks: &[Rank]) -> Snapshot {
        let mut sorted = self.window;
        sort_values(&mut sorted);

        Snapshot {
            count: self.count,
            mean: self.mean,
            median: self.median,
            min: self.min,
            max: self.max,
            percentiles: ranks
                .iter()
                .map(|&rank| (rank.get(), nearest_rank(&sorted, rank)))
                .collect(),
        }
    }
}

/// Snapshot tagged with the state generation it was computed at
///
/// Valid only while the engine's generation still matches.
#[derive(Debug)]
pub(crate) struct CachedSnapshot {
    pub(crate) generation: u64,
    pub(crate) snapshot: Arc<Snapshot>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_into_snapshot() {
        let capture = Capture {
            generation: 4,
            count: 4,
            mean: 4.25,
            median: 3.5,
            min: 1.0,
            max: 9.0,
            window: vec![1.0, 9.0, 2.0],
        };

        let snapshot = capture.into_snapshot(&[Rank::P50, Rank::MAX]);

        assert_eq!(snapshot.count, 4);
        assert_eq!(snapshot.percentiles, vec![(50.0, 2.0), (100.0, 9.0)]);
        assert_eq!(snapshot.percentile(100.0), Some(9.0));
        assert_eq!(snapshot.percentile(95.0), None);
    }
}
