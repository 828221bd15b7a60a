//! Exact running median via two heaps
//!
//! The lower half of the stream lives in a max-heap and the upper half in a
//! min-heap. After every insertion the heaps satisfy:
//!
//! - every value in `lower` ≤ every value in `upper`
//! - `lower.len() - upper.len()` is 0 or 1
//!
//! so the median is either the top of `lower` (odd count) or the mean of
//! both tops (even count). Nothing is ever evicted: the median covers the
//! whole stream, at O(log n) per insert and O(1) per read.

use super::heap::{MaxHeap, MinHeap};
use crate::traits::{Observation, Statistic};

/// Two-heap median tracker
///
/// # Example
///
/// ```
/// use streamstats::median::MedianTracker;
/// use streamstats::traits::Statistic;
///
/// let mut tracker = MedianTracker::new();
/// assert_eq!(tracker.median(), 0.0);
///
/// for value in [5.0, 1.0, 9.0, 2.0] {
///     tracker.try_record(value).unwrap();
/// }
///
/// assert_eq!(tracker.median(), 3.5);
/// ```
#[derive(Clone, Debug, Default)]
pub struct MedianTracker {
    /// Lower half, largest on top
    lower: MaxHeap,
    /// Upper half, smallest on top
    upper: MinHeap,
}

impl MedianTracker {
    /// Create an empty tracker
    pub fn new() -> Self {
        Self::default()
    }

    /// Median of every observation recorded, or `0.0` when empty
    pub fn median(&self) -> f64 {
        match (self.lower.peek(), self.upper.peek()) {
            (None, None) => 0.0,
            (Some(lo), _) if self.lower.len() > self.upper.len() => lo,
            (_, Some(hi)) if self.upper.len() > self.lower.len() => hi,
            // Halve first: neither opposite-sign nor same-sign extremes overflow
            (Some(lo), Some(hi)) => lo / 2.0 + hi / 2.0,
            // Unreachable while the heaps are balanced
            (Some(v), None) | (None, Some(v)) => v,
        }
    }

    /// Total number of observations held
    pub fn len(&self) -> usize {
        self.lower.len() + self.upper.len()
    }

    /// Size of the lower (max) heap
    pub fn lower_len(&self) -> usize {
        self.lower.len()
    }

    /// Size of the upper (min) heap
    pub fn upper_len(&self) -> usize {
        self.upper.len()
    }

    /// Largest value of the lower half
    pub fn lower_peek(&self) -> Option<f64> {
        self.lower.peek()
    }

    /// Smallest value of the upper half
    pub fn upper_peek(&self) -> Option<f64> {
        self.upper.peek()
    }

    /// Move heap roots until `lower` holds the same number of values as
    /// `upper`, or exactly one more.
    ///
    /// A single insertion unbalances by at most one, but the loops converge
    /// from any starting imbalance.
    fn rebalance(&mut self) {
        while self.lower.len() > self.upper.len() + 1 {
            match self.lower.pop() {
                Some(v) => self.upper.push(v),
                None => break,
            }
        }
        while self.upper.len() > self.lower.len() {
            match self.upper.pop() {
                Some(v) => self.lower.push(v),
                None => break,
            }
        }
    }
}

impl Statistic for MedianTracker {
    fn record(&mut self, observation: Observation) {
        let value = observation.get();

        match self.lower.peek() {
            Some(top) if value > top => self.upper.push(value),
            _ => self.lower.push(value),
        }

        self.rebalance();
    }

    fn clear(&mut self) {
        self.lower.clear();
        self.upper.clear();
    }

    fn size_bytes(&self) -> usize {
        core::mem::size_of::<Self>()
            + (self.lower.capacity() + self.upper.capacity()) * core::mem::size_of::<f64>()
    }

    fn count(&self) -> u64 {
        self.len() as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fill(values: &[f64]) -> MedianTracker {
        let mut tracker = MedianTracker::new();
        for &v in values {
            tracker.try_record(v).unwrap();
        }
        tracker
    }

    fn assert_invariants(tracker: &MedianTracker) {
        let diff = tracker.lower_len() as i64 - tracker.upper_len() as i64;
        assert!(diff == 0 || diff == 1, "unbalanced heaps: diff={}", diff);
        if let (Some(lo), Some(hi)) = (tracker.lower_peek(), tracker.upper_peek()) {
            assert!(lo <= hi, "lower top {} > upper top {}", lo, hi);
        }
    }

    #[test]
    fn test_empty() {
        let tracker = MedianTracker::new();
        assert!(tracker.is_empty());
        assert_eq!(tracker.median(), 0.0);
        assert_eq!(tracker.lower_peek(), None);
        assert_eq!(tracker.upper_peek(), None);
    }

    #[test]
    fn test_single_value() {
        let tracker = fill(&[42.0]);
        assert_eq!(tracker.median(), 42.0);
        assert_eq!(tracker.lower_len(), 1);
        assert_eq!(tracker.upper_len(), 0);
    }

    #[test]
    fn test_two_values() {
        let tracker = fill(&[10.0, 20.0]);
        assert_eq!(tracker.median(), 15.0);
    }

    #[test]
    fn test_odd_and_even_counts() {
        let mut tracker = MedianTracker::new();
        let expected = [5.0, 3.0, 5.0, 3.5, 2.0, 3.5];
        for (&v, &m) in [5.0, 1.0, 9.0, 2.0, 0.5, 8.0].iter().zip(expected.iter()) {
            tracker.try_record(v).unwrap();
            assert_eq!(tracker.median(), m, "after recording {}", v);
            assert_invariants(&tracker);
        }
    }

    #[test]
    fn test_ascending_then_descending() {
        let mut tracker = MedianTracker::new();
        for i in 1..=100 {
            tracker.try_record(i as f64).unwrap();
            assert_invariants(&tracker);
        }
        assert_eq!(tracker.median(), 50.5);

        for i in (101..=201).rev() {
            tracker.try_record(i as f64).unwrap();
            assert_invariants(&tracker);
        }
        assert_eq!(tracker.median(), 101.0);
    }

    #[test]
    fn test_duplicates() {
        let tracker = fill(&[4.0, 4.0, 4.0, 4.0, 1.0]);
        assert_eq!(tracker.median(), 4.0);
        assert_eq!(tracker.count(), 5);
        assert_invariants(&tracker);
    }

    #[test]
    fn test_negative_values() {
        let tracker = fill(&[-1.0, -5.0, -3.0, -2.0]);
        assert_eq!(tracker.median(), -2.5);
    }

    #[test]
    fn test_rebalance_heals_any_imbalance() {
        let mut tracker = MedianTracker::new();
        for v in [1.0, 2.0, 3.0, 4.0, 5.0] {
            tracker.lower.push(v);
        }
        tracker.rebalance();
        assert_invariants(&tracker);
        assert_eq!(tracker.median(), 3.0);

        let mut tracker = MedianTracker::new();
        for v in [1.0, 2.0, 3.0, 4.0] {
            tracker.upper.push(v);
        }
        tracker.rebalance();
        assert_invariants(&tracker);
        assert_eq!(tracker.median(), 2.5);
    }

    #[test]
    fn test_extreme_magnitudes() {
        let tracker = fill(&[-1.0e308, 1.0e308]);
        assert_eq!(tracker.median(), 0.0);

        let tracker = fill(&[1.0e308, 1.5e308]);
        let median = tracker.median();
        assert!(median.is_finite(), "median={}", median);
        assert!((median - 1.25e308).abs() <= 1.25e308 * 1e-15, "median={}", median);

        let tracker = fill(&[f64::MAX, f64::MAX]);
        assert_eq!(tracker.median(), f64::MAX);

        let tracker = fill(&[-f64::MAX, -f64::MAX, 1.0, f64::MAX]);
        assert!(tracker.median().is_finite());
        assert_eq!(tracker.median(), -f64::MAX / 2.0 + 0.5);
    }

    #[test]
    fn test_non_finite_rejected() {
        let mut tracker = fill(&[1.0, 2.0, 3.0]);
        assert!(tracker.try_record(f64::NAN).is_err());
        assert!(tracker.try_record(f64::NEG_INFINITY).is_err());
        assert_eq!(tracker.count(), 3);
        assert_eq!(tracker.median(), 2.0);
    }

    #[test]
    fn test_clear() {
        let mut tracker = fill(&[1.0, 2.0, 3.0]);
        tracker.clear();
        assert!(tracker.is_empty());
        assert_eq!(tracker.median(), 0.0);
    }
}
