//! Fixed-capacity window of the most recent observations
//!
//! The window keeps the last `capacity` observations in a circular buffer.
//! Once full, each new observation overwrites the oldest one. Percentiles
//! are computed over a sorted copy of the retained values, so they are exact
//! for the window and approximate for the stream as a whole.

use crate::math;
use crate::traits::{Observation, Rank, Statistic};

#[cfg(feature = "std")]
use std::vec::Vec;

#[cfg(not(feature = "std"))]
extern crate alloc;
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

/// Nearest-rank percentile of an ascending slice
///
/// Selects `sorted[ceil(rank / 100 * n) - 1]`, with the index clamped to
/// `[0, n - 1]`. Returns `0.0` for an empty slice.
///
/// ```
/// use streamstats::traits::Rank;
/// use streamstats::window::nearest_rank;
///
/// let sorted = [1.0, 2.0, 3.0, 4.0];
/// assert_eq!(nearest_rank(&sorted, Rank::new(50.0).unwrap()), 2.0);
/// assert_eq!(nearest_rank(&sorted, Rank::new(100.0).unwrap()), 4.0);
/// assert_eq!(nearest_rank(&[], Rank::new(50.0).unwrap()), 0.0);
/// ```
pub fn nearest_rank(sorted: &[f64], rank: Rank) -> f64 {
    let n = sorted.len();
    if n == 0 {
        return 0.0;
    }

    let position = math::ceil(rank.fraction() * n as f64) as usize;
    let index = position.saturating_sub(1).min(n - 1);
    sorted[index]
}

/// Sort a slice of finite values in ascending order
pub(crate) fn sort_values(values: &mut [f64]) {
    values.sort_unstable_by(|a, b| a.total_cmp(b));
}

/// Circular buffer of the most recent observations
///
/// # Example
///
/// ```
/// use streamstats::traits::{Rank, Statistic};
/// use streamstats::window::BoundedWindow;
///
/// let mut window = BoundedWindow::new(3);
///
/// for value in [5.0, 1.0, 9.0, 2.0] {
///     window.try_record(value).unwrap();
/// }
///
/// // 5.0 has been evicted
/// assert_eq!(window.values(), vec![1.0, 9.0, 2.0]);
/// assert_eq!(window.sorted_snapshot(), vec![1.0, 2.0, 9.0]);
/// assert_eq!(window.percentile(Rank::new(100.0).unwrap()), 9.0);
/// ```
#[derive(Clone, Debug)]
pub struct BoundedWindow {
    /// Maximum number of retained observations
    capacity: usize,
    /// Retained values, in slot order
    buf: Vec<f64>,
    /// Slot the next observation overwrites once full
    cursor: usize,
    /// Total observations ever recorded
    count: u64,
}

impl BoundedWindow {
    /// Create a window retaining the last `capacity` observations
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "capacity must be positive");

        Self {
            capacity,
            // Grows on demand: capacity is an upper bound, not a reservation
            buf: Vec::new(),
            cursor: 0,
            count: 0,
        }
    }

    /// Maximum number of retained observations
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of observations currently retained
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Check if the window has started evicting
    pub fn is_full(&self) -> bool {
        self.buf.len() == self.capacity
    }

    /// Retained values in slot order (unspecified, but cheap)
    #[cfg_attr(not(feature = "engine"), allow(dead_code))]
    pub(crate) fn as_slice(&self) -> &[f64] {
        &self.buf
    }

    /// Retained values from oldest to newest
    pub fn values(&self) -> Vec<f64> {
        if self.is_full() {
            [&self.buf[self.cursor..], &self.buf[..self.cursor]].concat()
        } else {
            self.buf.clone()
        }
    }

    /// Ascending copy of the retained values
    ///
    /// The copy is detached: later observations do not affect it.
    pub fn sorted_snapshot(&self) -> Vec<f64> {
        let mut sorted = self.buf.clone();
        sort_values(&mut sorted);
        sorted
    }

    /// Nearest-rank percentile of the retained values, or `0.0` when empty
    ///
    /// O(k log k) for k retained values. To read several ranks, sort once
    /// with [`sorted_snapshot`](Self::sorted_snapshot) and call
    /// [`nearest_rank`] per rank.
    pub fn percentile(&self, rank: Rank) -> f64 {
        nearest_rank(&self.sorted_snapshot(), rank)
    }
}

impl Statistic for BoundedWindow {
    fn record(&mut self, observation: Observation) {
        let value = observation.get();

        if self.buf.len() < self.capacity {
            self.buf.push(value);
        } else {
            self.buf[self.cursor] = value;
            self.cursor = (self.cursor + 1) % self.capacity;
        }
        self.count += 1;
    }

    fn clear(&mut self) {
        self.buf.clear();
        self.cursor = 0;
        self.count = 0;
    }

    fn size_bytes(&self) -> usize {
        core::mem::size_of::<Self>() + self.buf.capacity() * core::mem::size_of::<f64>()
    }

    fn count(&self) -> u64 {
        self.count
    }
}
