//! Priority containers over finite `f64`
//!
//! `f64` is only `PartialOrd`, so values are wrapped in [`Ordered`], which
//! orders by `f64::total_cmp`. Every value reaching these heaps has passed
//! through [`Observation`](crate::traits::Observation), so the total order
//! agrees with numeric order (up to the sign of zero, which does not affect
//! any median value).

use core::cmp::{Ordering, Reverse};

#[cfg(feature = "std")]
use std::collections::BinaryHeap;

#[cfg(not(feature = "std"))]
extern crate alloc;
#[cfg(not(feature = "std"))]
use alloc::collections::BinaryHeap;

#[derive(Clone, Copy, Debug)]
pub(crate) struct Ordered(pub(crate) f64);

impl PartialEq for Ordered {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Ordered {}

impl PartialOrd for Ordered {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Ordered {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

/// Max-heap: `peek` returns the largest value
#[derive(Clone, Debug, Default)]
pub(crate) struct MaxHeap {
    inner: BinaryHeap<Ordered>,
}

impl MaxHeap {
    pub(crate) fn push(&mut self, value: f64) {
        self.inner.push(Ordered(value));
    }

    pub(crate) fn pop(&mut self) -> Option<f64> {
        self.inner.pop().map(|o| o.0)
    }

    pub(crate) fn peek(&self) -> Option<f64> {
        self.inner.peek().map(|o| o.0)
    }

    pub(crate) fn len(&self) -> usize {
        self.inner.len()
    }

    pub(crate) fn capacity(&self) -> usize {
        self.inner.capacity()
    }

    pub(crate) fn clear(&mut self) {
        self.inner.clear();
    }
}

/// Min-heap: `peek` returns the smallest value
#[derive(Clone, Debug, Default)]
pub(crate) struct MinHeap {
    inner: BinaryHeap<Reverse<Ordered>>,
}

impl MinHeap {
    pub(crate) fn push(&mut self, value: f64) {
        self.inner.push(Reverse(Ordered(value)));
    }

    pub(crate) fn pop(&mut self) -> Option<f64> {
        self.inner.pop().map(|Reverse(o)| o.0)
    }

    pub(crate) fn peek(&self) -> Option<f64> {
        self.inner.peek().map(|Reverse(o)| o.0)
    }

    pub(crate) fn len(&self) -> usize {
        self.inner.len()
    }

    pub(crate) fn capacity(&self) -> usize {
        self.inner.capacity()
    }

    pub(crate) fn clear(&mut self) {
        self.inner.clear();
    }
}
