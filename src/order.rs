//! Priority Ordering
//!
//! The comparator strategy of a [`crate::PriorityQueue`]: which of two priorities ranks better,
//! i.e. sits closer to the root of the heap.
//!

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// [`HeapType`] represents whether a queue is min ([`HeapType::Min`]) or max ([`HeapType::Max`]) priority
#[derive(PartialEq, Eq, Copy, Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HeapType {
    /// the smallest priority is dequeued first
    #[default]
    Min,
    /// the largest priority is dequeued first
    Max,
}

impl HeapType {
    pub fn from_max_priority(max_priority: bool) -> Self {
        if max_priority {
            Self::Max
        } else {
            Self::Min
        }
    }
}

/// Ranks priorities of type `P`.
///
/// `compare(a, b)` returns [`Ordering::Less`] when `a` ranks better than `b`, [`Ordering::Equal`]
/// when they rank the same, and [`Ordering::Greater`] when `a` ranks worse. The relation must be a
/// total order over every admitted priority.
///
/// Any `Fn(&P, &P) -> Ordering` is a custom ordering:
///
/// ```rust
/// use indexed_pq::PriorityQueue;
///
/// let mut queue = PriorityQueue::with_order(|a: &f64, b: &f64| a.total_cmp(b));
/// queue.enqueue("late", 2.5).unwrap();
/// queue.enqueue("early", -1.0).unwrap();
/// assert_eq!(queue.peek(), Ok(&"early"));
/// ```
pub trait PriorityOrder<P> {
    fn compare(&self, a: &P, b: &P) -> Ordering;

    /// whether a priority may enter the queue at all; rejected priorities fail with
    /// [`crate::Error::UnorderedPriority`]
    fn admits(&self, _priority: &P) -> bool {
        true
    }

    #[inline]
    fn ranks_better(&self, a: &P, b: &P) -> bool {
        self.compare(a, b) == Ordering::Less
    }
}

/// the built-in orders only admit priorities that are comparable to themselves, which rules out NaN
impl<P: PartialOrd> PriorityOrder<P> for HeapType {
    #[inline]
    fn compare(&self, a: &P, b: &P) -> Ordering {
        let ordering = a.partial_cmp(b).unwrap_or(Ordering::Equal);
        match self {
            HeapType::Min => ordering,
            HeapType::Max => ordering.reverse(),
        }
    }

    #[inline]
    fn admits(&self, priority: &P) -> bool {
        priority.partial_cmp(priority).is_some()
    }
}

impl<P, F> PriorityOrder<P> for F
where
    F: Fn(&P, &P) -> Ordering,
{
    #[inline]
    fn compare(&self, a: &P, b: &P) -> Ordering {
        self(a, b)
    }
}
