//! Indexed Binary Heap
//!
//! A priority queue of distinct items whose priorities can be changed in place.
//!
//! Each item owns one record in an arena; the heap is a dense vector of record ids and the
//! identity index maps an item to its record id. A record remembers its slot in the heap, which is
//! kept equal to its actual position across every swap, so that a priority update can find the
//! slot to fix in O(1).
//!
//! Besides the root (the best ranked item), the queue tracks the worst ranked item, see
//! [`PriorityQueue::peek_last`]. Updates keep it current while they can do so in O(1); when the
//! tracked record is removed or improves, it is only marked stale and the next `peek_last` scans
//! the leaves.
//!

use crate::arena::Arena;
use crate::config::QueueConfig;
use crate::equality::{DefaultKeyEquality, KeyEquality};
use crate::error::{Error, Result};
use crate::order::{HeapType, PriorityOrder};
use derivative::Derivative;
use hashbrown::hash_table::Entry;
use hashbrown::HashTable;
use std::cell::Cell;
use std::cmp::Ordering;
use std::iter::FusedIterator;

#[derive(Debug, Clone)]
pub(crate) struct Record<K, P> {
    pub item: K,
    pub priority: P,
    /// position of this record in the heap vector
    pub slot: usize,
}

#[inline]
fn parent_slot(slot: usize) -> usize {
    (slot - 1) / 2
}

/**
[`PriorityQueue`] is an updatable min or max priority queue implemented as an indexed binary heap.

`O` decides which priority ranks better ([`HeapType::Min`] by default) and `E` decides which items
are the same entry ([`Hash`](std::hash::Hash) + [`Eq`] by default).

```rust
use indexed_pq::PriorityQueue;

let mut queue = PriorityQueue::min();
queue.enqueue("a", 3.).unwrap();
queue.enqueue("b", 1.).unwrap();
queue.enqueue("c", 2.).unwrap();
queue.set_priority(&"a", 0.5).unwrap();
assert_eq!(queue.dequeue(), Ok("a"));
assert_eq!(queue.peek_last(), Some(&"c"));
```
 */
#[derive(Derivative, Clone)]
#[derivative(Debug(bound = "K: std::fmt::Debug, P: std::fmt::Debug, O: std::fmt::Debug"))]
pub struct PriorityQueue<K, P = f64, O = HeapType, E = DefaultKeyEquality> {
    /// record ids in heap order
    heap: Vec<usize>,
    records: Arena<Record<K, P>>,
    /// identity index: record ids, hashed and compared through the record's item
    #[derivative(Debug = "ignore")]
    index: HashTable<usize>,
    /// record id of the worst ranked item; `None` on a non-empty queue means stale
    last: Cell<Option<usize>>,
    order: O,
    #[derivative(Debug = "ignore")]
    equality: E,
}

impl<K, P> PriorityQueue<K, P>
where
    K: std::hash::Hash + Eq,
    P: PartialOrd,
{
    /// an empty min priority ([`HeapType::Min`]) queue
    pub fn new() -> Self {
        Self::min()
    }

    pub fn min() -> Self {
        Self::with_order(HeapType::Min)
    }

    pub fn max() -> Self {
        Self::with_order(HeapType::Max)
    }

    pub fn with_max_priority(max_priority: bool) -> Self {
        Self::with_order(HeapType::from_max_priority(max_priority))
    }

    pub fn from_config(config: &QueueConfig) -> Self {
        Self::with_parts(DefaultKeyEquality::default(), config.heap_type(), config.capacity)
    }
}

impl<K, P> Default for PriorityQueue<K, P>
where
    K: std::hash::Hash + Eq,
    P: PartialOrd,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, P, O> PriorityQueue<K, P, O>
where
    K: std::hash::Hash + Eq,
    O: PriorityOrder<P>,
{
    /// an empty queue ranked by a custom ordering
    pub fn with_order(order: O) -> Self {
        Self::with_parts(DefaultKeyEquality::default(), order, 0)
    }
}

impl<K, P, E> PriorityQueue<K, P, HeapType, E>
where
    P: PartialOrd,
    E: KeyEquality<K>,
{
    /// an empty queue with a custom item identity
    pub fn with_equality(equality: E, heap_type: HeapType) -> Self {
        Self::with_parts(equality, heap_type, 0)
    }
}

impl<K, P, O, E> PriorityQueue<K, P, O, E>
where
    O: PriorityOrder<P>,
    E: KeyEquality<K>,
{
    pub fn with_parts(equality: E, order: O, capacity: usize) -> Self {
        Self {
            heap: Vec::with_capacity(capacity),
            records: Arena::with_capacity(capacity),
            index: HashTable::with_capacity(capacity),
            last: Cell::new(None),
            order,
            equality,
        }
    }

    /// the number of items in the queue
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn order(&self) -> &O {
        &self.order
    }

    /// Add an item with the given priority.
    ///
    /// Fails with [`Error::DuplicateItem`] if an equal item is already queued and with
    /// [`Error::UnorderedPriority`] if the ordering does not admit `priority`.
    pub fn enqueue(&mut self, item: K, priority: P) -> Result<()> {
        if !self.order.admits(&priority) {
            return Err(Error::UnorderedPriority);
        }
        let hash = self.equality.hash_key(&item);
        let Self {
            heap,
            records,
            index,
            equality,
            ..
        } = self;
        let vacant = match index.entry(
            hash,
            |&id| equality.eq_key(&records[id].item, &item),
            |&id| equality.hash_key(&records[id].item),
        ) {
            Entry::Occupied(_) => return Err(Error::DuplicateItem),
            Entry::Vacant(vacant) => vacant,
        };
        let slot = heap.len();
        let id = records.insert(Record { item, priority, slot });
        vacant.insert(id);
        heap.push(id);
        self.sift_up(slot);
        match self.last.get() {
            Some(last) if self.order.ranks_better(&self.records[id].priority, &self.records[last].priority) => {}
            Some(_) => self.last.set(Some(id)),
            // stale, left to the next `peek_last`
            None if self.heap.len() > 1 => {}
            None => self.last.set(Some(id)),
        }
        Ok(())
    }

    /// Remove the best ranked item, failing with [`Error::EmptyCollection`] on an empty queue.
    pub fn dequeue(&mut self) -> Result<K> {
        self.dequeue_with_priority().map(|(item, _)| item)
    }

    pub fn dequeue_with_priority(&mut self) -> Result<(K, P)> {
        if self.heap.is_empty() {
            return Err(Error::EmptyCollection);
        }
        Ok(self.remove_slot(0))
    }

    /// the best ranked item, without removing it
    pub fn peek(&self) -> Result<&K> {
        self.peek_with_priority().map(|(item, _)| item)
    }

    pub fn peek_with_priority(&self) -> Result<(&K, &P)> {
        let &id = self.heap.first().ok_or(Error::EmptyCollection)?;
        let record = &self.records[id];
        Ok((&record.item, &record.priority))
    }

    /// The worst ranked item, or `None` if the queue is empty.
    ///
    /// O(1) unless the tracked item was removed or improved since the last call, in which case the
    /// leaves are scanned once and the result is cached.
    pub fn peek_last(&self) -> Option<&K> {
        self.peek_last_with_priority().map(|(item, _)| item)
    }

    pub fn peek_last_with_priority(&self) -> Option<(&K, &P)> {
        let id = match self.last.get() {
            Some(id) => id,
            None => {
                let id = self.worst_leaf()?;
                self.last.set(Some(id));
                id
            }
        };
        let record = &self.records[id];
        Some((&record.item, &record.priority))
    }

    /// Change the priority of a queued item in either direction, returning the previous priority.
    pub fn set_priority(&mut self, item: &K, priority: P) -> Result<P> {
        if !self.order.admits(&priority) {
            return Err(Error::UnorderedPriority);
        }
        let id = self.find(item).ok_or(Error::ItemNotFound)?;
        let old_priority = std::mem::replace(&mut self.records[id].priority, priority);
        self.restore(self.records[id].slot);
        match self.last.get() {
            Some(last) if last == id => {
                // an improved worst item may have been overtaken
                if self.order.ranks_better(&self.records[id].priority, &old_priority) {
                    self.last.set(None);
                }
            }
            Some(last) => {
                if !self.order.ranks_better(&self.records[id].priority, &self.records[last].priority) {
                    self.last.set(Some(id));
                }
            }
            None => {}
        }
        Ok(old_priority)
    }

    pub fn get_priority(&self, item: &K) -> Result<&P> {
        let id = self.find(item).ok_or(Error::ItemNotFound)?;
        Ok(&self.records[id].priority)
    }

    pub fn contains(&self, item: &K) -> bool {
        self.find(item).is_some()
    }

    /// Remove an arbitrary item, returning the queued item and its priority.
    pub fn remove(&mut self, item: &K) -> Result<(K, P)> {
        let id = self.find(item).ok_or(Error::ItemNotFound)?;
        Ok(self.remove_slot(self.records[id].slot))
    }

    /// remove every item, keeping the allocated memory
    pub fn clear(&mut self) {
        self.heap.clear();
        self.records.clear();
        self.index.clear();
        self.last.set(None);
    }

    pub fn reserve(&mut self, additional: usize) {
        self.heap.reserve(additional);
        self.records.reserve(additional);
        let Self {
            records,
            index,
            equality,
            ..
        } = self;
        index.reserve(additional, |&id| equality.hash_key(&records[id].item));
    }

    /// iterate over `(item, priority)` in heap order, which is not sorted order
    pub fn iter(&self) -> Iter<'_, K, P> {
        Iter {
            slots: self.heap.iter(),
            records: &self.records,
        }
    }

    pub fn items(&self) -> impl Iterator<Item = &K> + '_ {
        self.iter().map(|(item, _)| item)
    }

    /// check the heap property, the slot of every record and the tracked last item, unless stale
    pub fn sanity_check(&self) -> std::result::Result<(), String> {
        if self.records.len() != self.heap.len() || self.index.len() != self.heap.len() {
            return Err(format!(
                "size mismatch: heap {}, records {}, index {}",
                self.heap.len(),
                self.records.len(),
                self.index.len()
            ));
        }
        for (slot, &id) in self.heap.iter().enumerate() {
            let record = self
                .records
                .get(id)
                .ok_or_else(|| format!("slot {slot} refers to vacant record {id}"))?;
            if record.slot != slot {
                return Err(format!("record {id} claims slot {} but sits at slot {slot}", record.slot));
            }
            if self.find(&record.item) != Some(id) {
                return Err(format!("record {id} at slot {slot} is not reachable from the index"));
            }
            if slot > 0 {
                let parent = parent_slot(slot);
                if self.ranks_better(slot, parent) {
                    return Err(format!("slot {slot} ranks better than its parent slot {parent}"));
                }
            }
        }
        match self.last.get() {
            Some(_) if self.heap.is_empty() => Err("empty queue tracks a last item".to_string()),
            Some(last) => {
                let last_priority = &self
                    .records
                    .get(last)
                    .ok_or_else(|| format!("last item {last} is vacant"))?
                    .priority;
                match self
                    .heap
                    .iter()
                    .position(|&id| self.order.compare(&self.records[id].priority, last_priority) == Ordering::Greater)
                {
                    Some(slot) => Err(format!("slot {slot} ranks worse than the tracked last item {last}")),
                    None => Ok(()),
                }
            }
            None => Ok(()),
        }
    }

    fn find(&self, item: &K) -> Option<usize> {
        let hash = self.equality.hash_key(item);
        self.index
            .find(hash, |&id| self.equality.eq_key(&self.records[id].item, item))
            .copied()
    }

    /// whether the record at slot `a` ranks strictly better than the record at slot `b`
    #[inline]
    fn ranks_better(&self, a: usize, b: usize) -> bool {
        self.order
            .ranks_better(&self.records[self.heap[a]].priority, &self.records[self.heap[b]].priority)
    }

    #[inline]
    fn swap(&mut self, a: usize, b: usize) {
        self.heap.swap(a, b);
        self.records[self.heap[a]].slot = a;
        self.records[self.heap[b]].slot = b;
    }

    fn sift_up(&mut self, mut slot: usize) {
        while slot > 0 {
            let parent = parent_slot(slot);
            if !self.ranks_better(slot, parent) {
                break;
            }
            self.swap(slot, parent);
            slot = parent;
        }
    }

    fn sift_down(&mut self, mut slot: usize) {
        loop {
            let left = 2 * slot + 1;
            if left >= self.heap.len() {
                break;
            }
            let right = left + 1;
            let best = if right < self.heap.len() && self.ranks_better(right, left) {
                right
            } else {
                left
            };
            if !self.ranks_better(best, slot) {
                break;
            }
            self.swap(slot, best);
            slot = best;
        }
    }

    /// move the only out-of-place record at `slot` up or down, whichever it needs
    fn restore(&mut self, slot: usize) {
        if slot > 0 && self.ranks_better(slot, parent_slot(slot)) {
            self.sift_up(slot);
        } else {
            self.sift_down(slot);
        }
    }

    fn remove_slot(&mut self, slot: usize) -> (K, P) {
        let last_slot = self.heap.len() - 1;
        self.swap(slot, last_slot);
        let id = self.heap[last_slot];
        self.heap.truncate(last_slot);
        let record = self.records.remove(id);
        let hash = self.equality.hash_key(&record.item);
        if let Ok(entry) = self.index.find_entry(hash, |&other| other == id) {
            entry.remove();
        }
        if slot < self.heap.len() {
            self.restore(slot);
        }
        if self.last.get() == Some(id) {
            self.last.set(None);
        }
        (record.item, record.priority)
    }

    /// the worst ranked item of a heap is always a leaf
    fn worst_leaf(&self) -> Option<usize> {
        let first_leaf = self.heap.len() / 2;
        self.heap[first_leaf..].iter().copied().reduce(|worst, id| {
            if self.order.ranks_better(&self.records[id].priority, &self.records[worst].priority) {
                worst
            } else {
                id
            }
        })
    }
}

pub struct Iter<'a, K, P> {
    slots: std::slice::Iter<'a, usize>,
    records: &'a Arena<Record<K, P>>,
}

impl<'a, K, P> Iterator for Iter<'a, K, P> {
    type Item = (&'a K, &'a P);

    fn next(&mut self) -> Option<Self::Item> {
        self.slots.next().map(|&id| {
            let record = &self.records[id];
            (&record.item, &record.priority)
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.slots.size_hint()
    }
}

impl<K, P> ExactSizeIterator for Iter<'_, K, P> {}
impl<K, P> FusedIterator for Iter<'_, K, P> {}

impl<'a, K, P, O, E> IntoIterator for &'a PriorityQueue<K, P, O, E>
where
    O: PriorityOrder<P>,
    E: KeyEquality<K>,
{
    type Item = (&'a K, &'a P);
    type IntoIter = Iter<'a, K, P>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
