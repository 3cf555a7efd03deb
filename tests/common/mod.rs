extern crate indexed_pq;

use indexed_pq::{HeapType, PriorityOrder, PriorityQueue};
use rand::Rng;

#[derive(Hash, Copy, Clone, Eq, PartialEq, Debug)]
pub enum Element {
    Target,
    Node,
}

pub fn generate_numbers() -> Vec<i32> {
    let size = 1000;
    let mut rng = rand::thread_rng();
    (0..size).map(|_| rng.gen::<i32>()).collect()
}

/// distinct items `0..n` with random priorities
pub fn fill(heap_type: HeapType, n: usize) -> (PriorityQueue<usize, f64>, Vec<f64>) {
    let mut rng = rand::thread_rng();
    let mut queue = PriorityQueue::with_order(heap_type);
    let priorities: Vec<f64> = (0..n).map(|_| rng.gen_range(0.0..100000.0)).collect();
    for (item, &priority) in priorities.iter().enumerate() {
        queue.enqueue(item, priority).unwrap();
    }
    (queue, priorities)
}

/// dequeue everything, checking the order and the invariants on the way
pub fn drain_in_order(heap_type: HeapType, queue: &mut PriorityQueue<usize, f64>) -> Vec<(usize, f64)> {
    let mut drained: Vec<(usize, f64)> = vec![];
    while let Ok(entry) = queue.dequeue_with_priority() {
        if let Some(previous) = drained.last() {
            assert!(!heap_type.ranks_better(&entry.1, &previous.1), "{entry:?} dequeued after {previous:?}");
        }
        queue.sanity_check().unwrap();
        drained.push(entry);
    }
    drained
}

pub mod dequeue {
    use super::*;

    pub fn returns_the_best_value(heap_type: HeapType) {
        let numbers = generate_numbers();
        let mut queue = PriorityQueue::with_order(heap_type);
        for (item, &number) in numbers.iter().enumerate() {
            queue.enqueue(item, number).unwrap();
        }
        let best = match heap_type {
            HeapType::Min => numbers.iter().min(),
            HeapType::Max => numbers.iter().max(),
        };
        let (_, priority) = queue.dequeue_with_priority().unwrap();
        assert_eq!(Some(&priority), best);
    }

    pub fn returns_all_items_in_order(heap_type: HeapType) {
        let (mut queue, priorities) = fill(heap_type, 2000);
        let drained = drain_in_order(heap_type, &mut queue);
        assert_eq!(drained.len(), priorities.len());
        let mut seen = vec![false; priorities.len()];
        for (item, priority) in drained {
            assert!(!seen[item], "item {item} dequeued twice");
            seen[item] = true;
            assert_eq!(priorities[item], priority);
        }
        assert!(queue.is_empty());
        assert_eq!(queue.peek_last(), None);
    }

    pub fn fails_if_the_queue_is_empty(heap_type: HeapType) {
        let mut queue: PriorityQueue<Element, i32> = PriorityQueue::with_order(heap_type);
        assert!(queue.dequeue().is_err());
        assert!(queue.peek().is_err());
    }
}

pub mod enqueue {
    use super::*;

    pub fn adds_a_value_to_the_queue(heap_type: HeapType) {
        let mut queue = PriorityQueue::with_order(heap_type);
        queue.enqueue(Element::Target, 1).unwrap();
        assert_eq!(queue.peek(), Ok(&Element::Target));
        assert_eq!(queue.peek_last(), Some(&Element::Target));
        assert_eq!(queue.len(), 1);
    }

    pub fn orders_two_values(heap_type: HeapType) {
        let mut queue = PriorityQueue::with_order(heap_type);
        queue.enqueue(Element::Node, 1).unwrap();
        queue.enqueue(Element::Target, 2).unwrap();
        let (best, worst) = match heap_type {
            HeapType::Min => (Element::Node, Element::Target),
            HeapType::Max => (Element::Target, Element::Node),
        };
        assert_eq!(queue.peek(), Ok(&best));
        assert_eq!(queue.peek_last(), Some(&worst));
    }

    pub fn rejects_a_duplicate_item(heap_type: HeapType) {
        let mut queue = PriorityQueue::with_order(heap_type);
        queue.enqueue(Element::Node, 1).unwrap();
        assert!(queue.enqueue(Element::Node, 0).is_err());
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.get_priority(&Element::Node), Ok(&1));
    }
}

pub mod set_priority {
    use super::*;

    pub fn reorders_after_random_updates(heap_type: HeapType) {
        let mut rng = rand::thread_rng();
        let n = 10000;
        let mut queue = PriorityQueue::with_order(heap_type);
        for item in 0..n {
            queue.enqueue(item, item as f64).unwrap();
        }
        let mut expected = vec![0.; n];
        for (item, slot) in expected.iter_mut().enumerate() {
            *slot = rng.gen_range(0.0..10000.0);
            queue.set_priority(&item, *slot).unwrap();
            assert_eq!(queue.get_priority(&item), Ok(&*slot));
        }
        queue.sanity_check().unwrap();
        for (item, priority) in drain_in_order(heap_type, &mut queue) {
            assert_eq!(expected[item], priority);
        }
    }

    pub fn moves_an_item_to_the_top(heap_type: HeapType) {
        let (mut queue, _) = fill(heap_type, 100);
        let top = match heap_type {
            HeapType::Min => -1.,
            HeapType::Max => 1e9,
        };
        queue.set_priority(&42, top).unwrap();
        assert_eq!(queue.peek(), Ok(&42));
        queue.sanity_check().unwrap();
    }

    pub fn moves_an_item_to_the_bottom(heap_type: HeapType) {
        let (mut queue, _) = fill(heap_type, 100);
        let bottom = match heap_type {
            HeapType::Min => 1e9,
            HeapType::Max => -1.,
        };
        queue.set_priority(&42, bottom).unwrap();
        assert_eq!(queue.peek_last(), Some(&42));
        let drained = drain_in_order(heap_type, &mut queue);
        assert_eq!(drained.last().map(|(item, _)| *item), Some(42));
    }
}

pub mod peek_last {
    use super::*;

    pub fn tracks_the_worst_item(heap_type: HeapType) {
        let mut rng = rand::thread_rng();
        let (mut queue, mut priorities) = fill(heap_type, 500);
        for _ in 0..2000 {
            let item = rng.gen_range(0..priorities.len());
            priorities[item] = rng.gen_range(0.0..100000.0);
            queue.set_priority(&item, priorities[item]).unwrap();
            let (_, last) = queue.peek_last_with_priority().unwrap();
            assert!(priorities.iter().all(|priority| !heap_type.ranks_better(last, priority)));
        }
        queue.sanity_check().unwrap();
    }
}

pub mod clear {
    use super::*;

    pub fn resets_the_queue(heap_type: HeapType) {
        let (mut queue, priorities) = fill(heap_type, 100);
        queue.clear();
        assert_eq!(queue.len(), 0);
        assert_eq!(queue.peek_last(), None);
        assert!((0..priorities.len()).all(|item| !queue.contains(&item)));
        queue.sanity_check().unwrap();
        // still usable afterwards
        queue.enqueue(7, 1.).unwrap();
        assert_eq!(queue.dequeue(), Ok(7));
    }
}
