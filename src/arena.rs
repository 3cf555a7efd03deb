//! Record Arena
//!
//! Owns the records of a queue and hands out ids that stay valid until the record is removed,
//! no matter how the heap reorders its slots. Vacant entries form a free list so ids get reused.
//!

use std::ops::{Index, IndexMut};

#[derive(Debug, Clone)]
enum Entry<T> {
    Occupied(T),
    /// the next vacant entry of the free list
    Vacant(Option<usize>),
}

#[derive(Debug, Clone)]
pub struct Arena<T> {
    entries: Vec<Entry<T>>,
    free_list_head: Option<usize>,
    len: usize,
}

impl<T> Default for Arena<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Arena<T> {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            free_list_head: None,
            len: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn reserve(&mut self, additional: usize) {
        self.entries.reserve(additional);
    }

    pub fn insert(&mut self, value: T) -> usize {
        self.len += 1;
        match self.free_list_head {
            Some(id) => {
                let Entry::Vacant(next) = self.entries[id] else {
                    unreachable!("free list points at an occupied entry {id}")
                };
                self.free_list_head = next;
                self.entries[id] = Entry::Occupied(value);
                id
            }
            None => {
                self.entries.push(Entry::Occupied(value));
                self.entries.len() - 1
            }
        }
    }

    /// panics if `id` is vacant
    pub fn remove(&mut self, id: usize) -> T {
        let entry = std::mem::replace(&mut self.entries[id], Entry::Vacant(self.free_list_head));
        match entry {
            Entry::Occupied(value) => {
                self.free_list_head = Some(id);
                self.len -= 1;
                value
            }
            Entry::Vacant(next) => {
                self.entries[id] = Entry::Vacant(next);
                panic!("removing vacant arena entry {id}")
            }
        }
    }

    pub fn get(&self, id: usize) -> Option<&T> {
        match self.entries.get(id) {
            Some(Entry::Occupied(value)) => Some(value),
            _ => None,
        }
    }

    pub fn get_mut(&mut self, id: usize) -> Option<&mut T> {
        match self.entries.get_mut(id) {
            Some(Entry::Occupied(value)) => Some(value),
            _ => None,
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.free_list_head = None;
        self.len = 0;
    }
}

impl<T> Index<usize> for Arena<T> {
    type Output = T;
    fn index(&self, id: usize) -> &T {
        self.get(id).unwrap_or_else(|| panic!("vacant arena entry {id}"))
    }
}

impl<T> IndexMut<usize> for Arena<T> {
    fn index_mut(&mut self, id: usize) -> &mut T {
        self.get_mut(id).unwrap_or_else(|| panic!("vacant arena entry {id}"))
    }
}
