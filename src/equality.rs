//! Item Identity
//!
//! The relation that decides whether two items are the same entry of a [`crate::PriorityQueue`].
//! The identity index hashes and compares items only through a [`KeyEquality`], so callers can
//! swap in any equivalence that is consistent with its hash.
//!

use derivative::Derivative;
use hashbrown::DefaultHashBuilder;
use std::hash::{BuildHasher, Hash};

/// An equivalence relation over items together with a compatible hash: `eq_key(a, b)` implies
/// `hash_key(a) == hash_key(b)`.
pub trait KeyEquality<K: ?Sized> {
    fn hash_key(&self, key: &K) -> u64;
    fn eq_key(&self, a: &K, b: &K) -> bool;
}

/// natural identity: [`Hash`] + [`Eq`] of the item itself
#[derive(Derivative, Clone, Default)]
#[derivative(Debug)]
pub struct DefaultKeyEquality<S = DefaultHashBuilder> {
    #[derivative(Debug = "ignore")]
    hash_builder: S,
}

impl<S> DefaultKeyEquality<S> {
    pub fn with_hasher(hash_builder: S) -> Self {
        Self { hash_builder }
    }
}

impl<K: Hash + Eq + ?Sized, S: BuildHasher> KeyEquality<K> for DefaultKeyEquality<S> {
    #[inline]
    fn hash_key(&self, key: &K) -> u64 {
        self.hash_builder.hash_one(key)
    }

    #[inline]
    fn eq_key(&self, a: &K, b: &K) -> bool {
        a == b
    }
}

/// Identity through a projection: two items are the same entry when `project` maps them to equal
/// values, e.g. case-insensitive names or the id field of a larger struct.
///
/// ```rust
/// use indexed_pq::{HeapType, KeyProjection, PriorityQueue};
///
/// let equality = KeyProjection::new(|name: &String| name.to_lowercase());
/// let mut queue = PriorityQueue::with_equality(equality, HeapType::Min);
/// queue.enqueue("Alice".to_string(), 1.).unwrap();
/// assert!(queue.contains(&"ALICE".to_string()));
/// ```
#[derive(Derivative, Clone)]
#[derivative(Debug)]
pub struct KeyProjection<F, S = DefaultHashBuilder> {
    #[derivative(Debug = "ignore")]
    project: F,
    #[derivative(Debug = "ignore")]
    hash_builder: S,
}

impl<F> KeyProjection<F> {
    pub fn new(project: F) -> Self {
        Self::with_hasher(project, DefaultHashBuilder::default())
    }
}

impl<F, S> KeyProjection<F, S> {
    pub fn with_hasher(project: F, hash_builder: S) -> Self {
        Self { project, hash_builder }
    }
}

impl<K: ?Sized, Q: Hash + Eq, F: Fn(&K) -> Q, S: BuildHasher> KeyEquality<K> for KeyProjection<F, S> {
    #[inline]
    fn hash_key(&self, key: &K) -> u64 {
        self.hash_builder.hash_one((self.project)(key))
    }

    #[inline]
    fn eq_key(&self, a: &K, b: &K) -> bool {
        (self.project)(a) == (self.project)(b)
    }
}
