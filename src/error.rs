//! Errors
//!
//! Every failing operation of [`crate::PriorityQueue`] reports one of these variants and
//! leaves the queue exactly as it was before the call.
//!

use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// `dequeue` or `peek` was called on an empty queue
    #[error("the priority queue is empty")]
    EmptyCollection,
    /// the item is not in the identity index
    #[error("the priority queue does not contain the given item")]
    ItemNotFound,
    /// the item is already in the queue; each item occupies at most one slot
    #[error("the priority queue already contains this item")]
    DuplicateItem,
    /// the active ordering cannot rank this priority, e.g. NaN with the built-in orders
    #[error("the priority cannot be ordered by this queue")]
    UnorderedPriority,
}

pub type Result<T> = std::result::Result<T, Error>;
