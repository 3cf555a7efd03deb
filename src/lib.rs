/*!
Updatable priority queue backed by an indexed binary heap.

[`PriorityQueue`] keeps distinct items, each with a priority, and supports
 - O(log n) enqueue, dequeue, removal and priority change in either direction
 - O(1) peek at the best ranked item, the worst ranked item, membership and priority lookup
 - min ([`HeapType::Min`]), max ([`HeapType::Max`]) or custom ([`PriorityOrder`]) ordering
 - custom item identity ([`KeyEquality`])

```rust
use indexed_pq::{Error, PriorityQueue};

let mut open_set = PriorityQueue::min();
open_set.enqueue((0, 0), 4.).unwrap();
open_set.enqueue((0, 1), 3.).unwrap();
// a shorter path to (0, 0) was found
open_set.set_priority(&(0, 0), 2.).unwrap();
assert_eq!(open_set.dequeue(), Ok((0, 0)));
assert_eq!(open_set.dequeue(), Ok((0, 1)));
assert_eq!(open_set.dequeue(), Err(Error::EmptyCollection));
```
*/

extern crate serde;
#[macro_use]
extern crate serde_json;
extern crate clap;
extern crate derivative;
extern crate hashbrown;
#[cfg(feature = "cli")]
extern crate pbr;
extern crate rand;
extern crate rand_xoshiro;
extern crate thiserror;

mod arena;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod equality;
pub mod error;
pub mod order;
pub mod priority_queue;
pub mod util;

pub use config::QueueConfig;
pub use equality::{DefaultKeyEquality, KeyEquality, KeyProjection};
pub use error::{Error, Result};
pub use order::{HeapType, PriorityOrder};
pub use priority_queue::{Iter, PriorityQueue};
