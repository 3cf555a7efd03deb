//! Queue Configuration
//!
//! Serializable construction options, e.g. `{"max_priority": true, "capacity": 1024}`.
//!

use crate::order::HeapType;
use derivative::Derivative;
use serde::{Deserialize, Serialize};

#[derive(Derivative, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[derivative(Debug, Default(new = "true"))]
#[serde(deny_unknown_fields)]
pub struct QueueConfig {
    /// dequeue the largest priority first instead of the smallest
    #[serde(default = "queue_default_configs::max_priority")]
    pub max_priority: bool,
    /// number of items to allocate room for up front
    #[serde(default = "queue_default_configs::capacity")]
    pub capacity: usize,
}

pub mod queue_default_configs {
    pub fn max_priority() -> bool {
        false
    }

    pub fn capacity() -> usize {
        0
    }
}

impl QueueConfig {
    pub fn from_json(value: serde_json::Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value)
    }

    pub fn heap_type(&self) -> HeapType {
        HeapType::from_max_priority(self.max_priority)
    }
}
