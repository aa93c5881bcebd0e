use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

/// A key-value pair emitted by a module while handling a call.
#[derive(
    Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize, Serialize, Deserialize,
)]
pub struct Event {
    key: String,
    value: String,
}

impl Event {
    /// Creates a new event from string slices.
    pub fn new(key: &str, value: &str) -> Self {
        Self {
            key: key.to_owned(),
            value: value.to_owned(),
        }
    }

    /// The event key, e.g. `"Election: vote"`.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The event payload.
    pub fn value(&self) -> &str {
        &self.value
    }
}
