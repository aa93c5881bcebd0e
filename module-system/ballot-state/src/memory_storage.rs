use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock};

use crate::internal_cache::OrderedReadsAndWrites;
use crate::storage::{StorageKey, StorageValue};
use crate::Storage;

/// In-memory [`Storage`] backed by an ordered map. Clones share the same data.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    db: Arc<RwLock<BTreeMap<Vec<u8>, Vec<u8>>>>,
}

impl MemoryStorage {
    /// Creates an empty storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently stored.
    pub fn len(&self) -> usize {
        self.db
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &StorageKey) -> Option<StorageValue> {
        self.db
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key.as_ref())
            .map(|value| StorageValue::from(value.clone()))
    }

    fn commit(&self, state_accesses: &OrderedReadsAndWrites) {
        let mut db = self.db.write().unwrap_or_else(PoisonError::into_inner);
        for (key, value) in &state_accesses.ordered_writes {
            match value {
                Some(value) => {
                    db.insert(key.as_ref().clone(), value.value().to_vec());
                }
                None => {
                    db.remove(key.as_ref());
                }
            }
        }
    }

    fn is_empty(&self) -> bool {
        self.db
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_empty()
    }
}
