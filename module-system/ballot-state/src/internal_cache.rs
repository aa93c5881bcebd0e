use std::collections::BTreeMap;

use crate::storage::{StorageKey, StorageValue};
use crate::Storage;

/// Caches reads and writes for a (key, value) pair. On the first read the value is fetched
/// from the backing [`Storage`]. On following reads, the cache checks if the value we read
/// was written or read before.
#[derive(Debug, Default)]
pub struct StorageInternalCache {
    writes: BTreeMap<StorageKey, Option<StorageValue>>,
    reads: BTreeMap<StorageKey, Option<StorageValue>>,
    ordered_db_reads: Vec<(StorageKey, Option<StorageValue>)>,
}

/// A struct that contains the values read from the DB and the values to be written, both in
/// deterministic order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct OrderedReadsAndWrites {
    /// Values fetched from the backing storage, in the order they were first read.
    pub ordered_reads: Vec<(StorageKey, Option<StorageValue>)>,
    /// Last write for every touched key, sorted by key. `None` is a deletion.
    pub ordered_writes: Vec<(StorageKey, Option<StorageValue>)>,
}

impl From<StorageInternalCache> for OrderedReadsAndWrites {
    fn from(val: StorageInternalCache) -> Self {
        Self {
            ordered_reads: val.ordered_db_reads,
            ordered_writes: val.writes.into_iter().collect(),
        }
    }
}

impl StorageInternalCache {
    /// Gets a value from the cache or reads it from the provided storage.
    pub(crate) fn get_or_fetch<S: Storage>(
        &mut self,
        key: &StorageKey,
        value_reader: &S,
    ) -> Option<StorageValue> {
        if let Some(written) = self.writes.get(key) {
            return written.clone();
        }
        if let Some(read) = self.reads.get(key) {
            return read.clone();
        }

        let storage_value = value_reader.get(key);
        self.add_read(key.clone(), storage_value.clone());
        storage_value
    }

    pub(crate) fn set(&mut self, key: StorageKey, value: StorageValue) {
        self.writes.insert(key, Some(value));
    }

    pub(crate) fn delete(&mut self, key: StorageKey) {
        self.writes.insert(key, None);
    }

    /// Returns `true` if nothing was read or written through this cache.
    pub fn is_empty(&self) -> bool {
        self.writes.is_empty() && self.reads.is_empty()
    }

    fn add_read(&mut self, key: StorageKey, value: Option<StorageValue>) {
        self.reads.insert(key.clone(), value.clone());
        self.ordered_db_reads.push((key, value))
    }
}
