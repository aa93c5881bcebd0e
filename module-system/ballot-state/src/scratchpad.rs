use std::collections::HashMap;
use std::fmt::Debug;

use crate::codec::{EncodeKeyLike, StateCodec, StateValueCodec};
use crate::internal_cache::{OrderedReadsAndWrites, StorageInternalCache};
use crate::storage::{StorageKey, StorageValue};
use crate::{Event, Prefix, Storage};

/// A delta accumulates reads and writes on top of the underlying storage.
struct Delta<S: Storage> {
    inner: S,
    cache: StorageInternalCache,
}

/// A wrapper that adds additional writes on top of an underlying [`Delta`].
/// Writes made through it can be dropped as a whole without touching the delta,
/// which is how a failed call leaves no trace.
///
/// All reads are recorded in the underlying delta, even for reverted calls.
struct RevertableDelta<S: Storage> {
    /// The inner (non-revertable) delta
    inner: Delta<S>,
    /// A cache containing the most recent values written. Reads are first checked
    /// against this map, and if the key is not present, the underlying Delta is checked.
    writes: HashMap<StorageKey, Option<StorageValue>>,
}

impl<S: Storage> Debug for RevertableDelta<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RevertableDelta")
            .field("inner", &self.inner)
            .field("pending_writes", &self.writes.len())
            .finish()
    }
}

/// This structure is responsible for storing the `read-write` set
/// and is obtained from the [`WorkingSet`] by using either the `checkpoint` or `revert` method.
pub struct StateCheckpoint<S: Storage> {
    delta: Delta<S>,
}

impl<S: Storage> StateCheckpoint<S> {
    /// Creates a checkpoint with an empty read-write set over `inner`.
    pub fn new(inner: S) -> Self {
        Self {
            delta: Delta::new(inner),
        }
    }

    /// Opens a revertable [`WorkingSet`] on top of this checkpoint.
    pub fn to_revertable(self) -> WorkingSet<S> {
        WorkingSet {
            delta: self.delta.get_revertable_wrapper(),
            events: Default::default(),
        }
    }

    /// Extracts the accumulated reads and writes, leaving the checkpoint empty.
    pub fn freeze(&mut self) -> OrderedReadsAndWrites {
        self.delta.freeze()
    }

    /// The storage this checkpoint reads from.
    pub fn storage(&self) -> &S {
        &self.delta.inner
    }
}

/// This structure contains the read-write set and the events collected during the execution of a call.
/// There are two ways to convert it into a [`StateCheckpoint`]:
/// 1. By using the `checkpoint()` method, where all the changes are added to the underlying [`StateCheckpoint`].
/// 2. By using the `revert()` method, where the most recent changes are reverted and the previous [`StateCheckpoint`] is returned.
pub struct WorkingSet<S: Storage> {
    delta: RevertableDelta<S>,
    events: Vec<Event>,
}

impl<S: Storage> WorkingSet<S> {
    /// Creates a working set directly over `inner`.
    pub fn new(inner: S) -> Self {
        StateCheckpoint::new(inner).to_revertable()
    }

    /// Keeps the writes made through this working set.
    pub fn checkpoint(self) -> StateCheckpoint<S> {
        StateCheckpoint {
            delta: self.delta.commit(),
        }
    }

    /// Drops the writes made through this working set.
    pub fn revert(self) -> StateCheckpoint<S> {
        StateCheckpoint {
            delta: self.delta.revert(),
        }
    }

    /// Records an event.
    pub fn add_event(&mut self, key: &str, value: &str) {
        self.events.push(Event::new(key, value));
    }

    /// Takes all events recorded so far.
    pub fn take_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    /// Events recorded so far.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub(crate) fn get(&mut self, key: StorageKey) -> Option<StorageValue> {
        self.delta.get(key)
    }

    pub(crate) fn set(&mut self, key: StorageKey, value: StorageValue) {
        self.delta.set(key, value)
    }

    pub(crate) fn delete(&mut self, key: StorageKey) {
        self.delta.delete(key)
    }
}

impl<S: Storage> WorkingSet<S> {
    pub(crate) fn set_value<Q, K, V, Codec>(
        &mut self,
        prefix: &Prefix,
        storage_key: &Q,
        value: &V,
        codec: &Codec,
    ) where
        Q: ?Sized,
        Codec: StateCodec,
        Codec::KeyCodec: EncodeKeyLike<Q, K>,
        Codec::ValueCodec: StateValueCodec<V>,
    {
        let storage_key = StorageKey::new(prefix, storage_key, codec.key_codec());
        let storage_value = StorageValue::new(value, codec.value_codec());
        self.set(storage_key, storage_value);
    }

    pub(crate) fn get_value<Q, K, V, Codec>(
        &mut self,
        prefix: &Prefix,
        storage_key: &Q,
        codec: &Codec,
    ) -> Option<V>
    where
        Q: ?Sized,
        Codec: StateCodec,
        Codec::KeyCodec: EncodeKeyLike<Q, K>,
        Codec::ValueCodec: StateValueCodec<V>,
    {
        let storage_key = StorageKey::new(prefix, storage_key, codec.key_codec());
        self.get_decoded(storage_key, codec)
    }

    pub(crate) fn delete_value<Q, K, Codec>(
        &mut self,
        prefix: &Prefix,
        storage_key: &Q,
        codec: &Codec,
    ) where
        Q: ?Sized,
        Codec: StateCodec,
        Codec::KeyCodec: EncodeKeyLike<Q, K>,
    {
        let storage_key = StorageKey::new(prefix, storage_key, codec.key_codec());
        self.delete(storage_key);
    }

    pub(crate) fn set_singleton<V, Codec>(&mut self, prefix: &Prefix, value: &V, codec: &Codec)
    where
        Codec: StateCodec,
        Codec::ValueCodec: StateValueCodec<V>,
    {
        let storage_key = StorageKey::singleton(prefix);
        let storage_value = StorageValue::new(value, codec.value_codec());
        self.set(storage_key, storage_value);
    }

    pub(crate) fn get_singleton<V, Codec>(&mut self, prefix: &Prefix, codec: &Codec) -> Option<V>
    where
        Codec: StateCodec,
        Codec::ValueCodec: StateValueCodec<V>,
    {
        let storage_key = StorageKey::singleton(prefix);
        self.get_decoded(storage_key, codec)
    }

    fn get_decoded<V, Codec>(&mut self, storage_key: StorageKey, codec: &Codec) -> Option<V>
    where
        Codec: StateCodec,
        Codec::ValueCodec: StateValueCodec<V>,
    {
        let storage_value = self.get(storage_key)?;

        // It is ok to panic here. Deserialization problem means that something is terribly wrong.
        Some(
            codec
                .value_codec()
                .decode_value_unwrap(storage_value.value()),
        )
    }
}

impl<S: Storage> RevertableDelta<S> {
    fn get(&mut self, key: StorageKey) -> Option<StorageValue> {
        if let Some(value) = self.writes.get(&key) {
            return value.clone();
        }
        self.inner.get(key)
    }

    fn set(&mut self, key: StorageKey, value: StorageValue) {
        self.writes.insert(key, Some(value));
    }

    fn delete(&mut self, key: StorageKey) {
        self.writes.insert(key, None);
    }

    fn commit(self) -> Delta<S> {
        let mut inner = self.inner;

        for (k, v) in self.writes.into_iter() {
            if let Some(v) = v {
                inner.set(k, v);
            } else {
                inner.delete(k);
            }
        }

        inner
    }

    fn revert(self) -> Delta<S> {
        self.inner
    }
}

impl<S: Storage> Delta<S> {
    fn new(inner: S) -> Self {
        Self {
            inner,
            cache: Default::default(),
        }
    }

    fn get_revertable_wrapper(self) -> RevertableDelta<S> {
        RevertableDelta {
            inner: self,
            writes: Default::default(),
        }
    }

    fn get(&mut self, key: StorageKey) -> Option<StorageValue> {
        self.cache.get_or_fetch(&key, &self.inner)
    }

    fn set(&mut self, key: StorageKey, value: StorageValue) {
        self.cache.set(key, value)
    }

    fn delete(&mut self, key: StorageKey) {
        self.cache.delete(key)
    }

    fn freeze(&mut self) -> OrderedReadsAndWrites {
        std::mem::take(&mut self.cache).into()
    }
}

impl<S: Storage> Debug for Delta<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Delta").finish()
    }
}
