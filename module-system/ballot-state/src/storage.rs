use std::fmt::Display;
use std::sync::Arc;

use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

use crate::codec::{EncodeKeyLike, StateValueCodec};
use crate::internal_cache::OrderedReadsAndWrites;
use crate::Prefix;

/// `Key` type for the [`Storage`].
#[derive(
    Clone,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Debug,
    Serialize,
    Deserialize,
    BorshDeserialize,
    BorshSerialize,
)]
pub struct StorageKey {
    key: Arc<Vec<u8>>,
}

impl StorageKey {
    /// Creates a new [`StorageKey`] that combines a prefix and a key.
    pub fn new<K, Q, KC>(prefix: &Prefix, key: &Q, codec: &KC) -> Self
    where
        KC: EncodeKeyLike<Q, K>,
        Q: ?Sized,
    {
        let encoded_key = codec.encode_key_like(key);

        let mut full_key = Vec::<u8>::with_capacity(prefix.len() + encoded_key.len());
        full_key.extend_from_slice(prefix.as_bytes());
        full_key.extend_from_slice(&encoded_key);

        Self {
            key: Arc::new(full_key),
        }
    }

    /// Creates a new [`StorageKey`] that consists of the prefix alone. Used by
    /// single-value containers.
    pub fn singleton(prefix: &Prefix) -> Self {
        Self {
            key: Arc::new(prefix.as_bytes().to_vec()),
        }
    }

    /// Returns a cheap clone of the underlying key bytes.
    pub fn key(&self) -> Arc<Vec<u8>> {
        self.key.clone()
    }
}

impl AsRef<Vec<u8>> for StorageKey {
    fn as_ref(&self) -> &Vec<u8> {
        &self.key
    }
}

impl From<Vec<u8>> for StorageKey {
    fn from(key: Vec<u8>) -> Self {
        Self { key: Arc::new(key) }
    }
}

impl Display for StorageKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "0x{}", hex::encode(self.key.as_ref()))
    }
}

/// A serialized value suitable for storing. Internally uses an [`Arc<Vec<u8>>`] for cheap cloning.
#[derive(
    Clone, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize, Serialize, Deserialize, Default,
)]
pub struct StorageValue {
    value: Arc<Vec<u8>>,
}

impl From<Vec<u8>> for StorageValue {
    fn from(value: Vec<u8>) -> Self {
        Self {
            value: Arc::new(value),
        }
    }
}

impl StorageValue {
    /// Create a new storage value by serializing the input with the given codec.
    pub fn new<V, VC>(value: &V, codec: &VC) -> Self
    where
        VC: StateValueCodec<V>,
    {
        let encoded_value = codec.encode_value(value);
        Self {
            value: Arc::new(encoded_value),
        }
    }

    /// Get the bytes of this value.
    pub fn value(&self) -> &[u8] {
        &self.value
    }
}

/// An interface for storing and retrieving values in the storage.
pub trait Storage: Clone {
    /// Returns the value corresponding to the key or None if key is absent.
    fn get(&self, key: &StorageKey) -> Option<StorageValue>;

    /// Commits the writes of a frozen checkpoint to the backing store.
    /// Writes of `None` delete the key.
    fn commit(&self, state_accesses: &OrderedReadsAndWrites);

    /// Indicates if storage is empty or not.
    fn is_empty(&self) -> bool;
}
