use std::marker::PhantomData;

use thiserror::Error;

use crate::codec::{BorshCodec, StateCodec};
use crate::storage::StorageKey;
use crate::{Prefix, Storage, WorkingSet};

/// Key-value pairs stored under a shared prefix. Each entry lives at
/// `prefix ++ encode_key(key)`.
#[derive(borsh::BorshDeserialize, borsh::BorshSerialize, Debug, PartialEq, Clone)]
pub struct StateMap<K, V, C = BorshCodec>
where
    C: StateCodec<K, V>,
{
    prefix: Prefix,
    codec: C,
    _entry: PhantomData<(K, V)>,
}

/// Returned by [`StateMap::get_or_err`].
#[derive(Debug, Error)]
pub enum StateMapError {
    /// No entry under the key.
    #[error("Value not found for prefix: {0} and: storage key {1}")]
    MissingValue(Prefix, StorageKey),
}

impl<K, V> StateMap<K, V>
where
    BorshCodec: StateCodec<K, V>,
{
    /// A map with borsh-encoded keys and values under `prefix`.
    pub fn new(prefix: Prefix) -> Self {
        Self::with_codec(prefix, BorshCodec)
    }
}

impl<K, V, C> StateMap<K, V, C>
where
    C: StateCodec<K, V>,
{
    /// A map under `prefix` that encodes keys and values with `codec`.
    pub fn with_codec(prefix: Prefix, codec: C) -> Self {
        Self {
            prefix,
            codec,
            _entry: PhantomData,
        }
    }

    /// The prefix shared by every entry.
    pub fn prefix(&self) -> &Prefix {
        &self.prefix
    }

    fn key(&self, key: &K) -> StorageKey {
        StorageKey::new(&self.prefix, key, &self.codec)
    }

    /// Inserts or overwrites the entry for `key`.
    pub fn set<S: Storage>(&self, key: &K, value: &V, working_set: &mut WorkingSet<S>) {
        working_set.put(self.key(key), &self.codec, value)
    }

    /// The value under `key`, if any.
    pub fn get<S: Storage>(&self, key: &K, working_set: &mut WorkingSet<S>) -> Option<V> {
        working_set.fetch(self.key(key), &self.codec)
    }

    /// Like [`StateMap::get`], but a missing entry is an error.
    pub fn get_or_err<S: Storage>(
        &self,
        key: &K,
        working_set: &mut WorkingSet<S>,
    ) -> Result<V, StateMapError> {
        let storage_key = self.key(key);
        working_set
            .fetch(storage_key.clone(), &self.codec)
            .ok_or_else(|| StateMapError::MissingValue(self.prefix.clone(), storage_key))
    }

    /// Whether an entry exists under `key`.
    pub fn contains<S: Storage>(&self, key: &K, working_set: &mut WorkingSet<S>) -> bool {
        self.get(key, working_set).is_some()
    }

    /// Deletes the entry and returns its value.
    pub fn remove<S: Storage>(&self, key: &K, working_set: &mut WorkingSet<S>) -> Option<V> {
        working_set.take(self.key(key), &self.codec)
    }

    /// Deletes the entry.
    pub fn delete<S: Storage>(&self, key: &K, working_set: &mut WorkingSet<S>) {
        working_set.delete(self.key(key));
    }
}
