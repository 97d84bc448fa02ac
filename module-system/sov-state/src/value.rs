use std::marker::PhantomData;

use thiserror::Error;

use crate::codec::{BorshCodec, StateValueCodec};
use crate::storage::StorageKey;
use crate::{Prefix, Storage, WorkingSet};

/// A single optional value stored under its own prefix.
#[derive(Debug, PartialEq, Eq, Clone, borsh::BorshDeserialize, borsh::BorshSerialize)]
pub struct StateValue<V, C = BorshCodec> {
    prefix: Prefix,
    codec: C,
    _value: PhantomData<V>,
}

/// Returned by [`StateValue::get_or_err`].
#[derive(Debug, Error)]
pub enum StateValueError {
    /// Nothing has been written under the prefix.
    #[error("Value not found for prefix: {0}")]
    MissingValue(Prefix),
}

impl<V> StateValue<V>
where
    BorshCodec: StateValueCodec<V>,
{
    /// A borsh-encoded value under `prefix`.
    pub fn new(prefix: Prefix) -> Self {
        Self::with_codec(prefix, BorshCodec)
    }
}

impl<V, C> StateValue<V, C>
where
    C: StateValueCodec<V>,
{
    /// A value under `prefix`, encoded with `codec`.
    pub fn with_codec(prefix: Prefix, codec: C) -> Self {
        Self {
            prefix,
            codec,
            _value: PhantomData,
        }
    }

    /// The prefix the value is stored under.
    pub fn prefix(&self) -> &Prefix {
        &self.prefix
    }

    fn key(&self) -> StorageKey {
        StorageKey::singleton(&self.prefix)
    }

    /// Overwrites the value.
    pub fn set<S: Storage>(&self, value: &V, working_set: &mut WorkingSet<S>) {
        working_set.put(self.key(), &self.codec, value)
    }

    /// Reads the value, `None` if it was never set or has been deleted.
    pub fn get<S: Storage>(&self, working_set: &mut WorkingSet<S>) -> Option<V> {
        working_set.fetch(self.key(), &self.codec)
    }

    /// Like [`StateValue::get`], but a missing value is an error.
    pub fn get_or_err<S: Storage>(
        &self,
        working_set: &mut WorkingSet<S>,
    ) -> Result<V, StateValueError> {
        self.get(working_set)
            .ok_or_else(|| StateValueError::MissingValue(self.prefix.clone()))
    }

    /// Deletes the value and returns what was stored.
    pub fn remove<S: Storage>(&self, working_set: &mut WorkingSet<S>) -> Option<V> {
        working_set.take(self.key(), &self.codec)
    }

    /// Deletes the value.
    pub fn delete<S: Storage>(&self, working_set: &mut WorkingSet<S>) {
        working_set.delete(self.key());
    }
}
