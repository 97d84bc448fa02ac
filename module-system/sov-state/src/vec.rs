use std::marker::PhantomData;

use thiserror::Error;

use crate::codec::{BorshCodec, StateKeyCodec, StateValueCodec};
use crate::storage::StorageKey;
use crate::{Prefix, Storage, WorkingSet};

/// A growable array stored under a single prefix.
///
/// Slot `0` holds the length, element `i` lives in slot `i + 1`. Slots are
/// encoded big-endian so elements sort by index in storage.
#[derive(Debug, PartialEq, Eq, Clone, borsh::BorshDeserialize, borsh::BorshSerialize)]
pub struct StateVec<V, C = BorshCodec> {
    prefix: Prefix,
    codec: C,
    _element: PhantomData<V>,
}

/// Errors of the index based [`StateVec`] accessors.
#[derive(Debug, Error)]
pub enum StateVecError {
    /// The index is past the end of the vector.
    #[error("Index out of bounds for index: {0}")]
    IndexOutOfBounds(usize),
    /// The index is in bounds but the slot is empty.
    #[error("Value not found for prefix: {0} and index: {1}")]
    MissingValue(Prefix, usize),
}

impl<V> StateVec<V>
where
    BorshCodec: StateValueCodec<V>,
{
    /// A vector of borsh-encoded elements under `prefix`.
    pub fn new(prefix: Prefix) -> Self {
        Self::with_codec(prefix, BorshCodec)
    }
}

impl<V, C> StateVec<V, C>
where
    C: StateValueCodec<V> + StateValueCodec<u64>,
{
    /// A vector under `prefix` whose elements and length are encoded with `codec`.
    pub fn with_codec(prefix: Prefix, codec: C) -> Self {
        Self {
            prefix,
            codec,
            _element: PhantomData,
        }
    }

    /// The prefix shared by every slot.
    pub fn prefix(&self) -> &Prefix {
        &self.prefix
    }

    fn slot(&self, slot: u64) -> StorageKey {
        StorageKey::new(&self.prefix, &slot, &SlotCodec)
    }

    fn element(&self, index: usize) -> StorageKey {
        self.slot(index as u64 + 1)
    }

    /// Number of elements.
    pub fn len<S: Storage>(&self, working_set: &mut WorkingSet<S>) -> usize {
        let len: Option<u64> = working_set.fetch(self.slot(0), &self.codec);
        len.unwrap_or_default() as usize
    }

    /// Whether the vector has no elements.
    pub fn is_empty<S: Storage>(&self, working_set: &mut WorkingSet<S>) -> bool {
        self.len(working_set) == 0
    }

    fn set_len<S: Storage>(&self, len: usize, working_set: &mut WorkingSet<S>) {
        working_set.put(self.slot(0), &self.codec, &(len as u64));
    }

    /// Appends `value`.
    pub fn push<S: Storage>(&self, value: &V, working_set: &mut WorkingSet<S>) {
        let len = self.len(working_set);
        working_set.put(self.element(len), &self.codec, value);
        self.set_len(len + 1, working_set);
    }

    /// Removes and returns the last element.
    pub fn pop<S: Storage>(&self, working_set: &mut WorkingSet<S>) -> Option<V> {
        let last = self.len(working_set).checked_sub(1)?;
        let value = working_set.take(self.element(last), &self.codec);
        self.set_len(last, working_set);
        value
    }

    /// Overwrites the element at `index`. Use [`StateVec::push`] to grow the vector.
    pub fn set<S: Storage>(
        &self,
        index: usize,
        value: &V,
        working_set: &mut WorkingSet<S>,
    ) -> Result<(), StateVecError> {
        if index >= self.len(working_set) {
            return Err(StateVecError::IndexOutOfBounds(index));
        }
        working_set.put(self.element(index), &self.codec, value);
        Ok(())
    }

    /// The element at `index`, if any.
    pub fn get<S: Storage>(&self, index: usize, working_set: &mut WorkingSet<S>) -> Option<V> {
        working_set.fetch(self.element(index), &self.codec)
    }

    /// Like [`StateVec::get`], but distinguishes an out of bounds index from an
    /// empty slot.
    pub fn get_or_err<S: Storage>(
        &self,
        index: usize,
        working_set: &mut WorkingSet<S>,
    ) -> Result<V, StateVecError> {
        if index >= self.len(working_set) {
            return Err(StateVecError::IndexOutOfBounds(index));
        }
        self.get(index, working_set)
            .ok_or_else(|| StateVecError::MissingValue(self.prefix.clone(), index))
    }

    /// Iterates over the elements in insertion order.
    ///
    /// The length is read once, up front.
    pub fn iter<'a, 'ws, S: Storage>(
        &'a self,
        working_set: &'ws mut WorkingSet<S>,
    ) -> StateVecIter<'a, 'ws, V, C, S> {
        let len = self.len(working_set);
        StateVecIter {
            state_vec: self,
            working_set,
            indices: 0..len,
        }
    }
}

/// Iterator returned by [`StateVec::iter`].
pub struct StateVecIter<'a, 'ws, V, C, S: Storage> {
    state_vec: &'a StateVec<V, C>,
    working_set: &'ws mut WorkingSet<S>,
    indices: std::ops::Range<usize>,
}

impl<'a, 'ws, V, C, S> Iterator for StateVecIter<'a, 'ws, V, C, S>
where
    C: StateValueCodec<V> + StateValueCodec<u64>,
    S: Storage,
{
    type Item = V;

    fn next(&mut self) -> Option<V> {
        let index = self.indices.next()?;
        self.state_vec.get(index, self.working_set)
    }
}

struct SlotCodec;

impl StateKeyCodec<u64> for SlotCodec {
    type KeyError = std::array::TryFromSliceError;

    fn encode_key(&self, slot: &u64) -> Vec<u8> {
        slot.to_be_bytes().to_vec()
    }

    fn try_decode_key(&self, bytes: &[u8]) -> Result<u64, Self::KeyError> {
        Ok(u64::from_be_bytes(bytes.try_into()?))
    }
}
