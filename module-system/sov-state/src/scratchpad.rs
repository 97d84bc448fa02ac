use std::collections::{BTreeMap, HashMap};

use borsh::BorshSerialize;

use crate::codec::StateValueCodec;
use crate::storage::{OrderedWrites, StorageKey, StorageValue};
use crate::{Event, Storage};

// `None` marks a deletion.
type CheckpointWrites = BTreeMap<StorageKey, Option<StorageValue>>;
type PendingWrites = HashMap<StorageKey, Option<StorageValue>>;

/// Writes of every transaction kept so far, layered over the committed storage.
///
/// Obtained from a [`WorkingSet`] through [`WorkingSet::checkpoint`] or
/// [`WorkingSet::revert`].
pub struct StateCheckpoint<S: Storage> {
    storage: S,
    writes: CheckpointWrites,
}

impl<S: Storage> StateCheckpoint<S> {
    /// An empty checkpoint over `storage`.
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            writes: Default::default(),
        }
    }

    /// Starts a transaction whose writes can still be reverted.
    pub fn to_revertable(self) -> WorkingSet<S> {
        WorkingSet {
            checkpoint: self,
            pending: Default::default(),
            events: Vec::new(),
        }
    }

    /// Drains the kept writes, sorted by key, for [`Storage::validate_and_commit`].
    pub fn freeze(&mut self) -> OrderedWrites {
        std::mem::take(&mut self.writes).into_iter().collect()
    }

    fn get(&self, key: &StorageKey) -> Option<StorageValue> {
        match self.writes.get(key) {
            Some(write) => write.clone(),
            None => self.storage.get(key),
        }
    }
}

/// Writes and events of the transaction being executed.
///
/// Reads see the transaction's own writes first, then the checkpoint, then the
/// storage. [`WorkingSet::checkpoint`] keeps the writes,
/// [`WorkingSet::revert`] drops them together with the events.
pub struct WorkingSet<S: Storage> {
    checkpoint: StateCheckpoint<S>,
    pending: PendingWrites,
    events: Vec<Event>,
}

impl<S: Storage> WorkingSet<S> {
    /// A working set straight over `storage`.
    pub fn new(storage: S) -> Self {
        StateCheckpoint::new(storage).to_revertable()
    }

    /// Folds the pending writes into the checkpoint.
    pub fn checkpoint(self) -> StateCheckpoint<S> {
        let mut checkpoint = self.checkpoint;
        checkpoint.writes.extend(self.pending);
        checkpoint
    }

    /// Drops the pending writes and events.
    pub fn revert(self) -> StateCheckpoint<S> {
        self.checkpoint
    }

    /// Records a textual event.
    pub fn add_event(&mut self, key: &str, value: &str) {
        self.events.push(Event::new(key, value));
    }

    /// Records an event carrying the borsh encoding of `value`.
    pub fn add_encoded_event<T: BorshSerialize>(&mut self, key: &str, value: &T) {
        self.events.push(Event::encoded(key, value));
    }

    /// Hands over the events recorded so far.
    pub fn take_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    /// Events recorded so far.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// The committed storage underneath.
    pub fn backing(&self) -> &S {
        &self.checkpoint.storage
    }

    fn get(&self, key: &StorageKey) -> Option<StorageValue> {
        match self.pending.get(key) {
            Some(write) => write.clone(),
            None => self.checkpoint.get(key),
        }
    }

    pub(crate) fn put<V, C>(&mut self, key: StorageKey, codec: &C, value: &V)
    where
        C: StateValueCodec<V>,
    {
        self.pending.insert(key, Some(StorageValue::new(value, codec)));
    }

    pub(crate) fn fetch<V, C>(&self, key: StorageKey, codec: &C) -> Option<V>
    where
        C: StateValueCodec<V>,
    {
        // Values are only ever written through the same codec, a decoding
        // failure means corrupted storage.
        self.get(&key).map(|value| codec.decode_value(value.value()))
    }

    pub(crate) fn take<V, C>(&mut self, key: StorageKey, codec: &C) -> Option<V>
    where
        C: StateValueCodec<V>,
    {
        let value = self.fetch(key.clone(), codec)?;
        self.delete(key);
        Some(value)
    }

    pub(crate) fn delete(&mut self, key: StorageKey) {
        self.pending.insert(key, None);
    }
}
