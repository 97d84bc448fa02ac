use std::fmt::Display;
use std::sync::Arc;

use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::codec::{StateKeyCodec, StateValueCodec};
use crate::Prefix;

/// A full storage key: the container prefix followed by the encoded key.
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
pub struct StorageKey(Arc<Vec<u8>>);

impl StorageKey {
    /// `prefix` followed by `key` encoded with `codec`.
    pub fn new<K, KC>(prefix: &Prefix, key: &K, codec: &KC) -> Self
    where
        KC: StateKeyCodec<K>,
    {
        let mut bytes = prefix.as_bytes().to_vec();
        bytes.extend(codec.encode_key(key));
        Self(Arc::new(bytes))
    }

    /// The key of a container holding a single value: the prefix alone.
    pub fn singleton(prefix: &Prefix) -> Self {
        Self(Arc::new(prefix.as_bytes().to_vec()))
    }

    /// The raw bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl Display for StorageKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "0x{}", hex::encode(self.as_bytes()))
    }
}

/// An encoded value. Clones share the underlying bytes.
#[derive(
    Clone, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize, Serialize, Deserialize, Default,
)]
pub struct StorageValue(Arc<Vec<u8>>);

impl StorageValue {
    /// `value` encoded with `codec`.
    pub fn new<V, VC>(value: &V, codec: &VC) -> Self
    where
        VC: StateValueCodec<V>,
    {
        Self(Arc::new(codec.encode_value(value)))
    }

    pub(crate) fn from_bytes(bytes: Vec<u8>) -> Self {
        Self(Arc::new(bytes))
    }

    /// The raw bytes.
    pub fn value(&self) -> &[u8] {
        &self.0
    }
}

/// Writes produced by a [`StateCheckpoint`](crate::StateCheckpoint), sorted by key.
/// `None` marks a deletion.
pub type OrderedWrites = Vec<(StorageKey, Option<StorageValue>)>;

/// Committed state shared by every working set opened over it.
pub trait Storage: Clone {
    /// What [`Storage::with_config`] needs to open the storage.
    type RuntimeConfig;

    /// Opens the storage described by `config`.
    fn with_config(config: Self::RuntimeConfig) -> Result<Self, anyhow::Error>;

    /// The committed value under `key`.
    fn get(&self, key: &StorageKey) -> Option<StorageValue>;

    /// Hash of the committed state.
    fn get_state_root(&self) -> [u8; 32];

    /// Applies `writes` in one step and returns the new state root.
    fn validate_and_commit(&self, writes: OrderedWrites) -> Result<[u8; 32], anyhow::Error>;

    /// True until something has been committed.
    fn is_empty(&self) -> bool;
}

/// Identifier of a saved storage snapshot.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct SnapshotId(pub(crate) u64);

impl Display for SnapshotId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

/// Error returned by [`SnapshotStorage::revert_to`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SnapshotError {
    /// The snapshot never existed or was already consumed by an earlier revert.
    #[error("Unknown snapshot id: {0}")]
    UnknownSnapshot(SnapshotId),
}

/// A [`Storage`] that can save its committed state and later roll back to it.
///
/// Reverting to a snapshot consumes it together with every snapshot taken after it.
pub trait SnapshotStorage: Storage {
    /// Saves the current committed state.
    fn snapshot(&self) -> SnapshotId;

    /// Restores the state saved under `id`.
    fn revert_to(&self, id: SnapshotId) -> Result<(), SnapshotError>;
}
