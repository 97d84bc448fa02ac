use std::collections::BTreeMap;
use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use anyhow::Context;
use borsh::{BorshDeserialize, BorshSerialize};
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::config::Config;
use crate::storage::{OrderedWrites, StorageKey, StorageValue};
use crate::{SnapshotError, SnapshotId, SnapshotStorage, Storage};

/// Committed key/value pairs plus the number of commits applied to them.
#[derive(Debug, Clone, Default, BorshSerialize, BorshDeserialize)]
struct StateDb {
    version: u64,
    entries: BTreeMap<Vec<u8>, Vec<u8>>,
}

impl StateDb {
    fn state_root(&self) -> [u8; 32] {
        let mut hasher = Sha256::new();
        hasher.update(self.version.to_be_bytes());
        for (key, value) in &self.entries {
            hasher.update((key.len() as u64).to_be_bytes());
            hasher.update(key);
            hasher.update((value.len() as u64).to_be_bytes());
            hasher.update(value);
        }
        hasher.finalize().into()
    }
}

#[derive(Debug, Default)]
struct Inner {
    db: StateDb,
    snapshots: Vec<(SnapshotId, StateDb)>,
    next_snapshot_id: u64,
}

/// A [`Storage`] that keeps the committed state in memory.
///
/// Clones share the same state. The state can be persisted to a file with
/// [`InMemoryStorage::save`] and restored with [`InMemoryStorage::with_path`].
#[derive(Debug, Clone, Default)]
pub struct InMemoryStorage {
    inner: Arc<RwLock<Inner>>,
}

impl InMemoryStorage {
    /// Creates an empty storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads the state saved at `path`, or starts empty if the file does not exist.
    pub fn with_path(path: impl AsRef<Path>) -> Result<Self, anyhow::Error> {
        let path = path.as_ref();
        if !path.exists() {
            debug!(path = %path.display(), "No saved state found, starting empty");
            return Ok(Self::new());
        }

        let bytes = std::fs::read(path)
            .with_context(|| format!("Failed to read state file {}", path.display()))?;
        let db = StateDb::try_from_slice(&bytes)
            .with_context(|| format!("Corrupted state file {}", path.display()))?;
        debug!(path = %path.display(), version = db.version, "Loaded saved state");

        Ok(Self {
            inner: Arc::new(RwLock::new(Inner {
                db,
                ..Default::default()
            })),
        })
    }

    /// Writes the committed state to `path`. Snapshots are not persisted.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), anyhow::Error> {
        let path = path.as_ref();
        let bytes = self.read().db.try_to_vec()?;
        std::fs::write(path, bytes)
            .with_context(|| format!("Failed to write state file {}", path.display()))?;
        Ok(())
    }

    /// Number of commits applied so far.
    pub fn version(&self) -> u64 {
        self.read().db.version
    }

    fn read(&self) -> RwLockReadGuard<'_, Inner> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Inner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Storage for InMemoryStorage {
    type RuntimeConfig = Config;

    fn with_config(config: Self::RuntimeConfig) -> Result<Self, anyhow::Error> {
        Self::with_path(config.path)
    }

    fn get(&self, key: &StorageKey) -> Option<StorageValue> {
        self.read()
            .db
            .entries
            .get(key.as_bytes())
            .map(|value| StorageValue::from_bytes(value.clone()))
    }

    fn get_state_root(&self) -> [u8; 32] {
        self.read().db.state_root()
    }

    fn validate_and_commit(&self, writes: OrderedWrites) -> Result<[u8; 32], anyhow::Error> {
        let mut inner = self.write();
        for (key, value) in writes {
            match value {
                Some(value) => {
                    inner
                        .db
                        .entries
                        .insert(key.as_bytes().to_vec(), value.value().to_vec());
                }
                None => {
                    inner.db.entries.remove(key.as_bytes());
                }
            }
        }
        inner.db.version += 1;

        Ok(inner.db.state_root())
    }

    fn is_empty(&self) -> bool {
        self.read().db.entries.is_empty()
    }
}

impl SnapshotStorage for InMemoryStorage {
    fn snapshot(&self) -> SnapshotId {
        let mut inner = self.write();
        inner.next_snapshot_id += 1;
        let id = SnapshotId(inner.next_snapshot_id);
        let db = inner.db.clone();
        inner.snapshots.push((id, db));
        debug!(%id, "Took storage snapshot");
        id
    }

    fn revert_to(&self, id: SnapshotId) -> Result<(), SnapshotError> {
        let mut inner = self.write();
        let position = inner
            .snapshots
            .iter()
            .position(|(snapshot_id, _)| *snapshot_id == id)
            .ok_or(SnapshotError::UnknownSnapshot(id))?;

        let mut dropped = inner.snapshots.split_off(position);
        // `split_off` leaves the requested snapshot at the front of `dropped`.
        let (_, db) = dropped.swap_remove(0);
        inner.db = db;
        debug!(%id, "Reverted storage to snapshot");
        Ok(())
    }
}
