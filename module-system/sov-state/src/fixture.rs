//! Snapshot-backed test fixtures.
//!
//! A [`FixtureLoader`] runs an expensive setup once, snapshots the resulting
//! storage and hands out the cached setup result on every later load after
//! rolling the storage back to that snapshot.

use tracing::debug;

use crate::{SnapshotId, SnapshotStorage};

struct Loaded<S, T> {
    storage: S,
    snapshot: SnapshotId,
    result: T,
}

/// Caches the result of a fixture and restores its storage between loads.
///
/// A loader is bound to the first fixture it loads; use one loader per fixture.
pub struct FixtureLoader<S, T> {
    loaded: Option<Loaded<S, T>>,
}

impl<S, T> Default for FixtureLoader<S, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S, T> FixtureLoader<S, T> {
    /// Creates a loader that has not run any fixture yet.
    pub const fn new() -> Self {
        Self { loaded: None }
    }

    /// Returns `true` once a fixture has been executed.
    pub fn is_loaded(&self) -> bool {
        self.loaded.is_some()
    }
}

impl<S, T> FixtureLoader<S, T>
where
    S: SnapshotStorage,
    T: Clone,
{
    /// Returns the fixture result, running `fixture` only on the first call.
    ///
    /// `fixture` returns the storage it wrote to together with its result.
    /// Later calls revert that storage to the snapshot taken right after the
    /// first run, take a fresh snapshot and return a clone of the cached result.
    pub fn load<F>(&mut self, fixture: F) -> Result<T, anyhow::Error>
    where
        F: FnOnce() -> Result<(S, T), anyhow::Error>,
    {
        if let Some(loaded) = self.loaded.as_mut() {
            loaded.storage.revert_to(loaded.snapshot)?;
            loaded.snapshot = loaded.storage.snapshot();
            debug!(snapshot = %loaded.snapshot, "Restored cached fixture");
            return Ok(loaded.result.clone());
        }

        let (storage, result) = fixture()?;
        let snapshot = storage.snapshot();
        debug!(%snapshot, "Fixture executed and snapshotted");
        self.loaded = Some(Loaded {
            storage,
            snapshot,
            result: result.clone(),
        });

        Ok(result)
    }
}
