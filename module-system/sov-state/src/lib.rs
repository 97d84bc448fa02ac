//! State containers, working sets and the storage they commit to.

#![deny(missing_docs)]

pub mod codec;
pub mod config;
mod events;
pub mod fixture;
mod in_memory_storage;
mod map;
mod scratchpad;
/// The [`Storage`] trait and the key and value types it stores.
pub mod storage;
mod value;
mod vec;


use std::fmt::Display;
use std::str;

pub use events::Event;
pub use fixture::FixtureLoader;
pub use in_memory_storage::InMemoryStorage;
pub use map::{StateMap, StateMapError};
pub use scratchpad::{StateCheckpoint, WorkingSet};
pub use storage::{OrderedWrites, SnapshotError, SnapshotId, SnapshotStorage, Storage};
pub use value::{StateValue, StateValueError};
pub use vec::{StateVec, StateVecError, StateVecIter};

/// Bytes put in front of every key a state container writes.
///
/// All containers of a deployment share one storage, so each one gets its own
/// prefix to keep their keys apart.
#[derive(
    borsh::BorshDeserialize,
    borsh::BorshSerialize,
    Debug,
    PartialEq,
    Eq,
    Clone,
    serde::Serialize,
    serde::Deserialize,
)]
pub struct Prefix(Vec<u8>);

impl Prefix {
    /// Wraps raw prefix bytes.
    pub fn new(prefix: Vec<u8>) -> Self {
        Self(prefix)
    }

    /// The raw bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

// Module prefixes are ASCII paths, print them as such.
impl Display for Prefix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match str::from_utf8(&self.0) {
            Ok(text) => write!(f, "{text:?}"),
            Err(_) => write!(f, "0x{}", hex::encode(&self.0)),
        }
    }
}
