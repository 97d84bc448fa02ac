//! Configuration options for [`InMemoryStorage`](crate::InMemoryStorage).

use std::path::PathBuf;

/// Configuration for the storage backend.
#[derive(serde::Deserialize, serde::Serialize, Debug, Clone, PartialEq)]
pub struct Config {
    /// File the committed state is loaded from and saved to.
    pub path: PathBuf,
}
