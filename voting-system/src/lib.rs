#![deny(missing_docs)]
//! Deployment of the `VotingLogic` module: genesis, batch execution with
//! per-transaction revert, and the TOML configuration of the `voting-system` binary.

pub mod config;
mod deployment;
mod runner;

pub use config::{from_toml_path, VotingSystemConfig};
pub use deployment::{VotingSystem, DEFAULT_MODULE_NAME};
pub use runner::{BatchReceipt, Transaction, TxEffect, TxReceipt};
