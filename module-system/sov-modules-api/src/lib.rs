//! The interface every module of the module system implements, together with
//! the primitives ([`Address`], [`Context`]) modules are written against.

#![deny(missing_docs)]

mod address;
pub mod default_context;
mod error;
mod prefix;
mod response;
#[cfg(test)]
mod tests;
pub mod utils;

use core::fmt::{Debug, Display};
use std::hash::Hash;

pub use address::{Address, AddressBech32, Bech32ParseError};
use borsh::{BorshDeserialize, BorshSerialize};
pub use error::Error;
pub use prefix::ModulePrefix;
pub use response::CallResponse;
use serde::de::DeserializeOwned;
use serde::Serialize;
pub use sov_state::{
    Event, InMemoryStorage, StateCheckpoint, StateMap, StateValue, StateVec, Storage, WorkingSet,
};

/// Requirements on the address type of a [`Spec`]: it must be storable as a state
/// key, printable, usable in JSON and in call messages, and buildable from a hash.
pub trait AddressTrait:
    BorshSerialize
    + BorshDeserialize
    + Serialize
    + DeserializeOwned
    + schemars::JsonSchema
    + Debug
    + Display
    + Clone
    + PartialEq
    + Eq
    + Hash
    + AsRef<[u8]>
    + From<[u8; 32]>
    + Send
    + Sync
{
}

impl AddressTrait for Address {}

/// The primitive types a deployment is built from.
///
/// Modules are generic over a [`Context`], which carries a `Spec`, so swapping
/// storage or hashing never touches module code.
pub trait Spec {
    /// Identifies accounts and modules.
    type Address: AddressTrait;

    /// Committed state the working sets read from.
    type Storage: Storage + Send + Sync;

    /// Hash used for module addresses and transaction hashes.
    type Hasher: sha2::Digest<OutputSize = sha2::digest::typenum::U32>;
}

/// Per-transaction information handed to [`Module::call`].
pub trait Context: Spec + Clone + Debug + PartialEq {
    /// The address the call is executed on behalf of.
    fn sender(&self) -> &Self::Address;

    /// Builds the context of a call sent by `sender`.
    fn new(sender: Self::Address) -> Self;
}

/// A unit of on-chain logic: initial state at deployment, then calls.
pub trait Module {
    /// Execution context.
    type Context: Context;

    /// Input of [`Module::genesis`].
    type Config;

    /// Messages accepted by [`Module::call`].
    type CallMessage: Debug + BorshSerialize + BorshDeserialize;

    /// Events recorded by [`Module::call`].
    type Event: Debug + BorshSerialize + BorshDeserialize;

    /// Writes the initial state. Runs once, when the module is deployed.
    fn genesis(
        &self,
        _config: &Self::Config,
        _working_set: &mut WorkingSet<<Self::Context as Spec>::Storage>,
    ) -> Result<(), Error> {
        Ok(())
    }

    /// Handles `message` sent by `context.sender()`.
    ///
    /// On error the caller discards everything written to `working_set`.
    fn call(
        &self,
        message: Self::CallMessage,
        context: &Self::Context,
        working_set: &mut WorkingSet<<Self::Context as Spec>::Storage>,
    ) -> Result<CallResponse, Error>;
}

/// Identity of a module: its address and the prefix its state lives under.
pub trait ModuleInfo: Default {
    /// Execution context.
    type Context: Context;

    /// Address of the module, derived from its prefix.
    fn address(&self) -> &<Self::Context as Spec>::Address;

    /// Prefix shared by all state of the module.
    fn prefix(&self) -> ModulePrefix;
}

/// Deployment-time initialization, implemented for every [`Module`].
pub trait Genesis {
    /// Execution context.
    type Context: Context;

    /// Initial configuration.
    type Config;

    /// Writes the initial state.
    fn genesis(
        &self,
        config: &Self::Config,
        working_set: &mut WorkingSet<<Self::Context as Spec>::Storage>,
    ) -> Result<(), Error>;
}

impl<T> Genesis for T
where
    T: Module,
{
    type Context = <Self as Module>::Context;

    type Config = <Self as Module>::Config;

    fn genesis(
        &self,
        config: &Self::Config,
        working_set: &mut WorkingSet<<Self::Context as Spec>::Storage>,
    ) -> Result<(), Error> {
        <Self as Module>::genesis(self, config, working_set)
    }
}

/// A [`Module`] that can describe its call messages as a JSON schema.
pub trait ModuleCallJsonSchema: Module {
    /// Pretty-printed JSON schema of [`Module::CallMessage`].
    fn json_schema() -> String;
}
