#![deny(missing_docs)]
#![doc = include_str!("../README.md")]
mod call;
mod event;
mod genesis;
mod query;
#[cfg(test)]
mod tests;
mod types;

pub use call::{CallMessage, VotingError};
pub use event::Event;
use sov_modules_api::{
    CallResponse, Context, Error, ModuleCallJsonSchema, ModuleInfo, ModulePrefix, Spec,
    StateMap, StateValue, StateVec, WorkingSet,
};
pub use types::{Candidate, VotingStatus};

const MODULE_NAME: &str = "VotingLogic";

/// Initial configuration of the [`VotingLogic`] module.
pub struct VotingConfig<C: Context> {
    /// The deployer. The only address allowed to change the voting status.
    pub admin: C::Address,
}

/// The VotingLogic module: candidates register while voting is closed, and every
/// address may vote once for a registered candidate while voting is open.
#[derive(Clone)]
pub struct VotingLogic<C: Context> {
    /// Address of the module.
    pub address: C::Address,

    /// The admin set at genesis.
    pub(crate) admin: StateValue<C::Address>,

    /// Whether votes are accepted.
    pub(crate) status: StateValue<VotingStatus>,

    /// Registered candidates.
    pub(crate) candidates: StateMap<C::Address, Candidate>,

    /// Candidate addresses in the order they registered.
    pub(crate) candidate_order: StateVec<C::Address>,

    /// Addresses that already voted.
    pub(crate) voters: StateMap<C::Address, bool>,

    /// Candidate holding the most votes. Empty until the first vote.
    pub(crate) leader: StateValue<C::Address>,

    /// Number of accepted votes.
    pub(crate) total_votes: StateValue<u64>,
}

fn storage_prefix(storage_name: &'static str) -> sov_state::Prefix {
    ModulePrefix::new_storage(module_path!(), MODULE_NAME, storage_name).into()
}

impl<C: Context> Default for VotingLogic<C> {
    fn default() -> Self {
        let module_prefix = ModulePrefix::new_module(module_path!(), MODULE_NAME);

        Self {
            address: C::Address::from(module_prefix.hash::<C>()),
            admin: StateValue::new(storage_prefix("admin")),
            status: StateValue::new(storage_prefix("status")),
            candidates: StateMap::new(storage_prefix("candidates")),
            candidate_order: StateVec::new(storage_prefix("candidate_order")),
            voters: StateMap::new(storage_prefix("voters")),
            leader: StateValue::new(storage_prefix("leader")),
            total_votes: StateValue::new(storage_prefix("total_votes")),
        }
    }
}

impl<C: Context> ModuleInfo for VotingLogic<C> {
    type Context = C;

    fn address(&self) -> &<Self::Context as Spec>::Address {
        &self.address
    }

    fn prefix(&self) -> ModulePrefix {
        ModulePrefix::new_module(module_path!(), MODULE_NAME)
    }
}

impl<C: Context> sov_modules_api::Module for VotingLogic<C> {
    type Context = C;

    type Config = VotingConfig<C>;

    type CallMessage = CallMessage<C>;

    type Event = Event<C>;

    fn genesis(
        &self,
        config: &Self::Config,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<(), Error> {
        Ok(self.init_module(config, working_set)?)
    }

    fn call(
        &self,
        msg: Self::CallMessage,
        context: &Self::Context,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<CallResponse, Error> {
        match msg {
            CallMessage::RegisterCandidate { name } => {
                Ok(self.register_candidate(name, context, working_set)?)
            }

            CallMessage::ChangeStatus(status) => {
                Ok(self.change_status(status, context, working_set)?)
            }

            CallMessage::Vote { candidate } => Ok(self.vote(candidate, context, working_set)?),
        }
    }
}

impl<C: Context> ModuleCallJsonSchema for VotingLogic<C> {
    fn json_schema() -> String {
        let schema = schemars::schema_for!(CallMessage<C>);
        serde_json::to_string_pretty(&schema)
            .expect("Failed to serialize JSON schema; this is a bug in the module")
    }
}
