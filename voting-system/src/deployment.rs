use anyhow::{bail, Context as _};
use sov_modules_api::{Context, Module, ModuleInfo, Storage, WorkingSet};
use sov_voting::{VotingConfig, VotingLogic};
use tracing::info;

/// Name the module is deployed under when the configuration does not say otherwise.
pub const DEFAULT_MODULE_NAME: &str = "VotingSystem";

/// A deployment of a single [`VotingLogic`] module on top of a storage.
///
/// The module takes no constructor arguments: its only initial state is the
/// deployer, who becomes the admin, and the `Closed` status.
pub struct VotingSystem<C: Context> {
    module_name: String,
    pub(crate) voting: VotingLogic<C>,
    pub(crate) storage: C::Storage,
}

impl<C: Context> VotingSystem<C> {
    /// Binds a deployment named `module_name` to `storage`.
    pub fn new(module_name: impl Into<String>, storage: C::Storage) -> Self {
        Self {
            module_name: module_name.into(),
            voting: VotingLogic::default(),
            storage,
        }
    }

    /// Runs the genesis of the module with `deployer` as admin and commits it.
    /// Returns the state root after deployment.
    pub fn deploy(&self, deployer: &C::Address) -> anyhow::Result<[u8; 32]> {
        if self.is_deployed() {
            bail!("{} is already deployed", self.module_name);
        }

        let mut working_set = WorkingSet::new(self.storage.clone());
        let config = VotingConfig {
            admin: deployer.clone(),
        };
        self.voting
            .genesis(&config, &mut working_set)
            .with_context(|| format!("Genesis of {} failed", self.module_name))?;

        let state_root = self
            .storage
            .validate_and_commit(working_set.checkpoint().freeze())?;

        info!(
            module_name = %self.module_name,
            module_address = %self.voting.address(),
            state_root = %hex::encode(state_root),
            "Deployed VotingLogic"
        );
        Ok(state_root)
    }

    /// Returns `true` once [`VotingSystem::deploy`] succeeded on this storage.
    pub fn is_deployed(&self) -> bool {
        self.query(|voting, working_set| voting.admin(working_set).is_some())
    }

    /// Runs a read-only query against the committed state.
    pub fn query<R>(
        &self,
        query: impl FnOnce(&VotingLogic<C>, &mut WorkingSet<C::Storage>) -> R,
    ) -> R {
        let mut working_set = WorkingSet::new(self.storage.clone());
        query(&self.voting, &mut working_set)
    }

    /// Name of the deployment.
    pub fn module_name(&self) -> &str {
        &self.module_name
    }

    /// The deployed module.
    pub fn voting(&self) -> &VotingLogic<C> {
        &self.voting
    }

    /// The storage the module state is committed to.
    pub fn storage(&self) -> &C::Storage {
        &self.storage
    }
}
