use anyhow::Result;
use sov_modules_api::WorkingSet;
use tracing::info;

use crate::{VotingLogic, VotingStatus};

impl<C: sov_modules_api::Context> VotingLogic<C> {
    pub(crate) fn init_module(
        &self,
        config: &<Self as sov_modules_api::Module>::Config,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<()> {
        self.admin.set(&config.admin, working_set);
        self.status.set(&VotingStatus::Closed, working_set);
        self.total_votes.set(&0, working_set);

        info!(admin = %config.admin, "VotingLogic deployed");
        Ok(())
    }
}
