use anyhow::{ensure, Result};
use sov_modules_api::{Context, WorkingSet};

use crate::{Candidate, VotingError, VotingLogic, VotingStatus};

impl<C: Context> VotingLogic<C> {
    /// Returns the record of `candidate`, or `None` if it never registered.
    pub fn get_candidate(
        &self,
        candidate: &C::Address,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Option<Candidate> {
        self.candidates.get(candidate, working_set)
    }

    /// Returns the current voting status.
    pub fn current_status(&self, working_set: &mut WorkingSet<C::Storage>) -> VotingStatus {
        self.status.get(working_set).unwrap_or_default()
    }

    /// Returns the candidate with the most votes, `None` before the first vote.
    pub fn current_leader(&self, working_set: &mut WorkingSet<C::Storage>) -> Option<C::Address> {
        self.leader.get(working_set)
    }

    /// Returns the record of the leading candidate.
    pub fn get_winner(&self, working_set: &mut WorkingSet<C::Storage>) -> Result<Candidate> {
        ensure!(self.total_votes(working_set) > 0, VotingError::NoVotesYet);

        let leader = self.leader.get_or_err(working_set)?;
        Ok(self.candidates.get_or_err(&leader, working_set)?)
    }

    /// Returns every candidate in registration order. Only the admin may read the results.
    pub fn get_all_results(
        &self,
        caller: &C::Address,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<Vec<Candidate>> {
        self.exit_if_not_admin(caller, working_set)?;

        let order: Vec<C::Address> = self.candidate_order.iter(working_set).collect();
        let mut results = Vec::with_capacity(order.len());
        for candidate in &order {
            results.push(self.candidates.get_or_err(candidate, working_set)?);
        }

        Ok(results)
    }

    /// Returns the admin set at genesis.
    pub fn admin(&self, working_set: &mut WorkingSet<C::Storage>) -> Option<C::Address> {
        self.admin.get(working_set)
    }

    /// Returns `true` if `voter` already voted.
    pub fn has_voted(&self, voter: &C::Address, working_set: &mut WorkingSet<C::Storage>) -> bool {
        self.voters.get(voter, working_set).unwrap_or_default()
    }

    /// Returns the number of accepted votes.
    pub fn total_votes(&self, working_set: &mut WorkingSet<C::Storage>) -> u64 {
        self.total_votes.get(working_set).unwrap_or_default()
    }
}
