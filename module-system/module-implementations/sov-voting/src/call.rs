use anyhow::{ensure, Result};
use sov_modules_api::{CallResponse, Context, WorkingSet};
use thiserror::Error;
use tracing::{debug, info};

use crate::{Candidate, Event, VotingLogic, VotingStatus};

/// This enumeration represents the available call messages for interacting with the `VotingLogic` module.
#[derive(
    borsh::BorshDeserialize,
    borsh::BorshSerialize,
    serde::Serialize,
    serde::Deserialize,
    schemars::JsonSchema,
    Debug,
    PartialEq,
    Clone,
)]
#[schemars(bound = "C::Address: ::schemars::JsonSchema", rename = "CallMessage")]
pub enum CallMessage<C: Context> {
    /// Registers the sender as a candidate. Only allowed while voting is closed.
    RegisterCandidate {
        /// Name of the candidate.
        name: String,
    },
    /// Changes the voting status. Only the admin may send it.
    ChangeStatus(VotingStatus),
    /// Votes for a registered candidate. Only allowed while voting is open, once per sender.
    Vote {
        /// Address of the candidate.
        candidate: C::Address,
    },
}

/// Reasons a call or a query of the `VotingLogic` module is rejected.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum VotingError {
    #[error("Already registered as candidate")]
    /// The sender is already a candidate.
    AlreadyRegistered,

    #[error("Cannot add candidate during voting")]
    /// Registration was attempted while voting is open.
    RegistrationClosed,

    #[error("Not admin")]
    /// The sender is not the admin.
    NotAdmin,

    #[error("This status already set")]
    /// The requested status is the current one.
    StatusAlreadySet,

    #[error("Voting is not open")]
    /// A vote was sent while voting is closed.
    VotingNotOpen,

    #[error("Already voted")]
    /// The sender already voted.
    AlreadyVoted,

    #[error("Not a candidate")]
    /// The vote targets an address that never registered.
    NotACandidate,

    #[error("Vote count overflow")]
    /// A vote counter would exceed `u64::MAX`.
    VoteCountOverflow,

    #[error("No votes yet")]
    /// A winner was requested before any vote was cast.
    NoVotesYet,

    #[error("Invalid status")]
    /// The numeric status is neither `0` (closed) nor `1` (open).
    InvalidStatus,
}

impl<C: Context> VotingLogic<C> {
    /// Registers the sender as a candidate named `name`.
    pub(crate) fn register_candidate(
        &self,
        name: String,
        context: &C,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<CallResponse> {
        ensure!(
            self.current_status(working_set) == VotingStatus::Closed,
            VotingError::RegistrationClosed
        );

        let candidate = context.sender();
        ensure!(
            !self.candidates.contains(candidate, working_set),
            VotingError::AlreadyRegistered
        );

        self.candidates
            .set(candidate, &Candidate::new(name.clone()), working_set);
        self.candidate_order.push(candidate, working_set);

        debug!(%candidate, %name, "Candidate registered");
        self.emit(
            Event::CandidateRegistered {
                candidate: candidate.clone(),
                name,
            },
            working_set,
        );

        Ok(CallResponse::default())
    }

    /// Sets the voting status. Must be called by the admin.
    pub(crate) fn change_status(
        &self,
        status: VotingStatus,
        context: &C,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<CallResponse> {
        self.exit_if_not_admin(context.sender(), working_set)?;
        ensure!(
            self.current_status(working_set) != status,
            VotingError::StatusAlreadySet
        );

        self.status.set(&status, working_set);

        info!(%status, "Voting status changed");
        self.emit(
            Event::StatusChanged {
                status,
                changed_by: context.sender().clone(),
            },
            working_set,
        );

        Ok(CallResponse::default())
    }

    /// Casts the vote of the sender for `candidate`.
    pub(crate) fn vote(
        &self,
        candidate: C::Address,
        context: &C,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<CallResponse> {
        ensure!(
            self.current_status(working_set) == VotingStatus::Open,
            VotingError::VotingNotOpen
        );

        let voter = context.sender();
        ensure!(
            !self.has_voted(voter, working_set),
            VotingError::AlreadyVoted
        );

        let mut record = self
            .candidates
            .get(&candidate, working_set)
            .ok_or(VotingError::NotACandidate)?;

        record.votes_count = record
            .votes_count
            .checked_add(1)
            .ok_or(VotingError::VoteCountOverflow)?;

        let total_votes = self
            .total_votes(working_set)
            .checked_add(1)
            .ok_or(VotingError::VoteCountOverflow)?;

        self.candidates.set(&candidate, &record, working_set);
        self.voters.set(voter, &true, working_set);
        self.total_votes.set(&total_votes, working_set);
        self.update_leader(&candidate, record.votes_count, working_set)?;

        debug!(%voter, %candidate, votes_count = record.votes_count, "Vote accepted");
        self.emit(
            Event::Voted {
                voter: voter.clone(),
                candidate,
                votes_count: record.votes_count,
            },
            working_set,
        );

        Ok(CallResponse::default())
    }

    // The leader only changes hands on a strictly greater count, so on a tie
    // the candidate that reached the count first keeps the lead.
    fn update_leader(
        &self,
        candidate: &C::Address,
        votes_count: u64,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<()> {
        let takes_lead = match self.leader.get(working_set) {
            None => true,
            Some(leader) => {
                votes_count > self.candidates.get_or_err(&leader, working_set)?.votes_count
            }
        };

        if takes_lead {
            self.leader.set(candidate, working_set);
        }

        Ok(())
    }

    pub(crate) fn exit_if_not_admin(
        &self,
        caller: &C::Address,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<()> {
        let admin = self.admin.get_or_err(working_set)?;

        ensure!(&admin == caller, VotingError::NotAdmin);
        Ok(())
    }

    fn emit(&self, event: Event<C>, working_set: &mut WorkingSet<C::Storage>) {
        working_set.add_encoded_event(event.event_key(), &event);
    }
}
