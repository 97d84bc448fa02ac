use sov_modules_api::Context;

use crate::VotingStatus;

/// Events emitted by [`crate::VotingLogic`]. Each one is recorded on the working set
/// under the name of its variant, with the borsh encoding of the event as value.
#[derive(
    borsh::BorshDeserialize,
    borsh::BorshSerialize,
    serde::Serialize,
    serde::Deserialize,
    Debug,
    PartialEq,
    Clone,
)]
pub enum Event<C: Context> {
    /// A caller registered itself as a candidate.
    CandidateRegistered {
        /// Address of the new candidate.
        candidate: C::Address,
        /// Name the candidate registered with.
        name: String,
    },
    /// The admin changed the voting status.
    StatusChanged {
        /// The new status.
        status: VotingStatus,
        /// The admin that changed it.
        changed_by: C::Address,
    },
    /// A vote was accepted.
    Voted {
        /// Address of the voter.
        voter: C::Address,
        /// Candidate the vote went to.
        candidate: C::Address,
        /// Votes of the candidate including this one.
        votes_count: u64,
    },
}

impl<C: Context> Event<C> {
    /// The key the event is recorded under.
    pub fn event_key(&self) -> &'static str {
        match self {
            Event::CandidateRegistered { .. } => "CandidateRegistered",
            Event::StatusChanged { .. } => "StatusChanged",
            Event::Voted { .. } => "Voted",
        }
    }
}
