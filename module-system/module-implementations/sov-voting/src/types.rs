use std::fmt;

use crate::call::VotingError;

/// A registered candidate and the votes it received so far.
#[derive(
    borsh::BorshDeserialize,
    borsh::BorshSerialize,
    serde::Serialize,
    serde::Deserialize,
    Debug,
    Clone,
    PartialEq,
    Eq,
)]
pub struct Candidate {
    /// Name given at registration. Never changes afterwards.
    pub user_name: String,
    /// Set for every stored record.
    pub user_candidate: bool,
    /// Number of votes received.
    pub votes_count: u64,
}

impl Candidate {
    pub(crate) fn new(user_name: String) -> Self {
        Self {
            user_name,
            user_candidate: true,
            votes_count: 0,
        }
    }
}

/// Whether the module accepts votes. Candidates may only register while voting is closed.
///
/// Serialized by name. Deserializes from either the name or the numeric code
/// (`0` for `Closed`, `1` for `Open`).
#[derive(
    borsh::BorshDeserialize,
    borsh::BorshSerialize,
    serde::Serialize,
    schemars::JsonSchema,
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
)]
pub enum VotingStatus {
    /// Registration is open, votes are rejected.
    #[default]
    Closed = 0,
    /// Votes are accepted, registration is rejected.
    Open = 1,
}

impl TryFrom<u8> for VotingStatus {
    type Error = VotingError;

    fn try_from(status: u8) -> Result<Self, Self::Error> {
        match status {
            0 => Ok(VotingStatus::Closed),
            1 => Ok(VotingStatus::Open),
            _ => Err(VotingError::InvalidStatus),
        }
    }
}

impl From<VotingStatus> for u8 {
    fn from(status: VotingStatus) -> Self {
        status as u8
    }
}

impl<'de> serde::Deserialize<'de> for VotingStatus {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(serde::Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Code(u8),
            Name(String),
        }

        let status = match Repr::deserialize(deserializer)? {
            Repr::Code(code) => VotingStatus::try_from(code),
            Repr::Name(name) => match name.as_str() {
                "Closed" => Ok(VotingStatus::Closed),
                "Open" => Ok(VotingStatus::Open),
                _ => Err(VotingError::InvalidStatus),
            },
        };
        status.map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for VotingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VotingStatus::Closed => write!(f, "Closed"),
            VotingStatus::Open => write!(f, "Open"),
        }
    }
}
