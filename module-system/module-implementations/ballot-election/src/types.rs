use ballot_modules_api::Context;
use serde::{Deserialize, Serialize};

use crate::ElectionError;

/// Identifier of a candidate within one election.
pub type CandidateId = u8;

/// A candidate standing in an election.
#[derive(
    borsh::BorshDeserialize,
    borsh::BorshSerialize,
    Serialize,
    Deserialize,
    schemars::JsonSchema,
    Debug,
    Clone,
    PartialEq,
    Eq,
)]
pub struct Candidate {
    /// Sequential id, assigned when the candidate is added.
    pub id: CandidateId,
    /// Display name.
    pub name: String,
    /// Link to the candidate's picture.
    pub img_url: String,
    /// Contact email.
    pub email: String,
    /// Votes received so far.
    pub vote_count: u64,
}

/// A voter registered by the authority but not yet confirmed.
#[derive(borsh::BorshDeserialize, borsh::BorshSerialize, Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PendingVoter<C: Context> {
    /// Voter identity.
    pub voter: C::Address,
    /// The candidate the voter declared for at registration.
    pub intended_candidate_id: CandidateId,
    /// Always `false` while pending.
    pub is_voted: bool,
}

/// A confirmed voter.
#[derive(borsh::BorshDeserialize, borsh::BorshSerialize, Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Voter<C: Context> {
    /// Voter identity.
    pub voter: C::Address,
    /// Copied from the pending entry at confirmation.
    pub candidate_id: CandidateId,
    /// Set once the ballot is cast.
    pub is_voted: bool,
}

/// Per-election settings, fixed when the election is created.
#[derive(
    borsh::BorshDeserialize,
    borsh::BorshSerialize,
    Serialize,
    Deserialize,
    schemars::JsonSchema,
    Debug,
    Clone,
    PartialEq,
    Eq,
)]
#[serde(default)]
pub struct ElectionSettings {
    /// Id given to the first candidate; later candidates count up from it.
    pub first_candidate_id: CandidateId,
    /// When set, a ballot must name the candidate the voter registered for.
    pub enforce_registered_candidate: bool,
}

impl Default for ElectionSettings {
    fn default() -> Self {
        Self {
            first_candidate_id: 1,
            enforce_registered_candidate: false,
        }
    }
}

/// Lifecycle stage of an election.
#[derive(
    borsh::BorshDeserialize,
    borsh::BorshSerialize,
    Serialize,
    Deserialize,
    schemars::JsonSchema,
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
)]
pub enum Phase {
    /// Candidates and voters are being registered.
    #[default]
    NotStarted,
    /// Ballots are being cast.
    Started,
    /// Voting is closed and the winner can be declared.
    Ended,
}

impl Phase {
    /// `NotStarted → Started`.
    pub fn start(self) -> Result<Phase, ElectionError> {
        self.ensure_not_started()?;
        Ok(Phase::Started)
    }

    /// `Started → Ended`.
    pub fn end(self) -> Result<Phase, ElectionError> {
        self.ensure_started()?;
        Ok(Phase::Ended)
    }

    pub(crate) fn ensure_not_started(self) -> Result<(), ElectionError> {
        match self {
            Phase::NotStarted => Ok(()),
            Phase::Started => Err(ElectionError::ElectionAlreadyStarted),
            Phase::Ended => Err(ElectionError::ElectionEnded),
        }
    }

    pub(crate) fn ensure_started(self) -> Result<(), ElectionError> {
        match self {
            Phase::Started => Ok(()),
            Phase::NotStarted => Err(ElectionError::ElectionNotStarted),
            Phase::Ended => Err(ElectionError::ElectionEnded),
        }
    }

    pub(crate) fn ensure_not_ended(self) -> Result<(), ElectionError> {
        match self {
            Phase::Ended => Err(ElectionError::ElectionEnded),
            Phase::NotStarted | Phase::Started => Ok(()),
        }
    }

    pub(crate) fn ensure_ended(self) -> Result<(), ElectionError> {
        match self {
            Phase::Ended => Ok(()),
            Phase::NotStarted | Phase::Started => Err(ElectionError::ElectionNotEnded),
        }
    }
}
