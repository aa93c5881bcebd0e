use ballot_modules_api::ModuleError;
use thiserror::Error;

use crate::CandidateId;

/// Errors raised by election operations. Each one aborts the operation before any write.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ElectionError {
    /// The caller is not allowed to perform the operation.
    #[error("{caller} is not authorized to perform this action")]
    NotAuthorized {
        /// The rejected caller.
        caller: String,
    },
    /// No election is registered for the authority.
    #[error("No election registered for authority {authority}")]
    ElectionNotFound {
        /// The authority that was looked up.
        authority: String,
    },
    /// The authority already owns an election.
    #[error("Authority {authority} already has an election")]
    ElectionAlreadyRegistered {
        /// The authority that tried to register again.
        authority: String,
    },
    /// The election state has not been initialised.
    #[error("Election is not initialized")]
    ElectionNotInitialized,
    /// The election state has already been initialised.
    #[error("Election is already initialized")]
    ElectionAlreadyInitialized,
    /// The operation is only allowed before the election starts.
    #[error("Election has already started")]
    ElectionAlreadyStarted,
    /// The operation is only allowed while the election runs.
    #[error("Election has not started")]
    ElectionNotStarted,
    /// The election is over.
    #[error("Election has ended")]
    ElectionEnded,
    /// The operation is only allowed once the election is over.
    #[error("Election has not ended")]
    ElectionNotEnded,
    /// No candidate with this id.
    #[error("Candidate {candidate_id} does not exist")]
    CandidateNotFound {
        /// The requested candidate id.
        candidate_id: CandidateId,
    },
    /// Candidate ids are exhausted.
    #[error("No more candidate ids are available")]
    CandidateLimitReached,
    /// The ballot names a different candidate than the voter registered for.
    #[error("Voter registered for candidate {registered} but voted for {requested}")]
    CandidateMismatch {
        /// Candidate recorded at registration.
        registered: CandidateId,
        /// Candidate named on the ballot.
        requested: CandidateId,
    },
    /// A winner cannot be declared without candidates.
    #[error("Election has no candidates")]
    NoCandidates,
    /// The identity is not on the required voter roll.
    #[error("Voter {voter} not found")]
    VoterNotFound {
        /// The voter that was looked up.
        voter: String,
    },
    /// The identity is already pending or confirmed.
    #[error("Voter {voter} is already registered")]
    VoterAlreadyRegistered {
        /// The duplicate voter.
        voter: String,
    },
    /// The voter has already cast a ballot.
    #[error("Voter {voter} has already voted")]
    VoterAlreadyVoted {
        /// The voter.
        voter: String,
    },
    /// A counter would overflow.
    #[error("Vote count overflow")]
    VoteCountOverflow,
}

impl From<ElectionError> for ModuleError {
    fn from(err: ElectionError) -> Self {
        ModuleError::ModuleError(anyhow::Error::new(err))
    }
}
