use ballot_modules_api::{CallResponse, Context, WorkingSet};
use tracing::debug;

use crate::{
    Candidate, CandidateId, Election, ElectionError, ElectionSettings, PendingVoter, Phase, Voter,
};

/// Calls accepted by an [`Election`].
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
    /// Appends a candidate. Authority only, before the election starts.
    AddCandidate {
        /// Display name.
        name: String,
        /// Link to the candidate's picture.
        img_url: String,
        /// Contact email.
        email: String,
    },
    /// Registers a pending voter. Authority only, until the election ends.
    RegisterVoter {
        /// Voter identity.
        voter: C::Address,
        /// The candidate the voter declares for.
        candidate_id: CandidateId,
    },
    /// Confirms a pending voter. Authority only, until the election ends.
    AddVoter {
        /// Voter identity.
        voter: C::Address,
    },
    /// Opens the ballot. Authority only.
    StartElection,
    /// Casts the voter's ballot. Accepted from the voter or the authority.
    Vote {
        /// Voter identity.
        voter: C::Address,
        /// The candidate voted for.
        candidate_id: CandidateId,
    },
    /// Closes the ballot. Authority only.
    EndElection,
    /// Tallies the votes and records the winner. Authority only, after the election ends.
    DeclareWinnerCandidate,
}

impl<C: Context> Election<C> {
    /// Appends a candidate with the next free id and no votes.
    pub fn add_candidate(
        &self,
        name: String,
        img_url: String,
        email: String,
        context: &C,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<CallResponse, ElectionError> {
        self.exit_if_not_authority(context, working_set)?;
        self.current_phase(working_set)?.ensure_not_started()?;

        let settings = self.current_settings(working_set)?;
        let next_index = self.candidates.len(working_set);
        let id = usize::from(settings.first_candidate_id)
            .checked_add(next_index)
            .and_then(|id| CandidateId::try_from(id).ok())
            .ok_or(ElectionError::CandidateLimitReached)?;

        let candidate = Candidate {
            id,
            name,
            img_url,
            email,
            vote_count: 0,
        };
        self.candidates.push(&candidate, working_set);

        working_set.add_event(
            "Election: add_candidate",
            &format!("Candidate {} was added: {}", id, candidate.name),
        );

        Ok(CallResponse::default())
    }

    /// Puts `voter` on the pending roll, declaring for `candidate_id`.
    pub fn register_voter(
        &self,
        voter: C::Address,
        candidate_id: CandidateId,
        context: &C,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<CallResponse, ElectionError> {
        self.exit_if_not_authority(context, working_set)?;
        self.current_phase(working_set)?.ensure_not_ended()?;
        self.find_candidate(candidate_id, working_set)?;
        self.exit_if_voter_registered(&voter, working_set)?;

        let pending_voter = PendingVoter {
            voter: voter.clone(),
            intended_candidate_id: candidate_id,
            is_voted: false,
        };
        self.pending_voters.set(&voter, &pending_voter, working_set);

        working_set.add_event(
            "Election: register_voter",
            &format!("Voter was registered: {voter}"),
        );

        Ok(CallResponse::default())
    }

    /// Moves `voter` from the pending roll to the confirmed roll.
    pub fn add_voter(
        &self,
        voter: C::Address,
        context: &C,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<CallResponse, ElectionError> {
        self.exit_if_not_authority(context, working_set)?;
        self.current_phase(working_set)?.ensure_not_ended()?;

        if self.voters.contains(&voter, working_set) {
            return Err(ElectionError::VoterAlreadyRegistered {
                voter: voter.to_string(),
            });
        }

        let pending_voter =
            self.pending_voters
                .get(&voter, working_set)
                .ok_or_else(|| ElectionError::VoterNotFound {
                    voter: voter.to_string(),
                })?;

        let number_of_voters = self
            .number_of_voters
            .get(working_set)
            .unwrap_or_default()
            .checked_add(1)
            .ok_or(ElectionError::VoteCountOverflow)?;

        let confirmed = Voter {
            voter: voter.clone(),
            candidate_id: pending_voter.intended_candidate_id,
            is_voted: false,
        };
        self.pending_voters.delete(&voter, working_set);
        self.voters.set(&voter, &confirmed, working_set);
        self.number_of_voters.set(&number_of_voters, working_set);

        working_set.add_event("Election: add_voter", &format!("Voter was added: {voter}"));

        Ok(CallResponse::default())
    }

    /// Opens the ballot.
    pub fn start_election(
        &self,
        context: &C,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<CallResponse, ElectionError> {
        self.exit_if_not_authority(context, working_set)?;
        let phase = self.current_phase(working_set)?.start()?;
        self.phase.set(&phase, working_set);

        working_set.add_event("Election: start_election", "Election was started");

        Ok(CallResponse::default())
    }

    /// Records the ballot of a confirmed voter.
    ///
    /// The candidate named on the ballot is counted, even if it differs from the
    /// one the voter registered for, unless
    /// [`ElectionSettings::enforce_registered_candidate`] is set.
    pub fn vote(
        &self,
        voter: C::Address,
        candidate_id: CandidateId,
        context: &C,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<CallResponse, ElectionError> {
        let authority = self.current_authority(working_set)?;
        let sender = context.sender();
        if sender != &voter && sender != &authority {
            return Err(ElectionError::NotAuthorized {
                caller: sender.to_string(),
            });
        }

        self.current_phase(working_set)?.ensure_started()?;

        let mut ballot_voter =
            self.voters
                .get(&voter, working_set)
                .ok_or_else(|| ElectionError::VoterNotFound {
                    voter: voter.to_string(),
                })?;

        if ballot_voter.is_voted {
            return Err(ElectionError::VoterAlreadyVoted {
                voter: voter.to_string(),
            });
        }

        let (index, mut candidate) = self.find_candidate(candidate_id, working_set)?;

        let settings = self.current_settings(working_set)?;
        if settings.enforce_registered_candidate && ballot_voter.candidate_id != candidate_id {
            return Err(ElectionError::CandidateMismatch {
                registered: ballot_voter.candidate_id,
                requested: candidate_id,
            });
        }

        candidate.vote_count = candidate
            .vote_count
            .checked_add(1)
            .ok_or(ElectionError::VoteCountOverflow)?;

        let number_of_votes = self
            .number_of_votes
            .get(working_set)
            .unwrap_or_default()
            .checked_add(1)
            .ok_or(ElectionError::VoteCountOverflow)?;

        self.candidates
            .set(index, &candidate, working_set)
            .map_err(|_| ElectionError::CandidateNotFound { candidate_id })?;
        ballot_voter.is_voted = true;
        self.voters.set(&voter, &ballot_voter, working_set);
        self.number_of_votes.set(&number_of_votes, working_set);

        debug!(%voter, candidate_id, "Vote accepted");
        working_set.add_event(
            "Election: vote",
            &format!("Vote from: {voter} accepted for candidate {candidate_id}"),
        );

        Ok(CallResponse::default())
    }

    /// Closes the ballot.
    pub fn end_election(
        &self,
        context: &C,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<CallResponse, ElectionError> {
        self.exit_if_not_authority(context, working_set)?;
        let phase = self.current_phase(working_set)?.end()?;
        self.phase.set(&phase, working_set);

        working_set.add_event("Election: end_election", "Election was ended");

        Ok(CallResponse::default())
    }

    /// Tallies the votes, stores the winner and returns its id.
    ///
    /// The candidate with the most votes wins; on a tie the lowest id wins.
    pub fn declare_winner_candidate(
        &self,
        context: &C,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<CandidateId, ElectionError> {
        self.exit_if_not_authority(context, working_set)?;
        self.current_phase(working_set)?.ensure_ended()?;

        let mut winner: Option<Candidate> = None;
        for candidate in self.candidates.iter(working_set) {
            // Strictly greater, so the earliest candidate keeps a tie.
            let leads = winner
                .as_ref()
                .map_or(true, |leader| candidate.vote_count > leader.vote_count);
            if leads {
                winner = Some(candidate);
            }
        }
        let winner = winner.ok_or(ElectionError::NoCandidates)?;

        self.winner_candidate_id.set(&winner.id, working_set);

        debug!(
            winner = winner.id,
            votes = winner.vote_count,
            "Winner declared"
        );
        working_set.add_event(
            "Election: declare_winner_candidate",
            &format!("Winner is candidate {} with {} votes", winner.id, winner.vote_count),
        );

        Ok(winner.id)
    }

    fn exit_if_not_authority(
        &self,
        context: &C,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<(), ElectionError> {
        let authority = self.current_authority(working_set)?;

        if &authority != context.sender() {
            return Err(ElectionError::NotAuthorized {
                caller: context.sender().to_string(),
            });
        }
        Ok(())
    }

    fn exit_if_voter_registered(
        &self,
        voter: &C::Address,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<(), ElectionError> {
        if self.pending_voters.contains(voter, working_set)
            || self.voters.contains(voter, working_set)
        {
            return Err(ElectionError::VoterAlreadyRegistered {
                voter: voter.to_string(),
            });
        }
        Ok(())
    }

    pub(crate) fn current_authority(
        &self,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<C::Address, ElectionError> {
        self.authority
            .get(working_set)
            .ok_or(ElectionError::ElectionNotInitialized)
    }

    pub(crate) fn current_phase(
        &self,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<Phase, ElectionError> {
        self.phase
            .get(working_set)
            .ok_or(ElectionError::ElectionNotInitialized)
    }

    pub(crate) fn current_settings(
        &self,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<ElectionSettings, ElectionError> {
        self.settings
            .get(working_set)
            .ok_or(ElectionError::ElectionNotInitialized)
    }

    /// Returns the index and value of the candidate with `candidate_id`.
    pub(crate) fn find_candidate(
        &self,
        candidate_id: CandidateId,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<(usize, Candidate), ElectionError> {
        let settings = self.current_settings(working_set)?;
        let not_found = ElectionError::CandidateNotFound { candidate_id };

        let index = usize::from(candidate_id)
            .checked_sub(usize::from(settings.first_candidate_id))
            .ok_or_else(|| not_found.clone())?;

        self.candidates
            .get_or_err(index, working_set)
            .map(|candidate| (index, candidate))
            .map_err(|_| not_found)
    }
}
