use ballot_modules_api::{Context, WorkingSet};

use crate::{Candidate, CandidateId, Election, ElectionError, Phase, PendingVoter, Voter};

/// Summary of an election, as returned by [`Election::get_election_details`].
#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct ElectionDetailsResponse {
    /// Election name.
    pub name: String,
    /// Election description.
    pub description: String,
    /// Current phase.
    pub phase: Phase,
    /// Number of candidates.
    pub number_of_candidates: u64,
    /// Number of confirmed voters.
    pub number_of_voters: u64,
    /// Number of ballots cast.
    pub number_of_votes: u64,
    /// Set once the winner is declared.
    pub winner_candidate_id: Option<CandidateId>,
}

impl<C: Context> Election<C> {
    /// Returns the candidate with `candidate_id`.
    pub fn get_candidate_details(
        &self,
        candidate_id: CandidateId,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<Candidate, ElectionError> {
        self.find_candidate(candidate_id, working_set)
            .map(|(_, candidate)| candidate)
    }

    /// Number of candidates added so far.
    pub fn get_num_of_candidates(&self, working_set: &mut WorkingSet<C::Storage>) -> u64 {
        self.candidates.len(working_set) as u64
    }

    /// Number of confirmed voters.
    pub fn get_num_of_voters(&self, working_set: &mut WorkingSet<C::Storage>) -> u64 {
        self.number_of_voters.get(working_set).unwrap_or_default()
    }

    /// Number of ballots cast.
    pub fn get_number_of_votes(&self, working_set: &mut WorkingSet<C::Storage>) -> u64 {
        self.number_of_votes.get(working_set).unwrap_or_default()
    }

    /// Returns the pending entry of `voter`.
    pub fn get_pending_voter(
        &self,
        voter: &C::Address,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<PendingVoter<C>, ElectionError> {
        self.pending_voters
            .get(voter, working_set)
            .ok_or_else(|| ElectionError::VoterNotFound {
                voter: voter.to_string(),
            })
    }

    /// Returns the confirmed entry of `voter`.
    pub fn get_voter_details(
        &self,
        voter: &C::Address,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<Voter<C>, ElectionError> {
        self.voters
            .get(voter, working_set)
            .ok_or_else(|| ElectionError::VoterNotFound {
                voter: voter.to_string(),
            })
    }

    /// The declared winner, if any.
    pub fn get_winner_candidate_id(
        &self,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Option<CandidateId> {
        self.winner_candidate_id.get(working_set)
    }

    /// Current phase.
    pub fn get_phase(
        &self,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<Phase, ElectionError> {
        self.current_phase(working_set)
    }

    /// All candidates in id order.
    pub fn get_candidates(&self, working_set: &mut WorkingSet<C::Storage>) -> Vec<Candidate> {
        self.candidates.iter(working_set).collect()
    }

    /// The identity recorded as the election's authority.
    pub fn get_authority(
        &self,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<C::Address, ElectionError> {
        self.current_authority(working_set)
    }

    /// Name, description, phase and counters in one read.
    pub fn get_election_details(
        &self,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<ElectionDetailsResponse, ElectionError> {
        let name = self
            .name
            .get(working_set)
            .ok_or(ElectionError::ElectionNotInitialized)?;
        let description = self
            .description
            .get(working_set)
            .ok_or(ElectionError::ElectionNotInitialized)?;

        Ok(ElectionDetailsResponse {
            name,
            description,
            phase: self.current_phase(working_set)?,
            number_of_candidates: self.get_num_of_candidates(working_set),
            number_of_voters: self.get_num_of_voters(working_set),
            number_of_votes: self.get_number_of_votes(working_set),
            winner_candidate_id: self.get_winner_candidate_id(working_set),
        })
    }
}
