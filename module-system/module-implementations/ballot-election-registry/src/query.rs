use ballot_election::{
    Candidate, CandidateId, ElectionDetailsResponse, ElectionError, PendingVoter, Phase, Voter,
};
use ballot_modules_api::{Context, WorkingSet};

use crate::{ElectionRegistry, RegisteredElection};

impl<C: Context> ElectionRegistry<C> {
    /// Name, description and address of the election owned by `authority`.
    pub fn get_registered_election(
        &self,
        authority: &C::Address,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<RegisteredElection<C>, ElectionError> {
        self.elections
            .get(authority, working_set)
            .ok_or_else(|| ElectionError::ElectionNotFound {
                authority: authority.to_string(),
            })
    }

    /// Address of the election owned by `authority`.
    pub fn get_election_address(
        &self,
        authority: &C::Address,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<C::Address, ElectionError> {
        self.get_registered_election(authority, working_set)
            .map(|registered| registered.election_address)
    }

    /// The identity the election records as its authority. Since the registry calls
    /// elections as itself, this is the registry address.
    pub fn get_authority_address(
        &self,
        authority: &C::Address,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<C::Address, ElectionError> {
        self.election_for(authority, working_set)?
            .get_authority(working_set)
    }

    /// Number of elections created so far.
    pub fn get_number_of_elections(&self, working_set: &mut WorkingSet<C::Storage>) -> u64 {
        self.number_of_elections.get(working_set).unwrap_or_default()
    }

    /// See [`ballot_election::Election::get_candidate_details`].
    pub fn get_candidate_details(
        &self,
        authority: &C::Address,
        candidate_id: CandidateId,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<Candidate, ElectionError> {
        self.election_for(authority, working_set)?
            .get_candidate_details(candidate_id, working_set)
    }

    /// See [`ballot_election::Election::get_num_of_candidates`].
    pub fn get_num_of_candidates(
        &self,
        authority: &C::Address,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<u64, ElectionError> {
        Ok(self
            .election_for(authority, working_set)?
            .get_num_of_candidates(working_set))
    }

    /// See [`ballot_election::Election::get_num_of_voters`].
    pub fn get_num_of_voters(
        &self,
        authority: &C::Address,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<u64, ElectionError> {
        Ok(self
            .election_for(authority, working_set)?
            .get_num_of_voters(working_set))
    }

    /// See [`ballot_election::Election::get_number_of_votes`].
    pub fn get_number_of_votes(
        &self,
        authority: &C::Address,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<u64, ElectionError> {
        Ok(self
            .election_for(authority, working_set)?
            .get_number_of_votes(working_set))
    }

    /// See [`ballot_election::Election::get_pending_voter`].
    pub fn get_pending_voter(
        &self,
        authority: &C::Address,
        voter: &C::Address,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<PendingVoter<C>, ElectionError> {
        self.election_for(authority, working_set)?
            .get_pending_voter(voter, working_set)
    }

    /// See [`ballot_election::Election::get_voter_details`].
    pub fn get_voter_details(
        &self,
        authority: &C::Address,
        voter: &C::Address,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<Voter<C>, ElectionError> {
        self.election_for(authority, working_set)?
            .get_voter_details(voter, working_set)
    }

    /// See [`ballot_election::Election::get_winner_candidate_id`].
    pub fn get_winner_candidate_id(
        &self,
        authority: &C::Address,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<Option<CandidateId>, ElectionError> {
        Ok(self
            .election_for(authority, working_set)?
            .get_winner_candidate_id(working_set))
    }

    /// See [`ballot_election::Election::get_phase`].
    pub fn get_phase(
        &self,
        authority: &C::Address,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<Phase, ElectionError> {
        self.election_for(authority, working_set)?
            .get_phase(working_set)
    }

    /// See [`ballot_election::Election::get_candidates`].
    pub fn get_candidates(
        &self,
        authority: &C::Address,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<Vec<Candidate>, ElectionError> {
        Ok(self
            .election_for(authority, working_set)?
            .get_candidates(working_set))
    }

    /// See [`ballot_election::Election::get_election_details`].
    pub fn get_election_details(
        &self,
        authority: &C::Address,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<ElectionDetailsResponse, ElectionError> {
        self.election_for(authority, working_set)?
            .get_election_details(working_set)
    }
}
