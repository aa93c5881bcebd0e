use ballot_election::{CandidateId, Election, ElectionConfig, ElectionError};
use ballot_modules_api::utils::derive_child_address;
use ballot_modules_api::{CallResponse, Context, WorkingSet};
use tracing::{debug, info};

use crate::{ElectionRegistry, RegisteredElection};

/// Calls accepted by the [`ElectionRegistry`]. All but `CreateElection` name the
/// authority whose election they target.
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
    /// Creates an election owned by the sender.
    CreateElection {
        /// Election name.
        name: String,
        /// Election description.
        description: String,
    },
    /// Appends a candidate.
    AddCandidate {
        /// Owner of the target election.
        authority: C::Address,
        /// Display name.
        name: String,
        /// Link to the candidate's picture.
        img_url: String,
        /// Contact email.
        email: String,
    },
    /// Registers a pending voter.
    RegisterVoter {
        /// Owner of the target election.
        authority: C::Address,
        /// Voter identity.
        voter: C::Address,
        /// The candidate the voter declares for.
        candidate_id: CandidateId,
    },
    /// Confirms a pending voter.
    AddVoter {
        /// Owner of the target election.
        authority: C::Address,
        /// Voter identity.
        voter: C::Address,
    },
    /// Opens the ballot.
    StartElection {
        /// Owner of the target election.
        authority: C::Address,
    },
    /// Casts a ballot. Accepted from the voter or the authority.
    Vote {
        /// Owner of the target election.
        authority: C::Address,
        /// Voter identity.
        voter: C::Address,
        /// The candidate voted for.
        candidate_id: CandidateId,
    },
    /// Closes the ballot.
    EndElection {
        /// Owner of the target election.
        authority: C::Address,
    },
    /// Tallies the votes and records the winner.
    DeclareWinnerCandidate {
        /// Owner of the target election.
        authority: C::Address,
    },
}

impl<C: Context> ElectionRegistry<C> {
    /// Creates an election owned by the sender and returns its address.
    pub fn create_election(
        &self,
        name: String,
        description: String,
        context: &C,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<C::Address, ElectionError> {
        let authority = context.sender();

        if self.elections.contains(authority, working_set) {
            return Err(ElectionError::ElectionAlreadyRegistered {
                authority: authority.to_string(),
            });
        }

        let number_of_elections = self
            .number_of_elections
            .get(working_set)
            .unwrap_or_default()
            .checked_add(1)
            .ok_or(ElectionError::VoteCountOverflow)?;

        let election_address = derive_child_address::<C>(&self.address, authority);
        let election = Election::<C>::new(election_address.clone());
        let config = ElectionConfig {
            authority: self.address.clone(),
            name: name.clone(),
            description: description.clone(),
            settings: self.election_settings.get(working_set).unwrap_or_default(),
        };
        election.init_election(&config, working_set)?;

        let registered = RegisteredElection {
            election_name: name,
            election_description: description,
            election_address: election_address.clone(),
        };
        self.elections.set(authority, &registered, working_set);
        self.number_of_elections
            .set(&number_of_elections, working_set);

        info!(%authority, %election_address, "Election created");
        working_set.add_event(
            "ElectionRegistry: create_election",
            &format!("Election {election_address} was created for {authority}"),
        );

        Ok(election_address)
    }

    /// Forwards [`Election::add_candidate`].
    pub fn add_candidate(
        &self,
        authority: &C::Address,
        name: String,
        img_url: String,
        email: String,
        context: &C,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<CallResponse, ElectionError> {
        let election = self.authorized_election(authority, context, working_set)?;
        election.add_candidate(name, img_url, email, &self.proxy_context(), working_set)
    }

    /// Forwards [`Election::register_voter`].
    pub fn register_voter(
        &self,
        authority: &C::Address,
        voter: C::Address,
        candidate_id: CandidateId,
        context: &C,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<CallResponse, ElectionError> {
        let election = self.authorized_election(authority, context, working_set)?;
        election.register_voter(voter, candidate_id, &self.proxy_context(), working_set)
    }

    /// Forwards [`Election::add_voter`].
    pub fn add_voter(
        &self,
        authority: &C::Address,
        voter: C::Address,
        context: &C,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<CallResponse, ElectionError> {
        let election = self.authorized_election(authority, context, working_set)?;
        election.add_voter(voter, &self.proxy_context(), working_set)
    }

    /// Forwards [`Election::start_election`].
    pub fn start_election(
        &self,
        authority: &C::Address,
        context: &C,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<CallResponse, ElectionError> {
        let election = self.authorized_election(authority, context, working_set)?;
        election.start_election(&self.proxy_context(), working_set)
    }

    /// Forwards [`Election::vote`]. The sender must be the voter or the authority.
    pub fn vote(
        &self,
        authority: &C::Address,
        voter: C::Address,
        candidate_id: CandidateId,
        context: &C,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<CallResponse, ElectionError> {
        let election = self.election_for(authority, working_set)?;

        let sender = context.sender();
        if sender != &voter && sender != authority {
            return Err(ElectionError::NotAuthorized {
                caller: sender.to_string(),
            });
        }

        election.vote(voter, candidate_id, &self.proxy_context(), working_set)
    }

    /// Forwards [`Election::end_election`].
    pub fn end_election(
        &self,
        authority: &C::Address,
        context: &C,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<CallResponse, ElectionError> {
        let election = self.authorized_election(authority, context, working_set)?;
        election.end_election(&self.proxy_context(), working_set)
    }

    /// Forwards [`Election::declare_winner_candidate`] and returns the winner.
    pub fn declare_winner_candidate(
        &self,
        authority: &C::Address,
        context: &C,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<CandidateId, ElectionError> {
        let election = self.authorized_election(authority, context, working_set)?;
        let winner = election.declare_winner_candidate(&self.proxy_context(), working_set)?;

        debug!(%authority, winner, "Winner declared");
        Ok(winner)
    }

    /// Resolves the election of `authority` and checks that the sender owns it.
    fn authorized_election(
        &self,
        authority: &C::Address,
        context: &C,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<Election<C>, ElectionError> {
        let election = self.election_for(authority, working_set)?;

        if context.sender() != authority {
            return Err(ElectionError::NotAuthorized {
                caller: context.sender().to_string(),
            });
        }
        Ok(election)
    }
}
