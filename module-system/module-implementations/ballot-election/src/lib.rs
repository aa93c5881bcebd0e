#![deny(missing_docs)]
#![doc = include_str!("../README.md")]

mod call;
mod error;
mod genesis;
mod query;
mod types;

use ballot_modules_api::{
    CallResponse, Context, Module, ModuleCallJsonSchema, ModuleError, ModuleInfo, ModulePrefix,
    Prefix, StateMap, StateValue, StateVec, WorkingSet,
};
pub use call::CallMessage;
pub use error::ElectionError;
pub use genesis::ElectionConfig;
pub use query::ElectionDetailsResponse;
pub use types::{Candidate, CandidateId, ElectionSettings, Phase, PendingVoter, Voter};

/// One election: candidate roll, voter rolls, phase and tally.
///
/// Every state container is prefixed by the election address, so any number of
/// elections can share one storage.
#[derive(Clone)]
pub struct Election<C: Context> {
    /// The address of this election.
    pub address: C::Address,

    /// The only identity allowed to administer the election.
    pub(crate) authority: StateValue<C::Address>,

    pub(crate) name: StateValue<String>,

    pub(crate) description: StateValue<String>,

    pub(crate) settings: StateValue<ElectionSettings>,

    pub(crate) phase: StateValue<Phase>,

    /// Candidates in id order. The candidate with id `first_candidate_id + i` is at index `i`.
    pub(crate) candidates: StateVec<Candidate>,

    pub(crate) pending_voters: StateMap<C::Address, PendingVoter<C>>,

    pub(crate) voters: StateMap<C::Address, Voter<C>>,

    /// Number of confirmed voters.
    pub(crate) number_of_voters: StateValue<u64>,

    /// Number of ballots cast.
    pub(crate) number_of_votes: StateValue<u64>,

    pub(crate) winner_candidate_id: StateValue<CandidateId>,
}

impl<C: Context> Election<C> {
    /// Creates a handle to the election stored under `address`.
    pub fn new(address: C::Address) -> Self {
        let prefix = |storage_name: &'static str| -> Prefix {
            ModulePrefix::new_storage(module_path!(), "Election", storage_name)
                .scoped(address.as_ref())
        };

        Self {
            authority: StateValue::new(prefix("authority")),
            name: StateValue::new(prefix("name")),
            description: StateValue::new(prefix("description")),
            settings: StateValue::new(prefix("settings")),
            phase: StateValue::new(prefix("phase")),
            candidates: StateVec::new(prefix("candidates")),
            pending_voters: StateMap::new(prefix("pending_voters")),
            voters: StateMap::new(prefix("voters")),
            number_of_voters: StateValue::new(prefix("number_of_voters")),
            number_of_votes: StateValue::new(prefix("number_of_votes")),
            winner_candidate_id: StateValue::new(prefix("winner_candidate_id")),
            address,
        }
    }
}

impl<C: Context> Default for Election<C> {
    fn default() -> Self {
        let module_hash = ModulePrefix::new_module(module_path!(), "Election").hash::<C>();
        Self::new(C::Address::from(module_hash))
    }
}

impl<C: Context> ModuleInfo for Election<C> {
    type Context = C;

    fn address(&self) -> &C::Address {
        &self.address
    }

    fn prefix(&self) -> ModulePrefix {
        ModulePrefix::new_module(module_path!(), "Election")
    }
}

impl<C: Context> Module for Election<C> {
    type Context = C;

    type Config = ElectionConfig<C>;

    type CallMessage = CallMessage<C>;

    fn genesis(
        &self,
        config: &Self::Config,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<(), ModuleError> {
        Ok(self.init_election(config, working_set)?)
    }

    fn call(
        &self,
        msg: Self::CallMessage,
        context: &Self::Context,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<CallResponse, ModuleError> {
        let call_result = match msg {
            CallMessage::AddCandidate {
                name,
                img_url,
                email,
            } => self.add_candidate(name, img_url, email, context, working_set),
            CallMessage::RegisterVoter {
                voter,
                candidate_id,
            } => self.register_voter(voter, candidate_id, context, working_set),
            CallMessage::AddVoter { voter } => self.add_voter(voter, context, working_set),
            CallMessage::StartElection => self.start_election(context, working_set),
            CallMessage::Vote {
                voter,
                candidate_id,
            } => self.vote(voter, candidate_id, context, working_set),
            CallMessage::EndElection => self.end_election(context, working_set),
            CallMessage::DeclareWinnerCandidate => self
                .declare_winner_candidate(context, working_set)
                .map(|_| CallResponse::default()),
        };
        Ok(call_result?)
    }
}

impl<C: Context> ModuleCallJsonSchema for Election<C> {
    fn json_schema() -> String {
        let schema = schemars::schema_for!(CallMessage<C>);
        serde_json::to_string_pretty(&schema)
            .expect("Failed to serialize JSON schema; this is a bug in the module")
    }
}
