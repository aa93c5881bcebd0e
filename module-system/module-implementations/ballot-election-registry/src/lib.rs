#![deny(missing_docs)]
#![doc = include_str!("../README.md")]

mod call;
mod genesis;
mod query;
#[cfg(test)]
mod tests;

use ballot_election::{Election, ElectionError, ElectionSettings};
use ballot_modules_api::{
    CallResponse, Context, Module, ModuleCallJsonSchema, ModuleError, ModuleInfo, ModulePrefix,
    Prefix, StateMap, StateValue, WorkingSet,
};
pub use call::CallMessage;
pub use genesis::ElectionRegistryConfig;
use serde::{Deserialize, Serialize};

/// What the registry stores for each authority.
#[derive(
    borsh::BorshDeserialize, borsh::BorshSerialize, Serialize, Deserialize, Debug, Clone, PartialEq,
)]
pub struct RegisteredElection<C: Context> {
    /// Name given at creation.
    pub election_name: String,
    /// Description given at creation.
    pub election_description: String,
    /// Address of the election instance.
    pub election_address: C::Address,
}

/// Creates one [`Election`] per authority and forwards calls to it.
#[derive(Clone)]
pub struct ElectionRegistry<C: Context> {
    /// The address of the registry. Elections record it as their authority.
    pub address: C::Address,

    /// Authority to its election.
    pub(crate) elections: StateMap<C::Address, RegisteredElection<C>>,

    /// Applied to every election created after genesis.
    pub(crate) election_settings: StateValue<ElectionSettings>,

    pub(crate) number_of_elections: StateValue<u64>,
}

impl<C: Context> Default for ElectionRegistry<C> {
    fn default() -> Self {
        let prefix = |storage_name: &'static str| -> Prefix {
            ModulePrefix::new_storage(module_path!(), "ElectionRegistry", storage_name).into()
        };
        let module_hash = ModulePrefix::new_module(module_path!(), "ElectionRegistry").hash::<C>();

        Self {
            address: C::Address::from(module_hash),
            elections: StateMap::new(prefix("elections")),
            election_settings: StateValue::new(prefix("election_settings")),
            number_of_elections: StateValue::new(prefix("number_of_elections")),
        }
    }
}

impl<C: Context> ElectionRegistry<C> {
    /// Resolves the election owned by `authority`.
    pub fn election_for(
        &self,
        authority: &C::Address,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<Election<C>, ElectionError> {
        self.elections
            .get(authority, working_set)
            .map(|registered| Election::new(registered.election_address))
            .ok_or_else(|| ElectionError::ElectionNotFound {
                authority: authority.to_string(),
            })
    }

    /// The context the registry uses when calling an election.
    fn proxy_context(&self) -> C {
        C::new(self.address.clone())
    }
}

impl<C: Context> ModuleInfo for ElectionRegistry<C> {
    type Context = C;

    fn address(&self) -> &C::Address {
        &self.address
    }

    fn prefix(&self) -> ModulePrefix {
        ModulePrefix::new_module(module_path!(), "ElectionRegistry")
    }
}

impl<C: Context> Module for ElectionRegistry<C> {
    type Context = C;

    type Config = ElectionRegistryConfig;

    type CallMessage = CallMessage<C>;

    fn genesis(
        &self,
        config: &Self::Config,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<(), ModuleError> {
        self.init_module(config, working_set);
        Ok(())
    }

    fn call(
        &self,
        msg: Self::CallMessage,
        context: &Self::Context,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<CallResponse, ModuleError> {
        let call_result = match msg {
            CallMessage::CreateElection { name, description } => self
                .create_election(name, description, context, working_set)
                .map(|_| CallResponse::default()),
            CallMessage::AddCandidate {
                authority,
                name,
                img_url,
                email,
            } => self.add_candidate(&authority, name, img_url, email, context, working_set),
            CallMessage::RegisterVoter {
                authority,
                voter,
                candidate_id,
            } => self.register_voter(&authority, voter, candidate_id, context, working_set),
            CallMessage::AddVoter { authority, voter } => {
                self.add_voter(&authority, voter, context, working_set)
            }
            CallMessage::StartElection { authority } => {
                self.start_election(&authority, context, working_set)
            }
            CallMessage::Vote {
                authority,
                voter,
                candidate_id,
            } => self.vote(&authority, voter, candidate_id, context, working_set),
            CallMessage::EndElection { authority } => {
                self.end_election(&authority, context, working_set)
            }
            CallMessage::DeclareWinnerCandidate { authority } => self
                .declare_winner_candidate(&authority, context, working_set)
                .map(|_| CallResponse::default()),
        };
        Ok(call_result?)
    }
}

impl<C: Context> ModuleCallJsonSchema for ElectionRegistry<C> {
    fn json_schema() -> String {
        let schema = schemars::schema_for!(CallMessage<C>);
        serde_json::to_string_pretty(&schema)
            .expect("Failed to serialize JSON schema; this is a bug in the module")
    }
}
