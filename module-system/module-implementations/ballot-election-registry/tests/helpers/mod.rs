use ballot_election::{CandidateId, ElectionError, ElectionSettings};
use ballot_election_registry::{CallMessage, ElectionRegistry, ElectionRegistryConfig};
use ballot_modules_api::default_context::DefaultContext;
use ballot_modules_api::utils::generate_address;
use ballot_modules_api::{Context, MemoryStorage, Module, Spec, WorkingSet};

pub type C = DefaultContext;

pub type Address = <C as Spec>::Address;

pub fn address(key: &str) -> Address {
    generate_address::<C>(key)
}

/// A registry over committed storage. Each call runs in its own working set, which is
/// checkpointed on success and reverted on failure.
pub struct TestRegistry {
    pub registry: ElectionRegistry<C>,
    working_set: Option<WorkingSet<MemoryStorage>>,
}

impl TestRegistry {
    pub fn new() -> Self {
        let registry = ElectionRegistry::<C>::default();
        let mut working_set = WorkingSet::new(MemoryStorage::new());
        registry
            .genesis(
                &ElectionRegistryConfig {
                    election_settings: ElectionSettings::default(),
                },
                &mut working_set,
            )
            .unwrap();

        Self {
            registry,
            working_set: Some(working_set.checkpoint().to_revertable()),
        }
    }

    pub fn call(&mut self, sender: Address, message: CallMessage<C>) -> Result<(), ElectionError> {
        let mut working_set = self.working_set.take().expect("working set is always present");
        let result = self
            .registry
            .call(message, &C::new(sender), &mut working_set);

        match result {
            Ok(_) => {
                self.working_set = Some(working_set.checkpoint().to_revertable());
                Ok(())
            }
            Err(err) => {
                self.working_set = Some(working_set.revert().to_revertable());
                Err(err
                    .downcast_ref::<ElectionError>()
                    .cloned()
                    .expect("registry calls fail with ElectionError"))
            }
        }
    }

    pub fn query<T>(
        &mut self,
        query: impl FnOnce(&ElectionRegistry<C>, &mut WorkingSet<MemoryStorage>) -> T,
    ) -> T {
        let working_set = self.working_set.as_mut().expect("working set is always present");
        query(&self.registry, working_set)
    }
}

pub fn create_election(name: &str, description: &str) -> CallMessage<C> {
    CallMessage::CreateElection {
        name: name.to_owned(),
        description: description.to_owned(),
    }
}

pub fn add_candidate(authority: Address, name: &str) -> CallMessage<C> {
    CallMessage::AddCandidate {
        authority,
        name: name.to_owned(),
        img_url: format!("https://example.org/{name}.png"),
        email: format!("{name}@example.org"),
    }
}

pub fn register_voter(authority: Address, voter: Address, candidate_id: CandidateId) -> CallMessage<C> {
    CallMessage::RegisterVoter {
        authority,
        voter,
        candidate_id,
    }
}

pub fn vote(authority: Address, voter: Address, candidate_id: CandidateId) -> CallMessage<C> {
    CallMessage::Vote {
        authority,
        voter,
        candidate_id,
    }
}
