use ballot_election::ElectionSettings;
use ballot_election_registry::{CallMessage, ElectionRegistry, ElectionRegistryConfig};
use ballot_ledger::Ledger;
use ballot_modules_api::default_context::DefaultContext;
use ballot_modules_api::utils::generate_address;
use ballot_modules_api::{MemoryStorage, Spec};

pub type C = DefaultContext;

pub type Address = <C as Spec>::Address;

pub fn address(key: &str) -> Address {
    generate_address::<C>(key)
}

pub fn registry_ledger() -> Ledger<ElectionRegistry<C>> {
    let ledger = Ledger::new(MemoryStorage::new(), ElectionRegistry::<C>::default());
    ledger
        .genesis(&ElectionRegistryConfig {
            election_settings: ElectionSettings::default(),
        })
        .unwrap();
    ledger
}

pub fn create_election(name: &str) -> CallMessage<C> {
    CallMessage::CreateElection {
        name: name.to_owned(),
        description: format!("{name} description"),
    }
}

pub fn add_candidate(authority: Address, name: &str) -> CallMessage<C> {
    CallMessage::AddCandidate {
        authority,
        name: name.to_owned(),
        img_url: String::new(),
        email: String::new(),
    }
}
