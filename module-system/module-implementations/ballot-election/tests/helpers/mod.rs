use ballot_election::{CallMessage, Election, ElectionConfig, ElectionError, ElectionSettings};
use ballot_modules_api::default_context::DefaultContext;
use ballot_modules_api::utils::generate_address;
use ballot_modules_api::{Context, MemoryStorage, Module, Spec, WorkingSet};

pub type C = DefaultContext;

pub fn address(key: &str) -> <C as Spec>::Address {
    generate_address::<C>(key)
}

pub fn setup(settings: ElectionSettings) -> (Election<C>, C, WorkingSet<MemoryStorage>) {
    let authority = address("authority");
    let election = Election::<C>::default();
    let mut working_set = WorkingSet::new(MemoryStorage::new());

    let config = ElectionConfig {
        authority,
        name: "Test Election".to_owned(),
        description: "Test Election Description".to_owned(),
        settings,
    };
    election.genesis(&config, &mut working_set).unwrap();

    // Genesis is committed, so a rejected call cannot roll it back.
    (
        election,
        C::new(authority),
        working_set.checkpoint().to_revertable(),
    )
}

/// Applies `message` the way the ledger does: writes are kept only on success.
pub fn apply(
    election: &Election<C>,
    message: CallMessage<C>,
    sender: &C,
    working_set: WorkingSet<MemoryStorage>,
) -> (Result<(), ElectionError>, WorkingSet<MemoryStorage>) {
    let mut working_set = working_set;
    match election.call(message, sender, &mut working_set) {
        Ok(_) => (Ok(()), working_set.checkpoint().to_revertable()),
        Err(err) => {
            let err = err
                .downcast_ref::<ElectionError>()
                .cloned()
                .expect("election calls fail with ElectionError");
            (Err(err), working_set.revert().to_revertable())
        }
    }
}

pub fn add_candidate(name: &str) -> CallMessage<C> {
    CallMessage::AddCandidate {
        name: name.to_owned(),
        img_url: format!("https://example.org/{name}.png"),
        email: format!("{name}@example.org"),
    }
}
