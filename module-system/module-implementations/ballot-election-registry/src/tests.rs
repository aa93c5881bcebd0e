use ballot_election::{ElectionError, ElectionSettings, Phase};
use ballot_modules_api::default_context::DefaultContext;
use ballot_modules_api::utils::{derive_child_address, generate_address};
use ballot_modules_api::{Context, MemoryStorage, Module, ModuleCallJsonSchema, WorkingSet};

use crate::{ElectionRegistry, ElectionRegistryConfig};

type C = DefaultContext;

fn setup(settings: ElectionSettings) -> (ElectionRegistry<C>, WorkingSet<MemoryStorage>) {
    let registry = ElectionRegistry::<C>::default();
    let mut working_set = WorkingSet::new(MemoryStorage::new());
    let config = ElectionRegistryConfig {
        election_settings: settings,
    };
    registry.genesis(&config, &mut working_set).unwrap();
    (registry, working_set)
}

#[test]
fn test_create_election_records_metadata() {
    let (registry, mut working_set) = setup(ElectionSettings::default());
    let authority = generate_address::<C>("authority");

    let election_address = registry
        .create_election(
            "Test Election".to_owned(),
            "Test Election Description".to_owned(),
            &C::new(authority),
            &mut working_set,
        )
        .unwrap();

    assert_eq!(
        election_address,
        derive_child_address::<C>(&registry.address, &authority)
    );

    let registered = registry
        .get_registered_election(&authority, &mut working_set)
        .unwrap();
    assert_eq!(registered.election_name, "Test Election");
    assert_eq!(registered.election_description, "Test Election Description");
    assert_eq!(registered.election_address, election_address);

    for _ in 0..2 {
        assert_eq!(
            registry.get_election_address(&authority, &mut working_set),
            Ok(election_address)
        );
    }
    assert_eq!(
        registry.get_authority_address(&authority, &mut working_set),
        Ok(registry.address)
    );
    assert_eq!(
        registry.get_phase(&authority, &mut working_set),
        Ok(Phase::NotStarted)
    );
    assert_eq!(registry.get_number_of_elections(&mut working_set), 1);
}

#[test]
fn test_authority_owns_one_election() {
    let (registry, mut working_set) = setup(ElectionSettings::default());
    let authority = C::new(generate_address::<C>("authority"));

    registry
        .create_election("first".to_owned(), String::new(), &authority, &mut working_set)
        .unwrap();
    assert_eq!(
        registry.create_election("second".to_owned(), String::new(), &authority, &mut working_set),
        Err(ElectionError::ElectionAlreadyRegistered {
            authority: authority.sender().to_string()
        })
    );

    let registered = registry
        .get_registered_election(authority.sender(), &mut working_set)
        .unwrap();
    assert_eq!(registered.election_name, "first");
    assert_eq!(registry.get_number_of_elections(&mut working_set), 1);
}

#[test]
fn test_unknown_authority_is_not_found() {
    let (registry, mut working_set) = setup(ElectionSettings::default());
    let unknown = generate_address::<C>("unknown");
    let expected = ElectionError::ElectionNotFound {
        authority: unknown.to_string(),
    };

    assert_eq!(
        registry.get_registered_election(&unknown, &mut working_set),
        Err(expected.clone())
    );
    assert_eq!(
        registry.start_election(&unknown, &C::new(unknown), &mut working_set),
        Err(expected.clone())
    );
    assert_eq!(
        registry.get_num_of_candidates(&unknown, &mut working_set),
        Err(expected)
    );
}

#[test]
fn test_genesis_settings_apply_to_new_elections() {
    let (registry, mut working_set) = setup(ElectionSettings {
        first_candidate_id: 5,
        enforce_registered_candidate: false,
    });
    let authority = C::new(generate_address::<C>("authority"));
    registry
        .create_election("e".to_owned(), String::new(), &authority, &mut working_set)
        .unwrap();

    registry
        .add_candidate(
            authority.sender(),
            "first".to_owned(),
            String::new(),
            String::new(),
            &authority,
            &mut working_set,
        )
        .unwrap();

    let candidates = registry
        .get_candidates(authority.sender(), &mut working_set)
        .unwrap();
    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0].id, 5);
}

#[test]
fn test_json_schema_names_every_call() {
    let schema = ElectionRegistry::<C>::json_schema();
    assert!(schema.contains("CreateElection"));
    assert!(schema.contains("DeclareWinnerCandidate"));
    assert!(schema.contains("authority"));
}
