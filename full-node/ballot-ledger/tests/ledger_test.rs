mod helpers;

use ballot_election::{Election, ElectionConfig, ElectionError, ElectionSettings};
use ballot_election_registry::CallMessage;
use ballot_ledger::Ledger;
use ballot_modules_api::{Context, MemoryStorage, Storage};
use borsh::BorshSerialize;
use helpers::*;

#[test]
fn successful_calls_are_committed_with_their_events() {
    let ledger = registry_ledger();
    let authority = address("authority");

    let events = ledger
        .apply_call(authority, create_election("Test Election"))
        .unwrap();
    let keys: Vec<_> = events.iter().map(|event| event.key()).collect();
    assert_eq!(
        keys,
        vec!["Election: init_election", "ElectionRegistry: create_election"]
    );

    let events = ledger
        .apply_call(authority, add_candidate(authority, "Rohit"))
        .unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].key(), "Election: add_candidate");

    let registered = ledger
        .query(|registry, ws| registry.get_registered_election(&authority, ws))
        .unwrap();
    assert_eq!(registered.election_name, "Test Election");
    assert_eq!(
        ledger.query(|registry, ws| registry.get_num_of_candidates(&authority, ws)),
        Ok(1)
    );
}

#[test]
fn failed_calls_leave_storage_untouched() {
    let ledger = registry_ledger();
    let authority = address("authority");
    let intruder = address("intruder");

    ledger
        .apply_call(authority, create_election("Test Election"))
        .unwrap();
    let entries = ledger.storage().len();

    let err = ledger
        .apply_call(intruder, add_candidate(authority, "Eve"))
        .unwrap_err();
    assert_eq!(
        err.downcast_ref::<ElectionError>(),
        Some(&ElectionError::NotAuthorized {
            caller: intruder.to_string()
        })
    );

    // Re-registration fails after the existence check, before any write.
    let err = ledger
        .apply_call(authority, create_election("Another"))
        .unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ElectionError>(),
        Some(ElectionError::ElectionAlreadyRegistered { .. })
    ));

    assert_eq!(ledger.storage().len(), entries);
    assert_eq!(
        ledger.query(|registry, ws| registry.get_num_of_candidates(&authority, ws)),
        Ok(0)
    );
    assert_eq!(
        ledger.query(|registry, ws| registry.get_number_of_elections(ws)),
        1
    );
}

#[test]
fn raw_calls_are_decoded_with_borsh() {
    let ledger = registry_ledger();
    let authority = address("authority");

    let raw = create_election("Raw Election").try_to_vec().unwrap();
    ledger.apply_raw_call(authority, &raw).unwrap();
    assert_eq!(
        ledger
            .query(|registry, ws| registry.get_registered_election(&authority, ws))
            .map(|registered| registered.election_name),
        Ok("Raw Election".to_owned())
    );

    let entries = ledger.storage().len();
    let err = ledger
        .apply_raw_call(authority, &[0xff, 0x01, 0x02])
        .unwrap_err();
    assert!(err.downcast_ref::<ElectionError>().is_none());
    assert_eq!(ledger.storage().len(), entries);
}

#[test]
fn queries_do_not_commit_writes() {
    let ledger = registry_ledger();
    let authority = address("authority");
    let entries = ledger.storage().len();

    let created = ledger.query(|registry, ws| {
        registry.create_election(
            "Scratch".to_owned(),
            String::new(),
            &C::new(authority),
            ws,
        )
    });
    assert!(created.is_ok());

    assert_eq!(ledger.storage().len(), entries);
    assert!(matches!(
        ledger.query(|registry, ws| registry.get_registered_election(&authority, ws)),
        Err(ElectionError::ElectionNotFound { .. })
    ));
}

#[test]
fn failed_genesis_commits_nothing() {
    let authority = address("authority");
    let election = Election::<C>::default();
    let ledger = Ledger::new(MemoryStorage::new(), election);
    let config = ElectionConfig {
        authority,
        name: "Genesis Election".to_owned(),
        description: String::new(),
        settings: ElectionSettings::default(),
    };

    assert!(ledger.storage().is_empty());
    ledger.genesis(&config).unwrap();
    let entries = ledger.storage().len();
    assert!(entries > 0);

    let err = ledger.genesis(&config).unwrap_err();
    assert_eq!(
        err.downcast_ref::<ElectionError>(),
        Some(&ElectionError::ElectionAlreadyInitialized)
    );
    assert_eq!(ledger.storage().len(), entries);

    ledger
        .apply_call(
            authority,
            ballot_election::CallMessage::AddCandidate {
                name: "Rohit".to_owned(),
                img_url: String::new(),
                email: String::new(),
            },
        )
        .unwrap();
    assert_eq!(
        ledger.query(|election, ws| election.get_num_of_candidates(ws)),
        1
    );
}

#[test]
fn registry_settings_survive_commit() {
    let ledger = Ledger::new(
        MemoryStorage::new(),
        ballot_election_registry::ElectionRegistry::<C>::default(),
    );
    ledger
        .genesis(&ballot_election_registry::ElectionRegistryConfig {
            election_settings: ElectionSettings {
                first_candidate_id: 7,
                enforce_registered_candidate: true,
            },
        })
        .unwrap();
    let authority = address("authority");

    ledger
        .apply_call(authority, create_election("Configured"))
        .unwrap();
    ledger
        .apply_call(authority, add_candidate(authority, "Rohit"))
        .unwrap();
    ledger
        .apply_call(authority, CallMessage::StartElection { authority })
        .unwrap();

    let candidates = ledger
        .query(|registry, ws| registry.get_candidates(&authority, ws))
        .unwrap();
    assert_eq!(candidates[0].id, 7);
}

#[test]
fn concurrent_votes_are_all_counted() {
    const VOTERS: usize = 400;
    const THREADS: usize = 8;

    let ledger = registry_ledger();
    let authority = address("authority");
    let voters: Vec<_> = (0..VOTERS)
        .map(|i| address(&format!("voter_{i}")))
        .collect();

    ledger
        .apply_call(authority, create_election("Busy Election"))
        .unwrap();
    ledger
        .apply_call(authority, add_candidate(authority, "Rohit"))
        .unwrap();
    for voter in &voters {
        ledger
            .apply_call(
                authority,
                CallMessage::RegisterVoter {
                    authority,
                    voter: *voter,
                    candidate_id: 1,
                },
            )
            .unwrap();
    }
    ledger
        .apply_call(authority, CallMessage::StartElection { authority })
        .unwrap();
    for voter in &voters {
        ledger
            .apply_call(
                authority,
                CallMessage::AddVoter {
                    authority,
                    voter: *voter,
                },
            )
            .unwrap();
    }

    std::thread::scope(|scope| {
        for chunk in voters.chunks(VOTERS / THREADS) {
            let ledger = &ledger;
            scope.spawn(move || {
                for voter in chunk {
                    ledger
                        .apply_call(
                            *voter,
                            CallMessage::Vote {
                                authority,
                                voter: *voter,
                                candidate_id: 1,
                            },
                        )
                        .unwrap();
                }
            });
        }
    });

    let rohit = ledger
        .query(|registry, ws| registry.get_candidate_details(&authority, 1, ws))
        .unwrap();
    assert_eq!(rohit.vote_count, VOTERS as u64);
    assert_eq!(
        ledger.query(|registry, ws| registry.get_number_of_votes(&authority, ws)),
        Ok(VOTERS as u64)
    );
}
