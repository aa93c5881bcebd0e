mod helpers;

use ballot_election::{CallMessage, ElectionError, ElectionSettings, Phase};
use ballot_modules_api::Context;
use helpers::*;

#[test]
fn end_to_end_election_declares_candidate_two() {
    let (election, authority, mut working_set) = setup(ElectionSettings::default());
    let voters: Vec<_> = (1..=5).map(|i| address(&format!("voter_{i}"))).collect();

    for name in ["Rohit", "Disha"] {
        let (result, ws) = apply(&election, add_candidate(name), &authority, working_set);
        result.unwrap();
        working_set = ws;
    }
    for voter in &voters {
        let message = CallMessage::RegisterVoter {
            voter: *voter,
            candidate_id: 1,
        };
        let (result, ws) = apply(&election, message, &authority, working_set);
        result.unwrap();
        working_set = ws;
    }

    let (result, ws) = apply(&election, CallMessage::StartElection, &authority, working_set);
    result.unwrap();
    working_set = ws;

    for voter in &voters {
        let message = CallMessage::AddVoter { voter: *voter };
        let (result, ws) = apply(&election, message, &authority, working_set);
        result.unwrap();
        working_set = ws;
    }

    // voter_1, voter_3 and voter_5 vote for Disha
    for (number, voter) in (1..).zip(&voters) {
        let candidate_id = if number % 2 == 0 { 1 } else { 2 };
        let message = CallMessage::Vote {
            voter: *voter,
            candidate_id,
        };
        let (result, ws) = apply(&election, message, &C::new(*voter), working_set);
        result.unwrap();
        working_set = ws;
    }

    let (result, ws) = apply(&election, CallMessage::EndElection, &authority, working_set);
    result.unwrap();
    working_set = ws;

    assert_eq!(
        election.declare_winner_candidate(&authority, &mut working_set),
        Ok(2)
    );
    assert_eq!(
        election.get_candidate_details(1, &mut working_set).unwrap().vote_count,
        2
    );
    assert_eq!(
        election.get_candidate_details(2, &mut working_set).unwrap().vote_count,
        3
    );
    assert_eq!(election.get_phase(&mut working_set), Ok(Phase::Ended));
}

#[test]
fn rejected_calls_leave_state_unchanged() {
    let (election, authority, working_set) = setup(ElectionSettings::default());
    let intruder = C::new(address("intruder"));

    let (result, mut working_set) = apply(&election, add_candidate("Eve"), &intruder, working_set);
    assert_eq!(
        result,
        Err(ElectionError::NotAuthorized {
            caller: intruder.sender().to_string()
        })
    );
    assert_eq!(election.get_num_of_candidates(&mut working_set), 0);
    // The election itself survives the rejected call.
    assert_eq!(
        election.get_authority(&mut working_set),
        Ok(*authority.sender())
    );
    assert_eq!(election.get_phase(&mut working_set), Ok(Phase::NotStarted));

    let (result, working_set) = apply(&election, CallMessage::StartElection, &intruder, working_set);
    assert!(matches!(result, Err(ElectionError::NotAuthorized { .. })));

    let (result, mut working_set) =
        apply(&election, CallMessage::EndElection, &authority, working_set);
    assert_eq!(result, Err(ElectionError::ElectionNotStarted));
    assert_eq!(election.get_phase(&mut working_set), Ok(Phase::NotStarted));
    assert!(working_set.events().is_empty());
}

#[test]
fn successful_calls_emit_events() {
    let (election, authority, working_set) = setup(ElectionSettings::default());

    let (result, mut working_set) = apply(&election, add_candidate("Rohit"), &authority, working_set);
    result.unwrap();
    assert!(working_set.events().is_empty());

    election
        .start_election(&authority, &mut working_set)
        .unwrap();
    let keys: Vec<_> = working_set
        .take_events()
        .iter()
        .map(|event| event.key().to_owned())
        .collect();
    assert_eq!(keys, vec!["Election: start_election".to_owned()]);
}
