use ballot_election::CandidateId;
use ballot_election_registry::CallMessage;
use ballot_modules_api::default_context::DefaultContext;
use ballot_modules_api::utils::generate_address;
use ballot_modules_api::Address;

type C = DefaultContext;

/// Produces the calls of the sample election, in the order they are applied.
///
/// Two candidates are added and five voters register for the first one. After the
/// election starts every voter is confirmed; odd-numbered voters change their mind and
/// vote for the second candidate, which therefore wins 3 to 2.
pub struct CallGenerator {
    authority: Address,
    voters: Vec<Address>,
}

impl CallGenerator {
    /// Creates a generator for `number_of_voters` voters.
    pub fn new(number_of_voters: usize) -> Self {
        Self {
            authority: generate_address::<C>("election_authority"),
            voters: (1..=number_of_voters)
                .map(|i| generate_address::<C>(&format!("voter_{i}")))
                .collect(),
        }
    }

    /// The identity that creates and administers the election.
    pub fn authority(&self) -> Address {
        self.authority
    }

    fn setup_election(&self) -> Vec<(Address, CallMessage<C>)> {
        let authority = self.authority;
        let mut messages = vec![(
            authority,
            CallMessage::CreateElection {
                name: "Test Election".to_owned(),
                description: "Test Election Description".to_owned(),
            },
        )];

        for name in ["Rohit", "Disha"] {
            messages.push((
                authority,
                CallMessage::AddCandidate {
                    authority,
                    name: name.to_owned(),
                    img_url: format!("https://example.org/{}.png", name.to_lowercase()),
                    email: format!("{}@example.org", name.to_lowercase()),
                },
            ));
        }

        for voter in &self.voters {
            messages.push((
                authority,
                CallMessage::RegisterVoter {
                    authority,
                    voter: *voter,
                    candidate_id: 1,
                },
            ));
        }

        messages
    }

    fn run_ballot(&self) -> Vec<(Address, CallMessage<C>)> {
        let authority = self.authority;
        let mut messages = vec![(authority, CallMessage::StartElection { authority })];

        for voter in &self.voters {
            messages.push((
                authority,
                CallMessage::AddVoter {
                    authority,
                    voter: *voter,
                },
            ));
        }

        for (number, voter) in (1..).zip(&self.voters) {
            let candidate_id: CandidateId = if number % 2 == 0 { 1 } else { 2 };
            messages.push((
                *voter,
                CallMessage::Vote {
                    authority,
                    voter: *voter,
                    candidate_id,
                },
            ));
        }

        messages.push((authority, CallMessage::EndElection { authority }));
        messages.push((authority, CallMessage::DeclareWinnerCandidate { authority }));
        messages
    }

    /// Every call of the scenario paired with its sender.
    pub fn all_messages(&self) -> Vec<(Address, CallMessage<C>)> {
        let mut messages = self.setup_election();
        messages.extend(self.run_ballot());
        messages
    }
}
