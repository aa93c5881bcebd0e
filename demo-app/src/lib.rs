#![deny(missing_docs)]
//! Runs a sample election through the [`ElectionRegistry`] hosted by a [`Ledger`].

mod call_generator;

use anyhow::Context as _;
use ballot_election::{CandidateId, ElectionDetailsResponse};
use ballot_election_registry::{ElectionRegistry, ElectionRegistryConfig};
use ballot_ledger::Ledger;
use ballot_modules_api::default_context::DefaultContext;
use ballot_modules_api::{MemoryStorage, ModuleError};
pub use call_generator::CallGenerator;
use tracing::info;

/// Number of voters in the sample election.
pub const NUMBER_OF_VOTERS: usize = 5;

/// The ledger the demo runs against.
pub type DemoLedger = Ledger<ElectionRegistry<DefaultContext>>;

/// What the sample election produced.
#[derive(Debug, Clone, PartialEq)]
pub struct DemoOutcome {
    /// The declared winner.
    pub winner_candidate_id: CandidateId,
    /// Summary of the finished election.
    pub details: ElectionDetailsResponse,
    /// Number of events emitted by all calls.
    pub number_of_events: usize,
}

/// Creates an in-memory ledger hosting the registry and applies its genesis.
pub fn new_demo_ledger(genesis: &ElectionRegistryConfig) -> Result<DemoLedger, ModuleError> {
    let ledger = Ledger::new(MemoryStorage::new(), ElectionRegistry::default());
    ledger.genesis(genesis)?;
    Ok(ledger)
}

/// Applies every call of the sample election and reads back the result.
pub fn run_demo_election(ledger: &DemoLedger) -> anyhow::Result<DemoOutcome> {
    let generator = CallGenerator::new(NUMBER_OF_VOTERS);
    let authority = generator.authority();

    let mut number_of_events = 0;
    for (sender, msg) in generator.all_messages() {
        let events = ledger
            .apply_call(sender, msg)
            .with_context(|| format!("Call from {sender} was rejected"))?;
        number_of_events += events.len();
    }

    let winner_candidate_id = ledger
        .query(|registry, ws| registry.get_winner_candidate_id(&authority, ws))?
        .context("Election ended without a winner")?;
    let details = ledger.query(|registry, ws| registry.get_election_details(&authority, ws))?;

    info!(
        winner = winner_candidate_id,
        votes = details.number_of_votes,
        "Sample election finished"
    );

    Ok(DemoOutcome {
        winner_candidate_id,
        details,
        number_of_events,
    })
}
