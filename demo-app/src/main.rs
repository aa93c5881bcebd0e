//! Loads the ledger configuration and runs the sample election.

use anyhow::Context;
use ballot_demo_app::{new_demo_ledger, run_demo_election};
use ballot_election_registry::ElectionRegistryConfig;
use ballot_ledger::{from_toml_path, init_tracing, LedgerConfig};
use clap::Parser;
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// The path to the ledger config.
    #[arg(long, default_value = "demo_config.toml")]
    config: String,
}

fn main() -> Result<(), anyhow::Error> {
    let args = Args::parse();

    let config: LedgerConfig<ElectionRegistryConfig> =
        from_toml_path(&args.config).context("Failed to read ledger configuration")?;
    init_tracing(&config.tracing)?;
    info!("Read ledger config from {:?}", args.config);

    let ledger = new_demo_ledger(&config.genesis)?;
    let outcome = run_demo_election(&ledger)?;

    println!("{}", serde_json::to_string_pretty(&outcome.details)?);
    info!(
        "Candidate {} won the election ({} events emitted)",
        outcome.winner_candidate_id, outcome.number_of_events
    );
    Ok(())
}
