//! This binary deploys the VotingLogic module, submits transaction batches to it
//! and queries its state. State is kept in the file named by the storage config
//! between invocations.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;
use sov_modules_api::default_context::DefaultContext;
use sov_modules_api::{Address, ModuleCallJsonSchema};
use sov_state::{InMemoryStorage, Storage};
use sov_voting::VotingLogic;
use tracing::info;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};
use voting_system::{from_toml_path, Transaction, VotingSystem, VotingSystemConfig};

type C = DefaultContext;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// The path to the voting system config.
    #[arg(long, default_value = "voting_config.toml")]
    config_path: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Deploy the module with the configured deployer as admin
    Deploy,
    /// Apply a batch of transactions read from a JSON file
    Submit {
        /// The expected format of the file contents is: [{"sender": "sov1...", "call": {"Vote": {"candidate": "sov1..."}}}]
        #[arg(long)]
        txs: PathBuf,
    },
    /// Read the state of the module
    #[command(subcommand)]
    Query(Query),
    /// Print the JSON schema of the call messages
    Schema,
}

#[derive(Subcommand, Debug)]
enum Query {
    /// The record of a candidate
    Candidate { address: Address },
    /// The current voting status
    Status {
        /// Print the numeric code (0 = Closed, 1 = Open) instead of the name.
        #[arg(long)]
        numeric: bool,
    },
    /// The candidate with the most votes
    Leader,
    /// The record of the leading candidate
    Winner,
    /// All candidates in registration order
    Results {
        /// Must be the admin.
        #[arg(long)]
        caller: Address,
    },
    /// The admin of the module
    Admin,
    /// Whether an address already voted
    HasVoted { address: Address },
    /// The number of accepted votes
    TotalVotes,
}

fn main() -> Result<(), anyhow::Error> {
    let args = Args::parse();

    match args.command {
        // The schema does not depend on any deployment.
        Command::Schema => print_schema(),
        command => run(&args.config_path, command)?,
    }

    Ok(())
}

fn run(config_path: &Path, command: Command) -> Result<(), anyhow::Error> {
    let config: VotingSystemConfig = from_toml_path(config_path).with_context(|| {
        format!(
            "Failed to read voting system configuration from {}",
            config_path.display()
        )
    })?;

    // Logs go to stderr, stdout carries the command output.
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.logging.filter))
        .context("Invalid log filter")?;
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let state_path = config.storage.path.clone();
    info!("Loading state from {}", state_path.display());
    let storage = InMemoryStorage::with_config(config.storage)
        .with_context(|| format!("Failed to load state from {}", state_path.display()))?;
    let system = VotingSystem::<C>::new(config.deployment.module_name.clone(), storage);

    match command {
        Command::Deploy => {
            let state_root = system.deploy(&config.deployment.deployer)?;
            system.storage().save(&state_path)?;
            println!("Deployed {}", system.module_name());
            println!("state root: 0x{}", hex::encode(state_root));
        }
        Command::Submit { txs } => {
            anyhow::ensure!(
                system.is_deployed(),
                "{} is not deployed",
                system.module_name()
            );
            let contents = std::fs::read_to_string(&txs)
                .with_context(|| format!("Failed to read transactions from {}", txs.display()))?;
            let batch: Vec<Transaction<C>> = serde_json::from_str(&contents)?;
            let receipt = system.apply_batch(batch)?;
            system.storage().save(&state_path)?;
            print_json(&receipt)?;
        }
        Command::Query(query) => run_query(&system, query)?,
        Command::Schema => print_schema(),
    }

    Ok(())
}

fn print_schema() {
    println!("{}", VotingLogic::<C>::json_schema());
}

fn run_query(system: &VotingSystem<C>, query: Query) -> Result<(), anyhow::Error> {
    match query {
        Query::Candidate { address } => {
            print_json(&system.query(|voting, ws| voting.get_candidate(&address, ws)))
        }
        Query::Status { numeric } => {
            let status = system.query(|voting, ws| voting.current_status(ws));
            if numeric {
                print_json(&u8::from(status))
            } else {
                print_json(&status)
            }
        }
        Query::Leader => print_json(&system.query(|voting, ws| voting.current_leader(ws))),
        Query::Winner => print_json(&system.query(|voting, ws| voting.get_winner(ws))?),
        Query::Results { caller } => {
            print_json(&system.query(|voting, ws| voting.get_all_results(&caller, ws))?)
        }
        Query::Admin => print_json(&system.query(|voting, ws| voting.admin(ws))),
        Query::HasVoted { address } => {
            print_json(&system.query(|voting, ws| voting.has_voted(&address, ws)))
        }
        Query::TotalVotes => print_json(&system.query(|voting, ws| voting.total_votes(ws))),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<(), anyhow::Error> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
