//! Afterdark CLI - operator tooling for the age gate
//!
//! Lets support staff and developers:
//! - Inspect the rating catalog in use
//! - Record, show and forget an age fact
//! - Check access decisions for a rating
//! - Classify content flags into a suggested rating

use std::path::PathBuf;

use afterdark_gate::{AgeGate, GateConfig};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod output;

use commands::{fact, moderation, rating};

/// Afterdark CLI application
#[derive(Parser)]
#[command(name = "afterdark")]
#[command(about = "Afterdark - age verification and content-rating gate", long_about = None)]
#[command(version)]
struct Cli {
    /// Configuration file path (YAML or JSON)
    #[arg(short, long, env = "AFTERDARK_CONFIG")]
    config: Option<PathBuf>,

    /// Age fact file, overriding the configured store path
    #[arg(short, long, env = "AFTERDARK_STORE")]
    store: Option<PathBuf>,

    /// Output format (table, json, yaml)
    #[arg(short, long, default_value = "table")]
    output: output::OutputFormat,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand)]
enum Commands {
    /// List the rating catalog
    Catalog,

    /// Show the stored age fact
    Status {
        /// Evaluation date (defaults to today)
        #[arg(long)]
        as_of: Option<chrono::NaiveDate>,
    },

    /// Record an age fact
    Verify(fact::VerifyArgs),

    /// Check access to a rating
    Check {
        /// Rating id, e.g. PG-13
        rating: String,

        /// Evaluation date (defaults to today)
        #[arg(long)]
        as_of: Option<chrono::NaiveDate>,
    },

    /// List ratings the stored age fact grants access to
    Accessible {
        /// Evaluation date (defaults to today)
        #[arg(long)]
        as_of: Option<chrono::NaiveDate>,
    },

    /// Suggest a rating from content flags
    Classify(moderation::ClassifyArgs),

    /// Forget the stored age fact
    Forget,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = GateConfig::load(cli.config.as_deref())?;
    if let Some(store) = cli.store.clone() {
        config.store.path = store;
    }

    // Initialize tracing
    let level = if cli.verbose {
        "debug".to_string()
    } else {
        config.logging.level.clone()
    };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| level.into());

    if config.logging.json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .without_time()
                    .with_writer(std::io::stderr),
            )
            .init();
    }

    tracing::debug!(
        store = %config.store.path.display(),
        catalog = ?config.catalog,
        "configuration loaded"
    );

    let gate = AgeGate::open(config)?;
    let today = chrono::Utc::now().date_naive();

    match cli.command {
        Commands::Catalog => rating::catalog(&gate, cli.output),
        Commands::Status { as_of } => fact::status(&gate, as_of.unwrap_or(today), cli.output),
        Commands::Verify(args) => fact::verify(&gate, args, today),
        Commands::Check {
            rating: rating_id,
            as_of,
        } => rating::check(&gate, &rating_id, as_of.unwrap_or(today), cli.output),
        Commands::Accessible { as_of } => {
            rating::accessible(&gate, as_of.unwrap_or(today), cli.output)
        }
        Commands::Classify(args) => moderation::classify(&gate, args, cli.output),
        Commands::Forget => fact::forget(&gate),
    }
}
