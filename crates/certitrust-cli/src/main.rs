//! CertiTrust CLI — Employer-side credential verification.
//!
//! Subcommands: init, verify, batch, list, issue, session.

mod commands;
mod config;
mod context;
mod fixtures;
mod render;
mod session;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use config::CertiTrustConfig;
use context::Context;

/// CertiTrust — Verify learner credentials with gated disclosure.
#[derive(Parser, Debug)]
#[command(name = "certitrust", version, about, long_about = None)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, global = true, default_value = "certitrust.toml")]
    config: PathBuf,

    /// Override the credential fixture file.
    #[arg(long, global = true)]
    fixtures: Option<PathBuf>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Print results as JSON.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Write a default configuration file.
    Init(commands::init::InitArgs),
    /// Verify one credential by id or wallet address.
    Verify(commands::verify::VerifyArgs),
    /// Triage a comma-separated list of credential ids.
    Batch(commands::batch::BatchArgs),
    /// List credential ids and holders.
    List(commands::list::ListArgs),
    /// Issue a credential into the store (saved when a fixture file is set).
    Issue(commands::issue::IssueArgs),
    /// Run an interactive verification session on stdin.
    Session(commands::session::SessionArgs),
}

fn init_tracing(config: &CertiTrustConfig, override_level: Option<&str>) {
    let level = override_level.unwrap_or(&config.logging.level);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    // Logs go to stderr so results on stdout stay machine-readable.
    if config.logging.is_json() {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_writer(std::io::stderr)
            .init();
    }
}

/// Resolve the effective configuration for `cli`.
///
/// `init` never reads the existing file: it must be able to replace one
/// that no longer parses.
fn effective_config(cli: &Cli) -> anyhow::Result<CertiTrustConfig> {
    let mut config = match cli.command {
        Commands::Init(_) => CertiTrustConfig::default(),
        _ => CertiTrustConfig::load(&cli.config)?,
    };
    if let Some(ref fixtures) = cli.fixtures {
        config.store.fixtures = Some(fixtures.clone());
    }
    if cli.json {
        config.output.json = true;
    }
    Ok(config)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = effective_config(&cli)?;
    init_tracing(&config, cli.log_level.as_deref());

    if let Commands::Init(args) = &cli.command {
        return commands::init::run(args, &cli.config);
    }
    tracing::debug!(config = %cli.config.display(), "configuration loaded");

    let ctx = Context {
        store: fixtures::load_store(config.store.fixtures.as_deref())?,
        fixtures: config.store.fixtures.clone(),
        json: config.output.json,
    };

    match &cli.command {
        Commands::Init(_) => Ok(()),
        Commands::Verify(args) => commands::verify::run(args, &ctx),
        Commands::Batch(args) => commands::batch::run(args, &ctx),
        Commands::List(args) => commands::list::run(args, &ctx),
        Commands::Issue(args) => commands::issue::run(args, &ctx),
        Commands::Session(args) => commands::session::run(args, &ctx),
    }
}
