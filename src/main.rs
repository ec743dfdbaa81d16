//! Kpiscore - KPI detection and scoring for exam practice answers
//!
//! Command-line front end for the evaluation engine: grade an answer,
//! train the local pattern store from curated examples, and inspect the
//! learned model.

use anyhow::Context;
use clap::{Parser, Subcommand};
use kpiscore_core::Language;
use std::path::PathBuf;
use tracing::{debug, Level};
use tracing_subscriber::{self, EnvFilter};

mod cli;

#[derive(Parser)]
#[command(name = "kpiscore")]
#[command(about = "KPI detection and scoring for certification-exam practice answers", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Set log level
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Configuration file (TOML)
    #[arg(short, long, env = "KPISCORE_CONFIG")]
    config: Option<PathBuf>,

    /// Pattern store path (overrides KPISCORE_PATTERNS_PATH and the config file)
    #[arg(long)]
    patterns: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate an answer against a list of KPIs
    Evaluate {
        /// Answer text
        #[arg(short, long)]
        answer: String,

        /// KPI name (repeat for each KPI)
        #[arg(short, long = "kpi", required = true)]
        kpis: Vec<String>,

        /// Feedback language (fi|en); defaults to the configured language
        #[arg(short = 'L', long)]
        language: Option<Language>,

        /// Additional evaluation criterion for the remote evaluator (repeatable)
        #[arg(long = "criterion")]
        criteria: Vec<String>,

        /// Skip the remote evaluator
        #[arg(long)]
        local: bool,

        /// Output format (text|json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Train the pattern store from a JSON file of curated examples
    Train {
        /// Input file with sample_answers and training_examples
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Show learned model status
    Status {
        /// Number of most frequent fragments to list
        #[arg(long, default_value = "10")]
        top: usize,
    },

    /// Configuration management
    Config {
        #[command(subcommand)]
        action: cli::config::ConfigAction,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let level = match cli.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    // Use the requested level for our crates, WARN for HTTP internals
    let filter = EnvFilter::new(format!(
        "kpiscore={level},kpiscore_core={level},reqwest=warn,hyper=warn",
        level = level.as_str().to_lowercase()
    ));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr) // Write logs to stderr, not stdout
        .init();

    debug!("Kpiscore v{} starting...", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Commands::Evaluate {
            answer,
            kpis,
            language,
            criteria,
            local,
            format,
        } => cli::evaluate::handle(
            answer,
            kpis,
            language,
            criteria,
            local,
            format,
            cli.config,
            cli.patterns,
        )
        .await
        .context("evaluation failed")?,
        Commands::Train { input } => cli::train::handle(input, cli.config, cli.patterns)
            .await
            .context("training failed")?,
        Commands::Status { top } => cli::status::handle(top, cli.config, cli.patterns)
            .await
            .context("status failed")?,
        Commands::Config { action } => cli::config::handle(action, cli.config)
            .await
            .context("config command failed")?,
    }

    Ok(())
}
