//! Configuration management command

use clap::Subcommand;
use kpiscore_core::{config::default_pattern_store_path, error::Result, EngineConfig};
use std::path::PathBuf;

use super::helpers::load_config;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Write a default configuration file
    Init {
        /// Destination path
        #[arg(long, default_value = "kpiscore.toml")]
        path: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Show the effective configuration (API key redacted)
    Show,
}

/// Handle configuration management command
pub async fn handle(action: ConfigAction, config_path: Option<PathBuf>) -> Result<()> {
    match action {
        ConfigAction::Init { path, force } => {
            if path.exists() && !force {
                eprintln!(
                    "{} already exists (use --force to overwrite)",
                    path.display()
                );
                return Ok(());
            }

            let config = EngineConfig {
                pattern_store_path: Some(default_pattern_store_path()),
                ..Default::default()
            };
            config.to_file(&path)?;
            println!("Wrote default configuration to {}", path.display());
            Ok(())
        }
        ConfigAction::Show => {
            let mut config = load_config(config_path.as_deref())?;
            let has_key = config.remote.has_credential();
            config.remote.api_key.clear();

            let rendered = toml::to_string_pretty(&config)
                .map_err(|e| kpiscore_core::KpiError::Config(e.to_string()))?;
            println!("{}", rendered);
            println!(
                "# API key: {}",
                if has_key { "configured" } else { "not set" }
            );
            Ok(())
        }
    }
}
