//! Shared helper functions for CLI commands

use kpiscore_core::{error::Result, EngineConfig, EvaluationEngine, PatternStore};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Load the engine configuration from an optional TOML path
pub fn load_config(config_path: Option<&Path>) -> Result<EngineConfig> {
    let config = EngineConfig::load(config_path)?;
    debug!(
        "Configuration loaded (remote enabled: {}, credential: {})",
        config.remote.enabled,
        config.remote.has_credential()
    );
    Ok(config)
}

/// Pattern store path from CLI arg, env var, config, or default
pub fn get_pattern_path(cli_path: Option<PathBuf>, config: &EngineConfig) -> PathBuf {
    cli_path
        .or_else(|| std::env::var("KPISCORE_PATTERNS_PATH").ok().map(PathBuf::from))
        .unwrap_or_else(|| config.pattern_store_path())
}

/// Build an engine primed with the persisted pattern store
pub fn build_engine(
    config: &EngineConfig,
    pattern_path: &Path,
    local_only: bool,
) -> Result<EvaluationEngine> {
    let store = PatternStore::load_or_default(pattern_path)?;
    let engine = if local_only || !config.remote.enabled {
        EvaluationEngine::local_only()
    } else {
        EvaluationEngine::new(config)?
    };
    Ok(engine.with_pattern_store(store))
}
