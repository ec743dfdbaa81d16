//! Model status command

use kpiscore_core::error::Result;
use std::path::PathBuf;

use super::helpers::{build_engine, get_pattern_path, load_config};

/// Handle model status command
pub async fn handle(
    top: usize,
    config_path: Option<PathBuf>,
    pattern_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config(config_path.as_deref())?;
    let pattern_path = get_pattern_path(pattern_path, &config);
    let engine = build_engine(&config, &pattern_path, true)?;

    let status = engine.model_status().await;

    println!("Pattern store:       {}", pattern_path.display());
    println!("Trained:             {}", status.is_trained);
    println!("General fragments:   {}", status.patterns_count);
    println!("KPIs with patterns:  {}", status.learned_kpi_count);
    println!("Feedback templates:  {}", status.feedback_templates_count);
    println!(
        "Remote evaluation:   {}",
        match (config.remote.enabled, config.remote.has_credential()) {
            (false, _) => "disabled",
            (true, false) => "enabled, no API key (local fallback only)",
            (true, true) => "enabled",
        }
    );

    if top > 0 {
        let store = engine.pattern_store();
        let top_patterns = store.read().await.top_general_patterns(top);
        if !top_patterns.is_empty() {
            println!();
            println!("Most frequent fragments:");
            for (fragment, count) in top_patterns {
                println!("  {:>5}  {}", count, fragment);
            }
        }
    }

    Ok(())
}
