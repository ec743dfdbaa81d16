//! Answer evaluation command

use kpiscore_core::{error::Result, Language};
use std::path::PathBuf;

use super::helpers::{build_engine, get_pattern_path, load_config};

/// Handle answer evaluation command
#[allow(clippy::too_many_arguments)]
pub async fn handle(
    answer: String,
    kpis: Vec<String>,
    language: Option<Language>,
    criteria: Vec<String>,
    local: bool,
    format: String,
    config_path: Option<PathBuf>,
    pattern_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config(config_path.as_deref())?;
    let pattern_path = get_pattern_path(pattern_path, &config);
    let engine = build_engine(&config, &pattern_path, local)?;

    let language = language.unwrap_or(config.default_language);
    let criteria = (!criteria.is_empty()).then_some(criteria.as_slice());

    let result = engine.evaluate(&answer, &kpis, language, criteria).await;

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("Score: {}/3", result.score);
        println!("Detected: {}", display_list(&result.detected_kpis));
        println!("Missing:  {}", display_list(&result.missing_kpis));
        println!();
        println!("{}", result.feedback);
    }

    Ok(())
}

fn display_list(items: &[String]) -> String {
    if items.is_empty() {
        "-".to_string()
    } else {
        items.join(", ")
    }
}
