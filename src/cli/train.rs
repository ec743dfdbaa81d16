//! Pattern training command

use kpiscore_core::{error::Result, SampleAnswer, TrainingExample};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

use super::helpers::{build_engine, get_pattern_path, load_config};

/// Training input file layout
#[derive(Debug, Default, Deserialize)]
pub struct TrainingInput {
    #[serde(default)]
    pub sample_answers: Vec<SampleAnswer>,

    #[serde(default)]
    pub training_examples: Vec<TrainingExample>,
}

impl TrainingInput {
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }
}

/// Handle pattern training command
pub async fn handle(
    input: PathBuf,
    config_path: Option<PathBuf>,
    pattern_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config(config_path.as_deref())?;
    let pattern_path = get_pattern_path(pattern_path, &config);
    let engine = build_engine(&config, &pattern_path, true)?;

    let data = TrainingInput::from_file(&input)?;
    info!(
        "Training from {} ({} samples, {} examples)",
        input.display(),
        data.sample_answers.len(),
        data.training_examples.len()
    );

    let report = engine
        .train(&data.sample_answers, &data.training_examples)
        .await;

    let store = engine.pattern_store();
    store.read().await.save(&pattern_path)?;

    println!("Samples processed:      {}", report.samples_processed);
    println!("Examples processed:     {}", report.examples_processed);
    println!("New KPI patterns:       {}", report.new_patterns);
    println!("New general fragments:  {}", report.new_general_fragments);
    println!("Saved to {}", pattern_path.display());

    Ok(())
}
