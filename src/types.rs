//! Core data types for the KPI evaluation engine
//!
//! These types cross the boundary between the engine and its host: the host
//! resolves KPI identifiers to display names before calling in, and receives
//! an [`EvaluationResult`] back. Training inputs come from an external
//! curation workflow and are only read.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Feedback language
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// Finnish
    #[default]
    Fi,

    /// English
    En,
}

impl Language {
    /// Language name as written into the remote prompt
    pub fn prompt_name(&self) -> &'static str {
        match self {
            Language::Fi => "Finnish",
            Language::En => "English",
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Language::Fi => "fi",
            Language::En => "en",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "fi" | "finnish" | "suomi" => Ok(Language::Fi),
            "en" | "english" => Ok(Language::En),
            other => Err(format!("Unsupported language: {}", other)),
        }
    }
}

/// Outcome of evaluating one answer against a list of KPI names
///
/// On the local path `detected_kpis` and `missing_kpis` partition the
/// requested KPI list, both in request order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub detected_kpis: Vec<String>,
    pub missing_kpis: Vec<String>,

    /// 0..=3
    pub score: u8,
    pub feedback: String,
}

/// Curated sample answer, optionally rated and commented by a curator
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SampleAnswer {
    pub answer_text: String,

    #[serde(default)]
    pub question_id: String,

    #[serde(default)]
    pub quality_rating: Option<u8>,

    /// Curator feedback text; kept as a template when a rating is present
    #[serde(default)]
    pub feedback: Option<String>,
}

/// Labeled training example: the KPIs a curator judged present in the text
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrainingExample {
    pub answer_text: String,

    #[serde(default)]
    pub question_id: String,

    #[serde(default)]
    pub detected_kpis: Vec<String>,

    #[serde(default)]
    pub quality_rating: Option<u8>,
}

/// Read-only snapshot of the learned model
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelStatus {
    pub is_trained: bool,

    /// Distinct fragments in the general frequency counter
    pub patterns_count: usize,

    /// KPIs with at least one learned fragment
    pub learned_kpi_count: usize,

    pub feedback_templates_count: usize,
}

/// Summary of one training run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingReport {
    pub samples_processed: usize,
    pub examples_processed: usize,

    /// Fragments newly attached to some KPI
    pub new_patterns: usize,

    /// Fragments seen by the general counter for the first time
    pub new_general_fragments: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_parsing() {
        assert_eq!("fi".parse::<Language>().unwrap(), Language::Fi);
        assert_eq!("EN".parse::<Language>().unwrap(), Language::En);
        assert_eq!("English".parse::<Language>().unwrap(), Language::En);
        assert!("sv".parse::<Language>().is_err());
    }

    #[test]
    fn test_language_defaults_to_finnish() {
        assert_eq!(Language::default(), Language::Fi);
        assert_eq!(Language::Fi.prompt_name(), "Finnish");
        assert_eq!(Language::En.prompt_name(), "English");
    }

    #[test]
    fn test_training_example_defaults() {
        let example: TrainingExample =
            serde_json::from_str(r#"{"answer_text": "I led the team"}"#).unwrap();
        assert!(example.detected_kpis.is_empty());
        assert!(example.quality_rating.is_none());
    }

    #[test]
    fn test_result_serialization() {
        let result = EvaluationResult {
            detected_kpis: vec!["leadership".to_string()],
            missing_kpis: vec![],
            score: 1,
            feedback: "ok".to_string(),
        };
        let json = serde_json::to_string(&result).unwrap();
        assert!(json.contains("\"detected_kpis\":[\"leadership\"]"));
        assert!(json.contains("\"score\":1"));
    }
}
