//! Kpiscore - KPI Detection and Scoring Engine
//!
//! Grades free-text answers to certification-exam practice prompts by
//! detecting which Key Performance Indicator (KPI) concepts they contain:
//! - Remote language-model evaluation with retry and backoff
//! - Deterministic local fallback (exact, partial-word, synonym, learned-pattern)
//! - 0–3 scoring with Finnish or English coaching feedback
//! - Pattern learning from curated training examples
//!
//! # Architecture
//!
//! - **Types**: Core data structures (EvaluationResult, Language, training inputs)
//! - **Evaluation**: Local detection, scoring, feedback, training, orchestration
//! - **Services**: Remote chat-completion evaluator and prompt construction
//!
//! # Example
//!
//! ```ignore
//! use kpiscore_core::{EngineConfig, EvaluationEngine, Language};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = EngineConfig::load(None)?;
//!     let engine = EvaluationEngine::new(&config)?;
//!
//!     let result = engine
//!         .evaluate(
//!             "I lead cross-functional teams and resolve conflicts daily",
//!             &["leadership".to_string(), "teamwork".to_string()],
//!             Language::En,
//!             None,
//!         )
//!         .await;
//!
//!     println!("{} / 3: {}", result.score, result.feedback);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod evaluation;
pub mod services;
pub mod types;

// Re-export commonly used types
pub use config::{EngineConfig, RemoteConfig};
pub use error::{KpiError, Result};
pub use evaluation::{EvaluationEngine, MatchRule, PatternStore};
pub use services::{LlmEvaluator, RemoteEvaluation};
pub use types::{
    EvaluationResult, Language, ModelStatus, SampleAnswer, TrainingExample, TrainingReport,
};
