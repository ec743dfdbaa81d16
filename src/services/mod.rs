//! Services layer for the KPI evaluation engine
//!
//! Provides the remote language-model evaluator and its prompt construction.

pub mod llm;
pub mod prompts;

pub use llm::{LlmEvaluator, RemoteEvaluation, NO_FEEDBACK};
