//! KPI detection, scoring and pattern learning.
//!
//! Answers are evaluated against a list of KPI display names. The
//! [`EvaluationEngine`] asks a remote language model first and falls back to
//! a deterministic local path whenever the remote side is unavailable.
//!
//! # Architecture
//!
//! - **SynonymTable**: static bilingual KPI-fragment → synonym mapping
//! - **PhraseExtractor**: words and 2–4 word phrases from free text
//! - **PatternStore**: learned KPI → fragment associations
//! - **LocalDetector**: exact, partial-word, synonym and learned-pattern checks
//! - **Scorer / FeedbackGenerator**: 0–3 rubric and Finnish/English coaching text
//! - **Trainer**: batch updates of the pattern store from curated examples
//!
//! # Usage
//!
//! ```rust,no_run
//! use kpiscore_core::evaluation::EvaluationEngine;
//! use kpiscore_core::Language;
//!
//! # async fn example() {
//! let engine = EvaluationEngine::local_only();
//! let kpis = vec!["leadership".to_string(), "teamwork".to_string()];
//!
//! let result = engine
//!     .evaluate("I lead cross-functional teams", &kpis, Language::En, None)
//!     .await;
//! assert_eq!(result.score, 2);
//! # }
//! ```

pub mod detector;
pub mod engine;
pub mod patterns;
pub mod phrases;
pub mod scoring;
pub mod synonyms;
pub mod trainer;

pub use detector::{LocalDetector, MatchRule};
pub use engine::EvaluationEngine;
pub use patterns::PatternStore;
pub use phrases::PhraseExtractor;
pub use scoring::{score, FeedbackGenerator, MAX_SCORE};
pub use synonyms::SynonymTable;
pub use trainer::Trainer;
