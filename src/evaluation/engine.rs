//! Evaluation orchestrator
//!
//! `evaluate` always tries the remote evaluator first and falls back to the
//! local path (detector → scorer → feedback) on any remote failure,
//! including a missing credential, exhausted retries, or an elapsed
//! deadline. It never returns an error.

use crate::config::EngineConfig;
use crate::error::Result;
use crate::evaluation::detector::LocalDetector;
use crate::evaluation::patterns::PatternStore;
use crate::evaluation::scoring::{score, FeedbackGenerator};
use crate::evaluation::synonyms::SynonymTable;
use crate::evaluation::trainer::Trainer;
use crate::services::llm::{LlmEvaluator, RemoteEvaluation};
use crate::types::{EvaluationResult, Language, ModelStatus, SampleAnswer, TrainingExample, TrainingReport};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// Public entry point: evaluation, training and status
pub struct EvaluationEngine {
    remote: Option<Arc<dyn RemoteEvaluation>>,
    remote_deadline: Option<Duration>,
    patterns: Arc<RwLock<PatternStore>>,
    synonyms: &'static SynonymTable,
    feedback: FeedbackGenerator,
    trainer: Trainer,
}

impl EvaluationEngine {
    /// Build an engine from configuration
    ///
    /// The remote evaluator is created whenever it is enabled, even without a
    /// credential; each call then fails fast with a configuration error and
    /// falls back locally.
    pub fn new(config: &EngineConfig) -> Result<Self> {
        let mut engine = Self::local_only();

        if config.remote.enabled {
            let evaluator = LlmEvaluator::new(config.remote.clone())?;
            engine.remote = Some(Arc::new(evaluator));
            engine.remote_deadline = config.remote.deadline();
        } else {
            debug!("Remote evaluation disabled by configuration");
        }

        Ok(engine)
    }

    /// Engine that never leaves the process
    pub fn local_only() -> Self {
        Self {
            remote: None,
            remote_deadline: None,
            patterns: Arc::new(RwLock::new(PatternStore::new())),
            synonyms: SynonymTable::builtin(),
            feedback: FeedbackGenerator::new(),
            trainer: Trainer::new(),
        }
    }

    /// Replace the remote evaluator
    pub fn with_remote(mut self, remote: Arc<dyn RemoteEvaluation>) -> Self {
        self.remote = Some(remote);
        self
    }

    /// Bound the whole remote attempt sequence
    pub fn with_remote_deadline(mut self, deadline: Duration) -> Self {
        self.remote_deadline = Some(deadline);
        self
    }

    /// Start from previously learned patterns
    pub fn with_pattern_store(mut self, store: PatternStore) -> Self {
        self.patterns = Arc::new(RwLock::new(store));
        self
    }

    /// Shared handle to the learned patterns
    pub fn pattern_store(&self) -> Arc<RwLock<PatternStore>> {
        Arc::clone(&self.patterns)
    }

    /// Evaluate an answer; always returns a well-formed result
    pub async fn evaluate(
        &self,
        answer_text: &str,
        target_kpis: &[String],
        language: Language,
        extra_criteria: Option<&[String]>,
    ) -> EvaluationResult {
        let extra_criteria = extra_criteria.unwrap_or(&[]);

        if let Some(remote) = &self.remote {
            let call = remote.evaluate_remote(answer_text, target_kpis, language, extra_criteria);
            let outcome = match self.remote_deadline {
                Some(deadline) => match tokio::time::timeout(deadline, call).await {
                    Ok(result) => result,
                    Err(_) => {
                        warn!(
                            "Remote evaluation exceeded {}ms deadline, using local evaluation",
                            deadline.as_millis()
                        );
                        return self.evaluate_local(answer_text, target_kpis, language).await;
                    }
                },
                None => call.await,
            };

            match outcome {
                Ok(result) => return result,
                Err(e) => warn!("Remote evaluation unavailable ({}), using local evaluation", e),
            }
        }

        self.evaluate_local(answer_text, target_kpis, language).await
    }

    /// Deterministic, network-free evaluation
    pub async fn evaluate_local(
        &self,
        answer_text: &str,
        target_kpis: &[String],
        language: Language,
    ) -> EvaluationResult {
        let patterns = self.patterns.read().await;
        let detector = LocalDetector::new(self.synonyms, &patterns);
        let detected_kpis = detector.detect(answer_text, target_kpis);
        drop(patterns);

        let missing_kpis: Vec<String> = target_kpis
            .iter()
            .filter(|kpi| !detected_kpis.contains(kpi))
            .cloned()
            .collect();

        let score = score(detected_kpis.len());
        let feedback = self
            .feedback
            .feedback(&detected_kpis, &missing_kpis, score, language);

        info!(
            detected = detected_kpis.len(),
            missing = missing_kpis.len(),
            score,
            "Local evaluation complete"
        );

        EvaluationResult {
            detected_kpis,
            missing_kpis,
            score,
            feedback,
        }
    }

    /// Update learned patterns; runs hold the store's write lock throughout
    pub async fn train(
        &self,
        samples: &[SampleAnswer],
        examples: &[TrainingExample],
    ) -> TrainingReport {
        let mut patterns = self.patterns.write().await;
        self.trainer.train(&mut patterns, samples, examples)
    }

    /// Read-only snapshot of the learned model
    pub async fn model_status(&self) -> ModelStatus {
        let patterns = self.patterns.read().await;
        ModelStatus {
            is_trained: patterns.is_trained(),
            patterns_count: patterns.general_pattern_count(),
            learned_kpi_count: patterns.learned_kpi_count(),
            feedback_templates_count: patterns.feedback_template_count(),
        }
    }

    pub fn has_remote(&self) -> bool {
        self.remote.is_some()
    }
}
