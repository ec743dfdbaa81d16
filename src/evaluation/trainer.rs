//! Batch training of the pattern store from curated examples
//!
//! Sample answers feed the general frequency counter (and, when rated and
//! commented, the feedback template list). Labeled training examples attach
//! every extracted fragment of their text to each labeled KPI.
//!
//! A run holds exclusive access to the store from start to finish; callers
//! sharing a store serialize runs through its write lock.

use crate::evaluation::patterns::PatternStore;
use crate::evaluation::phrases::PhraseExtractor;
use crate::types::{SampleAnswer, TrainingExample, TrainingReport};
use tracing::{debug, info};

/// Updates a [`PatternStore`] from curated inputs
#[derive(Debug, Clone, Copy, Default)]
pub struct Trainer {
    extractor: PhraseExtractor,
}

impl Trainer {
    pub fn new() -> Self {
        Self {
            extractor: PhraseExtractor::new(),
        }
    }

    /// Run one training pass and mark the store as trained
    pub fn train(
        &self,
        store: &mut PatternStore,
        samples: &[SampleAnswer],
        examples: &[TrainingExample],
    ) -> TrainingReport {
        let mut report = TrainingReport::default();

        for sample in samples {
            for fragment in self.extractor.fragments(&sample.answer_text) {
                if store.record_general(&fragment) {
                    report.new_general_fragments += 1;
                }
            }

            if let (Some(rating), Some(feedback)) = (sample.quality_rating, &sample.feedback) {
                store.add_feedback_template(rating, feedback);
            }

            report.samples_processed += 1;
        }

        for example in examples {
            if example.detected_kpis.is_empty() {
                debug!(
                    question_id = %example.question_id,
                    "Training example has no KPI labels, skipping"
                );
                continue;
            }

            let fragments = self.extractor.fragments(&example.answer_text);
            for kpi in &example.detected_kpis {
                let added = fragments
                    .iter()
                    .filter(|fragment| store.add_pattern(kpi, fragment))
                    .count();
                report.new_patterns += added;
            }

            report.examples_processed += 1;
        }

        store.mark_trained();

        info!(
            samples = report.samples_processed,
            examples = report.examples_processed,
            new_patterns = report.new_patterns,
            "Training run complete"
        );

        report
    }
}
