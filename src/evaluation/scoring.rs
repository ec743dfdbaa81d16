//! Score rubric and bilingual coaching feedback

use crate::types::Language;

/// Highest score an answer can receive
pub const MAX_SCORE: u8 = 3;

/// Map a detected-KPI count onto the 0..=3 rubric
pub fn score(detected_count: usize) -> u8 {
    match detected_count {
        0 => 0,
        1 => 1,
        2 => 2,
        _ => MAX_SCORE,
    }
}

/// Renders one fixed template per score value, in Finnish or English
#[derive(Debug, Clone, Copy, Default)]
pub struct FeedbackGenerator;

impl FeedbackGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Number of built-in templates (four scores, two languages)
    pub fn template_count(&self) -> usize {
        (MAX_SCORE as usize + 1) * 2
    }

    /// Coaching message for a scored answer.
    ///
    /// Never indexes into the lists, so empty inputs are safe for every score.
    pub fn feedback(
        &self,
        detected: &[String],
        missing: &[String],
        score: u8,
        language: Language,
    ) -> String {
        let all_detected = detected.join(", ");
        let first_detected = detected.first().map(String::as_str).unwrap_or_default();
        let missing_two = join_first(missing, 2);
        let missing_three = join_first(missing, 3);

        match (score.min(MAX_SCORE), language) {
            (3, Language::En) => format!(
                "Excellent answer! You demonstrated all the key competencies: {}.",
                all_detected
            ),
            (3, Language::Fi) => format!(
                "Erinomainen vastaus! Osoitit kaikki keskeiset osaamiset: {}.",
                all_detected
            ),
            (2, Language::En) => with_followup(
                format!("Good effort! You covered {}.", all_detected),
                "To strengthen your answer, also address",
                &missing_two,
            ),
            (2, Language::Fi) => with_followup(
                format!("Hyvä yritys! Käsittelit seuraavat: {}.", all_detected),
                "Vahvista vastaustasi huomioimalla myös",
                &missing_two,
            ),
            (1, Language::En) => with_followup(
                format!("Good start! You touched on {}.", first_detected),
                "Consider expanding on",
                &missing_two,
            ),
            (1, Language::Fi) => with_followup(
                format!("Hyvä alku! Mainitsit aiheen {}.", first_detected),
                "Harkitse vastauksen laajentamista aiheisiin",
                &missing_two,
            ),
            (_, Language::En) => with_followup(
                "Your answer needs improvement.".to_string(),
                "Focus on",
                &missing_three,
            ),
            (_, Language::Fi) => with_followup(
                "Vastauksesi kaipaa parannusta.".to_string(),
                "Keskity seuraaviin",
                &missing_three,
            ),
        }
    }
}

fn join_first(items: &[String], n: usize) -> String {
    items
        .iter()
        .take(n)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

fn with_followup(lead: String, prompt: &str, items: &str) -> String {
    if items.is_empty() {
        lead
    } else {
        format!("{} {}: {}.", lead, prompt, items)
    }
}
