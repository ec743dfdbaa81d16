//! Local KPI detection
//!
//! Each target KPI is tried against four heuristics in order; the first one
//! that fires decides. All tests are raw, case-insensitive substring checks
//! with no word boundaries: "lead" matches "leader" and also "misleading".
//! That trade of precision for recall is deliberate and must stay.
//!
//! 1. exact: the whole KPI name occurs in the answer
//! 2. partial words: at least ceil(60%) of the KPI name's words (length > 2) occur
//! 3. synonym: any synonym of the KPI's canonical key occurs
//! 4. learned pattern: any fragment learned for this exact KPI name occurs

use crate::evaluation::patterns::PatternStore;
use crate::evaluation::synonyms::SynonymTable;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// KPI-name words must be strictly longer than this to count
const MIN_KPI_WORD_CHARS: usize = 2;

/// Which heuristic detected a KPI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchRule {
    Exact,
    PartialWords,
    Synonym,
    LearnedPattern,
}

impl fmt::Display for MatchRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchRule::Exact => write!(f, "exact"),
            MatchRule::PartialWords => write!(f, "partial_words"),
            MatchRule::Synonym => write!(f, "synonym"),
            MatchRule::LearnedPattern => write!(f, "learned_pattern"),
        }
    }
}

/// Network-free KPI detector over a synonym table and learned patterns
pub struct LocalDetector<'a> {
    synonyms: &'a SynonymTable,
    patterns: &'a PatternStore,
}

impl<'a> LocalDetector<'a> {
    pub fn new(synonyms: &'a SynonymTable, patterns: &'a PatternStore) -> Self {
        Self { synonyms, patterns }
    }

    /// Target KPIs judged present, in input order
    pub fn detect(&self, answer: &str, target_kpis: &[String]) -> Vec<String> {
        let answer = answer.to_lowercase();
        target_kpis
            .iter()
            .filter(|kpi| {
                let rule = self.match_rule_lowered(&answer, kpi);
                debug!(kpi = %kpi, rule = ?rule, "KPI detection");
                rule.is_some()
            })
            .cloned()
            .collect()
    }

    /// First heuristic that detects `kpi_name` in `answer`, if any
    pub fn match_rule(&self, answer: &str, kpi_name: &str) -> Option<MatchRule> {
        self.match_rule_lowered(&answer.to_lowercase(), kpi_name)
    }

    fn match_rule_lowered(&self, answer: &str, kpi_name: &str) -> Option<MatchRule> {
        if kpi_name.trim().is_empty() {
            return None;
        }
        let kpi_lower = kpi_name.to_lowercase();

        if exact_match(answer, &kpi_lower) {
            Some(MatchRule::Exact)
        } else if partial_word_match(answer, &kpi_lower) {
            Some(MatchRule::PartialWords)
        } else if self.synonym_match(answer, kpi_name) {
            Some(MatchRule::Synonym)
        } else if self.learned_match(answer, kpi_name) {
            Some(MatchRule::LearnedPattern)
        } else {
            None
        }
    }

    fn synonym_match(&self, answer: &str, kpi_name: &str) -> bool {
        self.synonyms
            .synonyms_for(kpi_name)
            .iter()
            .any(|synonym| answer.contains(synonym))
    }

    fn learned_match(&self, answer: &str, kpi_name: &str) -> bool {
        self.patterns
            .patterns_for(kpi_name)
            .iter()
            .any(|fragment| answer.contains(fragment.as_str()))
    }
}

/// Both arguments already lowercased
pub(crate) fn exact_match(answer: &str, kpi_lower: &str) -> bool {
    answer.contains(kpi_lower)
}

/// Both arguments already lowercased. A name without qualifying words never
/// matches by this rule.
pub(crate) fn partial_word_match(answer: &str, kpi_lower: &str) -> bool {
    let words: Vec<&str> = kpi_lower
        .split_whitespace()
        .filter(|w| w.chars().count() > MIN_KPI_WORD_CHARS)
        .collect();
    if words.is_empty() {
        return false;
    }

    let matched = words.iter().filter(|w| answer.contains(*w)).count();
    matched >= required_word_matches(words.len())
}

/// ceil(0.6 × n) in integer arithmetic
pub(crate) fn required_word_matches(word_count: usize) -> usize {
    (word_count * 3).div_ceil(5)
}
