//! Candidate word and phrase extraction for pattern learning
//!
//! Text is lowercased and split on whitespace; each token is stripped of
//! punctuation (letters, digits and inner hyphens survive). Words longer
//! than [`MIN_WORD_CHARS`] characters and 2–4 word phrases longer than
//! [`MIN_PHRASE_CHARS`] characters become candidate fragments.

use std::collections::HashSet;

/// Words must be strictly longer than this (in characters)
pub const MIN_WORD_CHARS: usize = 3;

/// Phrases must be strictly longer than this (in characters)
pub const MIN_PHRASE_CHARS: usize = 5;

/// Shortest and longest phrase, in words
pub const PHRASE_WORDS: std::ops::RangeInclusive<usize> = 2..=4;

/// Splits free text into learnable fragments
#[derive(Debug, Clone, Copy, Default)]
pub struct PhraseExtractor;

impl PhraseExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Normalized tokens, in order, with empty tokens dropped
    pub fn tokens(&self, text: &str) -> Vec<String> {
        text.to_lowercase()
            .split_whitespace()
            .map(|raw| {
                raw.chars()
                    .filter(|c| c.is_alphanumeric() || *c == '-')
                    .collect::<String>()
                    .trim_matches('-')
                    .to_string()
            })
            .filter(|token| !token.is_empty())
            .collect()
    }

    /// Qualifying single words, first occurrence order, deduplicated
    pub fn words(&self, text: &str) -> Vec<String> {
        let mut seen = HashSet::new();
        self.tokens(text)
            .into_iter()
            .filter(|w| w.chars().count() > MIN_WORD_CHARS)
            .filter(|w| seen.insert(w.clone()))
            .collect()
    }

    /// Qualifying 2–4 word phrases, deduplicated
    pub fn phrases(&self, text: &str) -> Vec<String> {
        let tokens = self.tokens(text);
        let mut seen = HashSet::new();
        let mut phrases = Vec::new();

        for start in 0..tokens.len() {
            for len in PHRASE_WORDS {
                let end = start + len;
                if end > tokens.len() {
                    break;
                }
                let phrase = tokens[start..end].join(" ");
                if phrase.chars().count() > MIN_PHRASE_CHARS && seen.insert(phrase.clone()) {
                    phrases.push(phrase);
                }
            }
        }

        phrases
    }

    /// Words followed by phrases, with no fragment repeated
    pub fn fragments(&self, text: &str) -> Vec<String> {
        let mut fragments = self.words(text);
        let mut seen: HashSet<String> = fragments.iter().cloned().collect();
        for phrase in self.phrases(text) {
            if seen.insert(phrase.clone()) {
                fragments.push(phrase);
            }
        }
        fragments
    }
}
