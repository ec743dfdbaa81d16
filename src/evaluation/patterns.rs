//! Learned KPI → text-fragment associations
//!
//! The store is keyed by KPI *display name*. Renaming a KPI orphans the
//! fragments learned under the old name; the host is expected to pass
//! current names.
//!
//! Fragment lists keep insertion order and never hold the same fragment
//! twice for one KPI, across any number of training runs.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use tracing::{debug, info};

/// Mutable learned state consumed by the local detector
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PatternStore {
    /// KPI name → fragments seen in answers labeled with that KPI
    #[serde(default)]
    learned: BTreeMap<String, Vec<String>>,

    /// Fragment → occurrence count over all sample answers
    #[serde(default)]
    general: HashMap<String, u32>,

    /// Quality rating → curator feedback texts
    #[serde(default)]
    feedback_templates: BTreeMap<u8, Vec<String>>,

    #[serde(default)]
    is_trained: bool,
}

impl PatternStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fragments learned for exactly this KPI name
    pub fn patterns_for(&self, kpi_name: &str) -> &[String] {
        self.learned
            .get(kpi_name)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Attach a fragment to a KPI; returns false if it was already there
    pub fn add_pattern(&mut self, kpi_name: &str, fragment: &str) -> bool {
        let fragment = fragment.to_lowercase();
        let entry = self.learned.entry(kpi_name.to_string()).or_default();
        if entry.iter().any(|existing| *existing == fragment) {
            return false;
        }
        entry.push(fragment);
        true
    }

    /// Bump the general counter; returns true the first time a fragment is seen
    pub fn record_general(&mut self, fragment: &str) -> bool {
        let count = self.general.entry(fragment.to_lowercase()).or_insert(0);
        *count += 1;
        *count == 1
    }

    pub fn general_count(&self, fragment: &str) -> u32 {
        self.general
            .get(&fragment.to_lowercase())
            .copied()
            .unwrap_or(0)
    }

    /// Most frequent general fragments, ties broken alphabetically
    pub fn top_general_patterns(&self, limit: usize) -> Vec<(String, u32)> {
        let mut entries: Vec<(String, u32)> = self
            .general
            .iter()
            .map(|(fragment, count)| (fragment.clone(), *count))
            .collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        entries.truncate(limit);
        entries
    }

    /// Keep a curator feedback text for a rating; returns false on duplicates
    pub fn add_feedback_template(&mut self, rating: u8, text: &str) -> bool {
        let text = text.trim();
        if text.is_empty() {
            return false;
        }
        let templates = self.feedback_templates.entry(rating).or_default();
        if templates.iter().any(|t| t == text) {
            return false;
        }
        templates.push(text.to_string());
        true
    }

    pub fn feedback_templates_for(&self, rating: u8) -> &[String] {
        self.feedback_templates
            .get(&rating)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    pub fn learned_kpi_count(&self) -> usize {
        self.learned.values().filter(|v| !v.is_empty()).count()
    }

    pub fn general_pattern_count(&self) -> usize {
        self.general.len()
    }

    pub fn feedback_template_count(&self) -> usize {
        self.feedback_templates.values().map(|v| v.len()).sum()
    }

    pub fn is_trained(&self) -> bool {
        self.is_trained
    }

    pub(crate) fn mark_trained(&mut self) {
        self.is_trained = true;
    }

    /// Lowercase every stored fragment, merging entries that collide
    fn normalize(&mut self) {
        for fragments in self.learned.values_mut() {
            let mut seen: Vec<String> = Vec::with_capacity(fragments.len());
            for fragment in fragments.drain(..) {
                let fragment = fragment.to_lowercase();
                if !seen.contains(&fragment) {
                    seen.push(fragment);
                }
            }
            *fragments = seen;
        }

        let general = std::mem::take(&mut self.general);
        for (fragment, count) in general {
            *self.general.entry(fragment.to_lowercase()).or_insert(0) += count;
        }
    }

    /// Load a store from JSON
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let mut store: PatternStore = serde_json::from_str(&contents)?;
        store.normalize();
        debug!(
            "Loaded pattern store from {} ({} KPIs)",
            path.display(),
            store.learned_kpi_count()
        );
        Ok(store)
    }

    /// Load a store from JSON, or start empty if the file does not exist
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            debug!("No pattern store at {}, starting empty", path.display());
            Ok(Self::default())
        }
    }

    /// Persist the store as pretty JSON, creating parent directories
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        info!(
            "Saved pattern store to {} ({} KPIs, {} general fragments)",
            path.display(),
            self.learned_kpi_count(),
            self.general_pattern_count()
        );
        Ok(())
    }
}
