//! Engine configuration
//!
//! Loaded from a TOML file; every field has a default so an empty file is a
//! valid configuration. The remote credential is resolved from the file
//! first, then from `KPISCORE_API_KEY`, then from `OPENAI_API_KEY`.

use crate::error::{KpiError, Result};
use crate::types::Language;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// Environment variables consulted for the remote credential, in order
pub const API_KEY_ENV_VARS: [&str; 2] = ["KPISCORE_API_KEY", "OPENAI_API_KEY"];

/// Top-level engine configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Feedback language when the caller does not pick one
    pub default_language: Language,

    /// Where the learned pattern store is persisted (JSON)
    pub pattern_store_path: Option<PathBuf>,

    /// Remote language-model evaluation settings
    pub remote: RemoteConfig,
}

/// Settings for the remote chat-completion evaluator
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteConfig {
    /// Disable to always evaluate locally
    pub enabled: bool,

    /// Bearer credential; empty means "not configured"
    #[serde(skip_serializing_if = "String::is_empty")]
    pub api_key: String,

    pub model: String,

    /// OpenAI-compatible API root, without the `/chat/completions` suffix
    pub base_url: String,

    /// Sampling temperature, kept low for repeatable grading
    pub temperature: f32,

    pub max_tokens: u32,

    /// Total attempts, including the first
    pub max_attempts: u32,

    /// Delay after attempt n is `backoff_base_ms * 2^n`
    pub backoff_base_ms: u64,

    /// Per-attempt HTTP timeout
    pub request_timeout_secs: u64,

    /// Optional bound on the whole remote attempt sequence
    pub deadline_secs: Option<u64>,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            api_key: String::new(),
            model: "gpt-4o-mini".to_string(),
            base_url: "https://api.openai.com/v1".to_string(),
            temperature: 0.1,
            max_tokens: 1000,
            max_attempts: 3,
            backoff_base_ms: 1000,
            request_timeout_secs: 30,
            deadline_secs: None,
        }
    }
}

impl RemoteConfig {
    /// Whether a credential is present; never touches the network
    pub fn has_credential(&self) -> bool {
        !self.api_key.trim().is_empty()
    }

    /// Fill an empty `api_key` from the environment
    pub fn resolve_api_key_from_env(&mut self) {
        if self.has_credential() {
            return;
        }
        for var in API_KEY_ENV_VARS {
            if let Ok(key) = env::var(var) {
                if !key.trim().is_empty() {
                    debug!("Using remote API key from {} environment variable", var);
                    self.api_key = key;
                    return;
                }
            }
        }
    }

    /// Backoff delay to wait after the given (1-based) failed attempt
    pub fn backoff_delay(&self, attempt: u32) -> Duration {
        Duration::from_millis(self.backoff_base_ms.saturating_mul(2_u64.saturating_pow(attempt)))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn deadline(&self) -> Option<Duration> {
        self.deadline_secs.map(Duration::from_secs)
    }
}

impl EngineConfig {
    /// Load configuration from TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Parse configuration from a TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        let config: EngineConfig = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path` if given, otherwise defaults; then resolve the credential
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(p) => Self::from_file(p)?,
            None => Self::default(),
        };
        config.remote.resolve_api_key_from_env();
        Ok(config)
    }

    /// Write configuration as TOML
    pub fn to_file(&self, path: &Path) -> Result<()> {
        let toml_str = toml::to_string_pretty(self)
            .map_err(|e| KpiError::Config(format!("Failed to serialize config: {}", e)))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, toml_str)?;
        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        let remote = &self.remote;

        if remote.max_attempts == 0 {
            return Err(KpiError::Config(
                "remote.max_attempts must be at least 1".to_string(),
            ));
        }
        if !(0.0..=2.0).contains(&remote.temperature) {
            return Err(KpiError::Config(format!(
                "remote.temperature must be between 0.0 and 2.0, got {}",
                remote.temperature
            )));
        }
        if remote.max_tokens == 0 {
            return Err(KpiError::Config(
                "remote.max_tokens must be positive".to_string(),
            ));
        }
        if remote.request_timeout_secs == 0 {
            return Err(KpiError::Config(
                "remote.request_timeout_secs must be positive".to_string(),
            ));
        }
        if remote.deadline_secs == Some(0) {
            return Err(KpiError::Config(
                "remote.deadline_secs must be positive when set".to_string(),
            ));
        }

        Ok(())
    }

    /// Pattern store location: configured path or the platform data dir
    pub fn pattern_store_path(&self) -> PathBuf {
        self.pattern_store_path
            .clone()
            .unwrap_or_else(default_pattern_store_path)
    }
}

/// Default pattern store path using XDG_DATA_HOME standard
pub fn default_pattern_store_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("kpiscore")
        .join("patterns.json")
}
