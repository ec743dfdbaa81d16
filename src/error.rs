//! Error types for the KPI evaluation engine
//!
//! This module provides error handling using thiserror for structured error
//! definitions and anyhow for propagation at the binary edge.
//!
//! Remote-path failures are classified by [`KpiError::is_retryable`]; the
//! evaluation orchestrator absorbs every one of them and falls back to the
//! local detector, so none of these reach callers of `evaluate`.

use thiserror::Error;

/// Main error type for kpiscore operations
#[derive(Error, Debug)]
pub enum KpiError {
    /// Configuration problem, including a missing remote credential
    #[error("Configuration error: {0}")]
    Config(String),

    /// No target KPIs were supplied to the remote evaluator
    #[error("Empty input: {0}")]
    EmptyInput(String),

    /// Remote service answered HTTP 429
    #[error("Rate limit exceeded: {0}")]
    RateLimitExceeded(String),

    /// Connection failure, timeout, or other transport problem
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Remote service answered with a non-success status other than 429
    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    /// Response body did not match the required evaluation shape
    #[error("Schema error: {0}")]
    Schema(String),

    /// All remote attempts failed; carries the last underlying error
    #[error("Remote evaluation failed after {attempts} attempts: {last}")]
    RetryExhausted {
        attempts: u32,
        #[source]
        last: Box<KpiError>,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Config file could not be parsed
    #[error("Failed to parse config: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Generic error with context
    #[error("{0}")]
    Other(String),
}

impl KpiError {
    /// Whether another remote attempt may succeed where this one failed
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            KpiError::RateLimitExceeded(_)
                | KpiError::NetworkError(_)
                | KpiError::HttpStatus { .. }
                | KpiError::Schema(_)
        )
    }
}

/// Result type alias for kpiscore operations
pub type Result<T> = std::result::Result<T, KpiError>;

/// Convert anyhow::Error to KpiError
impl From<anyhow::Error> for KpiError {
    fn from(err: anyhow::Error) -> Self {
        KpiError::Other(err.to_string())
    }
}
