//! Remote KPI evaluation over an OpenAI-compatible chat-completion API
//!
//! One HTTP request per attempt. Every failure except a missing credential
//! or an empty KPI list is retried in a single attempt-counted loop with
//! exponential backoff (`backoff_base_ms * 2^attempt`). When attempts run
//! out the last error is returned wrapped in [`KpiError::RetryExhausted`].

use crate::config::RemoteConfig;
use crate::error::{KpiError, Result};
use crate::services::prompts::{build_evaluation_prompt, SYSTEM_PROMPT};
use crate::types::{EvaluationResult, Language};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tokio::time::sleep;
use tracing::{debug, info, warn};

/// Placeholder used when the model omits the feedback field
pub const NO_FEEDBACK: &str = "No feedback available.";

/// Remote evaluation seam used by the orchestrator
#[async_trait]
pub trait RemoteEvaluation: Send + Sync {
    /// Detect, score and write feedback for one answer
    async fn evaluate_remote(
        &self,
        answer_text: &str,
        target_kpis: &[String],
        language: Language,
        extra_criteria: &[String],
    ) -> Result<EvaluationResult>;
}

/// Chat-completion backed evaluator
pub struct LlmEvaluator {
    config: RemoteConfig,
    client: Client,
}

/// Chat-completion request format
#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<Message>,
    temperature: f32,
    max_tokens: u32,
    response_format: ResponseFormat,
}

#[derive(Debug, Serialize)]
struct Message {
    role: String,
    content: String,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: String,
}

/// Chat-completion response envelope
#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// The four-field verdict the model is asked to return
///
/// Absent and `null` fields both fall back to their defaults.
#[derive(Debug, Deserialize)]
struct RemoteVerdict {
    #[serde(default)]
    detected_kpis: Option<Vec<String>>,
    #[serde(default)]
    missing_kpis: Option<Vec<String>>,
    #[serde(default)]
    score: Option<u8>,
    #[serde(default)]
    feedback: Option<String>,
}

impl LlmEvaluator {
    /// Create an evaluator; a missing credential is reported at call time
    pub fn new(config: RemoteConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| KpiError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    pub fn config(&self) -> &RemoteConfig {
        &self.config
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        )
    }

    /// Call the API with retry and exponential backoff
    async fn call_api_with_retry(&self, prompt: &str) -> Result<EvaluationResult> {
        let max_attempts = self.config.max_attempts.max(1);
        let mut attempt = 1;

        loop {
            let err = match self.call_api(prompt).await {
                Ok(result) => return Ok(result),
                Err(e) => e,
            };

            if !err.is_retryable() {
                return Err(err);
            }
            if attempt >= max_attempts {
                return Err(KpiError::RetryExhausted {
                    attempts: attempt,
                    last: Box::new(err),
                });
            }

            let backoff = self.config.backoff_delay(attempt);
            warn!(
                "Remote evaluation failed ({}), retrying after {}ms (attempt {}/{})",
                err,
                backoff.as_millis(),
                attempt,
                max_attempts
            );
            sleep(backoff).await;
            attempt += 1;
        }
    }

    /// Call the API once (no retry)
    async fn call_api(&self, prompt: &str) -> Result<EvaluationResult> {
        debug!("Calling chat-completion API, model: {}", self.config.model);

        let request = ChatRequest {
            model: self.config.model.clone(),
            messages: vec![
                Message {
                    role: "system".to_string(),
                    content: SYSTEM_PROMPT.to_string(),
                },
                Message {
                    role: "user".to_string(),
                    content: prompt.to_string(),
                },
            ],
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
            response_format: ResponseFormat {
                format_type: "json_object".to_string(),
            },
        };

        let response = self
            .client
            .post(self.endpoint())
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| KpiError::NetworkError(e.to_string()))?;

        let status = response.status();

        match status {
            s if s.is_success() => {
                let body = response
                    .text()
                    .await
                    .map_err(|e| KpiError::NetworkError(e.to_string()))?;
                parse_response(&body)
            }
            StatusCode::TOO_MANY_REQUESTS => Err(KpiError::RateLimitExceeded(
                "Evaluation API rate limit exceeded".to_string(),
            )),
            _ => {
                let body = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Unknown error".to_string());
                Err(KpiError::HttpStatus {
                    status: status.as_u16(),
                    body,
                })
            }
        }
    }
}

#[async_trait]
impl RemoteEvaluation for LlmEvaluator {
    async fn evaluate_remote(
        &self,
        answer_text: &str,
        target_kpis: &[String],
        language: Language,
        extra_criteria: &[String],
    ) -> Result<EvaluationResult> {
        if !self.config.has_credential() {
            return Err(KpiError::Config(
                "Remote evaluation API key not set".to_string(),
            ));
        }
        if target_kpis.is_empty() {
            return Err(KpiError::EmptyInput(
                "No target KPIs to evaluate".to_string(),
            ));
        }

        let prompt = build_evaluation_prompt(answer_text, target_kpis, language, extra_criteria);
        let result = self.call_api_with_retry(&prompt).await?;

        info!(
            detected = result.detected_kpis.len(),
            score = result.score,
            "Remote evaluation succeeded"
        );
        Ok(result)
    }
}

/// Parse a chat-completion envelope into an evaluation result
fn parse_response(body: &str) -> Result<EvaluationResult> {
    let envelope: ChatResponse = serde_json::from_str(body)
        .map_err(|e| KpiError::Schema(format!("Invalid response envelope: {}", e)))?;

    let content = envelope
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or_else(|| KpiError::Schema("Empty response from API".to_string()))?;

    parse_verdict(&content)
}

/// Parse the model's message content into an evaluation result
fn parse_verdict(content: &str) -> Result<EvaluationResult> {
    let verdict: RemoteVerdict = serde_json::from_str(strip_code_fence(content))
        .map_err(|e| KpiError::Schema(format!("Response is not the expected JSON: {}", e)))?;

    let score = verdict.score.unwrap_or(0);
    if score > 3 {
        return Err(KpiError::Schema(format!("Score {} outside 0..=3", score)));
    }

    Ok(EvaluationResult {
        detected_kpis: verdict.detected_kpis.unwrap_or_default(),
        missing_kpis: verdict.missing_kpis.unwrap_or_default(),
        score,
        feedback: verdict
            .feedback
            .filter(|f| !f.trim().is_empty())
            .unwrap_or_else(|| NO_FEEDBACK.to_string()),
    })
}

/// Drop a surrounding Markdown code fence, if present
fn strip_code_fence(content: &str) -> &str {
    let trimmed = content.trim();
    match trimmed.strip_prefix("```") {
        Some(rest) => {
            let rest = rest.strip_prefix("json").unwrap_or(rest);
            rest.strip_suffix("```").unwrap_or(rest).trim()
        }
        None => trimmed,
    }
}
