//! Integration tests for the remote evaluation path against a mock
//! chat-completion server
//!
//! Exercises the wire contract, the retry/backoff loop, and the fallback
//! to local evaluation when the remote side keeps failing.

use kpiscore_core::{KpiError, Language, LlmEvaluator, RemoteEvaluation};
use mockito::Matcher;
use std::time::{Duration, Instant};

mod common;
use common::{chat_completion_body, create_mock_remote_engine, kpis, mock_remote_config};

const COMPLETIONS_PATH: &str = "/chat/completions";

#[tokio::test]
async fn test_remote_verdict_is_returned() {
    let mut server = mockito::Server::new_async().await;
    let verdict = r#"{"detected_kpis":["Leadership","Teamwork"],"missing_kpis":["Budget"],"score":2,"feedback":"Hyvä yritys!"}"#;
    let mock = server
        .mock("POST", COMPLETIONS_PATH)
        .match_header("authorization", "Bearer test-key")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(chat_completion_body(verdict))
        .expect(1)
        .create_async()
        .await;

    let engine = create_mock_remote_engine(&server.url());
    let result = engine
        .evaluate(
            "Johdin tiimiä ja teimme yhteistyötä",
            &kpis(&["Leadership", "Teamwork", "Budget"]),
            Language::Fi,
            None,
        )
        .await;

    mock.assert_async().await;
    assert_eq!(result.detected_kpis, kpis(&["Leadership", "Teamwork"]));
    assert_eq!(result.missing_kpis, kpis(&["Budget"]));
    assert_eq!(result.score, 2);
    assert_eq!(result.feedback, "Hyvä yritys!");
}

#[tokio::test]
async fn test_request_carries_prompt_and_parameters() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", COMPLETIONS_PATH)
        .match_body(Matcher::AllOf(vec![
            Matcher::PartialJsonString(r#"{"model":"gpt-4o-mini","max_tokens":1000}"#.to_string()),
            Matcher::Regex("feedback.{1,4}field in English".to_string()),
            Matcher::Regex("ADDITIONAL EVALUATION CRITERIA".to_string()),
            Matcher::Regex("Cite a measurable outcome".to_string()),
        ]))
        .with_status(200)
        .with_body(chat_completion_body(r#"{"score":0}"#))
        .expect(1)
        .create_async()
        .await;

    let engine = create_mock_remote_engine(&server.url());
    let criteria = vec!["Cite a measurable outcome".to_string()];
    let result = engine
        .evaluate("text", &kpis(&["Budget"]), Language::En, Some(&criteria))
        .await;

    mock.assert_async().await;
    assert_eq!(result.score, 0);
    assert_eq!(result.feedback, kpiscore_core::services::NO_FEEDBACK);
}

#[tokio::test]
async fn test_null_verdict_fields_are_accepted_without_retry() {
    let mut server = mockito::Server::new_async().await;
    let verdict = r#"{"detected_kpis":["Budget"],"missing_kpis":null,"score":1,"feedback":null}"#;
    let mock = server
        .mock("POST", COMPLETIONS_PATH)
        .with_status(200)
        .with_body(chat_completion_body(verdict))
        .expect(1)
        .create_async()
        .await;

    let engine = create_mock_remote_engine(&server.url());
    let result = engine
        .evaluate("text", &kpis(&["Budget"]), Language::En, None)
        .await;

    mock.assert_async().await;
    assert_eq!(result.detected_kpis, kpis(&["Budget"]));
    assert!(result.missing_kpis.is_empty());
    assert_eq!(result.score, 1);
    assert_eq!(result.feedback, kpiscore_core::services::NO_FEEDBACK);
}

#[tokio::test]
async fn test_rate_limited_on_every_attempt_falls_back() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", COMPLETIONS_PATH)
        .with_status(429)
        .with_body(r#"{"error":{"message":"Rate limit reached"}}"#)
        .expect(3)
        .create_async()
        .await;

    let engine = create_mock_remote_engine(&server.url());
    let result = engine
        .evaluate(
            "I lead cross-functional teams and resolve conflicts daily",
            &kpis(&["leadership", "teamwork", "risk management"]),
            Language::En,
            None,
        )
        .await;

    mock.assert_async().await;
    assert_eq!(result.detected_kpis, kpis(&["leadership", "teamwork"]));
    assert_eq!(result.missing_kpis, kpis(&["risk management"]));
    assert_eq!(result.score, 2);
}

#[tokio::test]
async fn test_retry_exhaustion_reports_last_error() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", COMPLETIONS_PATH)
        .with_status(429)
        .expect(3)
        .create_async()
        .await;

    let evaluator = LlmEvaluator::new(mock_remote_config(&server.url())).unwrap();
    let result = evaluator
        .evaluate_remote("text", &kpis(&["Budget"]), Language::En, &[])
        .await;

    mock.assert_async().await;
    match result {
        Err(KpiError::RetryExhausted { attempts, last }) => {
            assert_eq!(attempts, 3);
            assert!(matches!(*last, KpiError::RateLimitExceeded(_)));
        }
        other => panic!("expected RetryExhausted, got {:?}", other),
    }
}

#[tokio::test]
async fn test_server_errors_are_retried() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", COMPLETIONS_PATH)
        .with_status(503)
        .with_body("upstream unavailable")
        .expect(3)
        .create_async()
        .await;

    let evaluator = LlmEvaluator::new(mock_remote_config(&server.url())).unwrap();
    let result = evaluator
        .evaluate_remote("text", &kpis(&["Budget"]), Language::En, &[])
        .await;

    mock.assert_async().await;
    match result {
        Err(KpiError::RetryExhausted { last, .. }) => {
            assert!(matches!(*last, KpiError::HttpStatus { status: 503, .. }));
        }
        other => panic!("expected RetryExhausted, got {:?}", other),
    }
}

#[tokio::test]
async fn test_malformed_content_is_retried_then_falls_back() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", COMPLETIONS_PATH)
        .with_status(200)
        .with_body(chat_completion_body("Sure! The answer shows leadership."))
        .expect(3)
        .create_async()
        .await;

    let engine = create_mock_remote_engine(&server.url());
    let result = engine
        .evaluate(
            "Strong leadership is key",
            &kpis(&["Leadership"]),
            Language::En,
            None,
        )
        .await;

    mock.assert_async().await;
    assert_eq!(result.detected_kpis, kpis(&["Leadership"]));
    assert!(result.feedback.starts_with("Good start!"));
}

#[tokio::test]
async fn test_single_attempt_configuration() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", COMPLETIONS_PATH)
        .with_status(500)
        .expect(1)
        .create_async()
        .await;

    let mut config = mock_remote_config(&server.url());
    config.max_attempts = 1;
    let evaluator = LlmEvaluator::new(config).unwrap();
    let result = evaluator
        .evaluate_remote("text", &kpis(&["Budget"]), Language::En, &[])
        .await;

    mock.assert_async().await;
    assert!(matches!(
        result,
        Err(KpiError::RetryExhausted { attempts: 1, .. })
    ));
}

#[tokio::test]
async fn test_missing_credential_makes_no_request() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", COMPLETIONS_PATH)
        .expect(0)
        .create_async()
        .await;

    let mut config = mock_remote_config(&server.url());
    config.api_key = String::new();
    let evaluator = LlmEvaluator::new(config).unwrap();
    let result = evaluator
        .evaluate_remote("text", &kpis(&["Budget"]), Language::En, &[])
        .await;

    mock.assert_async().await;
    assert!(matches!(result, Err(KpiError::Config(_))));
}

#[tokio::test]
async fn test_empty_kpis_make_no_request() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", COMPLETIONS_PATH)
        .expect(0)
        .create_async()
        .await;

    let engine = create_mock_remote_engine(&server.url());
    let result = engine.evaluate("text", &[], Language::En, None).await;

    mock.assert_async().await;
    assert_eq!(result.score, 0);
    assert!(result.detected_kpis.is_empty());
}

#[tokio::test]
async fn test_backoff_sleeps_between_attempts() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", COMPLETIONS_PATH)
        .with_status(429)
        .expect(3)
        .create_async()
        .await;

    let mut config = mock_remote_config(&server.url());
    config.backoff_base_ms = 20;
    let evaluator = LlmEvaluator::new(config).unwrap();

    let start = Instant::now();
    let result = evaluator
        .evaluate_remote("text", &kpis(&["Budget"]), Language::En, &[])
        .await;
    let elapsed = start.elapsed();

    mock.assert_async().await;
    assert!(result.is_err());
    // 40ms after attempt 1, 80ms after attempt 2
    assert!(
        elapsed >= Duration::from_millis(120),
        "retries finished too quickly: {:?}",
        elapsed
    );
}

#[tokio::test]
async fn test_no_backoff_after_final_attempt() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", COMPLETIONS_PATH)
        .with_status(503)
        .expect(2)
        .create_async()
        .await;

    let mut config = mock_remote_config(&server.url());
    config.max_attempts = 2;
    config.backoff_base_ms = 250;
    let evaluator = LlmEvaluator::new(config).unwrap();

    let start = Instant::now();
    let result = evaluator
        .evaluate_remote("text", &kpis(&["Budget"]), Language::En, &[])
        .await;
    let elapsed = start.elapsed();

    mock.assert_async().await;
    assert!(matches!(
        result,
        Err(KpiError::RetryExhausted { attempts: 2, .. })
    ));
    // one 500ms sleep; a trailing sleep would add another 1000ms
    assert!(elapsed >= Duration::from_millis(500), "{:?}", elapsed);
    assert!(elapsed < Duration::from_millis(1400), "{:?}", elapsed);
}
