//! Common test utilities and helpers

#![allow(dead_code)]

use kpiscore_core::{EngineConfig, EvaluationEngine, RemoteConfig, TrainingExample};

/// Owned KPI name list from string literals
pub fn kpis(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

/// Remote config pointed at a mock server, with millisecond backoff
pub fn mock_remote_config(base_url: &str) -> RemoteConfig {
    RemoteConfig {
        api_key: "test-key".to_string(),
        base_url: base_url.to_string(),
        backoff_base_ms: 1,
        request_timeout_secs: 5,
        ..Default::default()
    }
}

/// Engine whose remote evaluator talks to `base_url`
pub fn create_mock_remote_engine(base_url: &str) -> EvaluationEngine {
    let config = EngineConfig {
        remote: mock_remote_config(base_url),
        ..Default::default()
    };
    EvaluationEngine::new(&config).expect("Failed to create engine")
}

/// Chat-completion envelope wrapping `content` as the assistant message
pub fn chat_completion_body(content: &str) -> String {
    serde_json::json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": content },
            "finish_reason": "stop"
        }]
    })
    .to_string()
}

/// Labeled training example
pub fn training_example(text: &str, labels: &[&str]) -> TrainingExample {
    TrainingExample {
        answer_text: text.to_string(),
        question_id: "question-1".to_string(),
        detected_kpis: kpis(labels),
        quality_rating: None,
    }
}
