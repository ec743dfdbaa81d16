//! Integration tests for the local (network-free) evaluation path
//!
//! Covers totality, the detected/missing partition, the scoring rubric,
//! each detection heuristic, and language selection of feedback.

use kpiscore_core::evaluation::{LocalDetector, PatternStore, SynonymTable};
use kpiscore_core::{EngineConfig, EvaluationEngine, Language, MatchRule};
use proptest::prelude::*;

mod common;
use common::kpis;

#[tokio::test]
async fn test_end_to_end_local_evaluation() {
    let engine = EvaluationEngine::local_only();
    let targets = kpis(&["leadership", "teamwork", "risk management"]);

    let result = engine
        .evaluate(
            "I lead cross-functional teams and resolve conflicts daily",
            &targets,
            Language::En,
            None,
        )
        .await;

    assert_eq!(result.detected_kpis, kpis(&["leadership", "teamwork"]));
    assert_eq!(result.missing_kpis, kpis(&["risk management"]));
    assert_eq!(result.score, 2);
    assert!(result.feedback.starts_with("Good effort!"));
    assert!(result.feedback.contains("risk management"));
}

#[tokio::test]
async fn test_disabled_remote_evaluates_locally() {
    let mut config = EngineConfig::default();
    config.remote.enabled = false;
    let engine = EvaluationEngine::new(&config).unwrap();

    let result = engine
        .evaluate(
            "Strong leadership is key",
            &kpis(&["Leadership"]),
            Language::Fi,
            None,
        )
        .await;

    assert_eq!(result.detected_kpis, kpis(&["Leadership"]));
    assert_eq!(result.score, 1);
    assert!(result.feedback.starts_with("Hyvä alku!"));
}

#[tokio::test]
async fn test_missing_credential_falls_back_without_error() {
    // remote enabled, but no key: fails fast and evaluates locally
    let mut config = EngineConfig::default();
    config.remote.api_key.clear();
    config.remote.base_url = "http://127.0.0.1:9".to_string();
    let engine = EvaluationEngine::new(&config).unwrap();

    let result = engine
        .evaluate(
            "I managed and directed the team",
            &kpis(&["leadership"]),
            Language::En,
            None,
        )
        .await;

    assert_eq!(result.detected_kpis, kpis(&["leadership"]));
}

#[tokio::test]
async fn test_nothing_detected_scores_zero() {
    let engine = EvaluationEngine::local_only();
    let result = engine
        .evaluate(
            "lorem ipsum",
            &kpis(&["Budget", "Safety", "Ethics", "Negotiation"]),
            Language::En,
            None,
        )
        .await;

    assert!(result.detected_kpis.is_empty());
    assert_eq!(result.score, 0);
    assert_eq!(
        result.feedback,
        "Your answer needs improvement. Focus on: Budget, Safety, Ethics."
    );
}

#[tokio::test]
async fn test_empty_kpi_list() {
    let engine = EvaluationEngine::local_only();
    let result = engine.evaluate("any text", &[], Language::En, None).await;

    assert!(result.detected_kpis.is_empty());
    assert!(result.missing_kpis.is_empty());
    assert_eq!(result.score, 0);
}

#[tokio::test]
async fn test_more_than_three_detected_caps_at_three() {
    let engine = EvaluationEngine::local_only();
    let result = engine
        .evaluate(
            "I lead the team, cut costs, and keep everyone safe",
            &kpis(&["leadership", "teamwork", "budget", "safety"]),
            Language::En,
            None,
        )
        .await;

    assert_eq!(result.detected_kpis.len(), 4);
    assert_eq!(result.score, 3);
    assert!(result.feedback.contains("leadership, teamwork, budget, safety"));
}

#[test]
fn test_heuristic_order() {
    let mut store = PatternStore::new();
    store.add_pattern("Vendor relations", "supplier meetings");
    let detector = LocalDetector::new(SynonymTable::builtin(), &store);

    assert_eq!(
        detector.match_rule("Strong leadership is key", "Leadership"),
        Some(MatchRule::Exact)
    );
    assert_eq!(
        detector.match_rule("quality of every single test", "test quality"),
        Some(MatchRule::PartialWords)
    );
    assert_eq!(
        detector.match_rule("I managed and directed the team", "leadership"),
        Some(MatchRule::Synonym)
    );
    assert_eq!(
        detector.match_rule("I ran monthly supplier meetings", "Vendor relations"),
        Some(MatchRule::LearnedPattern)
    );
}

#[test]
fn test_partial_threshold_alone_does_not_detect() {
    let store = PatternStore::new();
    let detector = LocalDetector::new(SynonymTable::builtin(), &store);

    // "risk" present, "management" absent: partial rule fails, synonym rule fires
    assert_eq!(
        detector.match_rule("we assessed the risk", "Risk Management"),
        Some(MatchRule::Synonym)
    );
}

#[tokio::test]
async fn test_feedback_language_for_every_score() {
    let engine = EvaluationEngine::local_only();
    let targets = kpis(&["leadership", "teamwork", "budget", "ethics"]);
    let answers = [
        "lorem ipsum",
        "I lead",
        "I lead a team",
        "I lead a team and cut costs",
    ];

    for (expected_score, answer) in answers.iter().enumerate() {
        let en = engine.evaluate(answer, &targets, Language::En, None).await;
        let fi = engine.evaluate(answer, &targets, Language::Fi, None).await;

        assert_eq!(en.score as usize, expected_score);
        assert_eq!(fi.score as usize, expected_score);
        assert_ne!(en.feedback, fi.feedback);

        for marker in ["Erinomainen", "Hyvä", "Vastauksesi", "Keskity", "Harkitse"] {
            assert!(!en.feedback.contains(marker), "{}", en.feedback);
        }
        for marker in ["Excellent", "Good", "Your answer", "Focus", "Consider"] {
            assert!(!fi.feedback.contains(marker), "{}", fi.feedback);
        }
    }
}

fn run_local(answer: &str, targets: &[String]) -> kpiscore_core::EvaluationResult {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .build()
        .expect("runtime");
    let engine = EvaluationEngine::local_only();
    runtime.block_on(engine.evaluate_local(answer, targets, Language::En))
}

proptest! {
    #[test]
    fn prop_local_result_partitions_targets(
        answer in "[a-zA-Z äöå,.-]{0,80}",
        targets in proptest::collection::vec("[a-zA-Z ]{0,20}", 0..6),
    ) {
        let result = run_local(&answer, &targets);

        prop_assert_eq!(
            result.detected_kpis.len() + result.missing_kpis.len(),
            targets.len()
        );
        for kpi in &targets {
            let in_detected = result.detected_kpis.contains(kpi);
            let in_missing = result.missing_kpis.contains(kpi);
            prop_assert!(in_detected != in_missing, "{} must be on exactly one side", kpi);
        }
        for kpi in result.detected_kpis.iter().chain(result.missing_kpis.iter()) {
            prop_assert!(targets.contains(kpi));
        }
    }

    #[test]
    fn prop_score_follows_detected_count(
        answer in "[a-z ]{0,60}",
        targets in proptest::collection::vec("[a-z]{3,10}( [a-z]{3,10})?", 0..6),
    ) {
        let result = run_local(&answer, &targets);
        prop_assert_eq!(result.score as usize, result.detected_kpis.len().min(3));
    }
}
