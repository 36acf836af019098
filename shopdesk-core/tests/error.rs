use std::time::Duration;

use shopdesk_core::{GenerationParams, LlmError, ShopdeskError};

#[test]
fn llm_error_display_carries_class_keywords() {
    assert_eq!(
        LlmError::RateLimited("slow down".to_string()).to_string(),
        "rate limit exceeded: slow down"
    );
    assert_eq!(
        LlmError::Auth("bad key".to_string()).to_string(),
        "authentication failed: bad key"
    );
    assert_eq!(
        LlmError::Timeout(Duration::from_secs(5)).to_string(),
        "request timeout after 5s"
    );
}

#[test]
fn auth_and_rejected_errors_are_not_retryable() {
    assert!(!LlmError::Auth("x".to_string()).is_retryable());
    assert!(!LlmError::Rejected("HTTP 404 Not Found: model decommissioned".to_string()).is_retryable());
    assert!(LlmError::RateLimited("x".to_string()).is_retryable());
    assert!(LlmError::Timeout(Duration::from_secs(1)).is_retryable());
    assert!(LlmError::Unknown("x".to_string()).is_retryable());
}

#[test]
fn llm_error_converts_into_umbrella_error() {
    let err: ShopdeskError = LlmError::Unknown("boom".to_string()).into();
    assert_eq!(err.to_string(), "LLM provider failed: backend error: boom");
}

#[test]
fn parameter_presets_follow_their_roles() {
    let primary = GenerationParams::primary();
    assert_eq!(primary.temperature, 0.0);
    assert_eq!(primary.timeout, Duration::from_secs(120));
    assert_eq!(primary.max_retries, 10);

    let fallback = GenerationParams::fallback();
    assert_eq!(fallback.temperature, 0.2);
    assert_eq!(fallback.timeout, Duration::from_secs(60));
    assert_eq!(fallback.max_retries, 5);

    assert_eq!(GenerationParams::switch().max_retries, 3);
}

#[test]
fn parameters_round_trip_timeout_in_seconds() {
    let json = serde_json::to_value(GenerationParams::fallback()).expect("serialize");
    assert_eq!(json["timeout"], serde_json::json!(60.0));
    let back: GenerationParams = serde_json::from_value(json).expect("deserialize");
    assert_eq!(back, GenerationParams::fallback());
}
