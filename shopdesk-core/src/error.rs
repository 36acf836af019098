use std::time::Duration;

use thiserror::Error;

/// Failure channel of a text-generation backend.
///
/// The variants mirror the classes a hosted completion API reports. The
/// display text of each variant carries the keyword the error classifier in
/// `shopdesk-agent` keys on, so a wrapped or stringified error still lands in
/// the right bucket.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum LlmError {
    #[error("authentication failed: {0}")]
    Auth(String),
    #[error("rate limit exceeded: {0}")]
    RateLimited(String),
    #[error("request timeout after {0:?}")]
    Timeout(Duration),
    /// The backend refused this request as malformed or unserviceable
    /// (bad model id, context too long). Sending it again cannot succeed.
    #[error("request rejected: {0}")]
    Rejected(String),
    #[error("backend error: {0}")]
    Unknown(String),
}

impl LlmError {
    pub fn is_retryable(&self) -> bool {
        !matches!(self, LlmError::Auth(_) | LlmError::Rejected(_))
    }
}

#[derive(Debug, Error)]
pub enum ShopdeskError {
    #[error("LLM provider failed: {0}")]
    LlmProvider(#[from] LlmError),
    #[error("no backend could be initialized (tried {attempted:?}): {last_error}")]
    BackendInitialization {
        attempted: Vec<String>,
        last_error: LlmError,
    },
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
