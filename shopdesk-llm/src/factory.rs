use std::sync::Arc;
use std::time::Duration;

use secrecy::SecretString;
use shopdesk_core::{BackendHandle, LlmError};

use crate::{Llm, OpenAiCompatibleClient, Retrying};

/// Builds a ready-to-call backend from a [`BackendHandle`].
///
/// Construction failures (missing credentials, bad endpoint) are reported
/// here; whether the backend actually answers is decided by a probe call.
pub trait BackendFactory: Send + Sync {
    fn build(&self, handle: &BackendHandle) -> Result<Arc<dyn Llm>, LlmError>;
}

/// Builds Groq-hosted models through the OpenAI-compatible endpoint.
#[derive(Clone)]
pub struct GroqBackendFactory {
    base_url: String,
    api_key: Option<SecretString>,
    retry_backoff: Duration,
}

impl GroqBackendFactory {
    pub const DEFAULT_BASE_URL: &'static str = "https://api.groq.com/openai/v1";

    pub fn new(api_key: Option<SecretString>) -> Self {
        Self {
            base_url: Self::DEFAULT_BASE_URL.to_string(),
            api_key,
            retry_backoff: Duration::from_millis(250),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_retry_backoff(mut self, backoff: Duration) -> Self {
        self.retry_backoff = backoff;
        self
    }
}

impl BackendFactory for GroqBackendFactory {
    fn build(&self, handle: &BackendHandle) -> Result<Arc<dyn Llm>, LlmError> {
        let mut builder = OpenAiCompatibleClient::builder()
            .base_url(&self.base_url)?
            .model(handle.identifier.clone())
            .params(handle.parameters.clone());
        if let Some(api_key) = &self.api_key {
            builder = builder.api_key(api_key.clone());
        }
        let client = builder.build()?;

        Ok(Arc::new(
            Retrying::new(client, handle.parameters.max_retries).with_backoff(self.retry_backoff),
        ))
    }
}
