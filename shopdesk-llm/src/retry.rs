use std::time::Duration;

use async_trait::async_trait;
use shopdesk_core::LlmError;

use crate::Llm;

const MAX_BACKOFF: Duration = Duration::from_secs(8);

/// Retries retryable backend failures a fixed number of times.
///
/// The retry budget is part of the backend's construction parameters; callers
/// never renegotiate it per call. When the budget is spent the last error is
/// returned as-is so its class survives for error classification.
pub struct Retrying<L> {
    inner: L,
    max_retries: u32,
    backoff: Duration,
}

impl<L> Retrying<L> {
    pub fn new(inner: L, max_retries: u32) -> Self {
        Self {
            inner,
            max_retries,
            backoff: Duration::from_millis(250),
        }
    }

    /// Base delay before the first retry; doubled on every further attempt.
    pub fn with_backoff(mut self, backoff: Duration) -> Self {
        self.backoff = backoff;
        self
    }

    fn delay_for(&self, retry: u32) -> Duration {
        let factor = 1u32.checked_shl(retry).unwrap_or(u32::MAX);
        self.backoff.saturating_mul(factor).min(MAX_BACKOFF)
    }
}

#[async_trait]
impl<L> Llm for Retrying<L>
where
    L: Llm,
{
    async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        let mut retry = 0;
        loop {
            match self.inner.generate(prompt).await {
                Ok(text) => return Ok(text),
                Err(error) if error.is_retryable() && retry < self.max_retries => {
                    let delay = self.delay_for(retry);
                    retry += 1;
                    tracing::warn!(
                        %error,
                        attempt = retry,
                        max_retries = self.max_retries,
                        ?delay,
                        "retrying backend call"
                    );
                    if !delay.is_zero() {
                        tokio::time::sleep(delay).await;
                    }
                }
                Err(error) => return Err(error),
            }
        }
    }
}
