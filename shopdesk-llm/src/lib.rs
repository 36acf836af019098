//! Text-generation backends for shopdesk.
//!
//! Every backend is reduced to one capability, [`Llm::generate`]. On top of
//! that this crate provides an OpenAI-compatible HTTP client (Groq by
//! default), a per-call retry wrapper, and the [`BackendSelector`] that picks a
//! working backend at start-up and swaps it on operator request.

mod factory;
pub mod openai_compatible;
mod retry;
mod selector;

use async_trait::async_trait;
use shopdesk_core::LlmError;

pub use factory::{BackendFactory, GroqBackendFactory};
pub use openai_compatible::{OpenAiCompatibleBuilder, OpenAiCompatibleClient};
pub use retry::Retrying;
pub use selector::{
    BackendSelector, SelectionPlan, AVAILABLE_MODELS, DEFAULT_FALLBACK_MODELS,
    DEFAULT_PRIMARY_MODEL, DEFAULT_PROBE_PROMPT,
};
pub use shopdesk_core::{BackendHandle, GenerationParams};

/// The opaque `generate(prompt) -> text` capability the agent loop calls.
#[async_trait]
pub trait Llm: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, LlmError>;
}

#[async_trait]
impl<T> Llm for std::sync::Arc<T>
where
    T: Llm + ?Sized,
{
    async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        (**self).generate(prompt).await
    }
}
