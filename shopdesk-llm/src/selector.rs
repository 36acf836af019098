use std::sync::{Arc, PoisonError, RwLock};

use async_trait::async_trait;
use shopdesk_core::{BackendHandle, GenerationParams, LlmError, ShopdeskError};
use tokio::sync::Mutex;

use crate::{BackendFactory, Llm};

pub const DEFAULT_PRIMARY_MODEL: &str = "llama3-70b-8192";
pub const DEFAULT_FALLBACK_MODELS: [&str; 3] =
    ["llama3-8b-8192", "mixtral-8x7b-32768", "gemma2-9b-it"];
pub const AVAILABLE_MODELS: [&str; 3] = ["llama3-70b-8192", "llama3-8b-8192", "gemma2-9b-it"];
pub const DEFAULT_PROBE_PROMPT: &str = "Hello";

/// Which backends to try at start-up, in order, and how to probe them.
#[derive(Clone, Debug)]
pub struct SelectionPlan {
    pub primary: BackendHandle,
    pub fallbacks: Vec<BackendHandle>,
    pub probe_prompt: String,
    pub switch_parameters: GenerationParams,
    pub available_models: Vec<String>,
}

impl SelectionPlan {
    pub fn new(primary_model: impl Into<String>) -> Self {
        Self {
            primary: BackendHandle::new(primary_model, GenerationParams::primary()),
            fallbacks: Vec::new(),
            probe_prompt: DEFAULT_PROBE_PROMPT.to_string(),
            switch_parameters: GenerationParams::switch(),
            available_models: AVAILABLE_MODELS.iter().map(|m| m.to_string()).collect(),
        }
    }

    pub fn with_fallbacks<I, S>(mut self, models: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fallbacks = models
            .into_iter()
            .map(|model| BackendHandle::new(model, GenerationParams::fallback()))
            .collect();
        self
    }

    pub fn with_probe_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.probe_prompt = prompt.into();
        self
    }

    pub fn with_available_models<I, S>(mut self, models: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.available_models = models.into_iter().map(Into::into).collect();
        self
    }
}

impl Default for SelectionPlan {
    fn default() -> Self {
        Self::new(DEFAULT_PRIMARY_MODEL).with_fallbacks(DEFAULT_FALLBACK_MODELS)
    }
}

struct ActiveBackend {
    handle: BackendHandle,
    llm: Arc<dyn Llm>,
}

/// Owns the single active backend shared by every session.
///
/// Readers clone the active `Arc` and release the lock before calling out, so
/// they observe either the old or the new backend, never a half-built one.
/// Swaps are serialized and only commit after a successful probe.
pub struct BackendSelector {
    factory: Arc<dyn BackendFactory>,
    active: RwLock<Arc<ActiveBackend>>,
    swap: Mutex<()>,
    probe_prompt: String,
    switch_parameters: GenerationParams,
    available_models: Vec<String>,
}

impl BackendSelector {
    /// Builds the primary backend, falling back through the plan's list.
    ///
    /// Fallbacks must also answer the probe prompt. Fails only when no
    /// candidate could be brought up.
    pub async fn initialize(
        factory: Arc<dyn BackendFactory>,
        plan: SelectionPlan,
    ) -> Result<Self, ShopdeskError> {
        let SelectionPlan {
            primary,
            fallbacks,
            probe_prompt,
            switch_parameters,
            available_models,
        } = plan;

        let mut attempted = vec![primary.identifier.clone()];
        let mut last_error = match factory.build(&primary) {
            Ok(llm) => {
                tracing::info!(backend = %primary.identifier, "primary backend initialized");
                return Ok(Self {
                    factory,
                    active: RwLock::new(Arc::new(ActiveBackend {
                        handle: primary,
                        llm,
                    })),
                    swap: Mutex::new(()),
                    probe_prompt,
                    switch_parameters,
                    available_models,
                });
            }
            Err(error) => {
                tracing::warn!(backend = %primary.identifier, %error, "primary backend failed to initialize");
                error
            }
        };

        for handle in fallbacks {
            attempted.push(handle.identifier.clone());
            match probe(factory.as_ref(), &handle, &probe_prompt).await {
                Ok(llm) => {
                    tracing::info!(backend = %handle.identifier, "fallback backend initialized");
                    return Ok(Self {
                        factory,
                        active: RwLock::new(Arc::new(ActiveBackend { handle, llm })),
                        swap: Mutex::new(()),
                        probe_prompt,
                        switch_parameters,
                        available_models,
                    });
                }
                Err(error) => {
                    tracing::warn!(backend = %handle.identifier, %error, "fallback backend failed");
                    last_error = error;
                }
            }
        }

        Err(ShopdeskError::BackendInitialization {
            attempted,
            last_error,
        })
    }

    /// Probes `identifier` and makes it active on success.
    ///
    /// On failure the current backend stays active and `false` is returned.
    pub async fn switch(&self, identifier: &str) -> bool {
        let _swap = self.swap.lock().await;
        let handle = BackendHandle::new(identifier, self.switch_parameters.clone());
        match probe(self.factory.as_ref(), &handle, &self.probe_prompt).await {
            Ok(llm) => {
                let next = Arc::new(ActiveBackend { handle, llm });
                *self.active.write().unwrap_or_else(PoisonError::into_inner) = next;
                tracing::info!(backend = %identifier, "switched active backend");
                true
            }
            Err(error) => {
                tracing::warn!(
                    backend = %identifier,
                    active = %self.current().handle.identifier,
                    %error,
                    "backend switch rejected"
                );
                false
            }
        }
    }

    pub fn active(&self) -> BackendHandle {
        self.current().handle.clone()
    }

    pub fn available_models(&self) -> &[String] {
        &self.available_models
    }

    fn current(&self) -> Arc<ActiveBackend> {
        Arc::clone(&self.active.read().unwrap_or_else(PoisonError::into_inner))
    }
}

#[async_trait]
impl Llm for BackendSelector {
    async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        let backend = self.current();
        backend.llm.generate(prompt).await
    }
}

async fn probe(
    factory: &dyn BackendFactory,
    handle: &BackendHandle,
    prompt: &str,
) -> Result<Arc<dyn Llm>, LlmError> {
    let llm = factory.build(handle)?;
    llm.generate(prompt).await?;
    Ok(llm)
}
