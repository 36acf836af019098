#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use shopdesk_core::{BackendHandle, LlmError};
use shopdesk_llm::{BackendFactory, BackendSelector, Llm, SelectionPlan};

/// Replays queued replies in order and records every prompt it was given.
///
/// Once the queue is drained it answers with `repeat` if set, otherwise it
/// reports an unknown backend error.
#[derive(Clone, Default)]
pub struct ScriptedLlm {
    replies: Arc<Mutex<VecDeque<Result<String, LlmError>>>>,
    repeat: Option<String>,
    prompts: Arc<Mutex<Vec<String>>>,
}

impl ScriptedLlm {
    pub fn new<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            replies: Arc::new(Mutex::new(
                replies.into_iter().map(|reply| Ok(reply.into())).collect(),
            )),
            ..Self::default()
        }
    }

    pub fn failing(error: LlmError) -> Self {
        Self {
            replies: Arc::new(Mutex::new(VecDeque::from([Err(error)]))),
            ..Self::default()
        }
    }

    pub fn repeating(reply: impl Into<String>) -> Self {
        Self {
            repeat: Some(reply.into()),
            ..Self::default()
        }
    }

    pub fn then(self, reply: Result<String, LlmError>) -> Self {
        self.replies.lock().unwrap().push_back(reply);
        self
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    pub fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

#[async_trait]
impl Llm for ScriptedLlm {
    async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        if let Some(reply) = self.replies.lock().unwrap().pop_front() {
            return reply;
        }
        match &self.repeat {
            Some(reply) => Ok(reply.clone()),
            None => Err(LlmError::Unknown("script exhausted".to_string())),
        }
    }
}

/// Answers every prompt with a fixed text; used for probe-only backends.
pub struct EchoLlm(pub &'static str);

#[async_trait]
impl Llm for EchoLlm {
    async fn generate(&self, _prompt: &str) -> Result<String, LlmError> {
        Ok(self.0.to_string())
    }
}

/// Hands out pre-built backends by model identifier.
#[derive(Default)]
pub struct StaticFactory {
    backends: HashMap<String, Arc<dyn Llm>>,
}

impl StaticFactory {
    pub fn with(mut self, model: &str, llm: Arc<dyn Llm>) -> Self {
        self.backends.insert(model.to_string(), llm);
        self
    }
}

impl BackendFactory for StaticFactory {
    fn build(&self, handle: &BackendHandle) -> Result<Arc<dyn Llm>, LlmError> {
        self.backends
            .get(&handle.identifier)
            .cloned()
            .ok_or_else(|| LlmError::Auth("API key not set".to_string()))
    }
}

pub const PRIMARY: &str = "primary-model";

/// A selector whose primary backend is `llm`.
pub async fn selector_over(llm: ScriptedLlm) -> Arc<BackendSelector> {
    selector_with(StaticFactory::default().with(PRIMARY, Arc::new(llm))).await
}

pub async fn selector_with(factory: StaticFactory) -> Arc<BackendSelector> {
    let plan = SelectionPlan::new(PRIMARY).with_available_models([PRIMARY, "spare-model"]);
    Arc::new(
        BackendSelector::initialize(Arc::new(factory), plan)
            .await
            .expect("selector"),
    )
}
