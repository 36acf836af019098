use std::sync::Arc;

use shopdesk_core::{BackendHandle, ShopdeskError, Turn};
use shopdesk_llm::BackendSelector;
use shopdesk_memory::{ConversationWindowMemory, Memory};
use shopdesk_prompt::{customer_service_prompt, PromptTemplate};
use shopdesk_session::{InMemorySessionStore, SessionContext, SessionStore};

use crate::config::AgentConfig;
use crate::executor::{AgentExecutor, TurnReport};
use crate::tooling::ToolRegistry;

/// One customer conversation.
///
/// Owns its memory. Shares the backend selector, tool registry and session
/// store with every other agent in the process.
pub struct CustomerServiceAgent {
    session_id: String,
    selector: Arc<BackendSelector>,
    sessions: Arc<dyn SessionStore>,
    executor: AgentExecutor,
    memory: Box<dyn Memory>,
}

impl CustomerServiceAgent {
    pub fn builder() -> CustomerServiceAgentBuilder {
        CustomerServiceAgentBuilder::default()
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Runs one turn and returns the reply shown to the customer.
    pub async fn process_message(&mut self, text: &str, context: Option<&SessionContext>) -> String {
        self.process_turn(text, context).await.output
    }

    /// Like [`process_message`](Self::process_message) but keeps the step trace.
    ///
    /// The exchange is committed to memory exactly once, after the loop ends,
    /// whatever way it ended.
    pub async fn process_turn(
        &mut self,
        text: &str,
        context: Option<&SessionContext>,
    ) -> TurnReport {
        let mut merged = self.sessions.context(&self.session_id).await;
        if let Some(extra) = context {
            merged.merge(extra);
        }

        let history = self.memory.render();
        let report = self.executor.run_turn(text, &history, &merged).await;
        self.memory.save_context(text, &report.output);

        tracing::info!(
            session_id = %self.session_id,
            termination = ?report.termination,
            steps = report.steps.len(),
            "turn completed"
        );
        report
    }

    pub fn reset_conversation(&mut self) {
        self.memory.clear();
        tracing::debug!(session_id = %self.session_id, "conversation memory cleared");
    }

    pub fn conversation_history(&self) -> Vec<Turn> {
        self.memory.history()
    }

    /// Probes `identifier` and makes it the active backend for every agent.
    pub async fn switch_backend(&self, identifier: &str) -> bool {
        self.selector.switch(identifier).await
    }

    pub fn available_models(&self) -> Vec<String> {
        self.selector.available_models().to_vec()
    }

    pub fn active_backend(&self) -> BackendHandle {
        self.selector.active()
    }

    pub fn tools(&self) -> &ToolRegistry {
        self.executor.tools()
    }
}

#[derive(Default)]
pub struct CustomerServiceAgentBuilder {
    session_id: Option<String>,
    selector: Option<Arc<BackendSelector>>,
    tools: Option<Arc<ToolRegistry>>,
    sessions: Option<Arc<dyn SessionStore>>,
    prompt: Option<PromptTemplate>,
    memory: Option<Box<dyn Memory>>,
    config: AgentConfig,
}

impl CustomerServiceAgentBuilder {
    pub fn session_id(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }

    pub fn selector(mut self, selector: Arc<BackendSelector>) -> Self {
        self.selector = Some(selector);
        self
    }

    pub fn tools(mut self, tools: Arc<ToolRegistry>) -> Self {
        self.tools = Some(tools);
        self
    }

    pub fn sessions(mut self, sessions: Arc<dyn SessionStore>) -> Self {
        self.sessions = Some(sessions);
        self
    }

    pub fn prompt(mut self, prompt: PromptTemplate) -> Self {
        self.prompt = Some(prompt);
        self
    }

    /// Replaces the default window memory sized from the config.
    pub fn memory(mut self, memory: Box<dyn Memory>) -> Self {
        self.memory = Some(memory);
        self
    }

    pub fn config(mut self, config: AgentConfig) -> Self {
        self.config = config;
        self
    }

    pub fn build(self) -> Result<CustomerServiceAgent, ShopdeskError> {
        let selector = self.selector.ok_or_else(|| {
            ShopdeskError::InvalidConfig("a backend selector is required".to_string())
        })?;
        let tools = match self.tools {
            Some(tools) => tools,
            None => Arc::new(
                ToolRegistry::builder()
                    .build()
                    .map_err(|err| ShopdeskError::InvalidConfig(err.to_string()))?,
            ),
        };
        let session_id = match self.session_id {
            Some(id) if id.trim().is_empty() => {
                return Err(ShopdeskError::InvalidConfig(
                    "session id must not be empty".to_string(),
                ))
            }
            Some(id) => id,
            None => uuid::Uuid::new_v4().to_string(),
        };
        let sessions = self
            .sessions
            .unwrap_or_else(|| Arc::new(InMemorySessionStore::new()) as Arc<dyn SessionStore>);
        let memory = self
            .memory
            .unwrap_or_else(|| {
                Box::new(ConversationWindowMemory::new(self.config.memory_window)) as Box<dyn Memory>
            });

        let llm: Arc<dyn shopdesk_llm::Llm> = selector.clone();
        let executor = AgentExecutor::new(
            llm,
            tools,
            self.prompt.unwrap_or_else(customer_service_prompt),
        )
        .with_config(&self.config)?;

        Ok(CustomerServiceAgent {
            session_id,
            selector,
            sessions,
            executor,
            memory,
        })
    }
}
