use std::collections::HashMap;
use std::sync::Arc;

use shopdesk_core::{ParsedOutcome, ReActOutputParser, ScratchpadEntry, ShopdeskError, Value};
use shopdesk_llm::Llm;
use shopdesk_prompt::{PromptTemplate, AGENT_SCRATCHPAD, CHAT_HISTORY, INPUT, TOOLS, TOOL_NAMES};
use shopdesk_session::SessionContext;
use tracing::Instrument;

use crate::classify::classify;
use crate::config::{AgentConfig, DEFAULT_MAX_ITERATIONS};
use crate::tooling::ToolRegistry;

pub const ITERATION_CEILING_MESSAGE: &str = "I'm sorry, I couldn't complete your request within the allowed number of steps. Could you rephrase it or break it into smaller questions?";
pub const EMPTY_OUTPUT_MESSAGE: &str =
    "I apologize, but I wasn't able to produce a response. Could you please try again?";

/// How a turn ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Termination {
    Finished,
    IterationCeiling,
    BackendFailure,
}

/// Result of one user turn. `output` is never empty.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TurnReport {
    pub output: String,
    pub termination: Termination,
    pub steps: Vec<ScratchpadEntry>,
}

impl TurnReport {
    fn new(output: String, termination: Termination, steps: Vec<ScratchpadEntry>) -> Self {
        let output = if output.trim().is_empty() {
            EMPTY_OUTPUT_MESSAGE.to_string()
        } else {
            output
        };
        Self {
            output,
            termination,
            steps,
        }
    }
}

/// Inline annotation of the user's message with the session context.
pub fn annotate_input(input: &str, context: &SessionContext) -> String {
    if context.is_empty() {
        input.to_string()
    } else {
        format!("{input}\nCustomer Context: {}", context.render())
    }
}

/// The ReAct loop: prompt, generate, parse, dispatch, until a final answer
/// or the iteration ceiling.
///
/// The executor holds no per-session state. Memory is read as rendered text
/// and written by the caller once the turn has ended.
pub struct AgentExecutor {
    llm: Arc<dyn Llm>,
    tools: Arc<ToolRegistry>,
    prompt: PromptTemplate,
    parser: ReActOutputParser,
    max_iterations: usize,
}

impl AgentExecutor {
    pub fn new(llm: Arc<dyn Llm>, tools: Arc<ToolRegistry>, prompt: PromptTemplate) -> Self {
        let prompt = prompt
            .with_partial(TOOLS, tools.catalog())
            .with_partial(TOOL_NAMES, tools.tool_names());
        Self {
            llm,
            tools,
            prompt,
            parser: ReActOutputParser::new(),
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }

    /// Applies the loop policy from `config`, rejecting an invalid one.
    pub fn with_config(mut self, config: &AgentConfig) -> Result<Self, ShopdeskError> {
        config.validate()?;
        self.max_iterations = config.max_iterations;
        Ok(self)
    }

    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    pub fn tools(&self) -> &ToolRegistry {
        &self.tools
    }

    pub async fn run_turn(
        &self,
        input: &str,
        chat_history: &str,
        context: &SessionContext,
    ) -> TurnReport {
        let span = tracing::info_span!(
            "agent_turn",
            max_iterations = self.max_iterations,
            has_context = !context.is_empty()
        );
        self.drive(annotate_input(input, context), chat_history)
            .instrument(span)
            .await
    }

    async fn drive(&self, question: String, chat_history: &str) -> TurnReport {
        let mut steps: Vec<ScratchpadEntry> = Vec::new();

        loop {
            let prompt = match self.build_prompt(&question, chat_history, &steps) {
                Ok(prompt) => prompt,
                Err(err) => {
                    tracing::error!(error = %err, "prompt rendering failed");
                    return TurnReport::new(classify(&err), Termination::BackendFailure, steps);
                }
            };

            let text = match self.llm.generate(&prompt).await {
                Ok(text) => text,
                Err(err) => {
                    tracing::error!(error = %err, step = steps.len(), "backend call failed");
                    return TurnReport::new(classify(&err), Termination::BackendFailure, steps);
                }
            };

            match self.parser.parse(&text) {
                ParsedOutcome::Finish { output } => {
                    tracing::debug!(step = steps.len(), "final answer");
                    return TurnReport::new(output, Termination::Finished, steps);
                }
                ParsedOutcome::Action(action) => {
                    tracing::debug!(
                        step = steps.len() + 1,
                        tool = %action.tool_name,
                        input = %action.raw_input,
                        "dispatching tool"
                    );
                    let observation = self
                        .tools
                        .dispatch(&action.tool_name, &action.raw_input)
                        .await;
                    steps.push(ScratchpadEntry::new(action, observation));

                    if steps.len() >= self.max_iterations {
                        tracing::warn!(steps = steps.len(), "iteration ceiling reached");
                        return TurnReport::new(
                            ITERATION_CEILING_MESSAGE.to_string(),
                            Termination::IterationCeiling,
                            steps,
                        );
                    }
                }
            }
        }
    }

    fn build_prompt(
        &self,
        question: &str,
        chat_history: &str,
        steps: &[ScratchpadEntry],
    ) -> Result<String, ShopdeskError> {
        let scratchpad: String = steps.iter().map(ScratchpadEntry::render).collect();
        let vars = HashMap::from([
            (CHAT_HISTORY.to_string(), Value::String(chat_history.to_string())),
            (INPUT.to_string(), Value::String(question.to_string())),
            (AGENT_SCRATCHPAD.to_string(), Value::String(scratchpad)),
        ]);
        self.prompt.render(&vars)
    }
}
