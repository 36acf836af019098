use serde::{Deserialize, Serialize};

/// A tool invocation requested by the backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AgentAction {
    pub tool_name: String,
    pub raw_input: String,
    /// Reasoning text the backend emitted before the `Action:` line.
    #[serde(default)]
    pub thought: String,
}

/// What one backend turn amounts to once parsed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum ParsedOutcome {
    Action(AgentAction),
    Finish { output: String },
}

impl ParsedOutcome {
    pub fn finish(output: impl Into<String>) -> Self {
        ParsedOutcome::Finish {
            output: output.into(),
        }
    }

    pub fn action(tool_name: impl Into<String>, raw_input: impl Into<String>) -> Self {
        ParsedOutcome::Action(AgentAction {
            tool_name: tool_name.into(),
            raw_input: raw_input.into(),
            thought: String::new(),
        })
    }
}

/// One completed thought/action/observation step of the current turn.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScratchpadEntry {
    pub thought: String,
    pub action: AgentAction,
    pub observation: String,
}

impl ScratchpadEntry {
    pub fn new(action: AgentAction, observation: impl Into<String>) -> Self {
        Self {
            thought: action.thought.clone(),
            action,
            observation: observation.into(),
        }
    }

    /// Renders the step the way the backend is asked to write it.
    pub fn render(&self) -> String {
        let mut out = String::new();
        if !self.thought.is_empty() {
            out.push_str("Thought: ");
            out.push_str(&self.thought);
            out.push('\n');
        }
        out.push_str("Action: ");
        out.push_str(&self.action.tool_name);
        out.push_str("\nAction Input: ");
        out.push_str(&self.action.raw_input);
        out.push_str("\nObservation: ");
        out.push_str(&self.observation);
        out.push('\n');
        out
    }
}
