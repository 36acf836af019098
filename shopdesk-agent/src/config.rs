use serde::{Deserialize, Serialize};
use shopdesk_core::ShopdeskError;

pub const DEFAULT_MAX_ITERATIONS: usize = 5;
pub const DEFAULT_MEMORY_WINDOW: usize = 10;

/// Loop and memory policy for one agent.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Tool steps allowed per turn before the loop gives up.
    pub max_iterations: usize,
    /// Exchanges kept in conversation memory.
    pub memory_window: usize,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
            memory_window: DEFAULT_MEMORY_WINDOW,
        }
    }
}

impl AgentConfig {
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn with_memory_window(mut self, memory_window: usize) -> Self {
        self.memory_window = memory_window;
        self
    }

    pub fn validate(&self) -> Result<(), ShopdeskError> {
        if self.max_iterations == 0 {
            return Err(ShopdeskError::InvalidConfig(
                "max_iterations must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
