//! The customer-service agent: tool registry, ReAct executor, error
//! classification and the per-session facade a front-end talks to.

mod agent;
mod classify;
mod config;
mod error;
mod executor;
mod tooling;

pub use agent::{CustomerServiceAgent, CustomerServiceAgentBuilder};
pub use classify::{
    classify, AUTHENTICATION_MESSAGE, GENERIC_APOLOGY, RATE_LIMIT_MESSAGE, TIMEOUT_MESSAGE,
};
pub use config::{AgentConfig, DEFAULT_MAX_ITERATIONS, DEFAULT_MEMORY_WINDOW};
pub use error::{ToolDispatchError, ToolRegistryError};
pub use executor::{
    annotate_input, AgentExecutor, Termination, TurnReport, EMPTY_OUTPUT_MESSAGE,
    ITERATION_CEILING_MESSAGE,
};
pub use tooling::{
    ClarifyTool, ToolDescriptor, ToolHandle, ToolRegistry, ToolRegistryBuilder, CLARIFY_TOOL_NAME,
};
