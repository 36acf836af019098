use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ToolRegistryError {
    #[error("tool name must not be empty or whitespace: {name:?}")]
    InvalidName { name: String },
    #[error("duplicate tool name: {name}")]
    DuplicateName { name: String },
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ToolDispatchError {
    #[error("Tool '{name}' not found. Available tools: {}", .available.join(", "))]
    UnknownTool {
        name: String,
        available: Vec<String>,
    },
}
