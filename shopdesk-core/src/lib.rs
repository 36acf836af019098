//! Shared vocabulary for the shopdesk agent runtime.
//!
//! Everything the other crates agree on lives here: the error taxonomy, the
//! conversation turn and generation parameter types, the ReAct step types and
//! their text parser, and the `Tool` capability with its declared input schema.

mod error;
mod llm;
mod output_parsers;
mod react;
mod tool;
mod value;

pub use error::{LlmError, ShopdeskError};
pub use llm::{BackendHandle, GenerationParams, Role, Turn};
pub use output_parsers::{ReActOutputParser, FINAL_ANSWER_MARKER, UNPARSED_OUTPUT_PREFIX};
pub use react::{AgentAction, ParsedOutcome, ScratchpadEntry};
pub use tool::{FieldKind, FieldSpec, InputSchema, Tool, ToolError, ToolInput};
pub use value::Value;
