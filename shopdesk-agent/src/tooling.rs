use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use shopdesk_core::{InputSchema, Tool, ToolError, ToolInput};

use crate::error::{ToolDispatchError, ToolRegistryError};

pub const CLARIFY_TOOL_NAME: &str = "ask_query";

/// Name, description and declared input of a registered tool.
#[derive(Clone, Debug, PartialEq)]
pub struct ToolDescriptor {
    pub name: String,
    pub description: String,
    pub input_schema: InputSchema,
}

impl ToolDescriptor {
    fn of(tool: &dyn Tool) -> Self {
        Self {
            name: tool.name().to_string(),
            description: tool.description().to_string(),
            input_schema: tool.input_schema(),
        }
    }

    /// One catalog line: `name: description (input: ...)`.
    pub fn catalog_line(&self) -> String {
        let fields = self.input_schema.fields();
        let input = match fields {
            [] => "no input".to_string(),
            [only] => format!("input: {}", only.name),
            _ => {
                let names = fields
                    .iter()
                    .map(|f| {
                        if f.required {
                            f.name.clone()
                        } else {
                            format!("{}?", f.name)
                        }
                    })
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("input: JSON object with {names}")
            }
        };
        format!("{}: {} ({input})", self.name, self.description)
    }
}

/// A resolved tool, ready to be invoked with raw backend input.
#[derive(Clone)]
pub struct ToolHandle {
    descriptor: Arc<ToolDescriptor>,
    tool: Arc<dyn Tool>,
}

impl ToolHandle {
    pub fn name(&self) -> &str {
        &self.descriptor.name
    }

    pub fn descriptor(&self) -> &ToolDescriptor {
        &self.descriptor
    }
}

impl std::fmt::Debug for ToolHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolHandle")
            .field("name", &self.descriptor.name)
            .finish()
    }
}

/// Fixed catalog of tools the backend may call.
///
/// Lookups are exact and case-sensitive. Dispatch never fails: unknown names,
/// invalid input and tool errors all come back as observation text.
#[derive(Clone)]
pub struct ToolRegistry {
    entries: Vec<ToolHandle>,
    index: HashMap<String, usize>,
}

impl std::fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolRegistry")
            .field("names", &self.names())
            .finish()
    }
}

impl ToolRegistry {
    pub fn builder() -> ToolRegistryBuilder {
        ToolRegistryBuilder::default()
    }

    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(ToolHandle::name).collect()
    }

    pub fn descriptors(&self) -> impl Iterator<Item = &ToolDescriptor> {
        self.entries.iter().map(ToolHandle::descriptor)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Catalog text for the prompt, one tool per line in registration order.
    pub fn catalog(&self) -> String {
        self.descriptors()
            .map(ToolDescriptor::catalog_line)
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn tool_names(&self) -> String {
        self.names().join(", ")
    }

    pub fn resolve(&self, tool_name: &str) -> Result<ToolHandle, ToolDispatchError> {
        self.index
            .get(tool_name)
            .map(|&idx| self.entries[idx].clone())
            .ok_or_else(|| ToolDispatchError::UnknownTool {
                name: tool_name.to_string(),
                available: self.names().into_iter().map(str::to_string).collect(),
            })
    }

    /// Validates `raw_input` against the tool's schema and runs it.
    pub async fn invoke(&self, handle: &ToolHandle, raw_input: &str) -> String {
        let name = handle.name();
        let input = match handle.descriptor.input_schema.parse(raw_input) {
            Ok(input) => input,
            Err(err) => return failure_observation(name, raw_input, err),
        };

        match handle.tool.invoke(input).await {
            Ok(observation) => {
                tracing::debug!(tool = name, "tool call succeeded");
                observation
            }
            Err(err) => failure_observation(name, raw_input, err),
        }
    }

    /// Resolves and invokes in one step.
    pub async fn dispatch(&self, tool_name: &str, raw_input: &str) -> String {
        match self.resolve(tool_name) {
            Ok(handle) => self.invoke(&handle, raw_input).await,
            Err(err) => {
                tracing::warn!(tool = tool_name, "backend requested an unknown tool");
                err.to_string()
            }
        }
    }
}

fn failure_observation(name: &str, raw_input: &str, err: ToolError) -> String {
    tracing::warn!(tool = name, raw_input, error = %err, "tool call rejected");
    match err {
        ToolError::InvalidInput(reason) => format!("Invalid input for tool '{name}': {reason}"),
        ToolError::ExecutionFailed(reason) => format!("Tool '{name}' failed: {reason}"),
        ToolError::Json(source) => format!("Tool '{name}' failed: {source}"),
    }
}

#[derive(Clone, Default)]
pub struct ToolRegistryBuilder {
    tools: Vec<Arc<dyn Tool>>,
}

impl ToolRegistryBuilder {
    pub fn register(mut self, tool: Arc<dyn Tool>) -> Self {
        self.tools.push(tool);
        self
    }

    pub fn register_all(mut self, tools: impl IntoIterator<Item = Arc<dyn Tool>>) -> Self {
        self.tools.extend(tools);
        self
    }

    /// Rejects blank or duplicate names. [`ClarifyTool`] is always appended,
    /// so a registered tool named `ask_query` is reported as a duplicate.
    pub fn build(mut self) -> Result<ToolRegistry, ToolRegistryError> {
        self.tools.push(Arc::new(ClarifyTool));

        let mut seen = HashSet::new();
        let mut entries = Vec::with_capacity(self.tools.len());
        let mut index = HashMap::with_capacity(self.tools.len());

        for tool in self.tools {
            let descriptor = ToolDescriptor::of(tool.as_ref());
            if descriptor.name.trim().is_empty() || descriptor.name != descriptor.name.trim() {
                return Err(ToolRegistryError::InvalidName {
                    name: descriptor.name,
                });
            }
            if !seen.insert(descriptor.name.clone()) {
                return Err(ToolRegistryError::DuplicateName {
                    name: descriptor.name,
                });
            }

            index.insert(descriptor.name.clone(), entries.len());
            entries.push(ToolHandle {
                descriptor: Arc::new(descriptor),
                tool,
            });
        }

        Ok(ToolRegistry { entries, index })
    }
}

/// Safety-net action for requests no other tool fits.
#[derive(Clone, Copy, Debug, Default)]
pub struct ClarifyTool;

#[async_trait]
impl Tool for ClarifyTool {
    fn name(&self) -> &str {
        CLARIFY_TOOL_NAME
    }

    fn description(&self) -> &str {
        "Fallback tool to ask the customer for more details or clarify their request."
    }

    fn input_schema(&self) -> InputSchema {
        InputSchema::new()
    }

    async fn invoke(&self, _input: ToolInput) -> Result<String, ToolError> {
        Ok("RESULT: Could you please provide more details or clarify your request so I can assist you better?".to_string())
    }
}
