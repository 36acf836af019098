use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Map;
use thiserror::Error;

use crate::Value;

#[derive(Debug, Error)]
pub enum ToolError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("execution failed: {0}")]
    ExecutionFailed(String),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A capability the backend may request by name.
///
/// Implementations report domain failures ("order not found") as ordinary
/// output text. `Err` is reserved for problems the dispatcher should describe
/// to the backend on the tool's behalf.
#[async_trait::async_trait]
pub trait Tool: Send + Sync {
    fn name(&self) -> &str;
    fn description(&self) -> &str;
    fn input_schema(&self) -> InputSchema;
    async fn invoke(&self, input: ToolInput) -> Result<String, ToolError>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    String,
    Object,
}

impl FieldKind {
    fn coerce(self, field: &str, value: Value) -> Result<Value, ToolError> {
        match (self, value) {
            (FieldKind::String, Value::String(text)) => Ok(Value::String(text)),
            (FieldKind::String, Value::Number(number)) => Ok(Value::String(number.to_string())),
            (FieldKind::String, Value::Bool(flag)) => Ok(Value::String(flag.to_string())),
            (FieldKind::Object, Value::Object(map)) => Ok(Value::Object(map)),
            (FieldKind::Object, Value::String(text)) => serde_json::from_str::<Map<String, Value>>(&text)
                .map(Value::Object)
                .map_err(|_| ToolError::InvalidInput(format!("field `{field}` expects a JSON object"))),
            (FieldKind::String, _) => Err(ToolError::InvalidInput(format!(
                "field `{field}` expects a string"
            ))),
            (FieldKind::Object, _) => Err(ToolError::InvalidInput(format!(
                "field `{field}` expects a JSON object"
            ))),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub name: String,
    pub kind: FieldKind,
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    pub description: String,
}

impl FieldSpec {
    pub fn string(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: FieldKind::String,
            required: true,
            default: None,
            description: description.into(),
        }
    }

    pub fn object(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            kind: FieldKind::Object,
            ..Self::string(name, description)
        }
    }

    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.required = false;
        self.default = Some(default.into());
        self
    }
}

/// Ordered field declarations for a tool's input.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct InputSchema {
    fields: Vec<FieldSpec>,
}

impl InputSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, spec: FieldSpec) -> Self {
        self.fields.push(spec);
        self
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Parses the backend's raw `Action Input` text against this schema.
    ///
    /// A JSON object is matched to fields by name. Any other non-empty text
    /// fills the first declared field.
    pub fn parse(&self, raw: &str) -> Result<ToolInput, ToolError> {
        let raw = strip_code_fence(raw.trim());
        let mut values = Map::new();

        if raw.starts_with('{') {
            values = serde_json::from_str::<Map<String, Value>>(raw).map_err(|err| {
                ToolError::InvalidInput(format!("input is not a valid JSON object: {err}"))
            })?;
        } else if !is_empty_literal(raw) {
            if let Some(first) = self.fields.first() {
                values.insert(first.name.clone(), Value::String(unquote(raw).to_string()));
            }
        }

        self.validate(values)
    }

    fn validate(&self, mut values: Map<String, Value>) -> Result<ToolInput, ToolError> {
        let mut fields = Map::new();
        for spec in &self.fields {
            match values.remove(&spec.name) {
                None | Some(Value::Null) => {
                    if let Some(default) = &spec.default {
                        fields.insert(spec.name.clone(), default.clone());
                    } else if spec.required {
                        return Err(ToolError::InvalidInput(format!(
                            "missing required field `{}`",
                            spec.name
                        )));
                    }
                }
                Some(value) => {
                    fields.insert(spec.name.clone(), spec.kind.coerce(&spec.name, value)?);
                }
            }
        }
        Ok(ToolInput { fields })
    }
}

/// Input that has passed schema validation.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ToolInput {
    fields: Map<String, Value>,
}

impl ToolInput {
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.fields.get(name).and_then(Value::as_str)
    }

    /// Deserializes the validated fields into a tool's argument struct.
    pub fn deserialize<T: DeserializeOwned>(self) -> Result<T, ToolError> {
        serde_json::from_value(Value::Object(self.fields))
            .map_err(|err| ToolError::InvalidInput(err.to_string()))
    }
}

impl From<Map<String, Value>> for ToolInput {
    fn from(fields: Map<String, Value>) -> Self {
        Self { fields }
    }
}

fn strip_code_fence(raw: &str) -> &str {
    if !raw.starts_with("```") {
        return raw;
    }
    let inner = raw.trim_start_matches("```json").trim_start_matches("```");
    inner.trim_end_matches("```").trim()
}

fn is_empty_literal(raw: &str) -> bool {
    raw.is_empty() || matches!(raw, "None" | "none" | "null" | "\"\"" | "''")
}

fn unquote(raw: &str) -> &str {
    for quote in ['"', '\'', '`'] {
        if raw.len() >= 2 && raw.starts_with(quote) && raw.ends_with(quote) {
            return raw[1..raw.len() - 1].trim();
        }
    }
    raw
}
