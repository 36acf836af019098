use std::collections::HashMap;
use std::sync::OnceLock;

use regex::Regex;
use shopdesk_core::{ShopdeskError, Value};

fn placeholder_pattern() -> Result<&'static Regex, ShopdeskError> {
    static PATTERN: OnceLock<Result<Regex, String>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"\{\{\s*(\w+)\s*\}\}").map_err(|e| e.to_string()))
        .as_ref()
        .map_err(|e| ShopdeskError::InvalidConfig(e.clone()))
}

/// A text template with `{{name}}` placeholders.
///
/// Partial variables are bound once (for example the tool catalog) and are
/// overridden by variables passed to [`PromptTemplate::render`]. Unknown
/// placeholders render as empty text.
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    template: String,
    partials: HashMap<String, Value>,
}

impl PromptTemplate {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            partials: HashMap::new(),
        }
    }

    pub fn with_partial(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.partials.insert(key.into(), value.into());
        self
    }

    /// Placeholder names in order of first appearance.
    pub fn variables(&self) -> Result<Vec<String>, ShopdeskError> {
        let pattern = placeholder_pattern()?;
        let mut names: Vec<String> = Vec::new();
        for caps in pattern.captures_iter(&self.template) {
            let name = caps[1].to_string();
            if !names.contains(&name) {
                names.push(name);
            }
        }
        Ok(names)
    }

    pub fn render(&self, vars: &HashMap<String, Value>) -> Result<String, ShopdeskError> {
        let pattern = placeholder_pattern()?;
        let rendered = pattern.replace_all(&self.template, |caps: &regex::Captures| {
            let key = &caps[1];
            match vars.get(key).or_else(|| self.partials.get(key)) {
                Some(value) => value
                    .as_str()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| value.to_string()),
                None => String::new(),
            }
        });
        Ok(rendered.to_string())
    }
}
