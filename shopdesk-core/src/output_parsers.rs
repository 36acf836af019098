use std::sync::OnceLock;

use regex::Regex;

use crate::react::{AgentAction, ParsedOutcome};

pub const FINAL_ANSWER_MARKER: &str = "Final Answer:";
pub const UNPARSED_OUTPUT_PREFIX: &str = "[Unparsed Output]";

const OBSERVATION_MARKER: &str = "Observation:";
const THOUGHT_PREFIX: &str = "Thought:";

fn action_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| {
            Regex::new(
                r"\bAction[ \t]*:[ \t]*([^\r\n]*?)[ \t]*\r?\n[ \t]*Action[ \t]+Input[ \t]*:[ \t]*([^\r\n]*)",
            )
            .ok()
        })
        .as_ref()
}

/// Turns free-form ReAct text into a [`ParsedOutcome`].
///
/// Parsing is total: text that matches neither the final-answer marker nor
/// the `Action:` / `Action Input:` pair is treated as a direct answer.
#[derive(Clone, Copy, Debug, Default)]
pub struct ReActOutputParser;

impl ReActOutputParser {
    pub fn new() -> Self {
        Self
    }

    pub fn parse(&self, text: &str) -> ParsedOutcome {
        // Backends sometimes quote the marker inside an earlier reasoning
        // line, so only the last occurrence counts.
        if let Some(idx) = text.rfind(FINAL_ANSWER_MARKER) {
            let output = &text[idx + FINAL_ANSWER_MARKER.len()..];
            return ParsedOutcome::finish(output.trim());
        }

        let Some(pattern) = action_pattern() else {
            return ParsedOutcome::finish(format!("{UNPARSED_OUTPUT_PREFIX} {}", text.trim()));
        };

        if let Some(captures) = pattern.captures(text) {
            let start = captures.get(0).map_or(0, |m| m.start());
            let tool_name = captures.get(1).map_or("", |m| m.as_str()).trim();
            let mut raw_input = captures.get(2).map_or("", |m| m.as_str());
            if let Some(cut) = raw_input.find(OBSERVATION_MARKER) {
                raw_input = &raw_input[..cut];
            }

            return ParsedOutcome::Action(AgentAction {
                tool_name: tool_name.to_string(),
                raw_input: raw_input.trim().to_string(),
                thought: extract_thought(&text[..start]),
            });
        }

        ParsedOutcome::finish(text.trim())
    }
}

fn extract_thought(preamble: &str) -> String {
    let trimmed = preamble.trim();
    trimmed
        .strip_prefix(THOUGHT_PREFIX)
        .unwrap_or(trimmed)
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thought_prefix_is_stripped() {
        assert_eq!(extract_thought("  Thought: look it up \n"), "look it up");
        assert_eq!(extract_thought("plain reasoning"), "plain reasoning");
        assert_eq!(extract_thought(""), "");
    }

    #[test]
    fn action_pattern_compiles() {
        assert!(action_pattern().is_some());
    }
}
