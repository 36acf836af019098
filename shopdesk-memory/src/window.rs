use std::collections::VecDeque;

use shopdesk_core::{Role, Turn};

use crate::Memory;

pub const DEFAULT_WINDOW: usize = 10;

/// Keeps the most recent `window` exchanges (user turn + assistant turn).
///
/// Holds at most `2 * window` turns; the oldest turns are evicted first.
#[derive(Clone, Debug)]
pub struct ConversationWindowMemory {
    human_prefix: String,
    ai_prefix: String,
    window: usize,
    turns: VecDeque<Turn>,
}

impl ConversationWindowMemory {
    pub fn new(window: usize) -> Self {
        Self {
            human_prefix: "Human".to_string(),
            ai_prefix: "AI".to_string(),
            window,
            turns: VecDeque::with_capacity(window.saturating_mul(2)),
        }
    }

    pub fn with_prefixes(
        mut self,
        human_prefix: impl Into<String>,
        ai_prefix: impl Into<String>,
    ) -> Self {
        self.human_prefix = human_prefix.into();
        self.ai_prefix = ai_prefix.into();
        self
    }

    pub fn window(&self) -> usize {
        self.window
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    fn capacity(&self) -> usize {
        self.window.saturating_mul(2)
    }
}

impl Default for ConversationWindowMemory {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW)
    }
}

impl Memory for ConversationWindowMemory {
    fn history(&self) -> Vec<Turn> {
        self.turns.iter().cloned().collect()
    }

    fn save_context(&mut self, input: &str, output: &str) {
        self.turns.push_back(Turn::user(input));
        self.turns.push_back(Turn::assistant(output));
        while self.turns.len() > self.capacity() {
            self.turns.pop_front();
        }
    }

    fn clear(&mut self) {
        self.turns.clear();
    }

    fn render(&self) -> String {
        let mut rendered = String::new();
        for turn in &self.turns {
            let prefix = match turn.role {
                Role::User => &self.human_prefix,
                Role::Assistant => &self.ai_prefix,
            };
            rendered.push_str(prefix);
            rendered.push_str(": ");
            rendered.push_str(&turn.content);
            rendered.push('\n');
        }
        rendered
    }
}
