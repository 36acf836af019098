//! Bounded conversation memory for shopdesk sessions.
//!
//! Memory is process-lifetime only and owned by a single session; the agent
//! loop is its only writer and appends exactly one exchange per completed turn.

use shopdesk_core::Turn;

pub mod window;

pub use window::ConversationWindowMemory;

pub trait Memory: Send + Sync {
    /// Ordered turns, oldest first.
    fn history(&self) -> Vec<Turn>;

    /// Record one completed exchange: the user input and the final reply.
    fn save_context(&mut self, input: &str, output: &str);

    fn clear(&mut self);

    /// History as role-tagged lines, ready to be placed in a prompt.
    fn render(&self) -> String;
}
