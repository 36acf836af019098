//! Per-session customer context.
//!
//! A session's context is a small key-value map (who the customer is) owned by
//! whatever handles login state. The agent only reads it, once per turn.

mod context;
mod store;

pub use context::{SessionContext, CUSTOMER_EMAIL, CUSTOMER_ID};
pub use store::{InMemorySessionStore, SessionError, SessionStore};
