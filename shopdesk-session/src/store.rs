use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::RwLock;

use crate::{SessionContext, CUSTOMER_EMAIL, CUSTOMER_ID};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("session id must not be empty")]
    EmptySessionId,
}

/// Keyed store of per-session context, injected into each agent.
///
/// Unknown sessions read as an empty context rather than an error.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn context(&self, session_id: &str) -> SessionContext;

    /// Merges `context` into what is already stored for the session.
    async fn update_context(
        &self,
        session_id: &str,
        context: SessionContext,
    ) -> Result<(), SessionError>;

    /// Drops everything stored for the session (logout).
    async fn clear(&self, session_id: &str);

    async fn set_customer_id(&self, session_id: &str, customer_id: &str) -> Result<(), SessionError> {
        self.update_context(session_id, SessionContext::new().with(CUSTOMER_ID, customer_id))
            .await
    }

    async fn set_customer_email(&self, session_id: &str, email: &str) -> Result<(), SessionError> {
        self.update_context(session_id, SessionContext::new().with(CUSTOMER_EMAIL, email))
            .await
    }
}

#[derive(Clone, Default)]
pub struct InMemorySessionStore {
    sessions: Arc<RwLock<HashMap<String, SessionContext>>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn context(&self, session_id: &str) -> SessionContext {
        self.sessions
            .read()
            .await
            .get(session_id)
            .cloned()
            .unwrap_or_default()
    }

    async fn update_context(
        &self,
        session_id: &str,
        context: SessionContext,
    ) -> Result<(), SessionError> {
        if session_id.trim().is_empty() {
            return Err(SessionError::EmptySessionId);
        }
        let mut sessions = self.sessions.write().await;
        sessions
            .entry(session_id.to_string())
            .or_default()
            .merge(&context);
        Ok(())
    }

    async fn clear(&self, session_id: &str) {
        self.sessions.write().await.remove(session_id);
    }
}
