use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::debug;

use crate::application::SessionStore;
use crate::domain::{ChatContext, ChatTurn, DomainError};

/// Process-local chat history, keyed by session id. Nothing is persisted and
/// sessions live as long as the store.
pub struct InMemorySessionStore {
    sessions: Arc<Mutex<HashMap<String, ChatContext>>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self {
            sessions: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub async fn session_count(&self) -> usize {
        self.sessions.lock().await.len()
    }
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn append(&self, session_id: &str, turn: ChatTurn) -> Result<(), DomainError> {
        let mut sessions = self.sessions.lock().await;
        let context = sessions.entry(session_id.to_string()).or_default();
        context.append(turn);
        debug!("Session {} now has {} turn(s)", session_id, context.len());
        Ok(())
    }

    async fn read_all(&self, session_id: &str) -> Result<ChatContext, DomainError> {
        let sessions = self.sessions.lock().await;
        Ok(sessions.get(session_id).cloned().unwrap_or_default())
    }
}
