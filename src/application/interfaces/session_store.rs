use async_trait::async_trait;

use crate::domain::{ChatContext, ChatTurn, DomainError};

/// Holds chat history per conversation.
///
/// Append is the only mutation. Reading an unknown session yields an empty
/// context.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn append(&self, session_id: &str, turn: ChatTurn) -> Result<(), DomainError>;

    async fn read_all(&self, session_id: &str) -> Result<ChatContext, DomainError>;
}
