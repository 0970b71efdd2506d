use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tracing::{debug, info};
use uuid::Uuid;

use crate::application::use_cases::completion_timeout::{complete_within, DEFAULT_REQUEST_TIMEOUT};
use crate::application::{CompletionService, SessionStore};
use crate::domain::{ChatContext, ChatReply, ChatTurn, DomainError, PromptBuilder};

pub const MAX_MESSAGE_CHARS: usize = 4000;

/// Interactive health consultation over an explicit conversation context.
pub struct HealthChatUseCase {
    completion_service: Arc<dyn CompletionService>,
    session_store: Option<Arc<dyn SessionStore>>,
    timeout: Duration,
}

impl HealthChatUseCase {
    pub fn new(completion_service: Arc<dyn CompletionService>) -> Self {
        Self {
            completion_service,
            session_store: None,
            timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    pub fn with_session_store(mut self, store: Arc<dyn SessionStore>) -> Self {
        self.session_store = Some(store);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Answer `message` given the prior `context`.
    ///
    /// On success the user turn and the assistant reply are appended to
    /// `context`; on failure it is left untouched.
    pub async fn execute(
        &self,
        message: &str,
        context: &mut ChatContext,
    ) -> Result<ChatReply, DomainError> {
        let message = validate_message(message)?;
        let turn = ChatTurn::user(message);

        debug!("Chat turn with {} prior turn(s)", context.len());
        let prompt = PromptBuilder::chat(&turn, context);
        let response =
            complete_within(self.completion_service.as_ref(), &prompt, self.timeout).await?;
        let response = response.trim().to_string();

        context.append(turn);
        context.append(ChatTurn::assistant(response.clone()));

        Ok(ChatReply {
            response,
            timestamp: Utc::now(),
            session_id: None,
        })
    }

    /// Answer within a stored session, creating a new session id when none is given.
    pub async fn execute_in_session(
        &self,
        session_id: Option<&str>,
        message: &str,
    ) -> Result<ChatReply, DomainError> {
        let store = self
            .session_store
            .as_ref()
            .ok_or_else(|| DomainError::internal("No session store configured for chat"))?;

        let session_id = match session_id.map(str::trim) {
            Some(id) if !id.is_empty() => id.to_string(),
            _ => {
                let id = Uuid::new_v4().to_string();
                info!("Starting chat session {}", id);
                id
            }
        };

        let mut context = store.read_all(&session_id).await?;
        let prior_len = context.len();

        let mut reply = self.execute(message, &mut context).await?;

        for turn in context.turns()[prior_len..].iter().cloned() {
            store.append(&session_id, turn).await?;
        }

        reply.session_id = Some(session_id);
        Ok(reply)
    }
}

fn validate_message(message: &str) -> Result<&str, DomainError> {
    let message = message.trim();
    if message.is_empty() {
        return Err(DomainError::invalid_input("Message cannot be empty"));
    }
    if message.chars().count() > MAX_MESSAGE_CHARS {
        return Err(DomainError::invalid_input(format!(
            "Message too long (max {} characters)",
            MAX_MESSAGE_CHARS
        )));
    }
    Ok(message)
}
