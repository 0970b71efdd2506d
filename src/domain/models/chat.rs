use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

impl ChatRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChatRole::User => "user",
            ChatRole::Assistant => "assistant",
        }
    }
}

impl std::fmt::Display for ChatRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    role: ChatRole,
    text: String,
    timestamp: DateTime<Utc>,
}

impl ChatTurn {
    pub fn new(role: ChatRole, text: impl Into<String>) -> Self {
        Self {
            role,
            text: text.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::new(ChatRole::User, text)
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self::new(ChatRole::Assistant, text)
    }

    pub fn role(&self) -> ChatRole {
        self.role
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// `role: text`, the form used when replaying history into a prompt.
    pub fn transcript_line(&self) -> String {
        format!("{}: {}", self.role, self.text)
    }
}

/// Ordered, append-only history of one conversation.
///
/// Owned by the caller and passed explicitly to the chat use case; there is
/// no way to remove or rewrite a turn once appended.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatContext {
    turns: Vec<ChatTurn>,
}

impl ChatContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_turns(turns: Vec<ChatTurn>) -> Self {
        Self { turns }
    }

    pub fn append(&mut self, turn: ChatTurn) {
        self.turns.push(turn);
    }

    pub fn turns(&self) -> &[ChatTurn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Every turn on its own line, oldest first.
    pub fn transcript(&self) -> String {
        self.turns
            .iter()
            .map(ChatTurn::transcript_line)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatReply {
    pub response: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_keeps_insertion_order() {
        let mut context = ChatContext::new();
        context.append(ChatTurn::user("hi"));
        context.append(ChatTurn::assistant("hello"));

        let turns = context.turns();
        assert_eq!(turns.len(), 2);
        assert_eq!(turns[0].role(), ChatRole::User);
        assert_eq!(turns[0].text(), "hi");
        assert_eq!(turns[1].role(), ChatRole::Assistant);
        assert_eq!(turns[1].text(), "hello");
    }

    #[test]
    fn test_transcript_renders_role_prefixed_lines() {
        let context = ChatContext::from_turns(vec![
            ChatTurn::user("I have a cough"),
            ChatTurn::assistant("How long has it lasted?"),
        ]);

        assert_eq!(
            context.transcript(),
            "user: I have a cough\nassistant: How long has it lasted?"
        );
    }

    #[test]
    fn test_empty_context_has_empty_transcript() {
        assert!(ChatContext::new().is_empty());
        assert_eq!(ChatContext::new().transcript(), "");
    }
}
