//! Chat traits for the LLM assistant.
//!
//! A [`ChatProvider`] opens sessions; a [`ChatSession`] holds one
//! conversation, seeded with a system prompt and carrying its own turn
//! history. The transcript lives only in memory — it is never persisted.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ChatResult;

/// Who said a chat turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One entry in a conversation transcript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: Role,
    pub content: String,
}

impl ChatTurn {
    /// A user turn.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    /// An assistant turn.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// An open conversation with the LLM.
#[async_trait]
pub trait ChatSession: Send {
    /// Send one user message and return the assistant's reply.
    ///
    /// Implementations append both turns to their internal history so the
    /// next call carries the full conversation.
    async fn send(&mut self, text: &str) -> ChatResult<String>;
}

/// Factory for chat sessions.
///
/// Implementations:
/// - `GeminiChat` - Google Gemini REST client
/// - `MockChat` - scripted replies for tests
pub trait ChatProvider: Send + Sync {
    /// Open a session seeded with `system_prompt`.
    fn session(&self, system_prompt: &str) -> Box<dyn ChatSession>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_turn_constructors() {
        let user = ChatTurn::user("hello");
        let bot = ChatTurn::assistant("hi");

        assert_eq!(user.role, Role::User);
        assert_eq!(bot.role, Role::Assistant);
        assert_eq!(user.content, "hello");
    }

    #[test]
    fn test_role_serializes_lowercase() {
        let json = serde_json::to_string(&ChatTurn::user("q")).unwrap();
        assert!(json.contains(r#""role":"user""#));
    }
}
