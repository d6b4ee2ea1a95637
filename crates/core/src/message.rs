//! Message domain types.
//!
//! Messages are the conversational log threaded through the workflow:
//! the boundary adapter appends the user's request, each specialist step
//! appends its synthesis or deliverable summary, and the supervisor may
//! append routing notices.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a consulting session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub String);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The role of a message author in a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The end user (the client asking for consulting work)
    User,
    /// A specialist step responding on behalf of the assistant
    Assistant,
    /// Workflow notices (iteration limits, routing notes)
    System,
}

/// A single message in the conversation log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Unique message ID
    pub id: String,

    /// Who sent this message
    pub role: Role,

    /// The text content
    pub content: String,

    /// Optional author name — identifies which specialist produced an
    /// assistant message (e.g. "research_specialist")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,

    /// Timestamp
    pub timestamp: DateTime<Utc>,
}

impl Message {
    /// Create a new user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role: Role::User,
            content: content.into(),
            author: None,
            timestamp: Utc::now(),
        }
    }

    /// Create a new assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role: Role::Assistant,
            content: content.into(),
            author: None,
            timestamp: Utc::now(),
        }
    }

    /// Create an assistant message attributed to a named specialist.
    pub fn named(author: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role: Role::Assistant,
            content: content.into(),
            author: Some(author.into()),
            timestamp: Utc::now(),
        }
    }

    /// Create a new system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role: Role::System,
            content: content.into(),
            author: None,
            timestamp: Utc::now(),
        }
    }
}

/// Locate the most recent user-authored message, scanning from the end.
pub fn last_user_message(messages: &[Message]) -> Option<&Message> {
    messages.iter().rev().find(|m| m.role == Role::User)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_user_message() {
        let msg = Message::user("Help me plan a migration");
        assert_eq!(msg.role, Role::User);
        assert_eq!(msg.content, "Help me plan a migration");
        assert!(msg.author.is_none());
    }

    #[test]
    fn named_message_carries_author() {
        let msg = Message::named("research_specialist", "Findings below.");
        assert_eq!(msg.role, Role::Assistant);
        assert_eq!(msg.author.as_deref(), Some("research_specialist"));
    }

    #[test]
    fn message_serialization_roundtrip() {
        let msg = Message::system("Maximum iterations reached.");
        let json = serde_json::to_string(&msg).unwrap();
        let deserialized: Message = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized.content, "Maximum iterations reached.");
        assert_eq!(deserialized.role, Role::System);
    }

    #[test]
    fn last_user_message_scans_from_end() {
        let messages = vec![
            Message::user("first question"),
            Message::assistant("answer"),
            Message::user("second question"),
            Message::system("notice"),
        ];
        let found = last_user_message(&messages).unwrap();
        assert_eq!(found.content, "second question");
    }

    #[test]
    fn last_user_message_empty_log() {
        let messages = vec![Message::system("notice")];
        assert!(last_user_message(&messages).is_none());
        assert!(last_user_message(&[]).is_none());
    }
}
