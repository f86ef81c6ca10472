use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Role of a message in a conversation
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// A single conversation turn.
///
/// Messages are immutable once a later message is appended; the only
/// in-place mutation is the content of the assistant message that is
/// currently streaming (marked by `is_streaming`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Message {
    /// Role of the message sender
    pub role: Role,
    /// Content of the message
    pub content: String,
    /// When the message was created
    pub created_at: DateTime<Utc>,
    /// Whether the message is currently being streamed
    #[serde(default)]
    pub is_streaming: bool,
}

impl Message {
    /// Create a user message.
    pub fn user(content: String) -> Self {
        Self {
            role: Role::User,
            content,
            created_at: Utc::now(),
            is_streaming: false,
        }
    }

    /// Create a completed assistant message.
    pub fn assistant(content: String) -> Self {
        Self {
            role: Role::Assistant,
            content,
            created_at: Utc::now(),
            is_streaming: false,
        }
    }
}
