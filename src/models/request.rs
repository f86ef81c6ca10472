use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Request body for the streaming chat endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatRequest {
    /// The message to send
    pub message: String,
    /// Conversation the message belongs to
    pub conversation_id: String,
}

impl ChatRequest {
    /// Create a request for a fresh conversation.
    pub fn new(message: String) -> Self {
        Self {
            message,
            conversation_id: Uuid::new_v4().to_string(),
        }
    }

    /// Create a request within an existing conversation.
    pub fn with_conversation(message: String, conversation_id: String) -> Self {
        Self {
            message,
            conversation_id,
        }
    }
}
