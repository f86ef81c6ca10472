//! The ordered message log and its accumulation operations.

use super::message::{Message, Role};

/// Ordered sequence of conversation messages.
///
/// The log is append-only with one exception: while a response is streaming,
/// the last entry is the in-progress assistant message and each accumulator
/// update replaces its content in place. All mutation goes through the
/// explicit operations below; there is no raw access to the entries.
#[derive(Debug, Default)]
pub struct MessageLog {
    messages: Vec<Message>,
}

impl MessageLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// The messages in order, for rendering.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Number of messages in the log.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Whether the log is empty.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Append a user message.
    pub fn push_user(&mut self, content: String) {
        self.messages.push(Message::user(content));
    }

    /// Fold a new running content value into the log.
    ///
    /// If the last entry is the in-progress assistant message its content is
    /// replaced in place; otherwise a new in-progress assistant message is
    /// appended. N sequential updates therefore yield exactly one assistant
    /// entry holding the latest running content.
    pub fn apply_assistant_update(&mut self, content: String) {
        match self.messages.last_mut() {
            Some(last) if last.role == Role::Assistant && last.is_streaming => {
                last.content = content;
            }
            _ => {
                let mut message = Message::assistant(content);
                message.is_streaming = true;
                self.messages.push(message);
            }
        }
    }

    /// Mark the in-progress assistant message, if any, as complete.
    pub fn finalize_streaming(&mut self) {
        if let Some(last) = self.messages.last_mut() {
            last.is_streaming = false;
        }
    }

    /// Append a distinct assistant entry carrying an error notice.
    ///
    /// Never overwrites a partially streamed message: the partial entry is
    /// finalized as-is and the error becomes a separate message after it,
    /// even though that can leave two consecutive assistant entries.
    pub fn push_error(&mut self, content: String) {
        self.finalize_streaming();
        self.messages.push(Message::assistant(content));
    }

    /// Remove all messages.
    pub fn clear(&mut self) {
        self.messages.clear();
    }
}
