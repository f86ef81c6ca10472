//! Application state and the streaming session lifecycle.

mod handlers;
mod messages;
mod session;
mod stream;

pub use messages::AppMessage;
pub use session::{SessionStatus, StreamSession};

use std::sync::Arc;

use tokio::sync::mpsc;
use uuid::Uuid;

use crate::client::ChatClient;
use crate::models::MessageLog;

/// Fixed user-visible content of the error message appended when a session
/// fails. No structured error detail reaches the message log.
pub const STREAM_ERROR_MESSAGE: &str = "Server error: could not get a response.";

/// Shown when a send is attempted while a response is still streaming.
pub const BUSY_NOTICE: &str = "Please wait for the current response to complete.";

/// Application state.
///
/// Owns the message log and the active streaming session. The log is
/// mutated only from [`App::handle_message`] and [`App::reset_conversation`]
/// on the event-loop side; the spawned stream task communicates through the
/// message channel and never touches shared state.
pub struct App {
    /// The conversation log rendered by the UI
    pub log: MessageLog,
    /// Current input line
    pub input: String,
    /// The active (or most recently finished) streaming session
    pub session: Option<StreamSession>,
    /// Transient status line notice (e.g. send rejected while busy)
    pub status_notice: Option<String>,
    /// Conversation ID sent with every request in this run
    pub conversation_id: String,
    /// Chat API client shared with spawned stream tasks
    pub client: Arc<ChatClient>,
    /// Sender side of the app message channel
    pub message_tx: mpsc::UnboundedSender<AppMessage>,
    /// Receiver side, taken by the event loop
    pub message_rx: Option<mpsc::UnboundedReceiver<AppMessage>>,
    /// Whether the app should exit
    pub should_quit: bool,
    /// Whether the UI needs a redraw
    pub needs_redraw: bool,
    /// Tick counter for the spinner animation
    pub tick_count: u64,
}

impl App {
    /// Create the application state around a chat client.
    pub fn new(client: Arc<ChatClient>) -> Self {
        let (message_tx, message_rx) = mpsc::unbounded_channel();
        Self {
            log: MessageLog::new(),
            input: String::new(),
            session: None,
            status_notice: None,
            conversation_id: Uuid::new_v4().to_string(),
            client,
            message_tx,
            message_rx: Some(message_rx),
            should_quit: false,
            needs_redraw: true,
            tick_count: 0,
        }
    }

    /// Whether a session is currently in flight (indicator state).
    ///
    /// Raised when a send begins and lowered unconditionally when the
    /// session reaches a terminal state, success or failure.
    pub fn is_streaming(&self) -> bool {
        matches!(
            self.session.as_ref().map(|s| s.status),
            Some(SessionStatus::Sending | SessionStatus::Streaming)
        )
    }

    /// Mark the UI as needing a redraw.
    pub fn mark_dirty(&mut self) {
        self.needs_redraw = true;
    }

    /// Advance the animation tick.
    pub fn tick(&mut self) {
        self.tick_count = self.tick_count.wrapping_add(1);
    }

    /// Request application exit.
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Insert a character into the input line.
    pub fn insert_char(&mut self, c: char) {
        self.input.push(c);
        self.mark_dirty();
    }

    /// Delete the character before the cursor.
    pub fn backspace(&mut self) {
        self.input.pop();
        self.mark_dirty();
    }

    /// Clear the conversation.
    ///
    /// Empties the log unconditionally, independent of any in-flight
    /// session; a still-running stream keeps delivering into a fresh
    /// in-progress entry.
    pub fn reset_conversation(&mut self) {
        self.log.clear();
        self.input.clear();
        self.status_notice = None;
        self.mark_dirty();
    }
}
