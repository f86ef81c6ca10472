//! Message handling for the App.

use tracing::{debug, error};

use super::{App, AppMessage, SessionStatus, STREAM_ERROR_MESSAGE};

impl App {
    /// Handle an incoming async message.
    ///
    /// This is the only place the message log changes during streaming:
    /// each token extends the session's accumulated content and the result
    /// is folded into the log with the append-or-replace-last operation.
    pub fn handle_message(&mut self, msg: AppMessage) {
        self.mark_dirty();
        match msg {
            AppMessage::StreamStarted => {
                if let Some(session) = &mut self.session {
                    session.status = SessionStatus::Streaming;
                }
            }
            AppMessage::StreamToken { token } => {
                if let Some(session) = &mut self.session {
                    session.content.push_str(&token);
                    self.log.apply_assistant_update(session.content.clone());
                }
            }
            AppMessage::StreamComplete => {
                if let Some(session) = &mut self.session {
                    session.status = SessionStatus::Completed;
                }
                self.log.finalize_streaming();
                self.status_notice = None;
                debug!("stream completed");
            }
            AppMessage::StreamError { error: err } => {
                if let Some(session) = &mut self.session {
                    session.status = SessionStatus::Failed;
                }
                self.status_notice = None;
                error!(error = %err, "stream failed");
                // Always a new entry; accumulated content stays untouched.
                self.log.push_error(STREAM_ERROR_MESSAGE.to_string());
            }
        }
    }
}
