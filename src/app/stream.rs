//! Input submission and stream-event pumping for the App.

use std::pin::Pin;
use std::sync::Arc;

use futures_util::{Stream, StreamExt};
use tokio::sync::mpsc;
use tracing::warn;

use crate::client::ClientError;
use crate::models::ChatRequest;
use crate::sse::SseEvent;

use super::{App, AppMessage, StreamSession, BUSY_NOTICE};

impl App {
    /// Submit the current input and spawn the streaming request.
    ///
    /// A send while a response is still streaming is rejected: the input is
    /// left intact and a notice is shown. One stream at a time.
    pub fn submit_input(&mut self) {
        let content = self.input.trim().to_string();
        if content.is_empty() {
            return;
        }

        if self.is_streaming() {
            self.status_notice = Some(BUSY_NOTICE.to_string());
            self.mark_dirty();
            return;
        }

        self.input.clear();
        self.status_notice = None;
        self.log.push_user(content.clone());
        self.session = Some(StreamSession::new());
        self.mark_dirty();

        let client = Arc::clone(&self.client);
        let message_tx = self.message_tx.clone();
        let request = ChatRequest::with_conversation(content, self.conversation_id.clone());

        tokio::spawn(async move {
            match client.stream(&request).await {
                Ok(mut stream) => {
                    let _ = message_tx.send(AppMessage::StreamStarted);
                    Self::process_stream(&mut stream, &message_tx).await;
                }
                Err(e) => {
                    warn!(error = %e, "chat request not accepted");
                    let _ = message_tx.send(AppMessage::StreamError {
                        error: e.to_string(),
                    });
                }
            }
        });
    }

    /// Pump stream events into app messages.
    ///
    /// Events are forwarded strictly in arrival order. The first transport
    /// error ends the session; end-of-stream completes it.
    pub async fn process_stream(
        stream: &mut Pin<Box<dyn Stream<Item = Result<SseEvent, ClientError>> + Send>>,
        message_tx: &mpsc::UnboundedSender<AppMessage>,
    ) {
        while let Some(result) = stream.next().await {
            match result {
                Ok(event) => {
                    // Frames with no content produce no update.
                    if event.text.is_empty() {
                        continue;
                    }
                    let _ = message_tx.send(AppMessage::StreamToken { token: event.text });
                }
                Err(e) => {
                    warn!(error = %e, "stream failed mid-flight");
                    let _ = message_tx.send(AppMessage::StreamError {
                        error: e.to_string(),
                    });
                    return;
                }
            }
        }
        let _ = message_tx.send(AppMessage::StreamComplete);
    }
}
