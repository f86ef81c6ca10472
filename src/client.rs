//! Chat API client for backend communication.
//!
//! Issues the streaming request and drives the response bytes through
//! UTF-8 decoding, line reassembly, and event parsing, yielding an async
//! stream of content events.

use std::collections::VecDeque;
use std::pin::Pin;
use std::sync::Arc;

use futures_util::stream::{self, Stream};
use futures_util::StreamExt;
use tracing::debug;

use crate::models::ChatRequest;
use crate::sse::{LineBuffer, SseEvent, SseParser, Utf8Decoder};
use crate::traits::{ByteStream, Headers, HttpClient, HttpError};

/// Default backend base URL, overridable via configuration.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

/// Error type for chat client operations
#[derive(Debug)]
pub enum ClientError {
    /// HTTP request or body read failed
    Http(HttpError),
    /// Server rejected the request with a non-success status
    Rejected { status: u16 },
    /// Response was accepted but carried no readable body
    MissingBody,
    /// Request serialization failed
    Json(serde_json::Error),
}

impl std::fmt::Display for ClientError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClientError::Http(e) => write!(f, "HTTP error: {}", e),
            ClientError::Rejected { status } => {
                write!(f, "Server rejected request (status {})", status)
            }
            ClientError::MissingBody => write!(f, "Response has no body"),
            ClientError::Json(e) => write!(f, "JSON error: {}", e),
        }
    }
}

impl std::error::Error for ClientError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ClientError::Http(e) => Some(e),
            ClientError::Json(e) => Some(e),
            ClientError::Rejected { .. } | ClientError::MissingBody => None,
        }
    }
}

impl From<HttpError> for ClientError {
    fn from(e: HttpError) -> Self {
        ClientError::Http(e)
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(e: serde_json::Error) -> Self {
        ClientError::Json(e)
    }
}

/// State threaded through the event-stream driver.
struct StreamDriver {
    bytes: ByteStream,
    decoder: Utf8Decoder,
    lines: LineBuffer,
    parser: SseParser,
    /// Events parsed from the current chunk but not yet emitted.
    pending: VecDeque<SseEvent>,
}

/// Client for the streaming chat API.
///
/// The transport is injected through the [`HttpClient`] trait so tests can
/// script chunk boundaries and failures.
pub struct ChatClient {
    base_url: String,
    http: Arc<dyn HttpClient>,
}

impl ChatClient {
    /// Create a client against the default base URL.
    pub fn new(http: Arc<dyn HttpClient>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            http,
        }
    }

    /// Create a client against a custom base URL.
    pub fn with_base_url(http: Arc<dyn HttpClient>, base_url: String) -> Self {
        Self { base_url, http }
    }

    /// The base URL requests are issued against.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Send a chat message and stream the response events.
    ///
    /// The response is accepted only when its status indicates success and a
    /// readable body is present; otherwise the session fails up front.
    /// Within the stream, malformed data frames are skipped (logged by the
    /// parser) and an unterminated trailing line at end-of-stream is
    /// dropped, never delivered as an event.
    pub async fn stream(
        &self,
        request: &ChatRequest,
    ) -> Result<Pin<Box<dyn Stream<Item = Result<SseEvent, ClientError>> + Send>>, ClientError>
    {
        let url = format!("{}/chat", self.base_url);
        let body = serde_json::to_string(request)?;

        let mut headers = Headers::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        headers.insert("Accept".to_string(), "text/event-stream".to_string());

        let response = self.http.post_stream(&url, &body, &headers).await?;

        if !response.is_success() {
            return Err(ClientError::Rejected {
                status: response.status,
            });
        }
        let bytes = match response.body {
            Some(bytes) => bytes,
            None => return Err(ClientError::MissingBody),
        };

        let driver = StreamDriver {
            bytes,
            decoder: Utf8Decoder::new(),
            lines: LineBuffer::new(),
            parser: SseParser::new(),
            pending: VecDeque::new(),
        };

        let event_stream = stream::unfold(driver, |mut driver| async move {
            loop {
                if let Some(event) = driver.pending.pop_front() {
                    return Some((Ok(event), driver));
                }

                match driver.bytes.next().await {
                    Some(Ok(chunk)) => {
                        let text = driver.decoder.decode(&chunk);
                        for line in driver.lines.push(&text) {
                            if let Some(event) = driver.parser.feed_line(&line) {
                                driver.pending.push_back(event);
                            }
                        }
                    }
                    Some(Err(e)) => {
                        return Some((Err(ClientError::Http(e)), driver));
                    }
                    None => {
                        // End of data. A retained partial line has no
                        // terminating newline and is dropped, not parsed.
                        if !driver.lines.partial().is_empty() {
                            debug!(
                                partial = %driver.lines.partial(),
                                "discarding unterminated trailing frame"
                            );
                        }
                        return None;
                    }
                }
            }
        });

        Ok(Box::pin(event_stream))
    }
}
