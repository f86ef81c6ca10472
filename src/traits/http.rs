//! HTTP client trait abstraction.
//!
//! Provides a trait-based abstraction for the streaming HTTP transport,
//! enabling dependency injection and mocking in tests.

use async_trait::async_trait;
use bytes::Bytes;
use futures::Stream;
use std::collections::HashMap;
use std::pin::Pin;

/// HTTP headers represented as a key-value map.
pub type Headers = HashMap<String, String>;

/// A stream of body chunks; any pull may fail with a transport error.
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, HttpError>> + Send>>;

/// Response to a streaming request.
///
/// The status and body are exposed separately so the caller decides
/// acceptance: a response is only streamed when the status indicates
/// success and a readable body is present.
pub struct StreamResponse {
    /// HTTP status code
    pub status: u16,
    /// Response body, absent when the server returned none
    pub body: Option<ByteStream>,
}

impl StreamResponse {
    /// Create a response with a body.
    pub fn new(status: u16, body: ByteStream) -> Self {
        Self {
            status,
            body: Some(body),
        }
    }

    /// Create a response without a body.
    pub fn without_body(status: u16) -> Self {
        Self { status, body: None }
    }

    /// Check if the response indicates success (2xx status).
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// HTTP client errors.
#[derive(Debug, Clone)]
pub enum HttpError {
    /// Connection failed
    ConnectionFailed(String),
    /// Request timeout
    Timeout(String),
    /// IO error while reading the body
    Io(String),
    /// Other error
    Other(String),
}

impl std::fmt::Display for HttpError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HttpError::ConnectionFailed(msg) => write!(f, "Connection failed: {}", msg),
            HttpError::Timeout(msg) => write!(f, "Request timeout: {}", msg),
            HttpError::Io(msg) => write!(f, "IO error: {}", msg),
            HttpError::Other(msg) => write!(f, "HTTP error: {}", msg),
        }
    }
}

impl std::error::Error for HttpError {}

/// Trait for the streaming HTTP transport.
///
/// Implementations include the production reqwest-based client and a mock
/// client for tests.
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Perform a POST request and return the response with a streaming body.
    ///
    /// The response is returned whatever its status; evaluating acceptance
    /// is the caller's responsibility.
    async fn post_stream(
        &self,
        url: &str,
        body: &str,
        headers: &Headers,
    ) -> Result<StreamResponse, HttpError>;
}
