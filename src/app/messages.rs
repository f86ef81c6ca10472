//! AppMessage enum for async communication within the application.

/// Messages sent from the stream task to the event loop
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppMessage {
    /// The response was accepted and the event stream is open
    StreamStarted,
    /// A content fragment received during streaming
    StreamToken { token: String },
    /// The transport signaled end-of-data
    StreamComplete,
    /// The session failed: rejection, missing body, or a mid-stream error
    StreamError { error: String },
}
