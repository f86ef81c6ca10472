//! Per-request streaming session state.

/// Status of a streaming session.
///
/// `Idle` is represented by the absence of a session. `Completed` and
/// `Failed` are terminal; both lower the in-progress indicator
/// unconditionally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    /// Request issued, awaiting an accepted response
    Sending,
    /// Response accepted, events being consumed
    Streaming,
    /// Transport signaled end-of-data
    Completed,
    /// Rejected response, missing body, or mid-stream error
    Failed,
}

/// Ephemeral state for one request/response cycle.
///
/// Created when a send begins and replaced by the next send. The
/// accumulated content grows monotonically while the session is active and
/// is never read again after a terminal state.
#[derive(Debug, Clone)]
pub struct StreamSession {
    /// Concatenation of all payload fragments seen so far
    pub content: String,
    /// Current lifecycle state
    pub status: SessionStatus,
}

impl StreamSession {
    /// Create a session in the `Sending` state.
    pub fn new() -> Self {
        Self {
            content: String::new(),
            status: SessionStatus::Sending,
        }
    }
}

impl Default for StreamSession {
    fn default() -> Self {
        Self::new()
    }
}
