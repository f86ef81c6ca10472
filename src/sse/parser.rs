//! `data:` frame recognition and payload decoding.

use tracing::warn;

use crate::sse::events::{SseEvent, SseParseError};
use crate::sse::payloads::DataPayload;

/// The frame prefix marking an event-data line.
const DATA_PREFIX: &str = "data:";

/// Parse the payload of one `data:` frame (prefix already stripped).
pub fn parse_data_frame(data: &str) -> Result<SseEvent, SseParseError> {
    let payload: DataPayload =
        serde_json::from_str(data).map_err(|e| SseParseError::InvalidJson {
            source: e.to_string(),
        })?;
    Ok(SseEvent {
        text: payload.content.unwrap_or_default(),
    })
}

/// Per-line event parser with the skip-and-continue failure policy.
///
/// Lines without the `data:` prefix are ignored. For a `data:` line the
/// prefix and at most one following space are stripped and the remainder is
/// decoded as a JSON payload. A malformed payload is logged, counted, and
/// skipped; it never aborts the stream.
#[derive(Debug, Default)]
pub struct SseParser {
    /// Malformed frames skipped this session.
    skipped: usize,
}

impl SseParser {
    /// Create a new parser.
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one complete line, returning an event if the line carries one.
    pub fn feed_line(&mut self, line: &str) -> Option<SseEvent> {
        let rest = line.strip_prefix(DATA_PREFIX)?;
        let data = rest.strip_prefix(' ').unwrap_or(rest);

        match parse_data_frame(data) {
            Ok(event) => Some(event),
            Err(err) => {
                self.skipped += 1;
                warn!(%err, frame = %data, "skipping malformed data frame");
                None
            }
        }
    }

    /// Number of malformed frames skipped so far.
    pub fn skipped(&self) -> usize {
        self.skipped
    }
}
