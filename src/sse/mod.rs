//! SSE (Server-Sent Events) stream decoding
//!
//! Turns the raw byte chunks of a streaming chat response into discrete
//! content events. The backend frames its output as newline-delimited
//! `data: <json>` lines; chunk boundaries fall anywhere, including inside
//! a multi-byte character or inside the `data:` prefix.
//!
//! # Module structure
//! - `decode` - incremental UTF-8 decoding with carry across chunks
//! - `lines` - newline splitting with a retained partial line
//! - `events` - event and error type definitions
//! - `payloads` - internal payload deserialization structs
//! - `parser` - `data:` frame recognition and payload decoding

mod decode;
mod events;
mod lines;
mod parser;
mod payloads;

pub use decode::Utf8Decoder;
pub use events::{SseEvent, SseParseError};
pub use lines::LineBuffer;
pub use parser::{parse_data_frame, SseParser};
