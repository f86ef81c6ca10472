//! Internal payload deserialization structs.

use serde::Deserialize;

/// Payload of a `data:` frame.
///
/// Only the `content` field is read; everything else the backend sends is
/// ignored. A missing or null `content` is treated as an empty fragment.
#[derive(Debug, Deserialize)]
pub(super) struct DataPayload {
    #[serde(default)]
    pub content: Option<String>,
}
