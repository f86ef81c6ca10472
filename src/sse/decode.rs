//! Incremental UTF-8 decoding for streamed byte chunks.

/// Streaming UTF-8 decoder.
///
/// Transport chunks split at arbitrary byte offsets, so a multi-byte
/// character can arrive half in one chunk and half in the next. The decoder
/// holds the incomplete trailing sequence back and prepends it to the next
/// chunk instead of emitting a replacement character for it.
///
/// Byte sequences that are permanently invalid (not merely truncated at the
/// chunk boundary) decode to U+FFFD; this never stops decoding.
#[derive(Debug, Default)]
pub struct Utf8Decoder {
    /// Bytes of an incomplete trailing character, carried to the next call.
    carry: Vec<u8>,
}

impl Utf8Decoder {
    /// Create a new decoder with empty carry state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode a chunk, returning the text that is complete so far.
    pub fn decode(&mut self, chunk: &[u8]) -> String {
        let mut bytes = std::mem::take(&mut self.carry);
        bytes.extend_from_slice(chunk);

        let mut out = String::with_capacity(bytes.len());
        let mut rest = bytes.as_slice();

        loop {
            match std::str::from_utf8(rest) {
                Ok(valid) => {
                    out.push_str(valid);
                    break;
                }
                Err(err) => {
                    let valid_len = err.valid_up_to();
                    if let Ok(valid) = std::str::from_utf8(&rest[..valid_len]) {
                        out.push_str(valid);
                    }
                    match err.error_len() {
                        // Invalid sequence: emit a placeholder and resume after it.
                        Some(bad_len) => {
                            out.push(char::REPLACEMENT_CHARACTER);
                            rest = &rest[valid_len + bad_len..];
                        }
                        // Truncated sequence at the end of the chunk: hold it back.
                        None => {
                            self.carry = rest[valid_len..].to_vec();
                            break;
                        }
                    }
                }
            }
        }

        out
    }

    /// Number of bytes held back waiting for the rest of a character.
    pub fn pending(&self) -> usize {
        self.carry.len()
    }
}
