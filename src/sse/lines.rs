//! Line reassembly for decoded stream text.

/// Accumulates decoded text and splits it into complete lines.
///
/// The segment after the last newline (which may be empty) is retained as
/// the partial line for the next call, so no line is ever emitted twice and
/// a line is never emitted before its terminating newline arrives. A partial
/// line still held when the stream ends is dropped by the stream driver,
/// never delivered.
#[derive(Debug, Default)]
pub struct LineBuffer {
    partial: String,
}

impl LineBuffer {
    /// Create an empty line buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a decoded fragment and return the complete lines it closes.
    ///
    /// Complete lines have their terminating `\n` removed; a trailing `\r`
    /// is stripped as well so CRLF framing parses the same as LF.
    pub fn push(&mut self, fragment: &str) -> Vec<String> {
        self.partial.push_str(fragment);

        let mut lines = Vec::new();
        while let Some(newline) = self.partial.find('\n') {
            let line = self.partial[..newline].trim_end_matches('\r').to_string();
            self.partial = self.partial[newline + 1..].to_string();
            lines.push(line);
        }
        lines
    }

    /// The retained partial line, not yet terminated by a newline.
    pub fn partial(&self) -> &str {
        &self.partial
    }
}
