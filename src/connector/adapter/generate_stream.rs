use serde_json::Value;
use tracing::{debug, warn};

/// Longest line kept while waiting for its newline.
const MAX_LINE_BYTES: usize = 1 << 20;

/// Accumulates text deltas from a newline-delimited JSON byte stream.
///
/// Bytes are split into lines as they arrive, since network chunks do not
/// respect line boundaries. Each line is parsed on its own; a line that is
/// not valid JSON, or that grows past the line limit, is dropped and
/// decoding continues with the next one. Only a string `response` field
/// contributes text. `done` and `error` are read for logging only, whatever
/// their type.
#[derive(Debug)]
pub struct GenerateStreamDecoder {
    pending: Vec<u8>,
    max_line_bytes: usize,
    // Inside an oversized line; bytes are dropped until the next newline.
    discarding: bool,
    output: String,
    fragments: usize,
    skipped: usize,
}

impl Default for GenerateStreamDecoder {
    fn default() -> Self {
        Self {
            pending: Vec::new(),
            max_line_bytes: MAX_LINE_BYTES,
            discarding: false,
            output: String::new(),
            fragments: 0,
            skipped: 0,
        }
    }
}

impl GenerateStreamDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    fn with_max_line_bytes(mut self, max_line_bytes: usize) -> Self {
        self.max_line_bytes = max_line_bytes;
        self
    }

    /// Feed the next chunk of the response body.
    pub fn push(&mut self, mut bytes: &[u8]) {
        if self.discarding {
            match bytes.iter().position(|b| *b == b'\n') {
                Some(pos) => {
                    self.discarding = false;
                    bytes = &bytes[pos + 1..];
                }
                None => return,
            }
        }

        self.pending.extend_from_slice(bytes);

        while let Some(pos) = self.pending.iter().position(|b| *b == b'\n') {
            let line: Vec<u8> = self.pending.drain(..=pos).collect();
            if pos > self.max_line_bytes {
                self.skip_oversized(pos);
                continue;
            }
            self.consume_line(&line[..pos]);
        }

        if self.pending.len() > self.max_line_bytes {
            self.skip_oversized(self.pending.len());
            self.pending.clear();
            self.discarding = true;
        }
    }

    /// Text accumulated so far.
    pub fn text(&self) -> &str {
        &self.output
    }

    /// Lines that could not be decoded or were too long.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Lines that were decoded, whether or not they carried text.
    pub fn fragments(&self) -> usize {
        self.fragments
    }

    /// Flush a trailing line without a newline and return the full text.
    pub fn finish(mut self) -> String {
        if !self.discarding && !self.pending.is_empty() {
            let line = std::mem::take(&mut self.pending);
            self.consume_line(&line);
        }
        debug!(
            "Stream finished: {} fragments, {} skipped, {} chars",
            self.fragments,
            self.skipped,
            self.output.chars().count()
        );
        self.output
    }

    fn skip_oversized(&mut self, len: usize) {
        self.skipped += 1;
        warn!(
            "Dropping stream line of {}+ bytes (limit {})",
            len, self.max_line_bytes
        );
    }

    fn consume_line(&mut self, line: &[u8]) {
        let line = line.strip_suffix(b"\r").unwrap_or(line);
        if line.iter().all(|b| b.is_ascii_whitespace()) {
            return;
        }

        let value = match serde_json::from_slice::<Value>(line) {
            Ok(value) => value,
            Err(e) => {
                self.skipped += 1;
                debug!("Skipping undecodable stream line: {}", e);
                return;
            }
        };

        self.fragments += 1;
        if let Some(error) = error_field(&value) {
            warn!("Server reported an error in the stream: {}", error);
        }
        if let Some(delta) = value.get("response").and_then(Value::as_str) {
            self.output.push_str(delta);
        }
        if value.get("done").and_then(Value::as_bool) == Some(true) {
            debug!("Server marked the generation as done");
        }
    }
}

/// `error` as text: strings as-is, anything else as its JSON form.
fn error_field(value: &Value) -> Option<String> {
    match value.get("error")? {
        Value::Null => None,
        Value::String(message) => Some(message.clone()),
        other => Some(other.to_string()),
    }
}

/// Pull the `error` message out of a JSON error body, if there is one.
pub(crate) fn error_message(body: &str) -> Option<String> {
    serde_json::from_str::<Value>(body.trim())
        .ok()
        .and_then(|value| error_field(&value))
}
