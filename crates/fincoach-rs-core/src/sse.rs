//! Incremental decoder for server-sent-event completion streams.
//!
//! Upstream frames look like `data: {"choices":[{"delta":{"content":"…"}}]}`
//! terminated by a literal `data: [DONE]` line. Network chunks may split a
//! line anywhere, including inside a UTF-8 sequence, so the decoder buffers
//! raw bytes and only interprets complete lines.

use log::warn;
use serde::Deserialize;

/// One parsed stream event payload.
#[derive(Debug, Deserialize)]
struct StreamChunk {
    #[serde(default)]
    choices: Vec<StreamChoice>,
}

#[derive(Debug, Deserialize)]
struct StreamChoice {
    #[serde(default)]
    delta: Delta,
}

#[derive(Debug, Default, Deserialize)]
struct Delta {
    #[serde(default)]
    content: Option<String>,
}

/// Stateful line-assembling SSE decoder.
///
/// Feed it byte chunks in arrival order; it yields the text fragments in the
/// same order regardless of how the chunk boundaries fall.
#[derive(Debug, Default)]
pub struct SseDecoder {
    buffer: Vec<u8>,
}

impl SseDecoder {
    /// Create an empty decoder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume one network chunk and return the fragments completed by it.
    ///
    /// An incomplete trailing line stays buffered until a later chunk (or
    /// never completes, in which case it is dropped with the stream).
    pub fn push(&mut self, chunk: &[u8]) -> Vec<String> {
        self.buffer.extend_from_slice(chunk);
        let mut fragments = Vec::new();
        while let Some(newline) = self.buffer.iter().position(|&byte| byte == b'\n') {
            let line: Vec<u8> = self.buffer.drain(..=newline).collect();
            let line = String::from_utf8_lossy(&line[..line.len() - 1]);
            if let Some(fragment) = decode_line(&line) {
                fragments.push(fragment);
            }
        }
        fragments
    }
}

/// Extract the delta content from one complete line, if any.
///
/// Blank lines, the `[DONE]` sentinel, and lines without the `data: ` prefix
/// are skipped silently; a malformed JSON payload is skipped with a warning
/// so one bad frame never aborts the stream.
fn decode_line(line: &str) -> Option<String> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed == "data: [DONE]" {
        return None;
    }
    let payload = line.strip_prefix("data: ")?;
    let chunk: StreamChunk = match serde_json::from_str(payload) {
        Ok(chunk) => chunk,
        Err(err) => {
            warn!("skipping malformed stream frame: {err}");
            return None;
        }
    };
    chunk
        .choices
        .into_iter()
        .next()?
        .delta
        .content
        .filter(|content| !content.is_empty())
}
