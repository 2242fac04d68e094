//! Incremental decoding of the provider's SSE response body.
//!
//! Chat-completions streams arrive as `data: <json>` lines with a final
//! `data: [DONE]` sentinel. Network chunks split lines arbitrarily, so the
//! decoder keeps the unterminated tail between feeds.

use tracing::warn;

/// Largest unterminated line the decoder holds onto. Anything bigger is a
/// malformed stream, not a slow one.
const MAX_PENDING_BYTES: usize = 1024 * 1024;

#[derive(Debug, Default)]
pub struct SseDecoder {
    pending: String,
}

/// One decoded item from the stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SseItem {
    /// Payload of a `data:` line, JSON in practice.
    Data(String),
    /// The `[DONE]` end-of-stream sentinel.
    Done,
}

impl SseDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one network chunk and return every item it completed.
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<SseItem> {
        self.pending.push_str(&String::from_utf8_lossy(chunk));

        let mut items = Vec::new();
        while let Some(newline) = self.pending.find('\n') {
            let line: String = self.pending.drain(..=newline).collect();
            let line = line.trim();

            // Blank lines separate events; lines starting with ':' are
            // keep-alive comments.
            if line.is_empty() || line.starts_with(':') {
                continue;
            }
            let Some(payload) = line.strip_prefix("data:") else {
                continue;
            };

            let payload = payload.trim_start();
            if payload == "[DONE]" {
                items.push(SseItem::Done);
            } else {
                items.push(SseItem::Data(payload.to_string()));
            }
        }

        if self.pending.len() > MAX_PENDING_BYTES {
            warn!(
                bytes = self.pending.len(),
                "Dropping oversized partial SSE line"
            );
            self.pending.clear();
        }

        items
    }
}
