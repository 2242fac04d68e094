//! Word-level chunking for outgoing text deltas
//!
//! Upstream deltas arrive at arbitrary byte boundaries; the client-facing
//! stream re-chunks them so each emitted delta ends on a word boundary.

/// Stateful word chunker.
///
/// Buffers incoming text and releases it one word at a time, where a
/// word is a run of non-whitespace followed by its trailing whitespace.
/// A partial word at the end of a delta stays buffered until the next
/// feed (or flush) completes it.
#[derive(Debug, Default)]
pub struct WordChunker {
    buffer: String,
}

impl WordChunker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a delta, returning the word chunks it completes.
    pub fn feed(&mut self, delta: &str) -> Vec<String> {
        self.buffer.push_str(delta);

        let mut chunks = Vec::new();
        loop {
            // A word is complete once whitespace follows non-whitespace.
            let mut end = None;
            let mut seen_word = false;
            for (i, c) in self.buffer.char_indices() {
                if c.is_whitespace() {
                    seen_word = true;
                } else if seen_word {
                    end = Some(i);
                    break;
                }
            }

            match end {
                Some(i) => {
                    let chunk: String = self.buffer.drain(..i).collect();
                    chunks.push(chunk);
                }
                None => break,
            }
        }
        chunks
    }

    /// Flush any buffered partial word at end of stream.
    pub fn flush(&mut self) -> Option<String> {
        if self.buffer.is_empty() {
            None
        } else {
            Some(std::mem::take(&mut self.buffer))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_words_released_on_boundaries() {
        let mut chunker = WordChunker::new();

        let chunks = chunker.feed("hello wor");
        assert_eq!(chunks, vec!["hello ".to_string()]);

        let chunks = chunker.feed("ld there");
        assert_eq!(chunks, vec!["world ".to_string()]);

        assert_eq!(chunker.flush(), Some("there".to_string()));
    }

    #[test]
    fn test_multiple_words_in_one_delta() {
        let mut chunker = WordChunker::new();

        let chunks = chunker.feed("plan your trip to Vegas");
        assert_eq!(
            chunks,
            vec![
                "plan ".to_string(),
                "your ".to_string(),
                "trip ".to_string(),
                "to ".to_string(),
            ]
        );
        assert_eq!(chunker.flush(), Some("Vegas".to_string()));
    }

    #[test]
    fn test_newlines_travel_with_preceding_word() {
        let mut chunker = WordChunker::new();

        let chunks = chunker.feed("line one\nline two");
        assert_eq!(chunks[0], "line ");
        assert_eq!(chunks[1], "one\n");
        assert_eq!(chunks[2], "line ");
        assert_eq!(chunker.flush(), Some("two".to_string()));
    }

    #[test]
    fn test_flush() {
        let mut chunker = WordChunker::new();
        assert_eq!(chunker.flush(), None);

        // Trailing whitespace stays attached to its word until flush.
        chunker.feed("word ");
        assert_eq!(chunker.flush(), Some("word ".to_string()));
        assert_eq!(chunker.flush(), None);
    }
}
