/*!
 * Text chunking for size-limited translation requests.
 *
 * The upstream API rejects long queries, so text is cut at paragraph
 * breaks first and at sentence ends second. Sentence ends are the ASCII
 * `.`, `!`, `?` and the Arabic comma and question mark.
 */

use once_cell::sync::Lazy;
use regex::Regex;

/// Default chunk size in characters; the API limit is around 500
pub const DEFAULT_MAX_CHUNK_CHARS: usize = 450;

/// Sentence-ending punctuation followed by the whitespace that separates it
/// from the next sentence.
static SENTENCE_BREAK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[.!?،؟]\s+").expect("sentence break pattern is valid")
});

/// Length in characters, not bytes
fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Split a paragraph into sentences, keeping the punctuation on the
/// sentence it ends and dropping the whitespace after it.
pub fn split_sentences(paragraph: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;

    for found in SENTENCE_BREAK.find_iter(paragraph) {
        let punctuation_len = found
            .as_str()
            .chars()
            .next()
            .map(char::len_utf8)
            .unwrap_or(0);
        sentences.push(&paragraph[start..found.start() + punctuation_len]);
        start = found.end();
    }

    sentences.push(&paragraph[start..]);
    sentences
}

/// Running buffer that flushes trimmed chunks when the next unit would
/// overflow it.
struct ChunkBuffer {
    chunks: Vec<String>,
    current: String,
    max_size: usize,
}

impl ChunkBuffer {
    fn new(max_size: usize) -> Self {
        Self {
            chunks: Vec::new(),
            current: String::new(),
            max_size,
        }
    }

    fn flush(&mut self) {
        let trimmed = self.current.trim();
        if !trimmed.is_empty() {
            self.chunks.push(trimmed.to_string());
        }
        self.current.clear();
    }

    /// Append `unit` joined by `separator`, flushing first if it would not fit
    fn push(&mut self, unit: &str, separator: char) {
        // The separator is counted even for an empty buffer
        let joined_len = char_len(&self.current) + 1 + char_len(unit);
        if joined_len > self.max_size {
            self.flush();
            self.current.push_str(unit);
        } else {
            if !self.current.is_empty() {
                self.current.push(separator);
            }
            self.current.push_str(unit);
        }
    }

    fn finish(mut self) -> Vec<String> {
        self.flush();
        self.chunks
    }
}

/// Split text into ordered chunks of at most `max_size` characters
///
/// Text that already fits is returned as a single chunk, untouched. A single
/// sentence longer than `max_size` becomes its own over-limit chunk.
pub fn split_into_chunks(text: &str, max_size: usize) -> Vec<String> {
    if char_len(text) <= max_size {
        return vec![text.to_string()];
    }

    let mut buffer = ChunkBuffer::new(max_size);

    for paragraph in text.split('\n') {
        if char_len(paragraph) > max_size {
            buffer.flush();
            for sentence in split_sentences(paragraph) {
                buffer.push(sentence, ' ');
            }
        } else {
            buffer.push(paragraph, '\n');
        }
    }

    buffer.finish()
}
