//! Sentence-based splitter that respects sentence boundaries.

use super::base::Splitter;
use crate::error::ChunkError;
use crate::types::{Chunk, ChunkerConfig};

/// Splits text at sentence boundaries and groups sentences into chunks.
///
/// A sentence ends at a terminal delimiter (`.`, `!`, `?` by default)
/// followed by whitespace or the end of input. Sentences are accumulated
/// greedily, joined by a single space, while the running character length
/// stays within `chunk_size`. A single sentence longer than `chunk_size` is
/// emitted as its own oversized chunk rather than split further.
pub struct SentenceSplitter {
    /// Sentence-ending delimiters
    delimiters: Vec<char>,
}

impl SentenceSplitter {
    /// Create a new sentence splitter with default delimiters.
    pub fn new() -> Self {
        Self {
            delimiters: vec!['.', '!', '?'],
        }
    }

    /// Create a sentence splitter with custom delimiters.
    pub fn with_delimiters(delimiters: Vec<char>) -> Self {
        Self { delimiters }
    }

    /// Split text into sentences, tracking character offsets.
    fn split_sentences(&self, text: &str) -> Vec<Sentence> {
        let chars: Vec<char> = text.chars().collect();
        let mut sentences = Vec::new();
        let mut start = 0;
        let mut i = 0;

        while i < chars.len() {
            if self.delimiters.contains(&chars[i]) {
                let at_end = i + 1 >= chars.len();
                if at_end || chars[i + 1].is_whitespace() {
                    push_sentence(&mut sentences, &chars, start, i + 1);

                    // Skip the whitespace run between sentences
                    i += 1;
                    while i < chars.len() && chars[i].is_whitespace() {
                        i += 1;
                    }
                    start = i;
                    continue;
                }
            }
            i += 1;
        }

        // Trailing text without terminal punctuation is a sentence too
        if start < chars.len() {
            push_sentence(&mut sentences, &chars, start, chars.len());
        }

        sentences
    }
}

impl Default for SentenceSplitter {
    fn default() -> Self {
        Self::new()
    }
}

/// Intermediate sentence representation with character offsets.
struct Sentence {
    text: String,
    start: usize,
    end: usize,
}

fn push_sentence(sentences: &mut Vec<Sentence>, chars: &[char], start: usize, end: usize) {
    let raw: String = chars[start..end].iter().collect();
    let trimmed = raw.trim();
    if !trimmed.is_empty() {
        sentences.push(Sentence {
            text: trimmed.to_string(),
            start,
            end,
        });
    }
}

impl Splitter for SentenceSplitter {
    fn name(&self) -> &'static str {
        "sentence"
    }

    fn description(&self) -> &'static str {
        "Groups sentences into chunks bounded by a target size"
    }

    fn split(&self, text: &str, config: &ChunkerConfig) -> Result<Vec<Chunk>, ChunkError> {
        config.validate()?;

        let sentences = self.split_sentences(text);
        if sentences.is_empty() {
            return Ok(vec![]);
        }

        let mut chunks = Vec::new();
        let mut current = String::new();
        let mut current_chars = 0;
        let mut chunk_start = 0;
        let mut chunk_end = 0;
        let mut chunk_index = 0;

        for sentence in &sentences {
            let sentence_chars = sentence.text.chars().count();
            // Joining adds a single separating space
            let candidate = if current.is_empty() {
                sentence_chars
            } else {
                current_chars + 1 + sentence_chars
            };

            if candidate > config.chunk_size && !current.is_empty() {
                chunks.push(Chunk::new(
                    std::mem::take(&mut current),
                    chunk_start,
                    chunk_end,
                    chunk_index,
                ));
                chunk_index += 1;

                current = sentence.text.clone();
                current_chars = sentence_chars;
                chunk_start = sentence.start;
            } else {
                if current.is_empty() {
                    chunk_start = sentence.start;
                } else {
                    current.push(' ');
                }
                current.push_str(&sentence.text);
                current_chars = candidate;
            }
            chunk_end = sentence.end;
        }

        if !current.is_empty() {
            chunks.push(Chunk::new(current, chunk_start, chunk_end, chunk_index));
        }

        Ok(chunks)
    }
}
