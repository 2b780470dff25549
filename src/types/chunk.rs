//! Chunk type definitions.

use serde::{Deserialize, Serialize};

/// A chunk of text extracted from a source document.
///
/// Chunks are the fundamental unit of content that gets embedded and indexed.
/// A chunk has no identity beyond its position and content: two splits of the
/// same text with the same configuration produce equal chunks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    /// The text content of the chunk
    pub content: String,

    /// Number of characters in the content
    pub char_count: usize,

    /// Starting character offset in the source text
    pub start_index: usize,

    /// Ending character offset in the source text (exclusive)
    pub end_index: usize,

    /// Order of this chunk within its source (0-indexed)
    pub chunk_index: usize,
}

impl Chunk {
    /// Create a new chunk with the given content and position.
    pub fn new(content: String, start_index: usize, end_index: usize, chunk_index: usize) -> Self {
        let char_count = content.chars().count();
        Self {
            content,
            char_count,
            start_index,
            end_index,
            chunk_index,
        }
    }

    /// Length of the chunk content in characters.
    pub fn len(&self) -> usize {
        self.char_count
    }

    /// Check if the chunk is empty.
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

/// Build an ordered chunk collection from bare text pieces.
///
/// Offsets are assigned sequentially, treating the pieces as adjacent spans.
/// Used where chunks arrive without their source document, e.g. statistics
/// requests over the HTTP API.
pub fn chunks_from_texts(texts: Vec<String>) -> Vec<Chunk> {
    let mut chunks = Vec::with_capacity(texts.len());
    let mut offset = 0;

    for (index, text) in texts.into_iter().enumerate() {
        let char_count = text.chars().count();
        chunks.push(Chunk::new(text, offset, offset + char_count, index));
        offset += char_count;
    }

    chunks
}
