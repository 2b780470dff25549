//! Equal-size chunker producing fixed-length overlapping windows.

use super::base::Splitter;
use crate::error::ChunkError;
use crate::types::{Chunk, ChunkerConfig};

/// Splits text into fixed-size character windows with overlap.
///
/// Chunk `i` covers characters `[i*(size-overlap), i*(size-overlap)+size)`
/// clamped to the text length. Every chunk except the last has exactly
/// `chunk_size` characters; the last may be shorter. The window operates on
/// characters, so multi-byte text never splits inside a scalar value.
pub struct EqualSizeSplitter;

impl EqualSizeSplitter {
    /// Create a new equal-size splitter.
    pub fn new() -> Self {
        Self
    }
}

impl Default for EqualSizeSplitter {
    fn default() -> Self {
        Self::new()
    }
}

impl Splitter for EqualSizeSplitter {
    fn name(&self) -> &'static str {
        "equal_size"
    }

    fn description(&self) -> &'static str {
        "Splits text into fixed-size character windows with overlap"
    }

    fn split(&self, text: &str, config: &ChunkerConfig) -> Result<Vec<Chunk>, ChunkError> {
        config.validate()?;

        if text.is_empty() {
            return Ok(vec![]);
        }

        // Byte offset of every character boundary, so windows can slice the
        // source directly.
        let boundaries: Vec<usize> = text
            .char_indices()
            .map(|(byte_index, _)| byte_index)
            .collect();
        let total_chars = boundaries.len();

        // Validation guarantees overlap < size, so the start always advances.
        let step = config.chunk_size - config.chunk_overlap;

        let mut chunks = Vec::new();
        let mut start = 0;
        let mut chunk_index = 0;

        while start < total_chars {
            let end = (start + config.chunk_size).min(total_chars);
            let byte_start = boundaries[start];
            let byte_end = if end < total_chars {
                boundaries[end]
            } else {
                text.len()
            };

            chunks.push(Chunk::new(
                text[byte_start..byte_end].to_string(),
                start,
                end,
                chunk_index,
            ));

            chunk_index += 1;
            start += step;
        }

        Ok(chunks)
    }
}
