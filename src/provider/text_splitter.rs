//! Default segmentation provider.
//!
//! Recursive and markdown strategies delegate to the `text-splitter` crate;
//! token windows use `tiktoken-rs`; fixed-separator strategies are a local
//! merge over the split pieces.

use text_splitter::{Characters, ChunkConfig as SplitterConfig, MarkdownSplitter, TextSplitter};

use super::SegmentationProvider;
use crate::error::ChunkError;
use crate::types::ChunkerConfig;

/// Fallback separator when the configured hierarchy is empty.
const PARAGRAPH_SEPARATOR: &str = "\n\n";

/// Segmentation provider backed by `text-splitter` and `tiktoken-rs`.
pub struct TextSplitterProvider {
    bpe: tiktoken_rs::CoreBPE,
}

impl TextSplitterProvider {
    /// Create a provider with the cl100k_base encoding (GPT-4/ChatGPT).
    pub fn new() -> Self {
        let bpe = tiktoken_rs::cl100k_base().expect("Failed to load cl100k_base encoding");
        Self { bpe }
    }

    fn splitter_config(config: &ChunkerConfig) -> Result<SplitterConfig<Characters>, ChunkError> {
        SplitterConfig::new(config.chunk_size)
            .with_overlap(config.chunk_overlap)
            .map_err(|e| ChunkError::ExternalSplitter(e.to_string()))
    }
}

impl Default for TextSplitterProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl SegmentationProvider for TextSplitterProvider {
    fn split_recursive(
        &self,
        text: &str,
        config: &ChunkerConfig,
    ) -> Result<Vec<String>, ChunkError> {
        config.validate()?;
        let splitter = TextSplitter::new(Self::splitter_config(config)?);
        Ok(splitter.chunks(text).map(str::to_string).collect())
    }

    fn split_characters(
        &self,
        text: &str,
        config: &ChunkerConfig,
    ) -> Result<Vec<String>, ChunkError> {
        let separator = config
            .separators
            .first()
            .map(String::as_str)
            .unwrap_or(PARAGRAPH_SEPARATOR);
        self.split_delimiter(text, separator, config)
    }

    fn split_tokens(&self, text: &str, config: &ChunkerConfig) -> Result<Vec<String>, ChunkError> {
        config.validate()?;

        let tokens = self.bpe.encode_ordinary(text);
        if tokens.is_empty() {
            return Ok(vec![]);
        }

        // Validation guarantees overlap < size, so the window always advances.
        let step = config.chunk_size - config.chunk_overlap;

        let mut pieces = Vec::new();
        let mut start = 0;
        while start < tokens.len() {
            let end = (start + config.chunk_size).min(tokens.len());
            let piece = self
                .bpe
                .decode(tokens[start..end].to_vec())
                .map_err(|e| ChunkError::ExternalSplitter(e.to_string()))?;
            pieces.push(piece);

            if end >= tokens.len() {
                break;
            }
            start += step;
        }

        Ok(pieces)
    }

    fn split_markdown(
        &self,
        text: &str,
        config: &ChunkerConfig,
    ) -> Result<Vec<String>, ChunkError> {
        config.validate()?;
        let splitter = MarkdownSplitter::new(Self::splitter_config(config)?);
        Ok(splitter.chunks(text).map(str::to_string).collect())
    }

    fn split_delimiter(
        &self,
        text: &str,
        delimiter: &str,
        config: &ChunkerConfig,
    ) -> Result<Vec<String>, ChunkError> {
        config.validate()?;
        if delimiter.is_empty() {
            return Err(ChunkError::ExternalSplitter(
                "delimiter must not be empty".to_string(),
            ));
        }
        Ok(merge_pieces(text.split(delimiter), delimiter, config.chunk_size))
    }
}

/// Greedily merge split pieces back together, keeping the separator, until
/// the next piece would push a chunk past `chunk_size` characters. A single
/// piece over the bound is emitted alone rather than split further.
fn merge_pieces<'a, I>(pieces: I, separator: &str, chunk_size: usize) -> Vec<String>
where
    I: Iterator<Item = &'a str>,
{
    let separator_chars = separator.chars().count();

    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_chars = 0;

    for piece in pieces {
        let trimmed = piece.trim();
        if trimmed.is_empty() {
            continue;
        }
        let piece_chars = trimmed.chars().count();

        let candidate = if current.is_empty() {
            piece_chars
        } else {
            current_chars + separator_chars + piece_chars
        };

        if candidate > chunk_size && !current.is_empty() {
            chunks.push(std::mem::take(&mut current));
            current.push_str(trimmed);
            current_chars = piece_chars;
        } else {
            if !current.is_empty() {
                current.push_str(separator);
            }
            current.push_str(trimmed);
            current_chars = candidate;
        }
    }

    if !current.is_empty() {
        chunks.push(current);
    }

    chunks
}
