//! Text-segmentation provider boundary.
//!
//! Library-backed splitting strategies sit behind a single capability trait,
//! so the engine's contract does not change when the backing library does.

mod text_splitter;

pub use text_splitter::TextSplitterProvider;

use crate::error::ChunkError;
use crate::types::ChunkerConfig;

/// Capability interface for delegated splitting strategies.
///
/// One method per strategy variant. Implementations may call a linked
/// library or substitute a local algorithm; either way a failure surfaces as
/// [`ChunkError::ExternalSplitter`] and is propagated to the caller
/// unchanged, never retried or swallowed.
pub trait SegmentationProvider: Send + Sync {
    /// Split preferring the configured separator hierarchy, falling back to
    /// finer boundaries for oversized pieces.
    fn split_recursive(&self, text: &str, config: &ChunkerConfig)
        -> Result<Vec<String>, ChunkError>;

    /// Split on a fixed separator, merging pieces up to the chunk size.
    fn split_characters(
        &self,
        text: &str,
        config: &ChunkerConfig,
    ) -> Result<Vec<String>, ChunkError>;

    /// Split into windows bounded by token count rather than characters.
    fn split_tokens(&self, text: &str, config: &ChunkerConfig) -> Result<Vec<String>, ChunkError>;

    /// Split respecting markdown structure (headings, blocks).
    fn split_markdown(&self, text: &str, config: &ChunkerConfig)
        -> Result<Vec<String>, ChunkError>;

    /// Split on a caller-chosen boundary marker, merging up to the chunk size.
    fn split_delimiter(
        &self,
        text: &str,
        delimiter: &str,
        config: &ChunkerConfig,
    ) -> Result<Vec<String>, ChunkError>;
}
