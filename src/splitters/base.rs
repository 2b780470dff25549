//! Base trait for all splitters.

use crate::error::ChunkError;
use crate::types::{Chunk, ChunkerConfig};

/// The core trait that all splitters implement.
///
/// A splitter takes source text and partitions it into an ordered chunk
/// collection. Splitting is a pure, synchronous computation: the same text
/// and configuration always produce the same chunks.
pub trait Splitter: Send + Sync {
    /// Get the name of this splitter.
    fn name(&self) -> &'static str;

    /// Split the given text with the provided configuration.
    ///
    /// The configuration is validated before any computation begins; an
    /// invalid configuration is rejected, never clamped.
    fn split(&self, text: &str, config: &ChunkerConfig) -> Result<Vec<Chunk>, ChunkError>;

    /// Get the description of this splitter.
    fn description(&self) -> &'static str {
        "A text splitter"
    }
}
