//! Error types for chunking operations.

use thiserror::Error;

/// Errors produced by chunking, statistics, and validation operations.
#[derive(Debug, Error)]
pub enum ChunkError {
    /// The resolved configuration cannot produce a terminating split.
    #[error("invalid chunk configuration: {0}")]
    InvalidConfig(String),

    /// Statistics were requested over an empty chunk collection.
    #[error("cannot compute statistics over an empty chunk collection")]
    EmptyInput,

    /// A delegated library-backed split failed. Propagated unchanged.
    #[error("external splitter error: {0}")]
    ExternalSplitter(String),
}
