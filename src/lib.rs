//! Textchunk Library
//!
//! A text chunking toolkit for RAG pipelines. Provides hand-rolled splitting
//! strategies (equal-size windows, sentence grouping), chunk statistics and
//! validation, and a configuration-holding engine that also dispatches to
//! library-backed segmentation strategies.

pub mod analysis;
pub mod api;
pub mod engine;
pub mod error;
pub mod provider;
pub mod splitters;
pub mod types;

pub use analysis::{compute_stats, validate_chunks, ChunkStats, ValidationReport};
pub use engine::{ChunkingEngine, Strategy};
pub use error::ChunkError;
pub use provider::{SegmentationProvider, TextSplitterProvider};
pub use splitters::{EqualSizeSplitter, SentenceSplitter, Splitter};
pub use types::{Chunk, ChunkOverrides, ChunkerConfig, ServiceConfig};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::analysis::*;
    pub use crate::engine::{ChunkingEngine, Strategy};
    pub use crate::error::ChunkError;
    pub use crate::splitters::{EqualSizeSplitter, SentenceSplitter, Splitter};
    pub use crate::types::*;
}

/// Default chunk size in characters
pub const DEFAULT_CHUNK_SIZE: usize = 512;

/// Default chunk overlap in characters
pub const DEFAULT_CHUNK_OVERLAP: usize = 50;

/// Default separator hierarchy for separator-based strategies
pub const DEFAULT_SEPARATORS: &[&str] = &["\n\n", "\n", ". ", " "];
