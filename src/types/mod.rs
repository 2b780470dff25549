//! Core types for the chunking toolkit.

mod chunk;
mod config;

pub use chunk::{chunks_from_texts, Chunk};
pub use config::{ChunkOverrides, ChunkerConfig, ServiceConfig};
