//! Configuration types for chunking.

use serde::{Deserialize, Serialize};

use crate::error::ChunkError;
use crate::{DEFAULT_CHUNK_OVERLAP, DEFAULT_CHUNK_SIZE, DEFAULT_SEPARATORS};

/// Configuration for individual chunking operations.
///
/// Immutable after construction; an engine holds one of these as its default
/// set and merges per-call [`ChunkOverrides`] on top of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkerConfig {
    /// Maximum characters per chunk
    pub chunk_size: usize,

    /// Characters to overlap between adjacent chunks
    pub chunk_overlap: usize,

    /// Separators for separator-based strategies, most to least preferred
    pub separators: Vec<String>,
}

impl Default for ChunkerConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            chunk_overlap: DEFAULT_CHUNK_OVERLAP,
            separators: DEFAULT_SEPARATORS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl ChunkerConfig {
    /// Create a config with the given chunk size.
    pub fn with_size(size: usize) -> Self {
        Self {
            chunk_size: size,
            ..Default::default()
        }
    }

    /// Set the overlap.
    pub fn with_overlap(mut self, overlap: usize) -> Self {
        self.chunk_overlap = overlap;
        self
    }

    /// Set the separators.
    pub fn with_separators(mut self, separators: Vec<String>) -> Self {
        self.separators = separators;
        self
    }

    /// Reject configurations that cannot produce a terminating split.
    ///
    /// `chunk_overlap >= chunk_size` would keep the window start from ever
    /// advancing; it is rejected before any computation, never clamped.
    pub fn validate(&self) -> Result<(), ChunkError> {
        if self.chunk_size == 0 {
            return Err(ChunkError::InvalidConfig(
                "chunk_size must be greater than zero".to_string(),
            ));
        }
        if self.chunk_overlap >= self.chunk_size {
            return Err(ChunkError::InvalidConfig(format!(
                "chunk_overlap ({}) must be less than chunk_size ({})",
                self.chunk_overlap, self.chunk_size
            )));
        }
        Ok(())
    }

    /// Merge per-call overrides on top of this config, field by field.
    ///
    /// Precedence: call-level override, then this instance's value. Fields
    /// absent from the overrides keep the instance value.
    pub fn merged(&self, overrides: &ChunkOverrides) -> ChunkerConfig {
        ChunkerConfig {
            chunk_size: overrides.chunk_size.unwrap_or(self.chunk_size),
            chunk_overlap: overrides.chunk_overlap.unwrap_or(self.chunk_overlap),
            separators: overrides
                .separators
                .clone()
                .unwrap_or_else(|| self.separators.clone()),
        }
    }
}

/// Per-call configuration overrides.
///
/// Every field is optional; unset fields fall back to the engine's defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkOverrides {
    /// Override the maximum characters per chunk
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chunk_size: Option<usize>,

    /// Override the overlap between adjacent chunks
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chunk_overlap: Option<usize>,

    /// Override the separator hierarchy
    #[serde(skip_serializing_if = "Option::is_none")]
    pub separators: Option<Vec<String>>,
}

impl ChunkOverrides {
    /// Overrides that only change the chunk size.
    pub fn size(size: usize) -> Self {
        Self {
            chunk_size: Some(size),
            ..Default::default()
        }
    }
}

/// Service-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Default chunk size in characters
    pub default_chunk_size: usize,

    /// Default chunk overlap in characters
    pub default_chunk_overlap: usize,

    /// Port the HTTP service listens on
    pub port: u16,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            default_chunk_size: DEFAULT_CHUNK_SIZE,
            default_chunk_overlap: DEFAULT_CHUNK_OVERLAP,
            port: 3019,
        }
    }
}

impl ServiceConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            default_chunk_size: std::env::var("CHUNK_SIZE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_CHUNK_SIZE),
            default_chunk_overlap: std::env::var("CHUNK_OVERLAP")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_CHUNK_OVERLAP),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3019),
        }
    }

    /// The chunker defaults this service configuration implies.
    pub fn chunker_defaults(&self) -> ChunkerConfig {
        ChunkerConfig::with_size(self.default_chunk_size).with_overlap(self.default_chunk_overlap)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_rejects_zero_size() {
        let config = ChunkerConfig::with_size(0);
        assert!(matches!(
            config.validate(),
            Err(ChunkError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_validate_rejects_overlap_at_size() {
        let config = ChunkerConfig::with_size(10).with_overlap(10);
        assert!(matches!(
            config.validate(),
            Err(ChunkError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_validate_rejects_overlap_above_size() {
        let config = ChunkerConfig::with_size(10).with_overlap(11);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_accepts_zero_overlap() {
        let config = ChunkerConfig::with_size(1).with_overlap(0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_merge_precedence() {
        let defaults = ChunkerConfig::with_size(100).with_overlap(10);
        let overrides = ChunkOverrides {
            chunk_size: Some(200),
            chunk_overlap: None,
            separators: None,
        };

        let resolved = defaults.merged(&overrides);
        // Override wins for the field it sets
        assert_eq!(resolved.chunk_size, 200);
        // Unset fields fall back to the instance default
        assert_eq!(resolved.chunk_overlap, 10);
        assert_eq!(resolved.separators, defaults.separators);
    }

    #[test]
    fn test_empty_overrides_keep_defaults() {
        let defaults = ChunkerConfig::default();
        let resolved = defaults.merged(&ChunkOverrides::default());
        assert_eq!(resolved, defaults);
    }
}
