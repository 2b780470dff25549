//! Chunking engine: default configuration plus strategy dispatch.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::analysis::{compute_stats, validate_chunks, ChunkStats, ValidationReport};
use crate::error::ChunkError;
use crate::provider::{SegmentationProvider, TextSplitterProvider};
use crate::splitters::{EqualSizeSplitter, SentenceSplitter, Splitter};
use crate::types::{Chunk, ChunkOverrides, ChunkerConfig};

/// Splitting strategy selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Fixed-size character windows with overlap
    EqualSize,
    /// Sentence grouping bounded by chunk size
    Sentence,
    /// Hierarchical separator splitting (library-backed)
    Recursive,
    /// Fixed-separator splitting (library-backed)
    Character,
    /// Token-count windows (library-backed)
    Token,
    /// Markdown-structure-aware splitting (library-backed)
    Markdown,
    /// Caller-chosen boundary marker (library-backed)
    Delimiter,
}

impl Strategy {
    /// Resolve a strategy from its name or a common alias.
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "equal_size" | "equal" | "fixed" => Some(Self::EqualSize),
            "sentence" => Some(Self::Sentence),
            "recursive" => Some(Self::Recursive),
            "character" | "char" => Some(Self::Character),
            "token" => Some(Self::Token),
            "markdown" | "document" => Some(Self::Markdown),
            "delimiter" | "separator" => Some(Self::Delimiter),
            _ => None,
        }
    }

    /// Get the canonical name of this strategy.
    pub fn name(&self) -> &'static str {
        match self {
            Self::EqualSize => "equal_size",
            Self::Sentence => "sentence",
            Self::Recursive => "recursive",
            Self::Character => "character",
            Self::Token => "token",
            Self::Markdown => "markdown",
            Self::Delimiter => "delimiter",
        }
    }

    /// Get the description of this strategy.
    pub fn description(&self) -> &'static str {
        match self {
            Self::EqualSize => "Splits text into fixed-size character windows with overlap",
            Self::Sentence => "Groups sentences into chunks bounded by a target size",
            Self::Recursive => "Hierarchically splits text using multiple separator levels",
            Self::Character => "Splits on a fixed separator and merges up to the chunk size",
            Self::Token => "Splits text into fixed-size token windows with overlap",
            Self::Markdown => "Splits markdown while preserving heading structure",
            Self::Delimiter => "Splits on a caller-chosen boundary marker",
        }
    }

    /// All strategies, in dispatch order.
    pub fn all() -> &'static [Strategy] {
        &[
            Self::EqualSize,
            Self::Sentence,
            Self::Recursive,
            Self::Character,
            Self::Token,
            Self::Markdown,
            Self::Delimiter,
        ]
    }
}

/// Facade over the splitting strategies, statistics, and validation.
///
/// Holds the default [`ChunkerConfig`]; every chunking operation accepts
/// optional per-call overrides that are merged field-by-field onto the
/// defaults and validated before any computation begins. Library-backed
/// strategies dispatch through the [`SegmentationProvider`] boundary.
pub struct ChunkingEngine {
    equal_size: EqualSizeSplitter,
    sentence: SentenceSplitter,
    provider: Arc<dyn SegmentationProvider>,
    defaults: ChunkerConfig,
}

impl ChunkingEngine {
    /// Create an engine with the given defaults and the standard provider.
    pub fn new(defaults: ChunkerConfig) -> Self {
        Self::with_provider(defaults, Arc::new(TextSplitterProvider::new()))
    }

    /// Create an engine with a custom segmentation provider.
    pub fn with_provider(defaults: ChunkerConfig, provider: Arc<dyn SegmentationProvider>) -> Self {
        Self {
            equal_size: EqualSizeSplitter::new(),
            sentence: SentenceSplitter::new(),
            provider,
            defaults,
        }
    }

    /// Get the default chunk configuration.
    pub fn defaults(&self) -> &ChunkerConfig {
        &self.defaults
    }

    /// Merge overrides onto the defaults and validate the result.
    fn resolve(&self, overrides: Option<&ChunkOverrides>) -> Result<ChunkerConfig, ChunkError> {
        let resolved = match overrides {
            Some(overrides) => self.defaults.merged(overrides),
            None => self.defaults.clone(),
        };
        resolved.validate()?;
        Ok(resolved)
    }

    /// Split into fixed-size character windows with the given overlap.
    pub fn split_equal_size(
        &self,
        text: &str,
        chunk_size: usize,
        overlap: usize,
    ) -> Result<Vec<Chunk>, ChunkError> {
        let config = ChunkerConfig {
            chunk_size,
            chunk_overlap: overlap,
            separators: self.defaults.separators.clone(),
        };
        self.equal_size.split(text, &config)
    }

    /// Split at sentence boundaries, grouping up to the chunk size.
    pub fn split_by_sentence(
        &self,
        text: &str,
        overrides: Option<&ChunkOverrides>,
    ) -> Result<Vec<Chunk>, ChunkError> {
        let config = self.resolve(overrides)?;
        self.sentence.split(text, &config)
    }

    /// Split hierarchically through the segmentation provider.
    pub fn split_recursive(
        &self,
        text: &str,
        overrides: Option<&ChunkOverrides>,
    ) -> Result<Vec<Chunk>, ChunkError> {
        let config = self.resolve(overrides)?;
        let pieces = self.provider.split_recursive(text, &config)?;
        Ok(anchor_chunks(text, pieces))
    }

    /// Split on a fixed separator through the segmentation provider.
    pub fn split_characters(
        &self,
        text: &str,
        overrides: Option<&ChunkOverrides>,
    ) -> Result<Vec<Chunk>, ChunkError> {
        let config = self.resolve(overrides)?;
        let pieces = self.provider.split_characters(text, &config)?;
        Ok(anchor_chunks(text, pieces))
    }

    /// Split into token-count windows through the segmentation provider.
    pub fn split_tokens(
        &self,
        text: &str,
        overrides: Option<&ChunkOverrides>,
    ) -> Result<Vec<Chunk>, ChunkError> {
        let config = self.resolve(overrides)?;
        let pieces = self.provider.split_tokens(text, &config)?;
        Ok(anchor_chunks(text, pieces))
    }

    /// Split markdown through the segmentation provider.
    pub fn split_markdown(
        &self,
        text: &str,
        overrides: Option<&ChunkOverrides>,
    ) -> Result<Vec<Chunk>, ChunkError> {
        let config = self.resolve(overrides)?;
        let pieces = self.provider.split_markdown(text, &config)?;
        Ok(anchor_chunks(text, pieces))
    }

    /// Split on the first resolved separator through the provider.
    pub fn split_by_delimiter(
        &self,
        text: &str,
        overrides: Option<&ChunkOverrides>,
    ) -> Result<Vec<Chunk>, ChunkError> {
        let config = self.resolve(overrides)?;
        let delimiter = config
            .separators
            .first()
            .cloned()
            .unwrap_or_else(|| "\n\n".to_string());
        let pieces = self.provider.split_delimiter(text, &delimiter, &config)?;
        Ok(anchor_chunks(text, pieces))
    }

    /// Dispatch to a strategy by selector.
    pub fn split(
        &self,
        strategy: Strategy,
        text: &str,
        overrides: Option<&ChunkOverrides>,
    ) -> Result<Vec<Chunk>, ChunkError> {
        match strategy {
            Strategy::EqualSize => {
                let config = self.resolve(overrides)?;
                self.split_equal_size(text, config.chunk_size, config.chunk_overlap)
            }
            Strategy::Sentence => self.split_by_sentence(text, overrides),
            Strategy::Recursive => self.split_recursive(text, overrides),
            Strategy::Character => self.split_characters(text, overrides),
            Strategy::Token => self.split_tokens(text, overrides),
            Strategy::Markdown => self.split_markdown(text, overrides),
            Strategy::Delimiter => self.split_by_delimiter(text, overrides),
        }
    }

    /// Compute size statistics over a chunk collection.
    pub fn compute_stats(&self, chunks: &[Chunk]) -> Result<ChunkStats, ChunkError> {
        compute_stats(chunks)
    }

    /// Validate a chunk collection against a maximum size.
    pub fn validate(&self, chunks: &[Chunk], max_size: usize) -> ValidationReport {
        validate_chunks(chunks, max_size)
    }

    /// List all strategies with their descriptions.
    pub fn list_strategies(&self) -> Vec<(&'static str, &'static str)> {
        Strategy::all()
            .iter()
            .map(|s| (s.name(), s.description()))
            .collect()
    }
}

impl Default for ChunkingEngine {
    fn default() -> Self {
        Self::new(ChunkerConfig::default())
    }
}

/// Wrap provider pieces into chunks anchored at source character offsets.
///
/// Each piece is located by searching forward from just past the previous
/// piece's start, so trimmed pieces and overlapping windows both land on
/// their true positions. A piece that cannot be found (the provider may have
/// normalized it) is placed at the search cursor.
fn anchor_chunks(text: &str, pieces: Vec<String>) -> Vec<Chunk> {
    let mut chunks = Vec::with_capacity(pieces.len());
    let mut search_from = 0;

    for (chunk_index, piece) in pieces.into_iter().enumerate() {
        let byte_start = text[search_from..]
            .find(piece.as_str())
            .map(|offset| search_from + offset)
            .unwrap_or(search_from);
        let char_start = text[..byte_start].chars().count();
        let char_count = piece.chars().count();

        search_from = byte_start
            + piece
                .chars()
                .next()
                .map(char::len_utf8)
                .unwrap_or(1)
                .min(text.len() - byte_start);

        chunks.push(Chunk::new(
            piece,
            char_start,
            char_start + char_count,
            chunk_index,
        ));
    }

    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Provider stub that always fails, for pass-through tests.
    struct FailingProvider;

    impl SegmentationProvider for FailingProvider {
        fn split_recursive(
            &self,
            _text: &str,
            _config: &ChunkerConfig,
        ) -> Result<Vec<String>, ChunkError> {
            Err(ChunkError::ExternalSplitter("backend unavailable".into()))
        }

        fn split_characters(
            &self,
            _text: &str,
            _config: &ChunkerConfig,
        ) -> Result<Vec<String>, ChunkError> {
            Err(ChunkError::ExternalSplitter("backend unavailable".into()))
        }

        fn split_tokens(
            &self,
            _text: &str,
            _config: &ChunkerConfig,
        ) -> Result<Vec<String>, ChunkError> {
            Err(ChunkError::ExternalSplitter("backend unavailable".into()))
        }

        fn split_markdown(
            &self,
            _text: &str,
            _config: &ChunkerConfig,
        ) -> Result<Vec<String>, ChunkError> {
            Err(ChunkError::ExternalSplitter("backend unavailable".into()))
        }

        fn split_delimiter(
            &self,
            _text: &str,
            _delimiter: &str,
            _config: &ChunkerConfig,
        ) -> Result<Vec<String>, ChunkError> {
            Err(ChunkError::ExternalSplitter("backend unavailable".into()))
        }
    }

    fn engine() -> ChunkingEngine {
        ChunkingEngine::new(ChunkerConfig::with_size(100).with_overlap(0))
    }

    #[test]
    fn test_strategy_parse_aliases() {
        assert_eq!(Strategy::parse("equal_size"), Some(Strategy::EqualSize));
        assert_eq!(Strategy::parse("Fixed"), Some(Strategy::EqualSize));
        assert_eq!(Strategy::parse("char"), Some(Strategy::Character));
        assert_eq!(Strategy::parse("document"), Some(Strategy::Markdown));
        assert_eq!(Strategy::parse("separator"), Some(Strategy::Delimiter));
        assert_eq!(Strategy::parse("unknown"), None);
    }

    #[test]
    fn test_split_equal_size_explicit_params() {
        let chunks = engine().split_equal_size("abcdefghij", 4, 1).unwrap();
        let contents: Vec<&str> = chunks.iter().map(|c| c.content.as_str()).collect();
        assert_eq!(contents, vec!["abcd", "defg", "ghij", "j"]);
    }

    #[test]
    fn test_overrides_fall_back_to_engine_defaults() {
        let engine = ChunkingEngine::new(ChunkerConfig::with_size(6).with_overlap(0));
        // Only the size is overridden; overlap keeps the engine default
        let chunks = engine
            .split(
                Strategy::EqualSize,
                "abcdefgh",
                Some(&ChunkOverrides::size(4)),
            )
            .unwrap();
        assert_eq!(chunks[0].content, "abcd");
        assert_eq!(chunks[1].content, "efgh");
    }

    #[test]
    fn test_invalid_override_rejected_before_split() {
        let engine = engine();
        let overrides = ChunkOverrides {
            chunk_size: Some(4),
            chunk_overlap: Some(4),
            separators: None,
        };
        let result = engine.split(Strategy::Sentence, "A. B.", Some(&overrides));
        assert!(matches!(result, Err(ChunkError::InvalidConfig(_))));
    }

    #[test]
    fn test_provider_failure_passes_through() {
        let engine = ChunkingEngine::with_provider(
            ChunkerConfig::default(),
            Arc::new(FailingProvider),
        );
        for strategy in [
            Strategy::Recursive,
            Strategy::Character,
            Strategy::Token,
            Strategy::Markdown,
            Strategy::Delimiter,
        ] {
            let result = engine.split(strategy, "some text", None);
            assert!(matches!(result, Err(ChunkError::ExternalSplitter(_))));
        }
    }

    #[test]
    fn test_delimiter_uses_first_resolved_separator() {
        let engine = engine();
        let overrides = ChunkOverrides {
            chunk_size: Some(5),
            chunk_overlap: None,
            separators: Some(vec!["|".to_string()]),
        };
        let chunks = engine
            .split_by_delimiter("aa|bb|cc", Some(&overrides))
            .unwrap();
        let contents: Vec<&str> = chunks.iter().map(|c| c.content.as_str()).collect();
        assert_eq!(contents, vec!["aa|bb", "cc"]);
    }

    #[test]
    fn test_anchor_chunks_finds_offsets() {
        let text = "alpha\n\nbeta\n\ngamma";
        let chunks = anchor_chunks(
            text,
            vec!["alpha".to_string(), "beta".to_string(), "gamma".to_string()],
        );
        assert_eq!(chunks[0].start_index, 0);
        assert_eq!(chunks[1].start_index, 7);
        assert_eq!(chunks[2].start_index, 13);
        assert_eq!(chunks[2].end_index, 18);
    }

    #[test]
    fn test_anchor_chunks_handles_overlapping_pieces() {
        let text = "abcdefgh";
        let chunks = anchor_chunks(text, vec!["abcde".to_string(), "defgh".to_string()]);
        assert_eq!(chunks[0].start_index, 0);
        assert_eq!(chunks[1].start_index, 3);
    }

    #[test]
    fn test_stats_and_validate_passthrough() {
        let engine = engine();
        let chunks = engine.split_equal_size("abcdefghij", 5, 0).unwrap();
        let stats = engine.compute_stats(&chunks).unwrap();
        assert_eq!(stats.total_chunks, 2);
        assert_eq!(stats.total_characters, 10);

        let report = engine.validate(&chunks, 4);
        assert!(!report.is_valid);
        assert_eq!(report.oversized_indices, vec![0, 1]);
    }

    #[test]
    fn test_list_strategies() {
        let strategies = engine().list_strategies();
        assert_eq!(strategies.len(), Strategy::all().len());
        assert!(strategies.iter().any(|(name, _)| *name == "sentence"));
    }
}
