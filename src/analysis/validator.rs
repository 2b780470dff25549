//! Chunk size validation.

use serde::{Deserialize, Serialize};

use crate::types::Chunk;

/// Result of validating a chunk collection against a size bound.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    /// True iff no chunk exceeds the bound
    pub is_valid: bool,

    /// Number of chunks examined
    pub total_chunks: usize,

    /// Chunks at or under the bound
    pub valid_chunks: usize,

    /// Chunks over the bound
    pub oversized_chunks: usize,

    /// Positions of oversized chunks, 0-based, in collection order
    pub oversized_indices: Vec<usize>,
}

/// Flag chunks whose character length exceeds `max_size`.
///
/// Pure function over the collection; the input is never mutated and repeated
/// runs yield identical reports.
pub fn validate_chunks(chunks: &[Chunk], max_size: usize) -> ValidationReport {
    let oversized_indices: Vec<usize> = chunks
        .iter()
        .enumerate()
        .filter(|(_, chunk)| chunk.len() > max_size)
        .map(|(index, _)| index)
        .collect();

    let oversized_chunks = oversized_indices.len();

    ValidationReport {
        is_valid: oversized_chunks == 0,
        total_chunks: chunks.len(),
        valid_chunks: chunks.len() - oversized_chunks,
        oversized_chunks,
        oversized_indices,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::chunks_from_texts;
    use pretty_assertions::assert_eq;

    fn chunks(texts: &[&str]) -> Vec<Chunk> {
        chunks_from_texts(texts.iter().map(|t| t.to_string()).collect())
    }

    #[test]
    fn test_flags_oversized_chunks() {
        let report = validate_chunks(&chunks(&["ab", "abcdef"]), 3);
        assert_eq!(
            report,
            ValidationReport {
                is_valid: false,
                total_chunks: 2,
                valid_chunks: 1,
                oversized_chunks: 1,
                oversized_indices: vec![1],
            }
        );
    }

    #[test]
    fn test_all_within_bound() {
        let report = validate_chunks(&chunks(&["ab", "cd", "ef"]), 2);
        assert!(report.is_valid);
        assert_eq!(report.valid_chunks, 3);
        assert_eq!(report.oversized_chunks, 0);
        assert!(report.oversized_indices.is_empty());
    }

    #[test]
    fn test_bound_is_inclusive() {
        // A chunk exactly at the bound is valid
        let report = validate_chunks(&chunks(&["abc"]), 3);
        assert!(report.is_valid);
    }

    #[test]
    fn test_idempotent() {
        let collection = chunks(&["a", "bb", "cccc", "d"]);
        let first = validate_chunks(&collection, 2);
        let second = validate_chunks(&collection, 2);
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_collection_is_valid() {
        let report = validate_chunks(&[], 10);
        assert!(report.is_valid);
        assert_eq!(report.total_chunks, 0);
    }

    #[test]
    fn test_indices_in_original_order() {
        let report = validate_chunks(&chunks(&["aaaa", "b", "cccc", "d", "eeee"]), 2);
        assert_eq!(report.oversized_indices, vec![0, 2, 4]);
    }
}
