//! Aggregate size statistics over a chunk collection.

use serde::{Deserialize, Serialize};

use crate::error::ChunkError;
use crate::types::Chunk;

/// Aggregate size metrics for a chunk collection.
///
/// Derived from the collection on demand, never stored with it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkStats {
    /// Number of chunks in the collection
    pub total_chunks: usize,

    /// Sum of all chunk sizes in characters
    pub total_characters: usize,

    /// Arithmetic mean chunk size, rounded to the nearest integer
    pub average_chunk_size: usize,

    /// Smallest chunk size
    pub min_chunk_size: usize,

    /// Largest chunk size
    pub max_chunk_size: usize,

    /// Per-chunk sizes, in collection order
    pub chunk_sizes: Vec<usize>,
}

/// Compute size statistics over a chunk collection.
///
/// Fails with [`ChunkError::EmptyInput`] on an empty collection, where the
/// mean and extrema are undefined.
pub fn compute_stats(chunks: &[Chunk]) -> Result<ChunkStats, ChunkError> {
    if chunks.is_empty() {
        return Err(ChunkError::EmptyInput);
    }

    let chunk_sizes: Vec<usize> = chunks.iter().map(|c| c.len()).collect();

    let mut total_characters = 0;
    let mut min_chunk_size = usize::MAX;
    let mut max_chunk_size = 0;
    for &size in &chunk_sizes {
        total_characters += size;
        min_chunk_size = min_chunk_size.min(size);
        max_chunk_size = max_chunk_size.max(size);
    }

    let average_chunk_size = (total_characters as f64 / chunk_sizes.len() as f64).round() as usize;

    Ok(ChunkStats {
        total_chunks: chunk_sizes.len(),
        total_characters,
        average_chunk_size,
        min_chunk_size,
        max_chunk_size,
        chunk_sizes,
    })
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
    fn test_empty_collection_is_an_error() {
        assert!(matches!(compute_stats(&[]), Err(ChunkError::EmptyInput)));
    }

    #[test]
    fn test_basic_metrics() {
        let stats = compute_stats(&chunks(&["ab", "abcd", "abcdef"])).unwrap();
        assert_eq!(stats.total_chunks, 3);
        assert_eq!(stats.total_characters, 12);
        assert_eq!(stats.average_chunk_size, 4);
        assert_eq!(stats.min_chunk_size, 2);
        assert_eq!(stats.max_chunk_size, 6);
        assert_eq!(stats.chunk_sizes, vec![2, 4, 6]);
    }

    #[test]
    fn test_mean_rounds_to_nearest() {
        // (1 + 2) / 2 = 1.5 rounds up
        let stats = compute_stats(&chunks(&["a", "bc"])).unwrap();
        assert_eq!(stats.average_chunk_size, 2);

        // (1 + 1 + 2) / 3 = 1.33 rounds down
        let stats = compute_stats(&chunks(&["a", "b", "cd"])).unwrap();
        assert_eq!(stats.average_chunk_size, 1);
    }

    #[test]
    fn test_total_equals_sum_of_sizes() {
        let stats = compute_stats(&chunks(&["one", "twotwo", "three three"])).unwrap();
        assert_eq!(stats.total_characters, stats.chunk_sizes.iter().sum::<usize>());
    }

    #[test]
    fn test_mean_bounded_by_extrema() {
        let stats = compute_stats(&chunks(&["a", "bcd", "efghi", "jk"])).unwrap();
        assert!(stats.min_chunk_size <= stats.average_chunk_size);
        assert!(stats.average_chunk_size <= stats.max_chunk_size);
    }

    #[test]
    fn test_single_chunk() {
        let stats = compute_stats(&chunks(&["hello"])).unwrap();
        assert_eq!(stats.min_chunk_size, 5);
        assert_eq!(stats.max_chunk_size, 5);
        assert_eq!(stats.average_chunk_size, 5);
    }
}
