//! Embedding generation for preference sources (uploaded photos).
//!
//! The pipeline consumes only a source reference (a local file URI), not
//! pixel data. [`SourceEmbedder`] is the seam where a real vision model
//! would plug in; the shipping implementation derives a reproducible
//! vector from a stable hash of the URI.

use std::fmt::Debug;

use async_trait::async_trait;

use crate::embedding::builder::text_hash;
use crate::embedding::{EMBEDDING_DIM, Embedding};
use crate::error::{Result, StyleRankError};

/// Trait for converting a preference-source reference into an embedding.
///
/// Implementations must be `Send + Sync` so they can sit behind an
/// `Arc<dyn SourceEmbedder>` in the preference service.
#[async_trait]
pub trait SourceEmbedder: Send + Sync + Debug {
    /// Generate an embedding for the given source URI.
    async fn embed_source(&self, uri: &str) -> Result<Embedding>;

    /// The dimensionality of the vectors this embedder produces.
    fn dimension(&self) -> usize {
        EMBEDDING_DIM
    }
}

/// Deterministic hash-seeded source embedder.
///
/// Components are drawn from a linear congruential sequence seeded by a
/// hash of the URI and mapped into `[-1, 1]`. The same URI always yields
/// the same vector, which keeps preference profiles reproducible across
/// sessions.
#[derive(Debug, Clone, Copy, Default)]
pub struct UriHashEmbedder;

impl UriHashEmbedder {
    /// Create a new embedder.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl SourceEmbedder for UriHashEmbedder {
    async fn embed_source(&self, uri: &str) -> Result<Embedding> {
        if uri.is_empty() {
            return Err(StyleRankError::invalid_argument(
                "source URI must not be empty",
            ));
        }

        let base = text_hash(uri);
        let mut data = Vec::with_capacity(EMBEDDING_DIM);
        for index in 0..EMBEDDING_DIM {
            let seed = base
                .wrapping_add(index as u64)
                .wrapping_mul(9301)
                .wrapping_add(49297);
            let value = (seed % 233280) as f32 / 233280.0;
            data.push((value - 0.5) * 2.0);
        }

        Ok(Embedding::new(data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_embedding_is_deterministic_per_uri() {
        let embedder = UriHashEmbedder::new();
        let a = embedder.embed_source("file:///photos/outfit-1.jpg").await.unwrap();
        let b = embedder.embed_source("file:///photos/outfit-1.jpg").await.unwrap();
        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn test_distinct_uris_produce_distinct_vectors() {
        let embedder = UriHashEmbedder::new();
        let a = embedder.embed_source("file:///photos/outfit-1.jpg").await.unwrap();
        let b = embedder.embed_source("file:///photos/outfit-2.jpg").await.unwrap();
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn test_components_are_bounded() {
        let embedder = UriHashEmbedder::new();
        let embedding = embedder.embed_source("file:///photos/a.jpg").await.unwrap();

        assert_eq!(embedding.dimension(), EMBEDDING_DIM);
        for value in &embedding.data {
            assert!((-1.0..=1.0).contains(value));
        }
    }

    #[tokio::test]
    async fn test_empty_uri_is_rejected() {
        let embedder = UriHashEmbedder::new();
        assert!(embedder.embed_source("").await.is_err());
    }
}
