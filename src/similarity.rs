//! Cosine similarity and candidate ranking.
//!
//! Similarity is defined to fail gracefully: an empty vector or a length
//! mismatch yields a similarity of exactly 0 rather than an error,
//! because candidate items may carry vectors produced by an older
//! embedding scheme.

use serde::{Deserialize, Serialize};

use crate::embedding::Embedding;
use crate::item::Item;

/// Cosine similarity between two raw vectors, clamped to `[0, 1]`.
///
/// Returns exactly `0.0` when either slice is empty, when the lengths
/// differ, or when either magnitude is zero.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    if a.len() != b.len() {
        tracing::warn!(len_a = a.len(), len_b = b.len(), "embedding length mismatch");
        return 0.0;
    }

    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    (dot / (norm_a * norm_b)).clamp(0.0, 1.0)
}

/// An item paired with its similarity to a query vector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedItem {
    /// The candidate item.
    pub item: Item,
    /// Similarity to the query, in `[0, 1]`.
    pub similarity: f32,
}

/// Rank candidate items by cosine similarity to a query embedding.
///
/// Candidates without an embedding, with a zero-length one, or with a
/// vector built under a stale schema version are excluded; a stale
/// vector is not comparable to the query and must be re-embedded before
/// it can score. The result is sorted descending by similarity; equal
/// scores keep their input order (the tie-break is otherwise
/// unspecified).
pub fn rank_by_similarity(query: &Embedding, candidates: Vec<Item>) -> Vec<RankedItem> {
    let mut ranked: Vec<RankedItem> = candidates
        .into_iter()
        .filter(|item| match &item.embedding {
            Some(embedding) if !embedding.is_current_schema() => {
                tracing::warn!(
                    item_id = %item.id,
                    schema_version = embedding.schema_version,
                    "skipping candidate with stale embedding schema"
                );
                false
            }
            Some(embedding) => !embedding.is_empty(),
            None => false,
        })
        .map(|item| {
            let similarity = match &item.embedding {
                Some(embedding) => cosine_similarity(&query.data, &embedding.data),
                None => 0.0,
            };
            RankedItem { item, similarity }
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.similarity
            .partial_cmp(&a.similarity)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::ItemAttributes;
    use chrono::Utc;

    fn item_with_embedding(id: &str, embedding: Option<Embedding>) -> Item {
        let now = Utc::now();
        Item {
            id: id.into(),
            title: format!("item {id}"),
            description: String::new(),
            rent_price: 10.0,
            security_deposit: 50.0,
            owner_id: "owner".into(),
            owner_username: "owner".into(),
            is_active: true,
            image_url: None,
            attributes: ItemAttributes::default(),
            embedding,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_self_similarity_is_one() {
        let v = vec![0.3, 0.8, 0.1, 0.4];
        assert!((cosine_similarity(&v, &v) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_similarity_is_symmetric() {
        let a = vec![0.1, 0.9, 0.2];
        let b = vec![0.7, 0.3, 0.5];
        assert_eq!(cosine_similarity(&a, &b), cosine_similarity(&b, &a));
    }

    #[test]
    fn test_empty_or_mismatched_vectors_score_zero() {
        let v = vec![1.0, 2.0];
        assert_eq!(cosine_similarity(&[], &v), 0.0);
        assert_eq!(cosine_similarity(&v, &[]), 0.0);
        assert_eq!(cosine_similarity(&v, &[1.0, 2.0, 3.0]), 0.0);
    }

    #[test]
    fn test_zero_magnitude_scores_zero() {
        let zero = vec![0.0, 0.0, 0.0];
        let v = vec![1.0, 2.0, 3.0];
        assert_eq!(cosine_similarity(&zero, &v), 0.0);
    }

    #[test]
    fn test_similarity_is_clamped() {
        // Opposed vectors would be -1 unclamped.
        let a = vec![1.0, 0.0];
        let b = vec![-1.0, 0.0];
        assert_eq!(cosine_similarity(&a, &b), 0.0);
    }

    #[test]
    fn test_ranking_sorts_descending_and_filters() {
        let query = Embedding::new(vec![1.0, 0.0, 0.0]);
        let candidates = vec![
            item_with_embedding("orthogonal", Some(Embedding::new(vec![0.0, 1.0, 0.0]))),
            item_with_embedding("identical", Some(Embedding::new(vec![1.0, 0.0, 0.0]))),
            item_with_embedding("missing", None),
            item_with_embedding("close", Some(Embedding::new(vec![0.9, 0.1, 0.0]))),
            item_with_embedding("empty", Some(Embedding::new(Vec::new()))),
        ];

        let ranked = rank_by_similarity(&query, candidates);
        let ids: Vec<&str> = ranked.iter().map(|r| r.item.id.as_str()).collect();

        assert_eq!(ids, vec!["identical", "close", "orthogonal"]);
        assert!((ranked[0].similarity - 1.0).abs() < 1e-6);
        for window in ranked.windows(2) {
            assert!(window[0].similarity >= window[1].similarity);
        }
    }

    #[test]
    fn test_ranking_excludes_stale_schema_vectors() {
        let query = Embedding::new(vec![1.0, 0.0, 0.0]);
        let candidates = vec![
            // Identical components, but tagged with a pre-current schema.
            item_with_embedding(
                "legacy",
                Some(Embedding::with_version(vec![1.0, 0.0, 0.0], 0)),
            ),
            item_with_embedding("current", Some(Embedding::new(vec![0.5, 0.5, 0.0]))),
        ];

        let ranked = rank_by_similarity(&query, candidates);
        let ids: Vec<&str> = ranked.iter().map(|r| r.item.id.as_str()).collect();
        assert_eq!(ids, vec!["current"]);
    }

    #[test]
    fn test_ranking_keeps_insertion_order_on_ties() {
        let query = Embedding::new(vec![1.0, 0.0]);
        let candidates = vec![
            item_with_embedding("first", Some(Embedding::new(vec![2.0, 0.0]))),
            item_with_embedding("second", Some(Embedding::new(vec![5.0, 0.0]))),
        ];

        let ranked = rank_by_similarity(&query, candidates);
        assert_eq!(ranked[0].item.id, "first");
        assert_eq!(ranked[1].item.id, "second");
    }
}
