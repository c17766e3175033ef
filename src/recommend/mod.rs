//! The recommendation engine.
//!
//! [`RecommendationEngine`] is constructed from explicitly injected
//! stores (there is no ambient client singleton) and produces either a
//! personalized ranking (when the user's preference profile carries a
//! combined embedding) or a popular-items fallback. Store calls are
//! awaited sequentially and bounded by a per-call timeout so a stalled
//! backend cannot hang a request indefinitely.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Result, StyleRankError};
use crate::item::Item;
use crate::similarity::{RankedItem, rank_by_similarity};
use crate::store::{ItemStore, ProfileStore};

/// Configuration for the recommendation engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationConfig {
    /// Maximum number of recommendations to return.
    pub max_recommendations: usize,
    /// Minimum similarity for a personalized result to be kept.
    pub min_similarity: f32,
    /// Per-store-call timeout in milliseconds; `None` disables it.
    pub timeout_ms: Option<u64>,
}

impl Default for RecommendationConfig {
    fn default() -> Self {
        Self {
            max_recommendations: 20,
            min_similarity: 0.0,
            timeout_ms: Some(10_000),
        }
    }
}

/// How a recommendation list was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecommendationKind {
    /// Ranked against the user's combined preference embedding.
    Personalized,
    /// Popularity fallback; the user has no preference signal.
    Popular,
}

/// A recommendation list with its provenance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendations {
    /// Whether this list is personalized or a fallback.
    pub kind: RecommendationKind,
    /// The recommended items, best first.
    pub items: Vec<RankedItem>,
}

/// Content-based recommendation engine over injected stores.
#[derive(Debug, Clone)]
pub struct RecommendationEngine {
    items: Arc<dyn ItemStore>,
    profiles: Arc<dyn ProfileStore>,
    config: RecommendationConfig,
}

impl RecommendationEngine {
    /// Create an engine over the given stores.
    pub fn new(
        items: Arc<dyn ItemStore>,
        profiles: Arc<dyn ProfileStore>,
        config: RecommendationConfig,
    ) -> Self {
        Self {
            items,
            profiles,
            config,
        }
    }

    /// Produce recommendations for a user.
    ///
    /// With a combined preference embedding present, active items are
    /// ranked by cosine similarity against it ("for you"); otherwise the
    /// fallback is active items, newest first ("popular items").
    pub async fn recommend_for_user(&self, user_id: &str) -> Result<Recommendations> {
        let profile = self
            .with_timeout("load profile", self.profiles.load(user_id))
            .await?;
        let query = profile.and_then(|p| p.combined);

        let candidates = self
            .with_timeout("load active items", self.items.active_items())
            .await?;

        match query {
            Some(query) => {
                let mut ranked = rank_by_similarity(&query, candidates);
                ranked.retain(|r| r.similarity >= self.config.min_similarity);
                ranked.truncate(self.config.max_recommendations);
                tracing::debug!(user_id, results = ranked.len(), "personalized recommendations");
                Ok(Recommendations {
                    kind: RecommendationKind::Personalized,
                    items: ranked,
                })
            }
            None => {
                tracing::debug!(user_id, "no preference signal, using popular fallback");
                Ok(Recommendations {
                    kind: RecommendationKind::Popular,
                    items: self.popular(candidates),
                })
            }
        }
    }

    /// Popularity fallback: active items, newest first.
    fn popular(&self, mut candidates: Vec<Item>) -> Vec<RankedItem> {
        candidates.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        candidates.truncate(self.config.max_recommendations);
        candidates
            .into_iter()
            .map(|item| RankedItem {
                item,
                similarity: 0.0,
            })
            .collect()
    }

    /// Bound a store call by the configured timeout.
    async fn with_timeout<T>(
        &self,
        what: &str,
        fut: impl Future<Output = Result<T>>,
    ) -> Result<T> {
        match self.config.timeout_ms {
            Some(ms) => tokio::time::timeout(Duration::from_millis(ms), fut)
                .await
                .map_err(|_| StyleRankError::timeout(format!("{what} exceeded {ms}ms")))?,
            None => fut.await,
        }
    }
}
