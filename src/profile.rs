//! User style-preference profiles and their aggregation.
//!
//! A [`PreferenceProfile`] holds one embedding per preference source
//! (uploaded photo) plus a derived combined embedding: the elementwise
//! mean of all current source vectors, recomputed synchronously after
//! every add or remove. An empty profile has no combined embedding at
//! all; "absent" means "no personalization signal" and is distinct from
//! a zero vector.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::embedding::Embedding;
use crate::embedding::source::SourceEmbedder;
use crate::error::{Result, StyleRankError};
use crate::store::ProfileStore;

/// One preference source: a photo reference with its embedding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreferenceSource {
    /// Local file reference of the photo.
    pub uri: String,
    /// Per-source embedding.
    pub embedding: Embedding,
    /// When the source was added.
    pub added_at: DateTime<Utc>,
}

/// Personalization state derived from the profile contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PersonalizationStatus {
    /// No sources; recommendations fall back to popular items.
    NoPreferences,
    /// At least one source; the combined embedding drives "for you".
    HasPreferences,
}

/// A user's aggregated style signal.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PreferenceProfile {
    /// Ordered preference sources.
    pub sources: Vec<PreferenceSource>,
    /// Elementwise mean of all source embeddings; `None` when empty.
    pub combined: Option<Embedding>,
    /// Number of sources; kept equal to `sources.len()`.
    pub photo_count: usize,
    /// When the profile was last mutated.
    pub last_updated: Option<DateTime<Utc>>,
}

impl PreferenceProfile {
    /// Create an empty profile.
    pub fn new() -> Self {
        Self::default()
    }

    /// The personalization state of this profile.
    pub fn status(&self) -> PersonalizationStatus {
        if self.photo_count == 0 || self.combined.is_none() {
            PersonalizationStatus::NoPreferences
        } else {
            PersonalizationStatus::HasPreferences
        }
    }

    /// Append a source and recompute the combined embedding.
    ///
    /// Fails with `DimensionMismatch` when the new source's vector length
    /// disagrees with the existing sources; the profile is left unchanged
    /// in that case.
    pub fn add_source(&mut self, source: PreferenceSource) -> Result<()> {
        if let Some(existing) = self.sources.first() {
            source
                .embedding
                .validate_dimension(existing.embedding.dimension())?;
        }

        self.sources.push(source);
        self.recompute()
    }

    /// Remove the source at `index` and recompute the combined embedding.
    ///
    /// Fails with `OutOfRange` when the index is invalid. Removing the
    /// last source leaves the combined embedding absent.
    pub fn remove_source(&mut self, index: usize) -> Result<()> {
        if index >= self.sources.len() {
            return Err(StyleRankError::OutOfRange {
                index,
                len: self.sources.len(),
            });
        }

        self.sources.remove(index);
        self.recompute()
    }

    /// Recompute the derived fields from the current sources.
    fn recompute(&mut self) -> Result<()> {
        let embeddings: Vec<&Embedding> =
            self.sources.iter().map(|source| &source.embedding).collect();
        self.combined = mean_embedding(&embeddings)?;
        self.photo_count = self.sources.len();
        self.last_updated = Some(Utc::now());
        Ok(())
    }
}

/// Elementwise mean of a set of embeddings.
///
/// Returns `None` for an empty set. Fails with `DimensionMismatch` when
/// the vectors disagree in length, since mixed lengths inside one
/// profile indicate a broken data-model invariant.
pub fn mean_embedding(embeddings: &[&Embedding]) -> Result<Option<Embedding>> {
    let Some(first) = embeddings.first() else {
        return Ok(None);
    };

    let dimension = first.dimension();
    for embedding in embeddings {
        embedding.validate_dimension(dimension)?;
    }

    let mut sums = vec![0.0f32; dimension];
    for embedding in embeddings {
        for (sum, value) in sums.iter_mut().zip(embedding.data.iter()) {
            *sum += value;
        }
    }

    let count = embeddings.len() as f32;
    for sum in &mut sums {
        *sum /= count;
    }

    Ok(Some(Embedding::new(sums)))
}

/// Service managing preference profiles against a profile store.
///
/// Mutations load the authoritative profile, apply the change, and write
/// the result back; the store is only updated after the in-memory
/// recompute succeeds.
#[derive(Debug, Clone)]
pub struct PreferenceService {
    profiles: Arc<dyn ProfileStore>,
    embedder: Arc<dyn SourceEmbedder>,
}

impl PreferenceService {
    /// Create a new service over the given store and embedder.
    pub fn new(profiles: Arc<dyn ProfileStore>, embedder: Arc<dyn SourceEmbedder>) -> Self {
        Self { profiles, embedder }
    }

    /// Fetch a user's profile, defaulting to an empty one.
    pub async fn profile(&self, user_id: &str) -> Result<PreferenceProfile> {
        Ok(self.profiles.load(user_id).await?.unwrap_or_default())
    }

    /// Embed a photo and append it to the user's profile.
    pub async fn add_photo(&self, user_id: &str, uri: &str) -> Result<PreferenceProfile> {
        let embedding = self.embedder.embed_source(uri).await?;
        let mut profile = self.profile(user_id).await?;
        profile.add_source(PreferenceSource {
            uri: uri.to_string(),
            embedding,
            added_at: Utc::now(),
        })?;

        self.profiles.save(user_id, &profile).await?;
        tracing::debug!(user_id, photo_count = profile.photo_count, "preference photo added");
        Ok(profile)
    }

    /// Remove the photo at `index` from the user's profile.
    pub async fn remove_photo(&self, user_id: &str, index: usize) -> Result<PreferenceProfile> {
        let mut profile = self.profile(user_id).await?;
        profile.remove_source(index)?;

        self.profiles.save(user_id, &profile).await?;
        tracing::debug!(user_id, photo_count = profile.photo_count, "preference photo removed");
        Ok(profile)
    }
}
