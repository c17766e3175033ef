//! Embedding vectors and their construction.
//!
//! Every item and preference source carries a fixed-length [`Embedding`].
//! Vectors are built once (see [`builder`]) and replaced wholesale on
//! recompute, never mutated in place. A schema version tag is stored with
//! each vector so that records produced by an incompatible construction
//! can be detected and re-embedded instead of silently compared.

pub mod builder;
pub mod source;

use serde::{Deserialize, Serialize};

use crate::error::{Result, StyleRankError};

/// Dimensionality of all embeddings produced by this crate.
pub const EMBEDDING_DIM: usize = 512;

/// Version tag of the current embedding construction.
///
/// Bump this whenever the construction in [`builder`] changes in a way
/// that makes old and new vectors incomparable.
pub const EMBEDDING_SCHEMA_VERSION: u32 = 1;

/// A dense vector representation used for similarity comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Embedding {
    /// The vector components.
    pub data: Vec<f32>,
    /// The construction schema this vector was built with.
    pub schema_version: u32,
}

impl Embedding {
    /// Create a new embedding under the current schema version.
    pub fn new(data: Vec<f32>) -> Self {
        Self {
            data,
            schema_version: EMBEDDING_SCHEMA_VERSION,
        }
    }

    /// Create an embedding tagged with an explicit schema version.
    pub fn with_version(data: Vec<f32>, schema_version: u32) -> Self {
        Self {
            data,
            schema_version,
        }
    }

    /// Get the dimensionality of this embedding.
    pub fn dimension(&self) -> usize {
        self.data.len()
    }

    /// Check whether this embedding has no components.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Whether this vector was built with the current construction.
    pub fn is_current_schema(&self) -> bool {
        self.schema_version == EMBEDDING_SCHEMA_VERSION
    }

    /// Calculate the L2 norm (magnitude) of this embedding.
    pub fn norm(&self) -> f32 {
        self.data.iter().map(|x| x * x).sum::<f32>().sqrt()
    }

    /// Normalize this embedding to unit length.
    ///
    /// A zero vector is left unchanged.
    pub fn normalize(&mut self) {
        let norm = self.norm();
        if norm > 0.0 {
            for value in &mut self.data {
                *value /= norm;
            }
        }
    }

    /// Get a normalized copy of this embedding.
    pub fn normalized(&self) -> Self {
        let mut normalized = self.clone();
        normalized.normalize();
        normalized
    }

    /// Validate that this embedding has the expected dimension.
    pub fn validate_dimension(&self, expected: usize) -> Result<()> {
        if self.data.len() != expected {
            return Err(StyleRankError::DimensionMismatch {
                expected,
                actual: self.data.len(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_embedding_carries_current_schema() {
        let embedding = Embedding::new(vec![1.0, 2.0]);
        assert_eq!(embedding.schema_version, EMBEDDING_SCHEMA_VERSION);
        assert!(embedding.is_current_schema());
    }

    #[test]
    fn test_legacy_schema_detection() {
        let embedding = Embedding::with_version(vec![1.0, 2.0], 0);
        assert!(!embedding.is_current_schema());
    }

    #[test]
    fn test_norm_and_normalize() {
        let mut embedding = Embedding::new(vec![3.0, 4.0]);
        assert!((embedding.norm() - 5.0).abs() < 1e-6);

        embedding.normalize();
        assert!((embedding.norm() - 1.0).abs() < 1e-6);
        assert!((embedding.data[0] - 0.6).abs() < 1e-6);
        assert!((embedding.data[1] - 0.8).abs() < 1e-6);
    }

    #[test]
    fn test_normalize_zero_vector_is_noop() {
        let mut embedding = Embedding::new(vec![0.0, 0.0, 0.0]);
        embedding.normalize();
        assert_eq!(embedding.data, vec![0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_validate_dimension() {
        let embedding = Embedding::new(vec![0.0; 4]);
        assert!(embedding.validate_dimension(4).is_ok());

        let err = embedding.validate_dimension(512).unwrap_err();
        match err {
            StyleRankError::DimensionMismatch { expected, actual } => {
                assert_eq!(expected, 512);
                assert_eq!(actual, 4);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
