//! Canonical embedding construction from an attribute record.
//!
//! The builder flattens an [`ItemAttributes`] record and the item's text
//! into a fixed 512-dimensional vector, partitioned by dimension range:
//!
//! | Range     | Signal                                              |
//! |-----------|-----------------------------------------------------|
//! | 0..50     | Vibe, occasion, and season scores, weight-scaled    |
//! | 50..100   | Color scores, weight-scaled                         |
//! | 100..200  | Lexical hashes of up to 100 leading words           |
//! | 200..512  | Low-magnitude deterministic pseudo-fill             |
//!
//! The pseudo-fill keeps sparse-keyword items distinguishable without the
//! nondeterminism of a random fill: the same input always produces the
//! same vector. The finished vector is L2-normalized exactly once, so
//! every downstream similarity computation operates on unit vectors.

use std::collections::HashMap;

use lazy_static::lazy_static;
use unicode_segmentation::UnicodeSegmentation;

use crate::attributes::ItemAttributes;
use crate::embedding::{EMBEDDING_DIM, Embedding};

/// First dimension of the color range.
const COLOR_OFFSET: usize = 50;
/// First dimension of the lexical range.
const LEXICAL_OFFSET: usize = 100;
/// Number of lexical word slots.
const LEXICAL_SLOTS: usize = 100;
/// First dimension of the pseudo-fill range.
const FILL_OFFSET: usize = 200;
/// Upper bound on a pseudo-fill component, kept small relative to the
/// signal ranges.
const FILL_MAGNITUDE: f32 = 0.1;
/// Weight applied to attribute names absent from a weight table.
const DEFAULT_WEIGHT: f32 = 0.1;

lazy_static! {
    static ref VIBE_WEIGHTS: HashMap<&'static str, f32> = HashMap::from([
        ("casual", 0.9),
        ("formal", 0.8),
        ("bohemian", 0.7),
        ("minimalist", 0.6),
        ("vintage", 0.5),
        ("streetwear", 0.4),
        ("romantic", 0.3),
        ("edgy", 0.2),
    ]);
    static ref OCCASION_WEIGHTS: HashMap<&'static str, f32> = HashMap::from([
        ("work", 0.9),
        ("party", 0.8),
        ("date", 0.7),
        ("casual", 0.6),
        ("formal", 0.5),
        ("vacation", 0.4),
    ]);
    static ref SEASON_WEIGHTS: HashMap<&'static str, f32> = HashMap::from([
        ("spring", 0.9),
        ("summer", 0.8),
        ("fall", 0.7),
        ("winter", 0.6),
    ]);
    static ref COLOR_WEIGHTS: HashMap<&'static str, f32> = HashMap::from([
        ("black", 0.9),
        ("white", 0.8),
        ("red", 0.7),
        ("blue", 0.6),
        ("green", 0.5),
        ("yellow", 0.4),
        ("pink", 0.3),
        ("brown", 0.2),
        ("neutral", 0.1),
    ]);
}

/// Builds the canonical attribute-flatten embedding.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddingBuilder;

impl EmbeddingBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self
    }

    /// Build the embedding for an item from its attribute record and text.
    ///
    /// The construction is deterministic; building twice from the same
    /// input yields identical vectors.
    pub fn build(
        &self,
        attributes: &ItemAttributes,
        title: &str,
        description: &str,
    ) -> Embedding {
        let data = self.components(attributes, title, description);
        let mut embedding = Embedding::new(data);
        embedding.normalize();
        embedding
    }

    /// Assemble the raw (pre-normalization) components.
    fn components(
        &self,
        attributes: &ItemAttributes,
        title: &str,
        description: &str,
    ) -> Vec<f32> {
        let mut data = vec![0.0f32; EMBEDDING_DIM];
        let text = format!("{title} {description}").to_lowercase();

        // Category signal: vibes, then occasions, then seasons.
        let mut slot = 0;
        for (name, score) in attributes.vibes.named() {
            data[slot] = weight_for(&VIBE_WEIGHTS, name) * score;
            slot += 1;
        }
        for (name, score) in attributes.occasions.named() {
            data[slot] = weight_for(&OCCASION_WEIGHTS, name) * score;
            slot += 1;
        }
        for (name, score) in attributes.seasons.named() {
            data[slot] = weight_for(&SEASON_WEIGHTS, name) * score;
            slot += 1;
        }
        debug_assert!(slot <= COLOR_OFFSET);

        for (index, (name, score)) in attributes.colors.named().into_iter().enumerate() {
            data[COLOR_OFFSET + index] = weight_for(&COLOR_WEIGHTS, name) * score;
        }

        // Lexical signal: one slot per leading word; words of three or
        // more characters contribute their character-code hash.
        for (index, word) in text.unicode_words().take(LEXICAL_SLOTS).enumerate() {
            if word.chars().count() > 2 {
                data[LEXICAL_OFFSET + index] = word_signal(word);
            }
        }

        // Deterministic pseudo-fill over the remaining dimensions.
        let seed = text_hash(&text);
        for (index, value) in data.iter_mut().enumerate().skip(FILL_OFFSET) {
            *value = pseudo_fill(seed, index);
        }

        data
    }
}

/// Look up an attribute weight, falling back to [`DEFAULT_WEIGHT`].
fn weight_for(table: &HashMap<&'static str, f32>, name: &str) -> f32 {
    table.get(name).copied().unwrap_or(DEFAULT_WEIGHT)
}

/// Map a word onto `[0, 1)` via the sum of its character codes.
fn word_signal(word: &str) -> f32 {
    let char_sum: u32 = word.chars().map(|c| c as u32).sum();
    (char_sum % 100) as f32 / 100.0
}

/// Stable multiplicative hash over the text bytes.
pub(crate) fn text_hash(text: &str) -> u64 {
    let mut hash = 0u64;
    for byte in text.bytes() {
        hash = hash.wrapping_mul(31).wrapping_add(byte as u64);
    }
    hash
}

/// Derive a low-magnitude component for one fill dimension.
fn pseudo_fill(seed: u64, index: usize) -> f32 {
    let mixed = seed
        .wrapping_add(index as u64)
        .wrapping_mul(6364136223846793005)
        .wrapping_add(1442695040888963407);
    ((mixed >> 33) % 1000) as f32 / 1000.0 * FILL_MAGNITUDE
}
