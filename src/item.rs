//! Rental item records and their derived attribute/embedding data.
//!
//! An [`Item`] owns its [`ItemAttributes`] record and (optionally) an
//! [`Embedding`]. Both are created at item-creation time and regenerated
//! wholesale whenever the title or description changes; they are never
//! partially mutated.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::attributes::{AttributeExtractor, ItemAttributes};
use crate::embedding::Embedding;
use crate::embedding::builder::EmbeddingBuilder;

/// A rental item as stored in the item store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Store-assigned identifier.
    pub id: String,
    /// Listing title.
    pub title: String,
    /// Listing description.
    pub description: String,
    /// Rental price per period.
    pub rent_price: f64,
    /// Refundable security deposit.
    pub security_deposit: f64,
    /// Owning user's id.
    pub owner_id: String,
    /// Owning user's display name.
    pub owner_username: String,
    /// Whether the item is currently listed.
    pub is_active: bool,
    /// Optional image reference.
    pub image_url: Option<String>,
    /// Keyword-derived attribute record.
    pub attributes: ItemAttributes,
    /// Similarity vector; absent on records predating the embedding
    /// pipeline.
    pub embedding: Option<Embedding>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last-update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a new item.
///
/// Attributes and embedding may be supplied by the caller; when absent
/// they are generated from the title and description.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewItem {
    pub title: String,
    pub description: String,
    pub rent_price: f64,
    pub security_deposit: f64,
    pub owner_id: String,
    pub owner_username: String,
    pub image_url: Option<String>,
    pub attributes: Option<ItemAttributes>,
    pub embedding: Option<Embedding>,
}

impl Item {
    /// Materialize a new item, generating attributes and embedding where
    /// the submission did not provide them.
    pub fn from_new(
        new: NewItem,
        extractor: &AttributeExtractor,
        builder: &EmbeddingBuilder,
    ) -> Self {
        let attributes = new
            .attributes
            .unwrap_or_else(|| extractor.extract(&new.title, &new.description));
        let embedding = match new.embedding {
            Some(embedding) if !embedding.is_empty() => Some(embedding),
            _ => Some(builder.build(&attributes, &new.title, &new.description)),
        };
        let now = Utc::now();

        Item {
            id: Uuid::new_v4().to_string(),
            title: new.title,
            description: new.description,
            rent_price: new.rent_price,
            security_deposit: new.security_deposit,
            owner_id: new.owner_id,
            owner_username: new.owner_username,
            is_active: true,
            image_url: new.image_url,
            attributes,
            embedding,
            created_at: now,
            updated_at: now,
        }
    }
}

/// A partial update to an item.
///
/// Fields left as `None` are untouched. A change to the title or
/// description regenerates the attribute record and embedding wholesale.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ItemPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub rent_price: Option<f64>,
    pub security_deposit: Option<f64>,
    pub is_active: Option<bool>,
    pub image_url: Option<String>,
}

impl ItemPatch {
    /// Apply this patch to an item, regenerating derived data if the text
    /// changed, and bump `updated_at`.
    pub fn apply(
        self,
        item: &mut Item,
        extractor: &AttributeExtractor,
        builder: &EmbeddingBuilder,
    ) {
        let mut text_changed = false;

        if let Some(title) = self.title {
            text_changed |= title != item.title;
            item.title = title;
        }
        if let Some(description) = self.description {
            text_changed |= description != item.description;
            item.description = description;
        }
        if let Some(rent_price) = self.rent_price {
            item.rent_price = rent_price;
        }
        if let Some(security_deposit) = self.security_deposit {
            item.security_deposit = security_deposit;
        }
        if let Some(is_active) = self.is_active {
            item.is_active = is_active;
        }
        if let Some(image_url) = self.image_url {
            item.image_url = Some(image_url);
        }

        if text_changed {
            item.attributes = extractor.extract(&item.title, &item.description);
            item.embedding = Some(builder.build(&item.attributes, &item.title, &item.description));
        }

        item.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embedding::EMBEDDING_DIM;

    fn sample_new_item() -> NewItem {
        NewItem {
            title: "Red Dress".into(),
            description: "beautiful red dress for evening".into(),
            rent_price: 25.0,
            security_deposit: 100.0,
            owner_id: "user-1".into(),
            owner_username: "ana".into(),
            ..NewItem::default()
        }
    }

    #[test]
    fn test_from_new_generates_attributes_and_embedding() {
        let item = Item::from_new(
            sample_new_item(),
            &AttributeExtractor::new(),
            &EmbeddingBuilder::new(),
        );

        assert!(item.attributes.colors.red > 0.0);
        let embedding = item.embedding.expect("embedding generated");
        assert_eq!(embedding.dimension(), EMBEDDING_DIM);
        assert!(item.is_active);
        assert!(!item.id.is_empty());
    }

    #[test]
    fn test_from_new_keeps_supplied_embedding() {
        let supplied = Embedding::new(vec![1.0; EMBEDDING_DIM]);
        let mut new = sample_new_item();
        new.embedding = Some(supplied.clone());

        let item = Item::from_new(new, &AttributeExtractor::new(), &EmbeddingBuilder::new());
        assert_eq!(item.embedding, Some(supplied));
    }

    #[test]
    fn test_from_new_replaces_empty_embedding() {
        let mut new = sample_new_item();
        new.embedding = Some(Embedding::new(Vec::new()));

        let item = Item::from_new(new, &AttributeExtractor::new(), &EmbeddingBuilder::new());
        assert_eq!(item.embedding.unwrap().dimension(), EMBEDDING_DIM);
    }

    #[test]
    fn test_patch_text_regenerates_derived_data() {
        let extractor = AttributeExtractor::new();
        let builder = EmbeddingBuilder::new();
        let mut item = Item::from_new(sample_new_item(), &extractor, &builder);
        let original_embedding = item.embedding.clone();

        let patch = ItemPatch {
            description: Some("cozy blue wool sweater for winter".into()),
            ..ItemPatch::default()
        };
        patch.apply(&mut item, &extractor, &builder);

        assert!(item.attributes.colors.blue > 0.0);
        assert_eq!(item.attributes.colors.red, 0.0);
        assert_ne!(item.embedding, original_embedding);
    }

    #[test]
    fn test_patch_without_text_change_keeps_embedding() {
        let extractor = AttributeExtractor::new();
        let builder = EmbeddingBuilder::new();
        let mut item = Item::from_new(sample_new_item(), &extractor, &builder);
        let original_embedding = item.embedding.clone();

        let patch = ItemPatch {
            rent_price: Some(30.0),
            is_active: Some(false),
            ..ItemPatch::default()
        };
        patch.apply(&mut item, &extractor, &builder);

        assert_eq!(item.rent_price, 30.0);
        assert!(!item.is_active);
        assert_eq!(item.embedding, original_embedding);
    }
}
