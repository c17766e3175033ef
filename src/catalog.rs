//! Item catalog service: listing CRUD over an [`ItemStore`].
//!
//! The catalog owns the attribute extractor and embedding builder, so
//! every item entering the store carries a freshly generated attribute
//! record and embedding unless the submission supplied its own.

use std::sync::Arc;

use crate::attributes::AttributeExtractor;
use crate::embedding::builder::EmbeddingBuilder;
use crate::error::{Result, StyleRankError};
use crate::item::{Item, ItemPatch, NewItem};
use crate::store::ItemStore;

/// Service for creating, reading, updating, and deleting items.
#[derive(Debug, Clone)]
pub struct ItemCatalog {
    store: Arc<dyn ItemStore>,
    extractor: AttributeExtractor,
    builder: EmbeddingBuilder,
}

impl ItemCatalog {
    /// Create a catalog over the given store.
    pub fn new(store: Arc<dyn ItemStore>) -> Self {
        Self {
            store,
            extractor: AttributeExtractor::new(),
            builder: EmbeddingBuilder::new(),
        }
    }

    /// Create a new listing, generating derived data where absent.
    pub async fn add_item(&self, new: NewItem) -> Result<Item> {
        let item = Item::from_new(new, &self.extractor, &self.builder);
        let id = self.store.add(item.clone()).await?;
        tracing::debug!(item_id = %id, "item created");
        Ok(item)
    }

    /// Fetch a single item by id.
    pub async fn item(&self, id: &str) -> Result<Option<Item>> {
        self.store.get(id).await
    }

    /// Fetch all active listings.
    pub async fn active_items(&self) -> Result<Vec<Item>> {
        self.store.active_items().await
    }

    /// Fetch all listings belonging to one owner.
    pub async fn items_by_owner(&self, owner_id: &str) -> Result<Vec<Item>> {
        self.store.items_by_owner(owner_id).await
    }

    /// Apply a partial update to an item.
    ///
    /// A change to the title or description regenerates attributes and
    /// embedding wholesale before the item is written back.
    pub async fn update_item(&self, id: &str, patch: ItemPatch) -> Result<Item> {
        let mut item = self
            .store
            .get(id)
            .await?
            .ok_or_else(|| StyleRankError::not_found(format!("item {id}")))?;

        patch.apply(&mut item, &self.extractor, &self.builder);
        self.store.update(item.clone()).await?;
        tracing::debug!(item_id = %id, "item updated");
        Ok(item)
    }

    /// Delete a listing.
    pub async fn delete_item(&self, id: &str) -> Result<()> {
        self.store.delete(id).await?;
        tracing::debug!(item_id = %id, "item deleted");
        Ok(())
    }
}
