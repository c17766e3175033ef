//! In-memory store implementations for testing and embedded use.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::error::{Result, StyleRankError};
use crate::item::Item;
use crate::profile::PreferenceProfile;
use crate::store::{ItemStore, ProfileStore};

/// An item store backed by a locked map.
#[derive(Debug, Default)]
pub struct MemoryItemStore {
    items: Arc<Mutex<HashMap<String, Item>>>,
}

impl MemoryItemStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored items.
    pub fn len(&self) -> usize {
        self.items.lock().len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.items.lock().is_empty()
    }
}

#[async_trait]
impl ItemStore for MemoryItemStore {
    async fn add(&self, item: Item) -> Result<String> {
        let id = item.id.clone();
        self.items.lock().insert(id.clone(), item);
        Ok(id)
    }

    async fn get(&self, id: &str) -> Result<Option<Item>> {
        Ok(self.items.lock().get(id).cloned())
    }

    async fn active_items(&self) -> Result<Vec<Item>> {
        let items = self.items.lock();
        let mut active: Vec<Item> = items.values().filter(|item| item.is_active).cloned().collect();
        // Map iteration order is arbitrary; keep results reproducible.
        active.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(active)
    }

    async fn items_by_owner(&self, owner_id: &str) -> Result<Vec<Item>> {
        let items = self.items.lock();
        let mut owned: Vec<Item> = items
            .values()
            .filter(|item| item.owner_id == owner_id)
            .cloned()
            .collect();
        owned.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(owned)
    }

    async fn update(&self, item: Item) -> Result<()> {
        let mut items = self.items.lock();
        if !items.contains_key(&item.id) {
            return Err(StyleRankError::not_found(format!("item {}", item.id)));
        }
        items.insert(item.id.clone(), item);
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<()> {
        self.items.lock().remove(id);
        Ok(())
    }
}

/// A profile store backed by a locked map.
#[derive(Debug, Default)]
pub struct MemoryProfileStore {
    profiles: Arc<Mutex<HashMap<String, PreferenceProfile>>>,
}

impl MemoryProfileStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProfileStore for MemoryProfileStore {
    async fn load(&self, user_id: &str) -> Result<Option<PreferenceProfile>> {
        Ok(self.profiles.lock().get(user_id).cloned())
    }

    async fn save(&self, user_id: &str, profile: &PreferenceProfile) -> Result<()> {
        self.profiles
            .lock()
            .insert(user_id.to_string(), profile.clone());
        Ok(())
    }
}
