//! Storage abstractions for items, profiles, and local device data.
//!
//! These traits are the pipeline's boundary to its external collaborators
//! (a cloud document store and local key-value persistence). They are
//! injected into the services as `Arc<dyn ...>` trait objects, so tests
//! and embedded deployments can run entirely against the in-memory
//! backends.

pub mod local;
pub mod memory;

use std::fmt::Debug;

use async_trait::async_trait;

use crate::error::Result;
use crate::item::Item;
use crate::profile::PreferenceProfile;

/// Document store for rental items.
#[async_trait]
pub trait ItemStore: Send + Sync + Debug {
    /// Persist a new item and return its id.
    async fn add(&self, item: Item) -> Result<String>;

    /// Fetch a single item by id.
    async fn get(&self, id: &str) -> Result<Option<Item>>;

    /// Fetch all items currently flagged active.
    async fn active_items(&self) -> Result<Vec<Item>>;

    /// Fetch all items belonging to one owner.
    async fn items_by_owner(&self, owner_id: &str) -> Result<Vec<Item>>;

    /// Replace a stored item with an updated version.
    async fn update(&self, item: Item) -> Result<()>;

    /// Delete an item by id.
    async fn delete(&self, id: &str) -> Result<()>;
}

/// Document store for user preference profiles.
///
/// Profiles are keyed by the authenticated user id. A `save` replaces
/// only the style-preference portion of the user's document; unrelated
/// fields must not be clobbered.
#[async_trait]
pub trait ProfileStore: Send + Sync + Debug {
    /// Load a user's preference profile, if one exists.
    async fn load(&self, user_id: &str) -> Result<Option<PreferenceProfile>>;

    /// Persist a user's preference profile.
    async fn save(&self, user_id: &str, profile: &PreferenceProfile) -> Result<()>;
}
