//! Wishlist persistence and optimistic like-toggling.
//!
//! Liked item ids are stored as a JSON string list under a fixed key in a
//! [`LocalStore`]. Toggling is modelled as an explicit optimistic state
//! transition: the flip is provisionally applied, then confirmed when the
//! store write succeeds or rolled back when it fails.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::store::local::LocalStore;

/// Fixed storage key for the liked-item id list.
const LIKED_ITEMS_KEY: &str = "likedItems";

/// Resolution state of an optimistic toggle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ToggleState {
    /// Provisionally applied, store write still in flight.
    Pending,
    /// Store write succeeded; the provisional value is authoritative.
    Confirmed,
    /// Store write failed; the provisional value was reverted.
    RolledBack {
        /// Why the write failed, suitable for a retryable user notice.
        reason: String,
    },
}

/// Outcome of an optimistic wishlist toggle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimisticToggle {
    /// The item being toggled.
    pub item_id: String,
    /// The liked value currently in effect. While pending or confirmed
    /// this is the flipped value; after a rollback it is the original.
    pub liked: bool,
    /// Resolution state.
    pub state: ToggleState,
}

impl OptimisticToggle {
    /// Whether the toggle ended confirmed.
    pub fn is_confirmed(&self) -> bool {
        self.state == ToggleState::Confirmed
    }

    /// Whether the toggle was rolled back.
    pub fn is_rolled_back(&self) -> bool {
        matches!(self.state, ToggleState::RolledBack { .. })
    }
}

/// Wishlist service over local storage.
#[derive(Debug, Clone)]
pub struct Wishlist {
    store: Arc<dyn LocalStore>,
}

impl Wishlist {
    /// Create a wishlist over the given local store.
    pub fn new(store: Arc<dyn LocalStore>) -> Self {
        Self { store }
    }

    /// All liked item ids, in insertion order.
    pub async fn liked_ids(&self) -> Result<Vec<String>> {
        match self.store.get(LIKED_ITEMS_KEY).await? {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => Ok(Vec::new()),
        }
    }

    /// Add an item to the wishlist. Adding an already-liked item is a
    /// no-op.
    pub async fn add(&self, item_id: &str) -> Result<()> {
        let mut ids = self.liked_ids().await?;
        if !ids.iter().any(|id| id == item_id) {
            ids.push(item_id.to_string());
            self.write_ids(&ids).await?;
        }
        Ok(())
    }

    /// Remove an item from the wishlist.
    pub async fn remove(&self, item_id: &str) -> Result<()> {
        let mut ids = self.liked_ids().await?;
        ids.retain(|id| id != item_id);
        self.write_ids(&ids).await
    }

    /// Whether an item is currently liked.
    pub async fn is_liked(&self, item_id: &str) -> Result<bool> {
        Ok(self.liked_ids().await?.iter().any(|id| id == item_id))
    }

    /// Optimistically flip an item's liked state.
    ///
    /// Reading the current list can still fail with an ordinary error;
    /// once the provisional flip is made, a failing store write resolves
    /// to `RolledBack` with `liked` reverted to the original value rather
    /// than an `Err`.
    pub async fn toggle(&self, item_id: &str) -> Result<OptimisticToggle> {
        let ids = self.liked_ids().await?;
        let was_liked = ids.iter().any(|id| id == item_id);

        // Provisional transition.
        let mut toggle = OptimisticToggle {
            item_id: item_id.to_string(),
            liked: !was_liked,
            state: ToggleState::Pending,
        };

        let mut updated = ids;
        if was_liked {
            updated.retain(|id| id != item_id);
        } else {
            updated.push(item_id.to_string());
        }

        match self.write_ids(&updated).await {
            Ok(()) => {
                toggle.state = ToggleState::Confirmed;
            }
            Err(err) => {
                tracing::warn!(item_id, error = %err, "wishlist toggle rolled back");
                toggle.liked = was_liked;
                toggle.state = ToggleState::RolledBack {
                    reason: err.to_string(),
                };
            }
        }

        Ok(toggle)
    }

    async fn write_ids(&self, ids: &[String]) -> Result<()> {
        let raw = serde_json::to_string(ids)?;
        self.store.set(LIKED_ITEMS_KEY, &raw).await
    }
}
