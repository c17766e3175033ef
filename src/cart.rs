//! Rental cart persisted in local storage.
//!
//! Cart lines are stored as a JSON list under a fixed key. A line is
//! identified by its item id plus rental date range; adding a line that
//! matches an existing one replaces it.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::store::local::LocalStore;

/// Fixed storage key for the cart line list.
const CART_ITEMS_KEY: &str = "cartItems";

/// One rental reservation in the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    /// Id of the reserved item.
    pub item_id: String,
    /// Listing title at the time of adding.
    pub title: String,
    /// Optional image reference.
    pub image_url: Option<String>,
    /// Owner's display name.
    pub owner_username: String,
    /// Rental price per day.
    pub rent_price: f64,
    /// Refundable security deposit.
    pub security_deposit: f64,
    /// First rental day (YYYY-MM-DD).
    pub start_date: String,
    /// Last rental day (YYYY-MM-DD).
    pub end_date: String,
    /// Number of rental days.
    pub total_days: u32,
    /// Rent for the whole period, excluding deposit.
    pub total_price: f64,
    /// When the line was added.
    pub added_at: DateTime<Utc>,
}

/// Aggregated cart amounts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CartTotals {
    /// Sum of line rental prices.
    pub subtotal: f64,
    /// Sum of security deposits.
    pub security_deposits: f64,
    /// Subtotal plus deposits.
    pub total: f64,
}

/// Cart service over local storage.
#[derive(Debug, Clone)]
pub struct Cart {
    store: Arc<dyn LocalStore>,
}

impl Cart {
    /// Create a cart over the given local store.
    pub fn new(store: Arc<dyn LocalStore>) -> Self {
        Self { store }
    }

    /// All cart lines, in insertion order.
    pub async fn lines(&self) -> Result<Vec<CartLine>> {
        match self.store.get(CART_ITEMS_KEY).await? {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => Ok(Vec::new()),
        }
    }

    /// Add a line, replacing any existing line with the same item id and
    /// date range.
    pub async fn add(&self, line: CartLine) -> Result<()> {
        let mut lines = self.lines().await?;
        let existing = lines.iter().position(|l| {
            l.item_id == line.item_id
                && l.start_date == line.start_date
                && l.end_date == line.end_date
        });

        match existing {
            Some(index) => {
                lines[index] = line;
                tracing::debug!("cart line replaced");
            }
            None => {
                lines.push(line);
                tracing::debug!("cart line added");
            }
        }

        self.write_lines(&lines).await
    }

    /// Remove the line matching the given item id and start date.
    pub async fn remove(&self, item_id: &str, start_date: &str) -> Result<()> {
        let mut lines = self.lines().await?;
        lines.retain(|l| !(l.item_id == item_id && l.start_date == start_date));
        self.write_lines(&lines).await
    }

    /// Remove all lines.
    pub async fn clear(&self) -> Result<()> {
        self.store.remove(CART_ITEMS_KEY).await
    }

    /// Number of lines in the cart.
    pub async fn count(&self) -> Result<usize> {
        Ok(self.lines().await?.len())
    }

    /// Aggregate amounts across all lines.
    pub async fn totals(&self) -> Result<CartTotals> {
        let lines = self.lines().await?;
        let subtotal: f64 = lines.iter().map(|l| l.total_price).sum();
        let security_deposits: f64 = lines.iter().map(|l| l.security_deposit).sum();
        Ok(CartTotals {
            subtotal,
            security_deposits,
            total: subtotal + security_deposits,
        })
    }

    async fn write_lines(&self, lines: &[CartLine]) -> Result<()> {
        let raw = serde_json::to_string(lines)?;
        self.store.set(CART_ITEMS_KEY, &raw).await
    }
}
