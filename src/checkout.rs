//! Checkout form validation and order placement.
//!
//! There is no real payment integration: validation blocks submission
//! with a specific user-visible message per missing or invalid field, and
//! a successful checkout clears the cart and returns an order summary.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::cart::{Cart, CartLine, CartTotals};
use crate::error::{Result, StyleRankError};

/// A specific, user-visible checkout validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum CheckoutFieldError {
    #[error("Please fill in all personal information fields")]
    MissingPersonalInfo,
    #[error("Please fill in all payment information fields")]
    MissingPaymentInfo,
    #[error("Please enter a valid email address")]
    InvalidEmail,
    #[error("Please enter a valid 16-digit card number")]
    InvalidCardNumber,
    #[error("Please enter a valid expiry date (MM/YY)")]
    InvalidExpiryDate,
    #[error("Please enter a valid CVV")]
    InvalidCvv,
}

/// The checkout form as collected from the user.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CheckoutForm {
    pub email: String,
    pub full_name: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub zip_code: String,
    pub card_number: String,
    pub expiry_date: String,
    pub cvv: String,
}

impl CheckoutForm {
    /// Validate the form, returning the first failure encountered.
    ///
    /// Checks run in presentation order: personal fields, payment fields,
    /// then field formats.
    pub fn validate(&self) -> std::result::Result<(), CheckoutFieldError> {
        let personal = [
            &self.email,
            &self.full_name,
            &self.phone,
            &self.address,
            &self.city,
            &self.zip_code,
        ];
        if personal.iter().any(|field| field.trim().is_empty()) {
            return Err(CheckoutFieldError::MissingPersonalInfo);
        }

        let payment = [&self.card_number, &self.expiry_date, &self.cvv];
        if payment.iter().any(|field| field.trim().is_empty()) {
            return Err(CheckoutFieldError::MissingPaymentInfo);
        }

        if !valid_email(&self.email) {
            return Err(CheckoutFieldError::InvalidEmail);
        }

        let digits: String = self.card_number.chars().filter(|c| !c.is_whitespace()).collect();
        if digits.len() != 16 || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(CheckoutFieldError::InvalidCardNumber);
        }

        if !valid_expiry(&self.expiry_date) {
            return Err(CheckoutFieldError::InvalidExpiryDate);
        }

        let cvv = self.cvv.trim();
        if !(3..=4).contains(&cvv.len()) || !cvv.chars().all(|c| c.is_ascii_digit()) {
            return Err(CheckoutFieldError::InvalidCvv);
        }

        Ok(())
    }
}

/// Minimal email shape check: a local part, an `@`, and a dotted domain.
fn valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

/// Expiry must be `MM/YY` with a month in 01..=12.
fn valid_expiry(expiry: &str) -> bool {
    let Some((month, year)) = expiry.split_once('/') else {
        return false;
    };
    if month.len() != 2 || year.len() != 2 {
        return false;
    }
    let Ok(month) = month.parse::<u32>() else {
        return false;
    };
    (1..=12).contains(&month) && year.chars().all(|c| c.is_ascii_digit())
}

/// Summary of a placed order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderSummary {
    /// Generated order id.
    pub order_id: String,
    /// The reserved lines.
    pub lines: Vec<CartLine>,
    /// Amounts charged.
    pub totals: CartTotals,
    /// When the order was placed.
    pub placed_at: DateTime<Utc>,
}

/// Checkout service over a cart.
#[derive(Debug, Clone)]
pub struct CheckoutService {
    cart: Cart,
}

impl CheckoutService {
    /// Create a checkout service for the given cart.
    pub fn new(cart: Cart) -> Self {
        Self { cart }
    }

    /// Validate the form and place the order, clearing the cart.
    ///
    /// Validation failures surface as `Validation` errors carrying the
    /// field-specific message; an empty cart cannot be checked out.
    pub async fn place_order(&self, form: &CheckoutForm) -> Result<OrderSummary> {
        form.validate()
            .map_err(|err| StyleRankError::validation(err.to_string()))?;

        let lines = self.cart.lines().await?;
        if lines.is_empty() {
            return Err(StyleRankError::validation("Your cart is empty"));
        }
        let totals = self.cart.totals().await?;

        self.cart.clear().await?;
        let order = OrderSummary {
            order_id: Uuid::new_v4().to_string(),
            lines,
            totals,
            placed_at: Utc::now(),
        };
        tracing::debug!(order_id = %order.order_id, total = order.totals.total, "order placed");
        Ok(order)
    }
}
