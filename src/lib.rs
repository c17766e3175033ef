//! # stylerank
//!
//! Content-based style recommendation engine for a fashion rental
//! marketplace.
//!
//! ## Features
//!
//! - Keyword attribute extraction from item text
//! - Deterministic fixed-length (512-d) embedding construction
//! - Cosine-similarity candidate ranking
//! - User preference profiles with mean-embedding aggregation
//! - Item catalog, wishlist, cart, and checkout services
//! - Pluggable item/profile/local stores with in-memory and file backends

pub mod attributes;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod embedding;
pub mod error;
pub mod item;
pub mod profile;
pub mod recommend;
pub mod similarity;
pub mod store;
pub mod util;
pub mod wishlist;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
