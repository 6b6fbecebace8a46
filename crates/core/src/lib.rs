//! `ShopNext` Core - Shared domain library.
//!
//! This crate provides the domain model used by the `storefront` binary:
//! catalog records, the persisted shopping cart and the pure helpers the
//! views build on.
//!
//! # Architecture
//!
//! The core crate contains only types, traits and in-memory logic - no
//! network access and no filesystem access. Persistence goes through the
//! [`CartStorage`] trait so the binary decides where the cart lives.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, prices, products and categories
//! - [`cart`] - The cart store, its lines and its storage port
//! - [`catalog`] - Listing filters and sort orders
//! - [`pricing`] - Shipping, tax and order totals
//! - [`format`] - Currency/date formatting, slugs and short ids

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod format;
pub mod pricing;
pub mod types;

pub use cart::{CartLine, CartStorage, CartStore, MemoryStorage, StorageError};
pub use catalog::{ProductFilter, SortOrder};
pub use pricing::OrderSummary;
pub use types::*;
