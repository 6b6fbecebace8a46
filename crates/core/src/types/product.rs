//! Catalog records: products and categories.
//!
//! Both are read-only for the lifetime of the process. The cart only ever
//! reads `id`, `name`, `price`, `image_url` and `slug` from a [`Product`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::{CategoryId, ProductId};
use super::price::Price;

/// A named product attribute shown on the detail page (e.g. "Battery Life").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Specification {
    pub name: String,
    pub value: String,
}

impl Specification {
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// A catalog item available for purchase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Opaque unique identifier.
    pub id: ProductId,
    pub name: String,
    pub description: String,
    /// Unit price.
    pub price: Price,
    /// Primary image.
    pub image_url: String,
    /// Gallery images, primary image first.
    pub images: Vec<String>,
    /// Category name (matches [`Category::name`]).
    pub category: String,
    /// Units on hand.
    pub stock: u32,
    pub featured: bool,
    /// Unique, URL-safe handle used in `/products/{slug}`.
    pub slug: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Ordered name/value pairs.
    #[serde(default)]
    pub specifications: Vec<Specification>,
}

impl Product {
    /// Returns `true` if at least one unit is on hand.
    #[must_use]
    pub const fn in_stock(&self) -> bool {
        self.stock > 0
    }
}

/// A product grouping shown on the home page and used by the category filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
}
