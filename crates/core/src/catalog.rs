//! Product listing filters and sort orders.
//!
//! Filtering never touches the catalog itself; [`ProductFilter::apply`]
//! returns references into the slice it was given.

use std::cmp::Ordering;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{Price, Product};

/// Default inclusive lower price bound.
pub const DEFAULT_MIN_PRICE: Decimal = Decimal::ZERO;

/// Default inclusive upper price bound.
pub const DEFAULT_MAX_PRICE: Decimal = Decimal::ONE_THOUSAND;

/// Listing sort order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortOrder {
    PriceAsc,
    PriceDesc,
    NameAsc,
    NameDesc,
    /// Most recently created first.
    #[default]
    Newest,
}

impl SortOrder {
    /// Every order, in the sequence the sort menu lists them.
    pub const ALL: [Self; 5] = [
        Self::Newest,
        Self::PriceAsc,
        Self::PriceDesc,
        Self::NameAsc,
        Self::NameDesc,
    ];

    /// Query-string value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PriceAsc => "price-asc",
            Self::PriceDesc => "price-desc",
            Self::NameAsc => "name-asc",
            Self::NameDesc => "name-desc",
            Self::Newest => "newest",
        }
    }

    /// Human-readable menu label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::PriceAsc => "Price: Low to High",
            Self::PriceDesc => "Price: High to Low",
            Self::NameAsc => "Name: A to Z",
            Self::NameDesc => "Name: Z to A",
            Self::Newest => "Newest First",
        }
    }

    fn compare(self, a: &Product, b: &Product) -> Ordering {
        match self {
            Self::PriceAsc => a.price.cmp(&b.price),
            Self::PriceDesc => b.price.cmp(&a.price),
            Self::NameAsc => compare_names(&a.name, &b.name),
            Self::NameDesc => compare_names(&b.name, &a.name),
            Self::Newest => b.created_at.cmp(&a.created_at),
        }
    }
}

impl FromStr for SortOrder {
    type Err = UnknownSortOrder;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|order| order.as_str() == s)
            .ok_or_else(|| UnknownSortOrder(s.to_owned()))
    }
}

/// Returned when a query string names no known sort order.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown sort order: {0}")]
pub struct UnknownSortOrder(pub String);

/// Case-insensitive first, so "apple" sorts beside "Apple" rather than
/// after every capitalised name.
fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Search, category, price and sort settings for the product listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductFilter {
    /// Case-insensitive substring matched against name, description and tags.
    pub search: Option<String>,
    /// Exact category name.
    pub category: Option<String>,
    /// Inclusive lower bound.
    pub min_price: Price,
    /// Inclusive upper bound.
    pub max_price: Price,
    pub sort: SortOrder,
}

impl Default for ProductFilter {
    fn default() -> Self {
        Self {
            search: None,
            category: None,
            min_price: Price::new(DEFAULT_MIN_PRICE),
            max_price: Price::new(DEFAULT_MAX_PRICE),
            sort: SortOrder::default(),
        }
    }
}

impl ProductFilter {
    /// Returns `true` if any setting differs from the defaults.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self != &Self::default()
    }

    /// Returns `true` if `product` passes the search, category and price
    /// filters.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        self.matches_search(product)
            && self
                .category
                .as_deref()
                .is_none_or(|category| product.category == category)
            && product.price >= self.min_price
            && product.price <= self.max_price
    }

    fn matches_search(&self, product: &Product) -> bool {
        let Some(query) = self.search.as_deref() else {
            return true;
        };
        let query = query.to_lowercase();

        product.name.to_lowercase().contains(&query)
            || product.description.to_lowercase().contains(&query)
            || product
                .tags
                .iter()
                .any(|tag| tag.to_lowercase().contains(&query))
    }

    /// Filter and sort `products`.
    ///
    /// The sort is stable: products that compare equal keep their catalog
    /// order.
    #[must_use]
    pub fn apply<'a>(&self, products: &'a [Product]) -> Vec<&'a Product> {
        let mut matched: Vec<&Product> = products.iter().filter(|p| self.matches(p)).collect();
        matched.sort_by(|a, b| self.sort.compare(a, b));
        matched
    }
}
