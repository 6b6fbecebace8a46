//! Product route handlers.

use std::str::FromStr;

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Path, Query, State};
use rust_decimal::Decimal;
use serde::Deserialize;
use shopnext_core::catalog::{DEFAULT_MAX_PRICE, DEFAULT_MIN_PRICE};
use shopnext_core::format::format_date;
use shopnext_core::{Category, Price, Product, ProductFilter, SortOrder};
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::filters;
use crate::state::AppState;

/// Related products shown under a product detail.
const RELATED_LIMIT: usize = 4;

/// Stock at or below this shows a "only N left" hint.
const LOW_STOCK: u32 = 10;

// =============================================================================
// View Types
// =============================================================================

/// Product card display data, shared by the home page and the listing.
#[derive(Clone)]
pub struct ProductCardView {
    pub id: String,
    pub slug: String,
    pub name: String,
    pub description: String,
    pub price: String,
    pub image_url: String,
    pub category: String,
    pub in_stock: bool,
    pub featured: bool,
}

impl From<&Product> for ProductCardView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.to_string(),
            slug: product.slug.clone(),
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price.to_string(),
            image_url: product.image_url.clone(),
            category: product.category.clone(),
            in_stock: product.in_stock(),
            featured: product.featured,
        }
    }
}

/// Name/value row on the detail page.
#[derive(Clone)]
pub struct SpecificationView {
    pub name: String,
    pub value: String,
}

/// Product detail display data.
#[derive(Clone)]
pub struct ProductDetailView {
    pub id: String,
    pub slug: String,
    pub name: String,
    pub description: String,
    pub price: String,
    pub image_url: String,
    pub gallery: Vec<String>,
    pub category: String,
    pub category_href: String,
    pub in_stock: bool,
    pub stock_label: String,
    pub tags: Vec<String>,
    pub specifications: Vec<SpecificationView>,
    pub added_on: String,
}

impl From<&Product> for ProductDetailView {
    fn from(product: &Product) -> Self {
        let stock_label = match product.stock {
            0 => "Out of stock".to_string(),
            n if n <= LOW_STOCK => format!("Only {n} left in stock"),
            n => format!("{n} in stock"),
        };

        Self {
            id: product.id.to_string(),
            slug: product.slug.clone(),
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price.to_string(),
            image_url: product.image_url.clone(),
            // The primary image is shown large; the gallery holds the rest.
            gallery: product.images.iter().skip(1).cloned().collect(),
            category: product.category.clone(),
            category_href: category_href(&product.category),
            in_stock: product.in_stock(),
            stock_label,
            tags: product.tags.clone(),
            specifications: product
                .specifications
                .iter()
                .map(|spec| SpecificationView {
                    name: spec.name.clone(),
                    value: spec.value.clone(),
                })
                .collect(),
            added_on: format_date(&product.created_at),
        }
    }
}

/// Category tile / filter option display data.
#[derive(Clone)]
pub struct CategoryView {
    pub name: String,
    pub description: String,
    pub image_url: Option<String>,
    pub href: String,
    pub selected: bool,
}

impl CategoryView {
    fn new(category: &Category, selected: Option<&str>) -> Self {
        Self {
            name: category.name.clone(),
            description: category.description.clone().unwrap_or_default(),
            image_url: category.image_url.clone(),
            href: category_href(&category.name),
            selected: selected == Some(category.name.as_str()),
        }
    }
}

/// Build category tile views.
pub fn category_views(categories: &[Category]) -> Vec<CategoryView> {
    categories.iter().map(|c| CategoryView::new(c, None)).collect()
}

/// Link to the listing filtered to one category.
fn category_href(name: &str) -> String {
    format!("/products?category={}", urlencoding::encode(name))
}

/// Sort menu entry.
#[derive(Clone)]
pub struct SortOptionView {
    pub value: &'static str,
    pub label: &'static str,
    pub selected: bool,
}

/// Listing layout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ViewMode {
    #[default]
    Grid,
    List,
}

impl ViewMode {
    fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some("list") => Self::List,
            _ => Self::Grid,
        }
    }

    const fn as_str(self) -> &'static str {
        match self {
            Self::Grid => "grid",
            Self::List => "list",
        }
    }
}

// =============================================================================
// Query Parsing
// =============================================================================

/// Listing query parameters.
///
/// Every field is taken as free text; values that do not parse fall back to
/// their defaults instead of rejecting the request.
#[derive(Debug, Default, Deserialize)]
pub struct ProductsQuery {
    pub q: Option<String>,
    pub category: Option<String>,
    pub sort: Option<String>,
    pub min_price: Option<String>,
    pub max_price: Option<String>,
    pub view: Option<String>,
}

impl ProductsQuery {
    /// Build the catalog filter described by this query.
    #[must_use]
    pub fn filter(&self) -> ProductFilter {
        let sort = non_empty(self.sort.as_deref())
            .and_then(|raw| {
                SortOrder::from_str(raw)
                    .inspect_err(|e| tracing::debug!(error = %e, "Ignoring sort parameter"))
                    .ok()
            })
            .unwrap_or_default();

        ProductFilter {
            search: self.q.clone().filter(|q| !q.is_empty()),
            category: non_empty(self.category.as_deref()).map(String::from),
            min_price: parse_price(self.min_price.as_deref())
                .unwrap_or(Price::new(DEFAULT_MIN_PRICE)),
            max_price: parse_price(self.max_price.as_deref())
                .unwrap_or(Price::new(DEFAULT_MAX_PRICE)),
            sort,
        }
    }

    /// Layout requested by `view`.
    #[must_use]
    pub fn view_mode(&self) -> ViewMode {
        ViewMode::parse(self.view.as_deref())
    }
}

/// Trimmed value, or `None` when blank.
fn non_empty(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|s| !s.is_empty())
}

/// Non-negative decimal amount.
fn parse_price(raw: Option<&str>) -> Option<Price> {
    non_empty(raw)
        .and_then(|s| Decimal::from_str(s).ok())
        .filter(|d| !d.is_sign_negative())
        .map(Price::new)
}

/// Query string reproducing `filter` in layout `mode`.
fn listing_href(filter: &ProductFilter, mode: ViewMode) -> String {
    let mut params: Vec<(&str, String)> = Vec::new();
    if let Some(q) = &filter.search {
        params.push(("q", q.clone()));
    }
    if let Some(category) = &filter.category {
        params.push(("category", category.clone()));
    }
    if filter.sort != SortOrder::default() {
        params.push(("sort", filter.sort.as_str().to_string()));
    }
    if filter.min_price.amount() != DEFAULT_MIN_PRICE {
        params.push(("min_price", filter.min_price.amount().to_string()));
    }
    if filter.max_price.amount() != DEFAULT_MAX_PRICE {
        params.push(("max_price", filter.max_price.amount().to_string()));
    }
    if mode != ViewMode::default() {
        params.push(("view", mode.as_str().to_string()));
    }

    let query: Vec<String> = params
        .iter()
        .map(|(key, value)| format!("{key}={}", urlencoding::encode(value)))
        .collect();

    if query.is_empty() {
        "/products".to_string()
    } else {
        format!("/products?{}", query.join("&"))
    }
}

// =============================================================================
// Templates
// =============================================================================

/// Product listing page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/index.html")]
pub struct ProductsIndexTemplate {
    pub cart_count: u64,
    pub products: Vec<ProductCardView>,
    pub showing: String,
    pub search: String,
    pub min_price: String,
    pub max_price: String,
    pub categories: Vec<CategoryView>,
    pub all_categories_selected: bool,
    pub sort_options: Vec<SortOptionView>,
    pub list_view: bool,
    pub grid_href: String,
    pub list_href: String,
    pub filters_active: bool,
}

/// Product detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/show.html")]
pub struct ProductShowTemplate {
    pub cart_count: u64,
    pub product: ProductDetailView,
    pub in_cart: u32,
    pub related_products: Vec<ProductCardView>,
}

// =============================================================================
// Handlers
// =============================================================================

/// Display product listing page.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<ProductsQuery>,
) -> ProductsIndexTemplate {
    let filter = query.filter();
    let mode = query.view_mode();
    let catalog = state.catalog();

    let products: Vec<ProductCardView> = filter
        .apply(catalog.products())
        .into_iter()
        .map(ProductCardView::from)
        .collect();

    let showing = format!(
        "Showing {} of {} products",
        products.len(),
        catalog.products().len()
    );

    let selected_category = filter.category.as_deref();
    let categories = catalog
        .categories()
        .iter()
        .map(|c| CategoryView::new(c, selected_category))
        .collect();

    let sort_options = SortOrder::ALL
        .into_iter()
        .map(|order| SortOptionView {
            value: order.as_str(),
            label: order.label(),
            selected: order == filter.sort,
        })
        .collect();

    ProductsIndexTemplate {
        cart_count: state.cart_count(),
        products,
        showing,
        search: filter.search.clone().unwrap_or_default(),
        min_price: filter.min_price.amount().to_string(),
        max_price: filter.max_price.amount().to_string(),
        categories,
        all_categories_selected: selected_category.is_none(),
        sort_options,
        list_view: mode == ViewMode::List,
        grid_href: listing_href(&filter, ViewMode::Grid),
        list_href: listing_href(&filter, ViewMode::List),
        filters_active: filter.is_active(),
    }
}

/// Display product detail page.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<ProductShowTemplate> {
    let catalog = state.catalog();
    let product = catalog
        .find_by_slug(&slug)
        .ok_or_else(|| AppError::NotFound(format!("product {slug}")))?;

    let related_products = catalog
        .products()
        .iter()
        .filter(|p| p.category == product.category && p.id != product.id)
        .take(RELATED_LIMIT)
        .map(ProductCardView::from)
        .collect();

    let (cart_count, in_cart) = {
        let cart = state.cart();
        (
            cart.get_item_count(),
            cart.line(&product.id).map_or(0, |line| line.quantity),
        )
    };

    Ok(ProductShowTemplate {
        cart_count,
        product: ProductDetailView::from(product),
        in_cart,
        related_products,
    })
}
