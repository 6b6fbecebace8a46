//! Cart route handlers.
//!
//! Cart operations use HTMX for dynamic updates without full page reloads.
//! Requests without the `HX-Request` header are plain form posts and get a
//! `303 See Other` back to a page instead of a fragment.
//!
//! There is one cart per process, held in [`AppState`].

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    http::{HeaderMap, HeaderValue},
    response::{AppendHeaders, IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use shopnext_core::pricing::FREE_SHIPPING_THRESHOLD;
use shopnext_core::{CartLine, CartStorage, CartStore, OrderSummary, ProductId};
use tracing::instrument;

use crate::error::{AppError, Result, add_breadcrumb};
use crate::filters;
use crate::routes::{CART_UPDATED_EVENT, is_htmx};
use crate::state::AppState;

// =============================================================================
// View Types
// =============================================================================

/// Cart item display data for templates.
#[derive(Clone)]
pub struct CartItemView {
    pub product_id: String,
    pub slug: String,
    pub name: String,
    pub image_url: String,
    pub quantity: u32,
    pub decrement: u32,
    pub increment: u32,
    pub price: String,
    pub line_price: String,
}

impl From<&CartLine> for CartItemView {
    fn from(line: &CartLine) -> Self {
        Self {
            product_id: line.product_id.to_string(),
            slug: line.slug.clone(),
            name: line.name.clone(),
            image_url: line.image_url.clone(),
            quantity: line.quantity,
            // Decrementing from 1 submits 0, which removes the line.
            decrement: line.quantity.saturating_sub(1),
            increment: line.quantity.saturating_add(1),
            price: line.price.to_string(),
            line_price: line.line_total().to_string(),
        }
    }
}

/// Cart display data for templates.
#[derive(Clone)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub item_count: u64,
    pub item_label: String,
    pub subtotal: String,
    pub shipping: String,
    pub free_shipping: bool,
    pub free_shipping_hint: String,
    pub tax: String,
    pub total: String,
}

impl CartView {
    /// Snapshot a cart store for rendering.
    pub fn from_store<S: CartStorage>(store: &CartStore<S>) -> Self {
        let summary = OrderSummary::from_subtotal(store.get_total());
        let item_count = store.get_item_count();

        Self {
            items: store.items().iter().map(CartItemView::from).collect(),
            item_count,
            item_label: if item_count == 1 {
                "1 item".to_string()
            } else {
                format!("{item_count} items")
            },
            subtotal: summary.subtotal.to_string(),
            shipping: if summary.is_free_shipping() {
                "Free".to_string()
            } else {
                summary.shipping.to_string()
            },
            free_shipping: summary.is_free_shipping(),
            free_shipping_hint: format!("Free shipping on orders over {FREE_SHIPPING_THRESHOLD}"),
            tax: summary.tax.to_string(),
            total: summary.total.to_string(),
        }
    }

    /// Returns `true` if there is nothing in the cart.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

// =============================================================================
// Forms
// =============================================================================

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub product_id: String,
    pub quantity: Option<u32>,
    /// Page to return to after a non-HTMX post.
    pub redirect_to: Option<String>,
}

/// Update cart form data.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub product_id: String,
    pub quantity: i64,
}

/// Remove from cart form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub product_id: String,
}

// =============================================================================
// Templates
// =============================================================================

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub cart_count: u64,
    pub cart: CartView,
}

/// Cart items fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_items.html")]
pub struct CartItemsTemplate {
    pub cart: CartView,
}

/// Cart count badge fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub count: u64,
}

// =============================================================================
// Helpers
// =============================================================================

/// Local path safe to redirect to, or `None`.
///
/// Only absolute paths on this host that fit in a `Location` header are
/// accepted; `//host` and `/\host` would leave the site.
fn local_path(target: Option<&str>) -> Option<&str> {
    target.filter(|t| {
        t.starts_with('/')
            && !t.starts_with("//")
            && !t.starts_with("/\\")
            && HeaderValue::from_str(t).is_ok()
    })
}

/// Respond to a cart mutation that re-renders the line list.
fn items_response(state: &AppState, headers: &HeaderMap) -> Response {
    if !is_htmx(headers) {
        return Redirect::to("/cart").into_response();
    }

    let cart = CartView::from_store(&*state.cart());
    (
        AppendHeaders([("HX-Trigger", CART_UPDATED_EVENT)]),
        CartItemsTemplate { cart },
    )
        .into_response()
}

// =============================================================================
// Handlers
// =============================================================================

/// Display cart page.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>) -> CartShowTemplate {
    let cart = CartView::from_store(&*state.cart());

    CartShowTemplate {
        cart_count: cart.item_count,
        cart,
    }
}

/// Add item to cart.
///
/// Unknown products are a 404 and sold-out products a 400. HTMX callers get
/// the updated count badge and a `cart-updated` trigger; form posts are
/// redirected back to `redirect_to` or the product page.
#[instrument(skip(state, headers))]
pub async fn add(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<AddToCartForm>,
) -> Result<Response> {
    let quantity = form.quantity.unwrap_or(1);
    if quantity == 0 {
        return Err(AppError::BadRequest("quantity must be at least 1".to_string()));
    }

    let product_id = ProductId::new(form.product_id);
    let product = state
        .catalog()
        .find_by_id(&product_id)
        .ok_or_else(|| AppError::NotFound(format!("product {product_id}")))?;

    if !product.in_stock() {
        return Err(AppError::BadRequest(format!("{} is out of stock", product.name)));
    }

    let fallback = format!("/products/{}", product.slug);
    let target = local_path(form.redirect_to.as_deref()).unwrap_or(&fallback);

    let count = {
        let mut cart = state.cart();
        cart.add_item(product, quantity);
        cart.get_item_count()
    };

    add_breadcrumb(
        "cart",
        "Added item",
        Some(&[("product_id", product_id.as_str())]),
    );
    tracing::info!(product_id = %product_id, quantity, count, "Added to cart");

    if !is_htmx(&headers) {
        return Ok(Redirect::to(target).into_response());
    }

    Ok((
        AppendHeaders([("HX-Trigger", CART_UPDATED_EVENT)]),
        CartCountTemplate { count },
    )
        .into_response())
}

/// Update cart item quantity.
///
/// A quantity of zero or less removes the line.
#[instrument(skip(state, headers))]
pub async fn update(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<UpdateCartForm>,
) -> Response {
    let product_id = ProductId::new(form.product_id);
    state.cart().update_quantity(&product_id, form.quantity);

    add_breadcrumb(
        "cart",
        "Updated quantity",
        Some(&[("product_id", product_id.as_str())]),
    );

    items_response(&state, &headers)
}

/// Remove item from cart.
#[instrument(skip(state, headers))]
pub async fn remove(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<RemoveFromCartForm>,
) -> Response {
    let product_id = ProductId::new(form.product_id);
    state.cart().remove_item(&product_id);

    add_breadcrumb(
        "cart",
        "Removed item",
        Some(&[("product_id", product_id.as_str())]),
    );

    items_response(&state, &headers)
}

/// Empty the cart.
#[instrument(skip(state, headers))]
pub async fn clear(State(state): State<AppState>, headers: HeaderMap) -> Response {
    state.cart().clear_cart();

    add_breadcrumb("cart", "Cleared cart", None);
    tracing::info!("Cart cleared");

    items_response(&state, &headers)
}

/// Get cart count badge (HTMX).
#[instrument(skip(state))]
pub async fn count(State(state): State<AppState>) -> CartCountTemplate {
    CartCountTemplate {
        count: state.cart_count(),
    }
}
