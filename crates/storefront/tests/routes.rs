//! Router-level tests for the storefront.
//!
//! Each test builds a fresh router around its own cart storage and drives it
//! with `tower::ServiceExt::oneshot`; no server or network is involved.

#![allow(clippy::unwrap_used)]

use std::path::PathBuf;
use std::sync::Arc;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, Response, StatusCode, header};
use shopnext_core::cart::CART_STORAGE_KEY;
use shopnext_core::{CartStorage, MemoryStorage, ProductId};
use shopnext_storefront::build_router;
use shopnext_storefront::catalog::Catalog;
use shopnext_storefront::config::StorefrontConfig;
use shopnext_storefront::middleware::REQUEST_ID_HEADER;
use shopnext_storefront::state::AppState;
use shopnext_storefront::storage::FileStorage;
use tower::ServiceExt;

const HEADPHONES: &str = "prod-001";
const KEYBOARD: &str = "prod-006";

// ============================================================================
// Helpers
// ============================================================================

fn config() -> StorefrontConfig {
    StorefrontConfig {
        static_dir: PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/static")),
        ..StorefrontConfig::default()
    }
}

fn app_with(catalog: Catalog, storage: Arc<dyn CartStorage>) -> (Router, AppState) {
    let state = AppState::new(config(), catalog, storage);
    (build_router(state.clone()), state)
}

fn app() -> (Router, AppState) {
    app_with(Catalog::fixture(), Arc::new(MemoryStorage::new()))
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post(uri: &str, form: &str, htmx: bool) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if htmx {
        builder = builder.header("HX-Request", "true");
    }
    builder.body(Body::from(form.to_string())).unwrap()
}

async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone().oneshot(request).await.unwrap()
}

async fn body_text(response: Response<Body>) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn location(response: &Response<Body>) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .unwrap()
        .to_str()
        .unwrap()
}

// ============================================================================
// Plumbing
// ============================================================================

#[tokio::test]
async fn test_health() {
    let (app, _) = app();
    let response = send(&app, get("/health")).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key(REQUEST_ID_HEADER));
    assert_eq!(response.headers().get("x-frame-options").unwrap(), "DENY");
    assert_eq!(body_text(response).await, "ok");
}

#[tokio::test]
async fn test_static_files_served() {
    let (app, _) = app();
    let response = send(&app, get("/static/css/main.css")).await;

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let (app, _) = app();
    let response = send(&app, get("/nowhere")).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ============================================================================
// Pages
// ============================================================================

#[tokio::test]
async fn test_home_page() {
    let (app, _) = app();
    let response = send(&app, get("/")).await;

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("Featured Products"));
    assert!(html.contains("Wireless Bluetooth Headphones"));
    assert!(html.contains("Gaming Mechanical Keyboard"));
    // Not featured
    assert!(!html.contains("Yoga Mat Premium"));
    assert!(html.contains("/products?category=Sports%20%26%20Fitness"));
    assert!(html.contains("cart-badge is-hidden"));
}

#[tokio::test]
async fn test_products_listing() {
    let (app, _) = app();
    let html = body_text(send(&app, get("/products")).await).await;

    assert!(html.contains("Showing 8 of 8 products"));
    assert!(!html.contains("Clear Filters"));
}

#[tokio::test]
async fn test_products_search() {
    let (app, _) = app();
    let html = body_text(send(&app, get("/products?q=KEYBOARD")).await).await;

    assert!(html.contains("Showing 1 of 8 products"));
    assert!(html.contains("Gaming Mechanical Keyboard"));
    assert!(html.contains("Clear Filters"));
}

#[tokio::test]
async fn test_products_search_matches_tags() {
    let (app, _) = app();
    let html = body_text(send(&app, get("/products?q=qi")).await).await;

    assert!(html.contains("Showing 1 of 8 products"));
    assert!(html.contains("Wireless Phone Charger"));
}

#[tokio::test]
async fn test_products_search_is_not_trimmed() {
    let (app, _) = app();
    let html = body_text(send(&app, get("/products?q=%20%20%20")).await).await;

    assert!(html.contains("Showing 0 of 8 products"));
}

#[tokio::test]
async fn test_products_category_filter() {
    let (app, _) = app();
    let html = body_text(send(&app, get("/products?category=Home%20%26%20Kitchen")).await).await;

    assert!(html.contains("Showing 1 of 8 products"));
    assert!(html.contains("Premium Coffee Maker"));
}

#[tokio::test]
async fn test_products_price_range() {
    let (app, _) = app();
    let html = body_text(send(&app, get("/products?min_price=40&max_price=160")).await).await;

    // Coffee maker 159.99, keyboard 129.99, yoga mat 49.99
    assert!(html.contains("Showing 3 of 8 products"));
}

#[tokio::test]
async fn test_products_sort_price_asc() {
    let (app, _) = app();
    let html = body_text(send(&app, get("/products?sort=price-asc")).await).await;

    let bottle = html.find("Stainless Steel Water Bottle").unwrap();
    let shirt = html.find("Organic Cotton T-Shirt").unwrap();
    let watch = html.find("Smart Watch Series X").unwrap();
    assert!(bottle < shirt);
    assert!(shirt < watch);
}

#[tokio::test]
async fn test_products_invalid_params_fall_back() {
    let (app, _) = app();
    let response = send(&app, get("/products?sort=bogus&min_price=abc&view=tiles")).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("Showing 8 of 8 products"));
}

#[tokio::test]
async fn test_products_empty_state() {
    let (app, _) = app();
    let html = body_text(send(&app, get("/products?q=submarine")).await).await;

    assert!(html.contains("Showing 0 of 8 products"));
    assert!(html.contains("No products found"));
}

#[tokio::test]
async fn test_products_list_view() {
    let (app, _) = app();
    let html = body_text(send(&app, get("/products?view=list")).await).await;

    assert!(html.contains("class=\"product-list\""));
}

#[tokio::test]
async fn test_product_detail() {
    let (app, _) = app();
    let response = send(&app, get("/products/smart-watch-series-x")).await;

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("Smart Watch Series X"));
    assert!(html.contains("$299.99"));
    assert!(html.contains("Water Resistance"));
    assert!(html.contains("smartwatch"));
    assert!(html.contains("15 in stock"));
}

#[tokio::test]
async fn test_product_detail_unknown_slug() {
    let (app, _) = app();
    let response = send(&app, get("/products/flying-car")).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_empty_cart_page() {
    let (app, _) = app();
    let response = send(&app, get("/cart")).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("Your cart is empty"));
}

// ============================================================================
// Cart
// ============================================================================

#[tokio::test]
async fn test_add_to_cart_form_post_redirects() {
    let (app, state) = app();
    let response = send(
        &app,
        post("/cart/add", &format!("product_id={HEADPHONES}&quantity=2"), false),
    )
    .await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/products/wireless-bluetooth-headphones");
    assert_eq!(state.cart_count(), 2);
}

#[tokio::test]
async fn test_add_to_cart_htmx_returns_badge() {
    let (app, state) = app();
    let response = send(&app, post("/cart/add", &format!("product_id={KEYBOARD}"), true)).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers().get("hx-trigger").unwrap(), "cart-updated");
    let html = body_text(response).await;
    assert!(html.contains("id=\"cart-count\""));
    assert!(html.contains(">1</span>"));
    assert_eq!(state.cart_count(), 1);
}

#[tokio::test]
async fn test_add_merges_lines() {
    let (app, state) = app();
    send(&app, post("/cart/add", &format!("product_id={HEADPHONES}"), true)).await;
    send(&app, post("/cart/add", &format!("product_id={HEADPHONES}&quantity=2"), true)).await;

    let cart = state.cart();
    assert_eq!(cart.items().len(), 1);
    assert_eq!(cart.items()[0].quantity, 3);
}

#[tokio::test]
async fn test_add_redirect_to_local_path() {
    let (app, _) = app();
    let response = send(
        &app,
        post(
            "/cart/add",
            &format!("product_id={HEADPHONES}&redirect_to=%2Fproducts%3Fq%3Daudio"),
            false,
        ),
    )
    .await;

    assert_eq!(location(&response), "/products?q=audio");
}

#[tokio::test]
async fn test_add_ignores_offsite_redirect() {
    let (app, _) = app();
    let response = send(
        &app,
        post(
            "/cart/add",
            &format!("product_id={HEADPHONES}&redirect_to=%2F%2Fevil.example"),
            false,
        ),
    )
    .await;

    assert_eq!(location(&response), "/products/wireless-bluetooth-headphones");
}

#[tokio::test]
async fn test_add_with_unprintable_redirect_falls_back() {
    let (app, state) = app();
    let response = send(
        &app,
        post(
            "/cart/add",
            &format!("product_id={HEADPHONES}&redirect_to=%2Fx%0Ay"),
            false,
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/products/wireless-bluetooth-headphones");
    assert_eq!(state.cart_count(), 1);
}

#[tokio::test]
async fn test_add_unknown_product() {
    let (app, state) = app();
    let response = send(&app, post("/cart/add", "product_id=prod-999", true)).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(state.cart_count(), 0);
}

#[tokio::test]
async fn test_add_zero_quantity_rejected() {
    let (app, state) = app();
    let response = send(
        &app,
        post("/cart/add", &format!("product_id={HEADPHONES}&quantity=0"), true),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(state.cart_count(), 0);
}

#[tokio::test]
async fn test_add_out_of_stock_rejected() {
    let fixture = Catalog::fixture();
    let mut products = fixture.products().to_vec();
    products[0].stock = 0;
    let catalog = Catalog::new(products, fixture.categories().to_vec());

    let (app, state) = app_with(catalog, Arc::new(MemoryStorage::new()));
    let response = send(&app, post("/cart/add", &format!("product_id={HEADPHONES}"), true)).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_text(response).await.contains("out of stock"));
    assert_eq!(state.cart_count(), 0);
}

#[tokio::test]
async fn test_cart_page_shows_summary() {
    let (app, _) = app();
    send(&app, post("/cart/add", &format!("product_id={KEYBOARD}"), true)).await;

    let html = body_text(send(&app, get("/cart")).await).await;
    assert!(html.contains("Gaming Mechanical Keyboard"));
    assert!(html.contains("Subtotal (1 item)"));
    assert!(html.contains("$129.99"));
    // Over the free-shipping threshold
    assert!(html.contains("Free"));
    // 129.99 * 0.08 = 10.3992
    assert!(html.contains("$10.40"));
    assert!(html.contains("$140.39"));
    assert!(html.contains("href=\"/checkout\""));
    assert!(!html.contains("cart-badge is-hidden"));
}

#[tokio::test]
async fn test_update_quantity() {
    let (app, state) = app();
    send(&app, post("/cart/add", &format!("product_id={HEADPHONES}"), true)).await;

    let response = send(
        &app,
        post("/cart/update", &format!("product_id={HEADPHONES}&quantity=5"), true),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers().get("hx-trigger").unwrap(), "cart-updated");
    assert!(body_text(response).await.contains("id=\"cart-items\""));
    assert_eq!(state.cart_count(), 5);
}

#[tokio::test]
async fn test_update_to_zero_removes() {
    let (app, state) = app();
    send(&app, post("/cart/add", &format!("product_id={HEADPHONES}"), true)).await;

    let response = send(
        &app,
        post("/cart/update", &format!("product_id={HEADPHONES}&quantity=0"), true),
    )
    .await;

    assert!(body_text(response).await.contains("Your cart is empty"));
    assert!(state.cart().is_empty());
}

#[tokio::test]
async fn test_update_negative_removes() {
    let (app, state) = app();
    send(&app, post("/cart/add", &format!("product_id={HEADPHONES}"), true)).await;
    send(
        &app,
        post("/cart/update", &format!("product_id={HEADPHONES}&quantity=-3"), true),
    )
    .await;

    assert!(state.cart().is_empty());
}

#[tokio::test]
async fn test_update_form_post_redirects_to_cart() {
    let (app, _) = app();
    let response = send(
        &app,
        post("/cart/update", &format!("product_id={HEADPHONES}&quantity=2"), false),
    )
    .await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/cart");
}

#[tokio::test]
async fn test_remove_keeps_other_lines() {
    let (app, state) = app();
    send(&app, post("/cart/add", &format!("product_id={HEADPHONES}"), true)).await;
    send(&app, post("/cart/add", &format!("product_id={KEYBOARD}"), true)).await;

    send(&app, post("/cart/remove", &format!("product_id={HEADPHONES}"), true)).await;

    let cart = state.cart();
    assert_eq!(cart.items().len(), 1);
    assert_eq!(cart.items()[0].product_id, ProductId::new(KEYBOARD));
}

#[tokio::test]
async fn test_remove_missing_is_noop() {
    let (app, state) = app();
    let response = send(&app, post("/cart/remove", "product_id=prod-999", true)).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(state.cart().is_empty());
}

#[tokio::test]
async fn test_clear_cart() {
    let (app, state) = app();
    send(&app, post("/cart/add", &format!("product_id={HEADPHONES}"), true)).await;
    send(&app, post("/cart/add", &format!("product_id={KEYBOARD}"), true)).await;

    let response = send(&app, post("/cart/clear", "", false)).await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert!(state.cart().is_empty());
}

#[tokio::test]
async fn test_cart_count_fragment() {
    let (app, _) = app();
    send(&app, post("/cart/add", &format!("product_id={HEADPHONES}&quantity=4"), true)).await;

    let html = body_text(send(&app, get("/cart/count")).await).await;
    assert!(html.contains(">4</span>"));
    assert!(!html.contains("is-hidden"));
}

// ============================================================================
// Persistence
// ============================================================================

#[tokio::test]
async fn test_cart_survives_restart() {
    let dir = tempfile::tempdir().unwrap();

    {
        let (app, _) = app_with(Catalog::fixture(), Arc::new(FileStorage::new(dir.path())));
        send(&app, post("/cart/add", &format!("product_id={KEYBOARD}"), true)).await;
        send(&app, post("/cart/add", &format!("product_id={HEADPHONES}&quantity=2"), true)).await;
    }

    let (_, state) = app_with(Catalog::fixture(), Arc::new(FileStorage::new(dir.path())));
    let cart = state.cart();
    let order: Vec<_> = cart.items().iter().map(|l| l.product_id.as_str()).collect();
    assert_eq!(order, [KEYBOARD, HEADPHONES]);
    assert_eq!(cart.get_item_count(), 3);
}

#[tokio::test]
async fn test_persisted_record_shape() {
    let storage = Arc::new(MemoryStorage::new());
    let (app, _) = app_with(Catalog::fixture(), storage.clone());
    send(&app, post("/cart/add", &format!("product_id={HEADPHONES}"), true)).await;

    let raw = storage.load(CART_STORAGE_KEY).unwrap().unwrap();
    let record: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(record["version"], 1);

    let line = &record["state"]["items"][0];
    assert_eq!(line["productId"], HEADPHONES);
    assert_eq!(line["name"], "Wireless Bluetooth Headphones");
    assert_eq!(line["quantity"], 1);
    assert_eq!(line["slug"], "wireless-bluetooth-headphones");
    assert!(line["id"].as_str().unwrap().starts_with("cart-prod-001-"));
}

#[tokio::test]
async fn test_corrupt_record_starts_empty() {
    let storage = Arc::new(MemoryStorage::with_record(CART_STORAGE_KEY, "{not json"));
    let (app, state) = app_with(Catalog::fixture(), storage);

    assert!(state.cart().is_empty());
    let response = send(&app, get("/cart")).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_cart_page_renders_record_with_extreme_prices() {
    let raw = r#"{"state":{"items":[
        {"id":"a","productId":"p1","name":"Huge","price":"79228162514264337593543950335","imageUrl":"","quantity":2,"slug":"huge"},
        {"id":"b","productId":"p2","name":"Refund","price":"-10.00","imageUrl":"","quantity":1,"slug":"refund"}
    ]},"version":1}"#;
    let storage = Arc::new(MemoryStorage::with_record(CART_STORAGE_KEY, raw));
    let (app, state) = app_with(Catalog::fixture(), storage);

    assert_eq!(state.cart_count(), 2);
    let response = send(&app, get("/cart")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_text(response).await;
    assert!(body.contains("Huge"));
    assert!(!body.contains("Refund"));
}
