//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use tracing::instrument;

use crate::filters;
use crate::routes::products::{CategoryView, ProductCardView, category_views};
use crate::state::AppState;

/// Featured products shown on the home page.
const FEATURED_LIMIT: usize = 6;

/// A selling point in the "Why Choose Us" strip.
#[derive(Clone)]
pub struct FeatureView {
    pub icon: &'static str,
    pub title: &'static str,
    pub description: &'static str,
}

const FEATURES: [FeatureView; 4] = [
    FeatureView {
        icon: "truck",
        title: "Free Shipping",
        description: "On all orders over $50",
    },
    FeatureView {
        icon: "shield",
        title: "Secure Payment",
        description: "Safe and encrypted checkout",
    },
    FeatureView {
        icon: "refresh",
        title: "Easy Returns",
        description: "30-day hassle-free returns",
    },
    FeatureView {
        icon: "star",
        title: "Quality Guarantee",
        description: "Premium products guaranteed",
    },
];

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub cart_count: u64,
    pub features: Vec<FeatureView>,
    pub featured_products: Vec<ProductCardView>,
    pub categories: Vec<CategoryView>,
}

/// Display home page.
#[instrument(skip(state))]
pub async fn home(State(state): State<AppState>) -> HomeTemplate {
    let catalog = state.catalog();

    HomeTemplate {
        cart_count: state.cart_count(),
        features: FEATURES.to_vec(),
        featured_products: catalog
            .featured(FEATURED_LIMIT)
            .map(ProductCardView::from)
            .collect(),
        categories: category_views(catalog.categories()),
    }
}
