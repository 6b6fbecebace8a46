//! Application state shared across handlers.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use shopnext_core::{CartStorage, CartStore};

use crate::catalog::Catalog;
use crate::config::StorefrontConfig;

/// The cart store as held by the application.
pub type SharedCart = CartStore<Arc<dyn CartStorage>>;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// the catalog, the cart store and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: Catalog,
    cart: Mutex<SharedCart>,
}

impl AppState {
    /// Create a new application state.
    ///
    /// Restores the cart from `storage`; an unreadable record yields an
    /// empty cart.
    ///
    /// # Arguments
    ///
    /// * `config` - Storefront configuration
    /// * `catalog` - Products and categories to serve
    /// * `storage` - Backend the cart persists to
    #[must_use]
    pub fn new(config: StorefrontConfig, catalog: Catalog, storage: Arc<dyn CartStorage>) -> Self {
        let cart = CartStore::load(storage);
        tracing::info!(
            lines = cart.items().len(),
            units = cart.get_item_count(),
            "Cart restored"
        );

        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                cart: Mutex::new(cart),
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the product catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    /// Lock the cart store.
    ///
    /// Store operations never suspend, so the guard must not be held across
    /// an `.await`. A poisoned lock is recovered: every store mutation
    /// replaces its state in one step, so the inner value is always whole.
    pub fn cart(&self) -> MutexGuard<'_, SharedCart> {
        self.inner.cart.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Current number of units in the cart.
    #[must_use]
    pub fn cart_count(&self) -> u64 {
        self.cart().get_item_count()
    }
}
