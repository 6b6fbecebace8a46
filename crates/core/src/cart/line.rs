//! Cart lines.

use serde::{Deserialize, Serialize};

use crate::format::generate_id;
use crate::types::{CartLineId, Price, Product, ProductId};

/// One distinct product held in the cart.
///
/// Display fields are a snapshot of the product taken when the line was
/// created and are never re-synced, so the cart keeps the price the shopper
/// saw when they added the item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    /// Line identifier, stable across reloads.
    pub id: CartLineId,
    pub product_id: ProductId,
    pub name: String,
    /// Unit price at add time.
    pub price: Price,
    pub image_url: String,
    /// Always at least 1 while the line exists.
    pub quantity: u32,
    pub slug: String,
}

impl CartLine {
    /// Snapshot `product` into a fresh line with a newly generated id.
    #[must_use]
    pub fn from_product(product: &Product, quantity: u32) -> Self {
        Self {
            id: CartLineId::new(format!("cart-{}-{}", product.id, generate_id())),
            product_id: product.id.clone(),
            name: product.name.clone(),
            price: product.price,
            image_url: product.image_url.clone(),
            quantity,
            slug: product.slug.clone(),
        }
    }

    /// Unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.price * self.quantity
    }
}
