//! The persisted cart state container.

use tracing::instrument;

use super::line::CartLine;
use super::record::{self, CART_STORAGE_KEY};
use super::storage::CartStorage;
use crate::types::{Price, Product, ProductId};

/// Authoritative, persisted shopping cart.
///
/// Holds at most one [`CartLine`] per product, in the order products were
/// first added. Every mutation goes through [`CartStore::commit`], which
/// swaps in the new line list and writes the whole cart to storage, so no
/// operation can forget to persist.
///
/// Storage failures never surface to callers: a record that cannot be read
/// at startup yields an empty cart, and a failed write is logged while the
/// in-memory cart stays authoritative.
#[derive(Debug)]
pub struct CartStore<S> {
    lines: Vec<CartLine>,
    storage: S,
}

impl<S: CartStorage> CartStore<S> {
    /// Rehydrate the cart from `storage`.
    ///
    /// Starts empty when nothing was saved or the saved record is unusable.
    pub fn load(storage: S) -> Self {
        let lines = match storage.load(CART_STORAGE_KEY) {
            Ok(Some(raw)) => match record::decode(&raw) {
                Ok(lines) => normalize(lines),
                Err(e) => {
                    tracing::warn!(error = %e, "Discarding unreadable cart record");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load cart record, starting empty");
                Vec::new()
            }
        };

        tracing::debug!(lines = lines.len(), "Cart loaded");
        Self { lines, storage }
    }

    /// Current lines in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartLine] {
        &self.lines
    }

    /// Returns `true` if the cart holds no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Look up the line holding `product_id`.
    #[must_use]
    pub fn line(&self, product_id: &ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|line| &line.product_id == product_id)
    }

    /// Add `quantity` units of `product`.
    ///
    /// Merges into the existing line for the product (saturating) or appends
    /// a new line snapshotting the product's display fields. A quantity of
    /// zero changes nothing.
    #[instrument(level = "debug", skip(self, product), fields(product_id = %product.id))]
    pub fn add_item(&mut self, product: &Product, quantity: u32) {
        if quantity == 0 {
            tracing::debug!("Ignoring add of zero units");
            return;
        }

        let mut next = self.lines.clone();
        match next.iter_mut().find(|line| line.product_id == product.id) {
            Some(line) => line.quantity = line.quantity.saturating_add(quantity),
            None => next.push(CartLine::from_product(product, quantity)),
        }
        self.commit(next);
    }

    /// Remove the line for `product_id`, if any.
    #[instrument(level = "debug", skip(self))]
    pub fn remove_item(&mut self, product_id: &ProductId) {
        let next = self
            .lines
            .iter()
            .filter(|line| &line.product_id != product_id)
            .cloned()
            .collect();
        self.commit(next);
    }

    /// Set the quantity for `product_id` to exactly `quantity`.
    ///
    /// A quantity of zero or less removes the line. Does nothing for a
    /// product that is not in the cart.
    #[instrument(level = "debug", skip(self))]
    pub fn update_quantity(&mut self, product_id: &ProductId, quantity: i64) {
        if quantity <= 0 {
            self.remove_item(product_id);
            return;
        }

        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        let next = self
            .lines
            .iter()
            .map(|line| {
                if &line.product_id == product_id {
                    CartLine {
                        quantity,
                        ..line.clone()
                    }
                } else {
                    line.clone()
                }
            })
            .collect();
        self.commit(next);
    }

    /// Empty the cart.
    #[instrument(level = "debug", skip(self))]
    pub fn clear_cart(&mut self) {
        self.commit(Vec::new());
    }

    /// Sum of unit price times quantity over all lines.
    #[must_use]
    pub fn get_total(&self) -> Price {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Total number of units (not lines) in the cart.
    #[must_use]
    pub fn get_item_count(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }

    /// Replace the lines and persist the result.
    fn commit(&mut self, next: Vec<CartLine>) {
        self.lines = next;

        let result =
            record::encode(&self.lines).and_then(|raw| self.storage.save(CART_STORAGE_KEY, &raw));
        if let Err(e) = result {
            tracing::warn!(error = %e, "Failed to persist cart");
        }
    }
}

/// Restore the one-line-per-product invariant on a loaded record.
///
/// Drops empty and negatively priced lines and folds duplicates into the
/// first occurrence.
fn normalize(lines: Vec<CartLine>) -> Vec<CartLine> {
    let mut out: Vec<CartLine> = Vec::with_capacity(lines.len());
    for line in lines {
        if line.quantity == 0 {
            continue;
        }
        if line.price.is_negative() {
            tracing::warn!(product_id = %line.product_id, "Dropping cart line with negative price");
            continue;
        }
        match out.iter_mut().find(|l| l.product_id == line.product_id) {
            Some(existing) => existing.quantity = existing.quantity.saturating_add(line.quantity),
            None => out.push(line),
        }
    }
    out
}
