//! Order summary shown beside the cart.

use rust_decimal::Decimal;

use crate::types::Price;

/// Subtotals strictly above this ship free.
pub const FREE_SHIPPING_THRESHOLD: Price = Price::new(Decimal::from_parts(5000, 0, 0, false, 2));

/// Flat shipping fee below the threshold.
pub const SHIPPING_FEE: Price = Price::new(Decimal::from_parts(999, 0, 0, false, 2));

/// Sales tax rate applied to the subtotal (8%).
pub const TAX_RATE: Decimal = Decimal::from_parts(8, 0, 0, false, 2);

/// Subtotal, shipping, tax and grand total for a cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderSummary {
    pub subtotal: Price,
    pub shipping: Price,
    pub tax: Price,
    pub total: Price,
}

impl OrderSummary {
    /// Derive the summary from a cart subtotal.
    ///
    /// ```rust
    /// # use shopnext_core::{OrderSummary, Price};
    /// let summary = OrderSummary::from_subtotal(Price::from_cents(10_000));
    /// assert!(summary.is_free_shipping());
    /// assert_eq!(summary.total, Price::from_cents(10_800));
    /// ```
    #[must_use]
    pub fn from_subtotal(subtotal: Price) -> Self {
        let shipping = if subtotal > FREE_SHIPPING_THRESHOLD {
            Price::ZERO
        } else {
            SHIPPING_FEE
        };
        let tax = Price::new(subtotal.amount().saturating_mul(TAX_RATE));

        Self {
            subtotal,
            shipping,
            tax,
            total: subtotal + shipping + tax,
        }
    }

    /// Returns `true` if the order qualifies for free shipping.
    #[must_use]
    pub fn is_free_shipping(&self) -> bool {
        self.shipping.is_zero()
    }
}
