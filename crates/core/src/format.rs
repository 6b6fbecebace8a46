//! Formatting helpers shared by the cart and the views.

use chrono::{DateTime, Utc};
use rand::Rng;
use rust_decimal::{Decimal, RoundingStrategy};

/// Length of identifiers produced by [`generate_id`].
const GENERATED_ID_LEN: usize = 9;

/// Format an amount as en-US currency, e.g. `$1,299.99`.
///
/// Rounds half away from zero to whole cents.
///
/// ```rust
/// # use rust_decimal::Decimal;
/// # use shopnext_core::format::format_price;
/// assert_eq!(format_price(Decimal::new(129_999, 2)), "$1,299.99");
/// assert_eq!(format_price(Decimal::new(-5, 0)), "-$5.00");
/// ```
#[must_use]
pub fn format_price(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };

    let digits = format!("{:.2}", rounded.abs());
    let (whole, cents) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));

    format!("{sign}${}.{cents}", group_thousands(whole))
}

/// Insert `,` between every group of three digits, counting from the right.
fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Format a timestamp as a long en-US date, e.g. `October 19, 2026`.
#[must_use]
pub fn format_date(date: &DateTime<Utc>) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// Turn free text into a URL handle.
///
/// Lowercases, replaces each space with `-` and drops every character
/// outside `[a-z0-9_-]`.
///
/// ```rust
/// # use shopnext_core::format::slugify;
/// assert_eq!(slugify("Smart Watch Series X"), "smart-watch-series-x");
/// ```
#[must_use]
pub fn slugify(input: &str) -> String {
    input
        .to_lowercase()
        .chars()
        .map(|c| if c == ' ' { '-' } else { c })
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-')
        .collect()
}

/// Generate a short random base-36 identifier (9 characters).
#[must_use]
pub fn generate_id() -> String {
    let mut rng = rand::rng();
    (0..GENERATED_ID_LEN)
        .filter_map(|_| char::from_digit(rng.random_range(0..36), 36))
        .collect()
}
