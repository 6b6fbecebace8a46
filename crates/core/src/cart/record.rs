//! On-disk shape of the persisted cart.
//!
//! ```json
//! {"state":{"items":[{"id":"cart-p1-k3j9x0a2b","productId":"p1", ...}]},"version":1}
//! ```
//!
//! Records without a `version` are treated as version 0, which has the same
//! layout as version 1.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use super::line::CartLine;
use super::storage::StorageError;

/// Key the cart record is stored under.
pub const CART_STORAGE_KEY: &str = "cart-storage";

/// Newest schema version this build writes and reads.
pub const CART_SCHEMA_VERSION: u32 = 1;

#[derive(Serialize, Deserialize)]
struct PersistedCart<'a> {
    state: CartState<'a>,
    #[serde(default)]
    version: u32,
}

#[derive(Serialize, Deserialize)]
struct CartState<'a> {
    #[serde(default)]
    items: Cow<'a, [CartLine]>,
}

/// Serialize `lines` into a versioned record.
///
/// # Errors
///
/// Returns [`StorageError::Serialization`] if encoding fails.
pub fn encode(lines: &[CartLine]) -> Result<String, StorageError> {
    let record = PersistedCart {
        state: CartState {
            items: Cow::Borrowed(lines),
        },
        version: CART_SCHEMA_VERSION,
    };
    Ok(serde_json::to_string(&record)?)
}

/// Parse a record produced by [`encode`] (or by an older schema).
///
/// # Errors
///
/// Returns [`StorageError::Serialization`] for malformed input and
/// [`StorageError::UnsupportedVersion`] for records from a newer schema.
pub fn decode(raw: &str) -> Result<Vec<CartLine>, StorageError> {
    let record: PersistedCart<'static> = serde_json::from_str(raw)?;
    migrate(record.version, record.state.items.into_owned())
}

fn migrate(version: u32, items: Vec<CartLine>) -> Result<Vec<CartLine>, StorageError> {
    match version {
        // Version 0 predates the version tag; the line layout is unchanged.
        0 | CART_SCHEMA_VERSION => Ok(items),
        found => Err(StorageError::UnsupportedVersion {
            found,
            supported: CART_SCHEMA_VERSION,
        }),
    }
}
