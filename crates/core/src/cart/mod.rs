//! Shopping cart state.
//!
//! - [`CartStore`] - the cart itself, with its mutation and query operations
//! - [`CartStorage`] - where the cart is persisted between runs
//! - [`record`] - the versioned on-disk format

mod line;
pub mod record;
mod storage;
mod store;

pub use line::CartLine;
pub use record::{CART_SCHEMA_VERSION, CART_STORAGE_KEY};
pub use storage::{CartStorage, MemoryStorage, StorageError};
pub use store::CartStore;
