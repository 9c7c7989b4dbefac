//! Record store abstraction.
//!
//! The hosted backend is modeled as a keyed collection store with push-based
//! change notification. This crate defines the contract (`RecordStore`), the
//! subscription types, the well-known collection names, and an in-memory
//! implementation for tests/dev.

pub mod change;
pub mod collection;
pub mod in_memory;
mod r#trait;

pub use change::{ChangeEvent, Subscription};
pub use collection::{Collection, POSITIONS, PRODUCTS, PRODUCTS_DATA, REMOVED_ITEMS, USERS};
pub use in_memory::InMemoryRecordStore;
pub use r#trait::{RecordStore, StoreError};
