//! Inventory domain module.
//!
//! This crate contains business rules for shelf-position inventory,
//! implemented purely as deterministic domain logic (no IO, no storage).

pub mod feed;
pub mod position;
pub mod product;
pub mod search;

pub use feed::{ADDED_UPDATED_LABEL, Activity, DEFAULT_FEED_LIMIT, build_activity_feed};
pub use position::PositionLabel;
pub use product::{ActionType, Product, ProductDraft, RemovedItem, find_occupant};
pub use search::{CatalogEntry, SkuMatch, find_stocked};
