//! Well-known store collections.

/// Name of a keyed collection in the record store.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Collection(&'static str);

impl Collection {
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl core::fmt::Display for Collection {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.0)
    }
}

/// Active product records, keyed by generated id.
pub const PRODUCTS: Collection = Collection::new("products");

/// Append-only history of products that left their position, keyed by
/// generated id.
pub const REMOVED_ITEMS: Collection = Collection::new("removed_items");

/// User profiles, keyed by identity-provider uid.
pub const USERS: Collection = Collection::new("users");

/// Catalog of valid position names, keyed by label.
pub const POSITIONS: Collection = Collection::new("positions");

/// Tag catalog: sku → description, independent of live stock.
pub const PRODUCTS_DATA: Collection = Collection::new("products_data");
