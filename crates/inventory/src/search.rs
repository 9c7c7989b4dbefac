//! Sku search.
//!
//! Active products match on an exact case-insensitive sku comparison. When
//! nothing is stocked under a sku, the tag catalog (identifiers that are
//! cataloged but never stocked) provides a description-only fallback.

use serde::{Deserialize, Serialize};

use shelftrack_core::RecordKey;

use crate::product::Product;

/// Tag-catalog record: description only, no position or quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub description: String,
}

/// Result of a sku lookup, distinguishing live stock from catalog-only tags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkuMatch {
    /// An active product carries this sku.
    Stocked { key: RecordKey, product: Product },
    /// Nothing stocked, but the tag catalog knows the identifier.
    CatalogTag { sku: String, description: String },
    NotFound,
}

/// Exact case-insensitive sku scan over the active product set.
pub fn find_stocked<'a>(
    products: &'a [(RecordKey, Product)],
    sku: &str,
) -> Option<&'a (RecordKey, Product)> {
    let needle = sku.to_lowercase();
    products
        .iter()
        .find(|(_, p)| p.sku.to_lowercase() == needle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::PositionLabel;
    use crate::product::ProductDraft;
    use chrono::Utc;
    use shelftrack_auth::Attribution;

    fn stocked(sku: &str) -> (RecordKey, Product) {
        (
            RecordKey::generate(),
            Product::from_draft(
                ProductDraft {
                    sku: sku.to_string(),
                    name: "Widget".to_string(),
                    lot: "L-1".to_string(),
                    date: "2026-08-01".to_string(),
                    quantity: 2,
                    position: PositionLabel::new("RUA 1"),
                },
                Attribution::unknown(),
                Utc::now(),
            ),
        )
    }

    #[test]
    fn sku_match_is_case_insensitive() {
        let products = vec![stocked("ABC")];
        assert!(find_stocked(&products, "abc").is_some());
        assert!(find_stocked(&products, "AbC").is_some());
    }

    #[test]
    fn sku_match_is_exact_not_prefix() {
        let products = vec![stocked("ABC")];
        assert!(find_stocked(&products, "AB").is_none());
        assert!(find_stocked(&products, "ABCD").is_none());
    }
}
