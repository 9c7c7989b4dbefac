//! Recent-activity feed.
//!
//! Merges the active product set and the removed-items history into one
//! chronological feed: products surface as "Added/Updated" keyed by their
//! write timestamp, removed items surface under their stored action type
//! keyed by their removal timestamp.

use shelftrack_auth::Attribution;
use shelftrack_core::RecordInstant;

use crate::position::PositionLabel;
use crate::product::{Product, RemovedItem};

/// Default feed size exposed to the UI layer.
pub const DEFAULT_FEED_LIMIT: usize = 20;

/// Label used for activities derived from active products.
pub const ADDED_UPDATED_LABEL: &str = "Added/Updated";

/// One row of the recent-activities table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Activity {
    pub sku: String,
    pub name: String,
    pub position: PositionLabel,
    pub quantity: i64,
    pub action: String,
    pub acted_by: Attribution,
    pub at: RecordInstant,
}

impl From<&Product> for Activity {
    fn from(product: &Product) -> Self {
        Self {
            sku: product.sku.clone(),
            name: product.name.clone(),
            position: product.position.clone(),
            quantity: product.quantity,
            action: ADDED_UPDATED_LABEL.to_string(),
            acted_by: product.modified_by.clone(),
            at: product.timestamp,
        }
    }
}

impl From<&RemovedItem> for Activity {
    fn from(item: &RemovedItem) -> Self {
        Self {
            sku: item.sku.clone(),
            name: item.name.clone(),
            position: item.position.clone(),
            quantity: item.quantity,
            action: item.action_type.label().to_string(),
            acted_by: item.removed_by.clone(),
            at: item.removed_timestamp,
        }
    }
}

/// Merge both record streams into the `limit` most recent activities,
/// descending by instant. Unknown instants sort as the earliest possible
/// instant; ties keep input order (products before removed items).
pub fn build_activity_feed(
    products: &[Product],
    removed: &[RemovedItem],
    limit: usize,
) -> Vec<Activity> {
    let mut feed: Vec<Activity> = products
        .iter()
        .map(Activity::from)
        .chain(removed.iter().map(Activity::from))
        .collect();

    // Stable sort: equal instants preserve input order.
    feed.sort_by(|a, b| b.at.cmp(&a.at));
    feed.truncate(limit);
    feed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product::{ActionType, ProductDraft};
    use chrono::{TimeZone, Utc};

    fn at(secs: i64) -> chrono::DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    fn product(sku: &str, secs: i64) -> Product {
        Product::from_draft(
            ProductDraft {
                sku: sku.to_string(),
                name: format!("{sku} name"),
                lot: "L-1".to_string(),
                date: "2026-08-01".to_string(),
                quantity: 1,
                position: PositionLabel::new(format!("POS {sku}")),
            },
            Attribution::unknown(),
            at(secs),
        )
    }

    fn removed(sku: &str, secs: i64, action: ActionType) -> RemovedItem {
        RemovedItem::from_product(product(sku, secs), Attribution::unknown(), at(secs), action)
    }

    #[test]
    fn feed_merges_descending_by_instant() {
        let products = vec![product("A", 5), product("B", 10)];
        let removed = vec![removed("C", 7, ActionType::TakenFromPosition)];

        let feed = build_activity_feed(&products, &removed, 10);

        let skus: Vec<_> = feed.iter().map(|a| a.sku.as_str()).collect();
        assert_eq!(skus, vec!["B", "C", "A"]);
        assert_eq!(feed[0].action, ADDED_UPDATED_LABEL);
        assert_eq!(feed[1].action, ActionType::TakenFromPosition.label());
        assert_eq!(feed[2].action, ADDED_UPDATED_LABEL);
    }

    #[test]
    fn feed_is_capped_at_limit() {
        let products: Vec<_> = (0..30).map(|i| product(&format!("S{i}"), i)).collect();
        let feed = build_activity_feed(&products, &[], DEFAULT_FEED_LIMIT);
        assert_eq!(feed.len(), DEFAULT_FEED_LIMIT);
        // Most recent first.
        assert_eq!(feed[0].sku, "S29");
    }

    #[test]
    fn unknown_instants_sort_last_in_descending_feed() {
        let mut legacy = product("OLD", 0);
        legacy.timestamp = RecordInstant::Unknown;
        let products = vec![legacy, product("NEW", 100)];

        let feed = build_activity_feed(&products, &[], 10);
        assert_eq!(feed.last().unwrap().sku, "OLD");
        assert_eq!(feed.last().unwrap().at, RecordInstant::Unknown);
    }

    #[test]
    fn replaced_items_carry_their_stored_action_label() {
        let removed = vec![removed("R", 3, ActionType::ReplacedByNewProduct)];
        let feed = build_activity_feed(&[], &removed, 10);
        assert_eq!(feed[0].action, "Replaced by new product");
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 256,
                ..ProptestConfig::default()
            })]

            /// Property: for any mix of product and removal instants, the
            /// feed is descending by instant and never exceeds the limit.
            #[test]
            fn feed_is_descending_and_capped(
                product_secs in prop::collection::vec(0i64..100_000, 0..20),
                removed_secs in prop::collection::vec(0i64..100_000, 0..20),
                limit in 0usize..30,
            ) {
                let products: Vec<_> = product_secs
                    .iter()
                    .enumerate()
                    .map(|(i, &s)| product(&format!("P{i}"), s))
                    .collect();
                let removed_items: Vec<_> = removed_secs
                    .iter()
                    .enumerate()
                    .map(|(i, &s)| removed(&format!("R{i}"), s, ActionType::TakenFromPosition))
                    .collect();

                let feed = build_activity_feed(&products, &removed_items, limit);

                prop_assert!(feed.len() <= limit);
                prop_assert!(feed.windows(2).all(|w| w[0].at >= w[1].at));
            }
        }
    }
}
