//! Product and history records.
//!
//! Invariant: at most one active `Product` references a given position at any
//! time. Products are never mutated in place; any change is modeled as
//! remove-then-add, with departures captured as append-only `RemovedItem`
//! history records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use shelftrack_auth::Attribution;
use shelftrack_core::{DomainError, DomainResult, RecordInstant, RecordKey};

use crate::position::PositionLabel;

/// Why a product left its position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionType {
    #[serde(rename = "Replaced by new product")]
    ReplacedByNewProduct,
    #[serde(rename = "Taken from position")]
    TakenFromPosition,
}

impl ActionType {
    pub fn label(&self) -> &'static str {
        match self {
            ActionType::ReplacedByNewProduct => "Replaced by new product",
            ActionType::TakenFromPosition => "Taken from position",
        }
    }
}

impl core::fmt::Display for ActionType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

/// Candidate product as submitted by the UI, before attribution and
/// timestamping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductDraft {
    pub sku: String,
    pub name: String,
    pub lot: String,
    /// Production/receipt date as entered (free-form).
    pub date: String,
    pub quantity: i64,
    pub position: PositionLabel,
}

impl ProductDraft {
    /// Validate before any storage access.
    pub fn validate(&self) -> DomainResult<()> {
        if self.quantity <= 0 {
            return Err(DomainError::validation("quantity must be greater than zero"));
        }
        if self.sku.trim().is_empty() {
            return Err(DomainError::validation("sku cannot be empty"));
        }
        if self.name.trim().is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }
        if self.position.is_empty() {
            return Err(DomainError::validation("position cannot be empty"));
        }
        Ok(())
    }
}

/// One unit of stock currently occupying a shelf position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub sku: String,
    pub name: String,
    pub lot: String,
    pub date: String,
    pub quantity: i64,
    pub position: PositionLabel,
    pub modified_by: Attribution,
    #[serde(default = "unknown_instant")]
    pub timestamp: RecordInstant,
}

fn unknown_instant() -> RecordInstant {
    RecordInstant::Unknown
}

impl Product {
    /// Materialize a draft into an active record.
    pub fn from_draft(draft: ProductDraft, modified_by: Attribution, at: DateTime<Utc>) -> Self {
        Self {
            sku: draft.sku,
            name: draft.name,
            lot: draft.lot,
            date: draft.date,
            quantity: draft.quantity,
            position: draft.position,
            modified_by,
            timestamp: RecordInstant::known(at),
        }
    }
}

/// Historical record of a product that left its position. Append-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemovedItem {
    pub sku: String,
    pub name: String,
    pub lot: String,
    pub date: String,
    pub quantity: i64,
    pub position: PositionLabel,
    pub modified_by: Attribution,
    #[serde(default = "unknown_instant")]
    pub timestamp: RecordInstant,
    pub removed_by: Attribution,
    #[serde(default = "unknown_instant")]
    pub removed_timestamp: RecordInstant,
    pub action_type: ActionType,
}

impl RemovedItem {
    /// Convert a departing product into its history record.
    pub fn from_product(
        product: Product,
        removed_by: Attribution,
        at: DateTime<Utc>,
        action_type: ActionType,
    ) -> Self {
        Self {
            sku: product.sku,
            name: product.name,
            lot: product.lot,
            date: product.date,
            quantity: product.quantity,
            position: product.position,
            modified_by: product.modified_by,
            timestamp: product.timestamp,
            removed_by,
            removed_timestamp: RecordInstant::known(at),
            action_type,
        }
    }
}

/// Find the active product occupying `position`, if any.
pub fn find_occupant<'a>(
    products: &'a [(RecordKey, Product)],
    position: &PositionLabel,
) -> Option<&'a (RecordKey, Product)> {
    products.iter().find(|(_, p)| &p.position == position)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn actor() -> Attribution {
        Attribution::unknown()
    }

    fn draft(position: &str) -> ProductDraft {
        ProductDraft {
            sku: "SKU-001".to_string(),
            name: "Widget".to_string(),
            lot: "L-9".to_string(),
            date: "2026-08-01".to_string(),
            quantity: 4,
            position: PositionLabel::new(position),
        }
    }

    #[test]
    fn valid_draft_passes_validation() {
        assert!(draft("RUA 1 COLUNA 1 POSICAO A").validate().is_ok());
    }

    #[test]
    fn non_positive_quantity_fails_validation() {
        for quantity in [0, -3] {
            let mut d = draft("RUA 1");
            d.quantity = quantity;
            let err = d.validate().unwrap_err();
            assert!(matches!(err, DomainError::Validation(_)));
        }
    }

    #[test]
    fn blank_required_fields_fail_validation() {
        let mut d = draft("RUA 1");
        d.sku = "  ".to_string();
        assert!(matches!(d.validate(), Err(DomainError::Validation(_))));

        let mut d = draft("RUA 1");
        d.name = String::new();
        assert!(matches!(d.validate(), Err(DomainError::Validation(_))));

        let d = draft(" ");
        assert!(matches!(d.validate(), Err(DomainError::Validation(_))));
    }

    #[test]
    fn removed_item_preserves_product_fields() {
        let product = Product::from_draft(draft("RUA 1"), actor(), Utc::now());
        let removed = RemovedItem::from_product(
            product.clone(),
            actor(),
            Utc::now(),
            ActionType::TakenFromPosition,
        );
        assert_eq!(removed.sku, product.sku);
        assert_eq!(removed.position, product.position);
        assert_eq!(removed.timestamp, product.timestamp);
        assert_eq!(removed.action_type, ActionType::TakenFromPosition);
        assert!(removed.removed_timestamp.is_known());
    }

    #[test]
    fn action_type_serializes_as_display_label() {
        let json = serde_json::to_string(&ActionType::ReplacedByNewProduct).unwrap();
        assert_eq!(json, "\"Replaced by new product\"");
        let back: ActionType = serde_json::from_str("\"Taken from position\"").unwrap();
        assert_eq!(back, ActionType::TakenFromPosition);
    }

    #[test]
    fn find_occupant_matches_position_by_value() {
        let products = vec![
            (
                RecordKey::generate(),
                Product::from_draft(draft("RUA 1"), actor(), Utc::now()),
            ),
            (
                RecordKey::generate(),
                Product::from_draft(draft("RUA 2"), actor(), Utc::now()),
            ),
        ];

        let hit = find_occupant(&products, &PositionLabel::new("RUA 2"));
        assert_eq!(hit.map(|(k, _)| k), Some(&products[1].0));
        assert!(find_occupant(&products, &PositionLabel::new("RUA 3")).is_none());
    }

    #[test]
    fn missing_timestamp_deserializes_as_unknown() {
        let json = r#"{
            "sku": "SKU-001",
            "name": "Widget",
            "lot": "L-9",
            "date": "2026-08-01",
            "quantity": 4,
            "position": "RUA 1",
            "modified_by": "Unknown"
        }"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.timestamp, RecordInstant::Unknown);
    }
}
