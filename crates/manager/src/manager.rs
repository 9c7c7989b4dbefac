//! Position-assignment and history-migration workflows.
//!
//! ## Occupancy
//!
//! The occupancy invariant is enforced by read-then-conditionally-write with
//! **no mutual exclusion across sessions**: two users acting on the same
//! position inside the same check-then-act window can both observe the slot
//! as free. The store contract offers no transactions, so this is a known
//! gap, not an oversight.
//!
//! ## Multi-step sequences
//!
//! Replace and take both write history **before** deleting the outgoing
//! product, so a crash between steps never loses the departing record
//! (worst case: a duplicate-looking history entry, never a silent loss).
//! There is no compensating rollback; a failure after the first commit
//! surfaces as [`ManagerError::PartialSequence`].

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;

use shelftrack_auth::Attribution;
use shelftrack_core::RecordKey;
use shelftrack_inventory::{
    ActionType, Activity, CatalogEntry, PositionLabel, Product, ProductDraft, RemovedItem,
    SkuMatch, build_activity_feed, find_occupant, find_stocked,
};
use shelftrack_store::{Collection, POSITIONS, PRODUCTS, PRODUCTS_DATA, REMOVED_ITEMS, RecordStore};

use crate::confirm::{ConfirmationPrompt, Decision};
use crate::error::{ManagerError, SequenceStep};

/// Outcome of [`PositionManager::attempt_add_product`].
#[derive(Debug)]
pub enum AddOutcome {
    /// Position was free; the candidate was persisted immediately.
    Added { key: RecordKey },
    /// Position is occupied; nothing was written. Persisting is suspended
    /// until the caller confirms or cancels the pending replace.
    ConflictPending(PendingReplace),
}

/// Final outcome of [`PositionManager::add_with_confirmation`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddReport {
    Added { key: RecordKey },
    Replaced { key: RecordKey },
    Cancelled,
}

/// Deferred replace action: everything needed to complete the occupancy
/// swap once the user confirms. Dropping it (or cancelling) leaves state
/// untouched.
#[derive(Debug, Clone)]
pub struct PendingReplace {
    candidate: ProductDraft,
    actor: Attribution,
    occupant_key: RecordKey,
    occupant: Product,
}

impl PendingReplace {
    /// Human-readable description of the conflict, for the confirmation
    /// modal.
    pub fn describe(&self) -> String {
        format!(
            "Position \"{}\" is already occupied by \"{}\" (SKU: {}). \
             The current product will be moved to history and the new product \
             will take its place.",
            self.candidate.position, self.occupant.name, self.occupant.sku
        )
    }

    pub fn occupant(&self) -> &Product {
        &self.occupant
    }

    pub fn candidate(&self) -> &ProductDraft {
        &self.candidate
    }
}

/// Inventory Position Manager.
///
/// Exposes the write workflows (add/replace/take/remove) and the reads
/// backing the UI tables. Durability is the store's concern; the manager
/// owns only the decision of which records to write and delete.
#[derive(Debug)]
pub struct PositionManager<S> {
    store: S,
}

impl<S> PositionManager<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn into_inner(self) -> S {
        self.store
    }
}

impl<S> PositionManager<S>
where
    S: RecordStore,
{
    /// Attempt to add a candidate product at its target position.
    ///
    /// Validates before any storage access. A free position persists the
    /// candidate immediately; an occupied one returns a deferred
    /// [`PendingReplace`] and writes nothing.
    pub fn attempt_add_product(
        &self,
        candidate: ProductDraft,
        actor: Attribution,
        at: DateTime<Utc>,
    ) -> Result<AddOutcome, ManagerError> {
        candidate.validate()?;

        let products = self.list_products()?;
        if let Some((occupant_key, occupant)) = find_occupant(&products, &candidate.position) {
            tracing::info!(
                position = %candidate.position,
                occupant_sku = %occupant.sku,
                "position occupied, awaiting confirmation"
            );
            return Ok(AddOutcome::ConflictPending(PendingReplace {
                candidate,
                actor,
                occupant_key: occupant_key.clone(),
                occupant: occupant.clone(),
            }));
        }

        let key = RecordKey::generate();
        let product = Product::from_draft(candidate, actor, at);
        let value = encode(&product)?;
        self.write(PRODUCTS, &key, value)?;
        tracing::info!(%key, position = %product.position, "product added");
        Ok(AddOutcome::Added { key })
    }

    /// Execute the replace sequence after explicit user confirmation.
    ///
    /// Ordered steps, each independently fallible:
    /// 1. append the occupant to history ("Replaced by new product")
    /// 2. delete the occupant product
    /// 3. write the candidate product
    pub fn confirm_replace(
        &self,
        pending: PendingReplace,
        at: DateTime<Utc>,
    ) -> Result<RecordKey, ManagerError> {
        let PendingReplace {
            candidate,
            actor,
            occupant_key,
            occupant,
        } = pending;

        // Encode everything up front so a codec failure can never leave the
        // sequence half-committed.
        let removed = RemovedItem::from_product(
            occupant,
            actor.clone(),
            at,
            ActionType::ReplacedByNewProduct,
        );
        let removed_value = encode(&removed)?;
        let product = Product::from_draft(candidate, actor, at);
        let product_value = encode(&product)?;

        let removed_key = RecordKey::generate();
        self.write(REMOVED_ITEMS, &removed_key, removed_value)?;

        self.store
            .delete(PRODUCTS, &occupant_key)
            .map_err(|source| {
                partial("replace", &[SequenceStep::HistoryAppend], SequenceStep::OccupantDelete, source)
            })?;

        let key = RecordKey::generate();
        self.store.put(PRODUCTS, &key, product_value).map_err(|source| {
            partial(
                "replace",
                &[SequenceStep::HistoryAppend, SequenceStep::OccupantDelete],
                SequenceStep::CandidateWrite,
                source,
            )
        })?;

        tracing::info!(
            %key,
            replaced = %removed_key,
            position = %product.position,
            "occupant replaced"
        );
        Ok(key)
    }

    /// Discard a pending replace. No state change.
    pub fn cancel_replace(&self, pending: PendingReplace) {
        tracing::info!(
            position = %pending.candidate.position,
            occupant_sku = %pending.occupant.sku,
            "replace cancelled"
        );
    }

    /// Drive an add through the confirmation collaborator: confirm runs the
    /// replace sequence, cancel discards the pending action.
    pub fn add_with_confirmation<P>(
        &self,
        candidate: ProductDraft,
        actor: Attribution,
        at: DateTime<Utc>,
        prompt: &P,
    ) -> Result<AddReport, ManagerError>
    where
        P: ConfirmationPrompt + ?Sized,
    {
        match self.attempt_add_product(candidate, actor, at)? {
            AddOutcome::Added { key } => Ok(AddReport::Added { key }),
            AddOutcome::ConflictPending(pending) => match prompt.request(&pending.describe()) {
                Decision::Confirmed => {
                    let key = self.confirm_replace(pending, at)?;
                    Ok(AddReport::Replaced { key })
                }
                Decision::Cancelled => {
                    self.cancel_replace(pending);
                    Ok(AddReport::Cancelled)
                }
            },
        }
    }

    /// Take a product from its position: append it to history
    /// ("Taken from position"), then delete it. Frees the position for
    /// subsequent adds.
    pub fn take_from_position(
        &self,
        key: &RecordKey,
        actor: Attribution,
        at: DateTime<Utc>,
    ) -> Result<(), ManagerError> {
        let product: Product = self.fetch(PRODUCTS, key)?;

        let removed = RemovedItem::from_product(product, actor, at, ActionType::TakenFromPosition);
        let removed_value = encode(&removed)?;
        let removed_key = RecordKey::generate();

        self.write(REMOVED_ITEMS, &removed_key, removed_value)?;

        self.store.delete(PRODUCTS, key).map_err(|source| {
            partial("take", &[SequenceStep::HistoryAppend], SequenceStep::ProductDelete, source)
        })?;

        tracing::info!(%key, history = %removed_key, "product taken from position");
        Ok(())
    }

    /// Delete a product without writing any history record.
    ///
    /// This is inventory shrinkage, not relocation: distinct from
    /// [`Self::take_from_position`], which records the departure. Do not mix
    /// the two up.
    pub fn remove_permanently(&self, key: &RecordKey) -> Result<(), ManagerError> {
        // Existence check so a concurrent deletion surfaces as NotFound
        // rather than a silent success.
        let _: Product = self.fetch(PRODUCTS, key)?;

        self.store.delete(PRODUCTS, key).inspect_err(|err| {
            tracing::warn!(%key, error = %err, "permanent removal failed");
        })?;
        tracing::info!(%key, "product removed permanently");
        Ok(())
    }

    /// Exact case-insensitive sku lookup over active products, falling back
    /// to the tag catalog for identifiers that are cataloged but never
    /// stocked.
    pub fn find_by_sku(&self, sku: &str) -> Result<SkuMatch, ManagerError> {
        let sku = sku.trim();
        if sku.is_empty() {
            return Err(ManagerError::Validation("sku cannot be empty".to_string()));
        }

        let products = self.list_products()?;
        if let Some((key, product)) = find_stocked(&products, sku) {
            return Ok(SkuMatch::Stocked {
                key: key.clone(),
                product: product.clone(),
            });
        }

        match self.read(PRODUCTS_DATA, &RecordKey::new(sku))? {
            Some(value) => {
                let entry: CatalogEntry = decode(value)?;
                Ok(SkuMatch::CatalogTag {
                    sku: sku.to_string(),
                    description: entry.description,
                })
            }
            None => Ok(SkuMatch::NotFound),
        }
    }

    /// Tag-catalog description for a sku, if cataloged. Backs the sku-input
    /// autofill.
    pub fn catalog_description(&self, sku: &str) -> Result<Option<String>, ManagerError> {
        match self.read(PRODUCTS_DATA, &RecordKey::new(sku.trim()))? {
            Some(value) => {
                let entry: CatalogEntry = decode(value)?;
                Ok(Some(entry.description))
            }
            None => Ok(None),
        }
    }

    /// The `limit` most recent activities across both record streams.
    pub fn activity_feed(&self, limit: usize) -> Result<Vec<Activity>, ManagerError> {
        let products: Vec<Product> = self
            .list_products()?
            .into_iter()
            .map(|(_, p)| p)
            .collect();
        let removed: Vec<RemovedItem> = self
            .list_removed()?
            .into_iter()
            .map(|(_, r)| r)
            .collect();
        Ok(build_activity_feed(&products, &removed, limit))
    }

    /// Snapshot of active products.
    pub fn list_products(&self) -> Result<Vec<(RecordKey, Product)>, ManagerError> {
        self.list_decoded(PRODUCTS)
    }

    /// Snapshot of the removed-items history.
    pub fn list_removed(&self) -> Result<Vec<(RecordKey, RemovedItem)>, ManagerError> {
        self.list_decoded(REMOVED_ITEMS)
    }

    /// Position catalog in natural order, for selector population.
    pub fn list_positions(&self) -> Result<Vec<PositionLabel>, ManagerError> {
        let records = self.store.list(POSITIONS).inspect_err(|err| {
            tracing::warn!(collection = %POSITIONS, error = %err, "list failed");
        })?;
        let mut labels: Vec<PositionLabel> = records
            .into_iter()
            .map(|(key, _)| PositionLabel::new(key.as_str()))
            .collect();
        labels.sort();
        Ok(labels)
    }

    fn list_decoded<T>(&self, collection: Collection) -> Result<Vec<(RecordKey, T)>, ManagerError>
    where
        T: DeserializeOwned,
    {
        let records = self.store.list(collection).inspect_err(|err| {
            tracing::warn!(%collection, error = %err, "list failed");
        })?;
        records
            .into_iter()
            .map(|(key, value)| Ok((key, decode(value)?)))
            .collect()
    }

    fn fetch<T>(&self, collection: Collection, key: &RecordKey) -> Result<T, ManagerError>
    where
        T: DeserializeOwned,
    {
        match self.read(collection, key)? {
            Some(value) => decode(value),
            None => Err(ManagerError::NotFound(format!(
                "{collection}/{key} no longer exists"
            ))),
        }
    }

    fn read(
        &self,
        collection: Collection,
        key: &RecordKey,
    ) -> Result<Option<JsonValue>, ManagerError> {
        Ok(self.store.get(collection, key).inspect_err(|err| {
            tracing::warn!(%collection, %key, error = %err, "read failed");
        })?)
    }

    fn write(
        &self,
        collection: Collection,
        key: &RecordKey,
        value: JsonValue,
    ) -> Result<(), ManagerError> {
        Ok(self.store.put(collection, key, value).inspect_err(|err| {
            tracing::warn!(%collection, %key, error = %err, "write failed");
        })?)
    }
}

fn encode<T: Serialize>(record: &T) -> Result<JsonValue, ManagerError> {
    serde_json::to_value(record).map_err(|e| ManagerError::Codec(e.to_string()))
}

fn decode<T: DeserializeOwned>(value: JsonValue) -> Result<T, ManagerError> {
    serde_json::from_value(value).map_err(|e| ManagerError::Codec(e.to_string()))
}

fn partial(
    sequence: &'static str,
    completed: &[SequenceStep],
    failed: SequenceStep,
    source: shelftrack_store::StoreError,
) -> ManagerError {
    tracing::warn!(
        sequence,
        %failed,
        ?completed,
        error = %source,
        "multi-step sequence failed after a prior step committed"
    );
    ManagerError::PartialSequence {
        sequence,
        completed: completed.to_vec(),
        failed,
        source,
    }
}
