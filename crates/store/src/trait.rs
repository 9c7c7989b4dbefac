use std::sync::Arc;

use serde_json::Value as JsonValue;
use thiserror::Error;

use shelftrack_core::RecordKey;

use crate::change::{ChangeEvent, Subscription};
use crate::collection::Collection;

/// Record store operation error.
///
/// Every remote call is a potentially-blocking IO call with no client-side
/// timeout; failures surface once as an error signal and are never retried
/// automatically by this layer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The remote call failed or timed out.
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::Unavailable(msg.into())
    }
}

/// Keyed collection store with push-based change notification.
///
/// ## Semantics
///
/// - `put` inserts or overwrites one record under `(collection, key)`
/// - `delete` removes a record; absence, not a tombstone (deleting a missing
///   key is a no-op)
/// - `get`/`list` read the current state (no caching in this layer)
/// - `subscribe` delivers an immediate snapshot of the collection, then one
///   diff per mutation (at-least-once; consumers must be idempotent)
///
/// ## What this layer does NOT provide
///
/// No transactions, no locking, no conditional writes. The occupancy
/// invariant upstream is enforced by read-then-conditionally-write with no
/// mutual exclusion across sessions; two sessions racing on the same
/// position can both observe it free. That gap is owned by the caller, not
/// papered over here.
pub trait RecordStore: Send + Sync {
    fn put(&self, collection: Collection, key: &RecordKey, value: JsonValue)
    -> Result<(), StoreError>;

    fn delete(&self, collection: Collection, key: &RecordKey) -> Result<(), StoreError>;

    fn get(&self, collection: Collection, key: &RecordKey)
    -> Result<Option<JsonValue>, StoreError>;

    fn list(&self, collection: Collection) -> Result<Vec<(RecordKey, JsonValue)>, StoreError>;

    fn subscribe(&self, collection: Collection) -> Result<Subscription<ChangeEvent>, StoreError>;
}

impl<S> RecordStore for Arc<S>
where
    S: RecordStore + ?Sized,
{
    fn put(
        &self,
        collection: Collection,
        key: &RecordKey,
        value: JsonValue,
    ) -> Result<(), StoreError> {
        (**self).put(collection, key, value)
    }

    fn delete(&self, collection: Collection, key: &RecordKey) -> Result<(), StoreError> {
        (**self).delete(collection, key)
    }

    fn get(
        &self,
        collection: Collection,
        key: &RecordKey,
    ) -> Result<Option<JsonValue>, StoreError> {
        (**self).get(collection, key)
    }

    fn list(&self, collection: Collection) -> Result<Vec<(RecordKey, JsonValue)>, StoreError> {
        (**self).list(collection)
    }

    fn subscribe(&self, collection: Collection) -> Result<Subscription<ChangeEvent>, StoreError> {
        (**self).subscribe(collection)
    }
}
