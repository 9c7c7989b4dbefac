//! In-memory record store for tests/dev.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Mutex, RwLock, mpsc};

use serde_json::Value as JsonValue;

use shelftrack_core::RecordKey;

use crate::change::{ChangeEvent, Subscription};
use crate::collection::Collection;
use crate::r#trait::{RecordStore, StoreError};

/// In-memory keyed collection store.
///
/// Intended for tests/dev. Not optimized for performance. Lock order is
/// collections before watchers; every method that takes both follows it.
#[derive(Debug, Default)]
pub struct InMemoryRecordStore {
    collections: RwLock<HashMap<Collection, BTreeMap<RecordKey, JsonValue>>>,
    watchers: Mutex<HashMap<Collection, Vec<mpsc::Sender<ChangeEvent>>>>,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fan a change out to live subscribers, dropping dead ones.
    fn notify(&self, collection: Collection, event: ChangeEvent) {
        if let Ok(mut watchers) = self.watchers.lock() {
            if let Some(subs) = watchers.get_mut(&collection) {
                subs.retain(|tx| tx.send(event.clone()).is_ok());
            }
        }
    }
}

impl RecordStore for InMemoryRecordStore {
    fn put(
        &self,
        collection: Collection,
        key: &RecordKey,
        value: JsonValue,
    ) -> Result<(), StoreError> {
        {
            let mut collections = self
                .collections
                .write()
                .map_err(|_| StoreError::unavailable("lock poisoned"))?;
            collections
                .entry(collection)
                .or_default()
                .insert(key.clone(), value.clone());
        }

        self.notify(
            collection,
            ChangeEvent::Put {
                key: key.clone(),
                value,
            },
        );
        Ok(())
    }

    fn delete(&self, collection: Collection, key: &RecordKey) -> Result<(), StoreError> {
        let removed = {
            let mut collections = self
                .collections
                .write()
                .map_err(|_| StoreError::unavailable("lock poisoned"))?;
            collections
                .get_mut(&collection)
                .and_then(|records| records.remove(key))
                .is_some()
        };

        // Deleting a missing key is a no-op (absence semantics).
        if removed {
            self.notify(collection, ChangeEvent::Deleted { key: key.clone() });
        }
        Ok(())
    }

    fn get(
        &self,
        collection: Collection,
        key: &RecordKey,
    ) -> Result<Option<JsonValue>, StoreError> {
        let collections = self
            .collections
            .read()
            .map_err(|_| StoreError::unavailable("lock poisoned"))?;
        Ok(collections
            .get(&collection)
            .and_then(|records| records.get(key))
            .cloned())
    }

    fn list(&self, collection: Collection) -> Result<Vec<(RecordKey, JsonValue)>, StoreError> {
        let collections = self
            .collections
            .read()
            .map_err(|_| StoreError::unavailable("lock poisoned"))?;
        Ok(collections
            .get(&collection)
            .map(|records| {
                records
                    .iter()
                    .map(|(k, v)| (k.clone(), v.clone()))
                    .collect()
            })
            .unwrap_or_default())
    }

    fn subscribe(&self, collection: Collection) -> Result<Subscription<ChangeEvent>, StoreError> {
        // Hold the collections lock while registering so no mutation can
        // slip between the snapshot and the first diff.
        let collections = self
            .collections
            .read()
            .map_err(|_| StoreError::unavailable("lock poisoned"))?;
        let snapshot: Vec<(RecordKey, JsonValue)> = collections
            .get(&collection)
            .map(|records| {
                records
                    .iter()
                    .map(|(k, v)| (k.clone(), v.clone()))
                    .collect()
            })
            .unwrap_or_default();

        let (tx, rx) = mpsc::channel();
        let _ = tx.send(ChangeEvent::Snapshot(snapshot));

        let mut watchers = self
            .watchers
            .lock()
            .map_err(|_| StoreError::unavailable("lock poisoned"))?;
        watchers.entry(collection).or_default().push(tx);

        Ok(Subscription::new(rx))
    }
}
