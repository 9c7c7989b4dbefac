//! Push-based change notification.
//!
//! Subscribing to a collection yields an immediate `Snapshot` of its current
//! contents followed by one diff per mutation. Delivery is at-least-once;
//! consumers must be idempotent.

use std::sync::mpsc::Receiver;
use std::time::Duration;

use serde_json::Value as JsonValue;

use shelftrack_core::RecordKey;

/// One delivery on a collection subscription.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeEvent {
    /// Current contents of the collection at subscribe time. Always the
    /// first delivery on a subscription.
    Snapshot(Vec<(RecordKey, JsonValue)>),
    /// A record was written (insert or overwrite).
    Put { key: RecordKey, value: JsonValue },
    /// A record was removed. Absence, not a tombstone.
    Deleted { key: RecordKey },
}

/// A subscription to one collection's change stream.
///
/// Designed for single-threaded consumption: one subscription per consumer
/// loop. Dropping the subscription detaches it; the store prunes dead
/// subscribers on the next publish.
#[derive(Debug)]
pub struct Subscription<M> {
    receiver: Receiver<M>,
}

impl<M> Subscription<M> {
    pub fn new(receiver: Receiver<M>) -> Self {
        Self { receiver }
    }

    /// Block until the next delivery.
    pub fn recv(&self) -> Result<M, std::sync::mpsc::RecvError> {
        self.receiver.recv()
    }

    /// Try to receive without blocking.
    pub fn try_recv(&self) -> Result<M, std::sync::mpsc::TryRecvError> {
        self.receiver.try_recv()
    }

    /// Block for up to `timeout` waiting for a delivery.
    pub fn recv_timeout(&self, timeout: Duration) -> Result<M, std::sync::mpsc::RecvTimeoutError> {
        self.receiver.recv_timeout(timeout)
    }
}
