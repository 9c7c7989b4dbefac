//! Manager error model.
//!
//! Every operation ends in exactly one outcome: success, a single
//! human-readable error, or (on the conflict path) a pending confirmation.
//! Failures of a remote call are logged and surfaced once, never retried.

use thiserror::Error;

use shelftrack_core::DomainError;
use shelftrack_store::StoreError;

/// One step of a multi-step write sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceStep {
    /// Append the departing product to the removed-items history.
    HistoryAppend,
    /// Delete the occupant product record.
    OccupantDelete,
    /// Delete the taken product record.
    ProductDelete,
    /// Write the incoming candidate product.
    CandidateWrite,
}

impl core::fmt::Display for SequenceStep {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let name = match self {
            SequenceStep::HistoryAppend => "history append",
            SequenceStep::OccupantDelete => "occupant delete",
            SequenceStep::ProductDelete => "product delete",
            SequenceStep::CandidateWrite => "candidate write",
        };
        f.write_str(name)
    }
}

/// Error surfaced by manager operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ManagerError {
    /// Input failed validation before any storage access.
    #[error("validation failed: {0}")]
    Validation(String),

    /// Referenced record no longer exists (e.g. deleted by a concurrent
    /// session).
    #[error("not found: {0}")]
    NotFound(String),

    /// Remote store call failed.
    #[error(transparent)]
    Storage(#[from] StoreError),

    /// A record could not be encoded/decoded.
    #[error("record codec failure: {0}")]
    Codec(String),

    /// A step failed after a prior step of the same sequence committed.
    ///
    /// There is no compensating rollback; the error names exactly what
    /// committed so the caller can surface a distinguishable message instead
    /// of a generic failure.
    #[error("{sequence} sequence failed at {failed} (committed: {completed:?}): {source}")]
    PartialSequence {
        sequence: &'static str,
        completed: Vec<SequenceStep>,
        failed: SequenceStep,
        source: StoreError,
    },
}

impl From<DomainError> for ManagerError {
    fn from(value: DomainError) -> Self {
        match value {
            DomainError::Validation(msg) => ManagerError::Validation(msg),
            DomainError::NotFound(msg) => ManagerError::NotFound(msg),
            DomainError::InvalidId(msg) => ManagerError::Validation(msg),
        }
    }
}
