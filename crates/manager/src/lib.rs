//! Inventory Position Manager.
//!
//! Owns the rule "at most one active product per shelf position" and the
//! three state transitions that can move a product: add-new,
//! replace-occupied (with history migration), and take (also with history
//! migration). Composes the domain crates with the record store and the
//! confirmation collaborator; contains no rendering or auth flows.

pub mod confirm;
pub mod error;
pub mod manager;
pub mod profiles;

pub use confirm::{ConfirmationPrompt, Decision};
pub use error::{ManagerError, SequenceStep};
pub use manager::{AddOutcome, AddReport, PendingReplace, PositionManager};
pub use profiles::{ProfileRecord, RecordProfileStore};
