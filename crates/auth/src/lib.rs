//! Identity and attribution.
//!
//! Authentication itself is delegated to an external identity provider; this
//! crate only defines the collaborator contracts the rest of the system
//! consumes, plus the attribution string embedded into inventory records at
//! write time.

pub mod attribution;
pub mod identity;

pub use attribution::{Attribution, ProfileLookupError, ProfileStore, resolve_attribution};
pub use identity::{IdentityProvider, UserProfile};
