//! `shelftrack-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns).

pub mod error;
pub mod id;
pub mod instant;

pub use error::{DomainError, DomainResult};
pub use id::{RecordKey, UserUid};
pub use instant::RecordInstant;
