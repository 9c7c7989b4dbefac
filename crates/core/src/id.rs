//! Strongly-typed identifiers used across the domain.
//!
//! Record stores key every collection by string. Generated keys (products,
//! removed items) are UUIDv7 rendered as strings; catalog-style collections
//! (positions, tag catalog, user profiles) use caller-supplied keys.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Key of a record inside a store collection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordKey(String);

impl RecordKey {
    /// Generate a fresh key.
    ///
    /// Uses UUIDv7 (time-ordered). Prefer passing keys explicitly in tests
    /// for determinism.
    pub fn generate() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for RecordKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl From<String> for RecordKey {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for RecordKey {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Identity-provider assigned user id (opaque string, never generated here).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserUid(String);

impl UserUid {
    pub fn new(uid: impl Into<String>) -> Self {
        Self(uid.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for UserUid {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl From<&str> for UserUid {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_keys_are_unique() {
        let a = RecordKey::generate();
        let b = RecordKey::generate();
        assert_ne!(a, b);
    }

    #[test]
    fn record_key_round_trips_through_string() {
        let key = RecordKey::new("positions/RUA 1");
        assert_eq!(key.as_str(), "positions/RUA 1");
        assert_eq!(RecordKey::from("positions/RUA 1".to_string()), key);
    }
}
