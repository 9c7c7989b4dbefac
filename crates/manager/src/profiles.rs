//! Record-store backed profile lookup.
//!
//! User profiles live in the `users` collection, keyed by identity-provider
//! uid. Only the member identifier ("matricula") is consumed here; the rest
//! of the profile belongs to the registration flow, which is not ours.

use serde::{Deserialize, Serialize};

use shelftrack_auth::{ProfileLookupError, ProfileStore};
use shelftrack_core::{RecordKey, UserUid};
use shelftrack_store::{RecordStore, USERS};

/// Profile record as persisted in the `users` collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileRecord {
    pub email: String,
    pub username: String,
    #[serde(default)]
    pub matricula: Option<String>,
}

/// `ProfileStore` backed by the record store's `users` collection.
#[derive(Debug)]
pub struct RecordProfileStore<S> {
    store: S,
}

impl<S> RecordProfileStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }
}

impl<S> ProfileStore for RecordProfileStore<S>
where
    S: RecordStore,
{
    fn member_id(&self, uid: &UserUid) -> Result<Option<String>, ProfileLookupError> {
        let key = RecordKey::new(uid.as_str());
        let value = self
            .store
            .get(USERS, &key)
            .map_err(|e| ProfileLookupError(e.to_string()))?;

        let Some(value) = value else {
            return Ok(None);
        };
        let record: ProfileRecord =
            serde_json::from_value(value).map_err(|e| ProfileLookupError(e.to_string()))?;
        Ok(record.matricula)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use shelftrack_auth::{UserProfile, resolve_attribution};
    use shelftrack_store::InMemoryRecordStore;

    fn profile(uid: &str) -> UserProfile {
        UserProfile {
            uid: UserUid::new(uid),
            email: "ana@example.com".to_string(),
            display_name: Some("Ana".to_string()),
        }
    }

    #[test]
    fn member_id_reads_users_collection() {
        let store = InMemoryRecordStore::new();
        store
            .put(
                USERS,
                &RecordKey::new("uid-1"),
                json!({"email": "ana@example.com", "username": "Ana", "matricula": "4417"}),
            )
            .unwrap();
        let profiles = RecordProfileStore::new(store);

        assert_eq!(
            profiles.member_id(&UserUid::new("uid-1")).unwrap(),
            Some("4417".to_string())
        );
        assert_eq!(profiles.member_id(&UserUid::new("uid-2")).unwrap(), None);
    }

    #[test]
    fn attribution_through_record_profiles() {
        let store = InMemoryRecordStore::new();
        store
            .put(
                USERS,
                &RecordKey::new("uid-1"),
                json!({"email": "ana@example.com", "username": "Ana", "matricula": "4417"}),
            )
            .unwrap();
        let profiles = RecordProfileStore::new(store);

        let attr = resolve_attribution(&profile("uid-1"), &profiles);
        assert_eq!(attr.as_str(), "Ana (Matricula: 4417)");

        // Unregistered uid degrades to N/A rather than failing the action.
        let attr = resolve_attribution(&profile("uid-9"), &profiles);
        assert_eq!(attr.as_str(), "Ana (Matricula: N/A)");
    }
}
