//! Attribution strings embedded into records at write time.
//!
//! Attribution combines the acting user's display name (or email) with their
//! member identifier ("matricula") looked up from the profile store. It is
//! not a persisted entity of its own; it is baked into product and history
//! records when they are written.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use shelftrack_core::UserUid;

use crate::identity::UserProfile;

/// Member identifier used when the profile store has no entry for a user.
pub const MEMBER_ID_FALLBACK: &str = "N/A";

/// Attribution shown when no user context is available at all.
pub const UNKNOWN_ACTOR: &str = "Unknown";

/// Profile store lookup failure (remote call failed/timed out).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("profile lookup failed: {0}")]
pub struct ProfileLookupError(pub String);

/// Profile store collaborator: uid → member identifier.
pub trait ProfileStore: Send + Sync {
    fn member_id(&self, uid: &UserUid) -> Result<Option<String>, ProfileLookupError>;
}

impl<P> ProfileStore for std::sync::Arc<P>
where
    P: ProfileStore + ?Sized,
{
    fn member_id(&self, uid: &UserUid) -> Result<Option<String>, ProfileLookupError> {
        (**self).member_id(uid)
    }
}

/// Who performed a write, as a display string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Attribution(String);

impl Attribution {
    /// Build attribution from a profile and an already-resolved member id.
    pub fn for_profile(profile: &UserProfile, member_id: &str) -> Self {
        Self(format!(
            "{} (Matricula: {})",
            profile.preferred_name(),
            member_id
        ))
    }

    /// Attribution when no user is signed in.
    pub fn unknown() -> Self {
        Self(UNKNOWN_ACTOR.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for Attribution {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Resolve attribution for a profile via the profile store.
///
/// A failed or empty member-id lookup degrades to "N/A" rather than blocking
/// the write; the failure is logged, never silently swallowed.
pub fn resolve_attribution<P>(profile: &UserProfile, profiles: &P) -> Attribution
where
    P: ProfileStore + ?Sized,
{
    let member_id = match profiles.member_id(&profile.uid) {
        Ok(Some(id)) => id,
        Ok(None) => MEMBER_ID_FALLBACK.to_string(),
        Err(err) => {
            tracing::warn!(uid = %profile.uid, error = %err, "member id lookup failed");
            MEMBER_ID_FALLBACK.to_string()
        }
    };
    Attribution::for_profile(profile, &member_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedProfiles(Option<String>);

    impl ProfileStore for FixedProfiles {
        fn member_id(&self, _uid: &UserUid) -> Result<Option<String>, ProfileLookupError> {
            Ok(self.0.clone())
        }
    }

    struct BrokenProfiles;

    impl ProfileStore for BrokenProfiles {
        fn member_id(&self, _uid: &UserUid) -> Result<Option<String>, ProfileLookupError> {
            Err(ProfileLookupError("connection reset".to_string()))
        }
    }

    fn profile(display_name: Option<&str>) -> UserProfile {
        UserProfile {
            uid: UserUid::new("uid-1"),
            email: "ana@example.com".to_string(),
            display_name: display_name.map(str::to_string),
        }
    }

    #[test]
    fn attribution_prefers_display_name() {
        let attr = resolve_attribution(&profile(Some("Ana")), &FixedProfiles(Some("4417".into())));
        assert_eq!(attr.as_str(), "Ana (Matricula: 4417)");
    }

    #[test]
    fn attribution_falls_back_to_email() {
        let attr = resolve_attribution(&profile(None), &FixedProfiles(Some("4417".into())));
        assert_eq!(attr.as_str(), "ana@example.com (Matricula: 4417)");
    }

    #[test]
    fn missing_member_id_becomes_na() {
        let attr = resolve_attribution(&profile(Some("Ana")), &FixedProfiles(None));
        assert_eq!(attr.as_str(), "Ana (Matricula: N/A)");
    }

    #[test]
    fn lookup_failure_degrades_to_na() {
        let attr = resolve_attribution(&profile(Some("Ana")), &BrokenProfiles);
        assert_eq!(attr.as_str(), "Ana (Matricula: N/A)");
    }
}
