//! Identity provider contract.

use serde::{Deserialize, Serialize};

use shelftrack_core::UserUid;

/// Profile of an authenticated user, as reported by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub uid: UserUid,
    pub email: String,
    /// Display name is optional; attribution falls back to the email.
    pub display_name: Option<String>,
}

impl UserProfile {
    /// Preferred human-readable name for this user.
    pub fn preferred_name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.email)
    }
}

/// External identity provider (black box: sign-in/out flows are not ours).
///
/// Returns `None` when no user is signed in. Operations that write records
/// take the acting user explicitly, so this trait is only consulted at the
/// UI boundary.
pub trait IdentityProvider: Send + Sync {
    fn current_user(&self) -> Option<UserProfile>;
}

impl<P> IdentityProvider for std::sync::Arc<P>
where
    P: IdentityProvider + ?Sized,
{
    fn current_user(&self) -> Option<UserProfile> {
        (**self).current_user()
    }
}
