use acct_core::PublicUser;

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Verified caller identity attached to a request.
/// Built only by [`crate::RequestAuthenticator`].
#[derive(Debug, Clone)]
pub struct IdentityContext {
    pub user: PublicUser,
    /// Expiry of the access token that authenticated this request
    pub token_expires_at: DateTime<Utc>,
}

impl IdentityContext {
    pub fn identity_id(&self) -> Uuid {
        self.user.id
    }
}
