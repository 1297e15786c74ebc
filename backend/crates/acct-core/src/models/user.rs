//! User entity - the stored identity record.

use crate::{PublicUser, normalize_identifier};

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// A registered account as held by the credential store.
///
/// Deliberately not `Serialize`: the password hash and refresh token must
/// never reach a response body. Convert to [`PublicUser`] for output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Uuid,
    /// Unique, stored lower-cased
    pub username: String,
    /// Unique, stored lower-cased
    pub email: String,
    pub fullname: String,
    /// PHC-formatted password hash
    pub password_hash: String,
    /// URL of the uploaded avatar image
    pub avatar: String,
    pub cover_image: Option<String>,
    /// Currently valid refresh token; `None` means logged out
    pub refresh_token: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new, logged-out user. Username and email are normalised.
    pub fn new(
        username: &str,
        email: &str,
        fullname: &str,
        password_hash: String,
        avatar: String,
        cover_image: Option<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            username: normalize_identifier(username),
            email: normalize_identifier(email),
            fullname: fullname.trim().to_string(),
            password_hash,
            avatar,
            cover_image,
            refresh_token: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// A stored refresh token means an active session
    pub fn is_logged_in(&self) -> bool {
        self.refresh_token.is_some()
    }

    /// Caller-facing projection without credentials
    pub fn to_public(&self) -> PublicUser {
        PublicUser::from(self)
    }
}
