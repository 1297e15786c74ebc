use crate::{AuthError, Result as AuthErrorResult, TokenKind};

use std::panic::Location;

use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};

/// JWT claims shared by access and refresh tokens
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user id)
    pub sub: String,
    /// Unique token id; two tokens minted in the same second still differ
    pub jti: String,
    /// Token kind, checked against the key used to verify it
    pub typ: TokenKind,
    /// Issued at timestamp (Unix)
    pub iat: i64,
    /// Expiration timestamp (Unix)
    pub exp: i64,
    /// Access tokens only: profile snapshot at issue time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fullname: Option<String>,
}

impl Claims {
    /// Validate claims after JWT signature verification
    #[track_caller]
    pub fn validate(&self, expected: TokenKind) -> AuthErrorResult<()> {
        if self.typ != expected {
            return Err(AuthError::TokenInvalid {
                message: format!("expected {} token, got {}", expected, self.typ),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        if self.sub.is_empty() {
            return Err(AuthError::TokenInvalid {
                message: "sub (user_id) cannot be empty".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(())
    }
}
