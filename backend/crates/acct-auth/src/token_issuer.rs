//! Token issuance and verification.
//!
//! Access and refresh tokens are signed with different secrets, so a token
//! of one kind can never verify as the other even before the `typ` claim
//! is checked.

use crate::{AuthError, Claims, Result as AuthErrorResult, TokenConfig, TokenKind, TokenPair};

use acct_core::User;

use std::panic::Location;

use chrono::{DateTime, Utc};
use error_location::ErrorLocation;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use uuid::Uuid;

/// Outcome of a successful verification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerifiedToken {
    pub identity_id: Uuid,
    pub expires_at: DateTime<Utc>,
}

struct SigningKey {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl_secs: i64,
}

impl SigningKey {
    fn new(secret: &[u8], ttl: std::time::Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            ttl_secs: i64::try_from(ttl.as_secs()).unwrap_or(i64::MAX),
        }
    }
}

pub struct TokenIssuer {
    access: SigningKey,
    refresh: SigningKey,
    validation: Validation,
}

impl TokenIssuer {
    /// Build an HS256 issuer. Secrets must be non-empty and distinct, TTLs
    /// non-zero.
    #[track_caller]
    pub fn new(config: &TokenConfig) -> AuthErrorResult<Self> {
        if config.access_secret.is_empty() || config.refresh_secret.is_empty() {
            return Err(AuthError::internal("token secrets must not be empty"));
        }
        if config.access_secret == config.refresh_secret {
            return Err(AuthError::internal(
                "access and refresh token secrets must differ",
            ));
        }
        if config.access_ttl.is_zero() || config.refresh_ttl.is_zero() {
            return Err(AuthError::internal("token lifetimes must be non-zero"));
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        // No leeway: an expired token must never verify
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Ok(Self {
            access: SigningKey::new(&config.access_secret, config.access_ttl),
            refresh: SigningKey::new(&config.refresh_secret, config.refresh_ttl),
            validation,
        })
    }

    /// Short-lived token embedding the user id and a profile snapshot
    pub fn issue_access_token(&self, user: &User) -> AuthErrorResult<String> {
        let mut claims = self.claims(user.id, TokenKind::Access);
        claims.username = Some(user.username.clone());
        claims.email = Some(user.email.clone());
        claims.fullname = Some(user.fullname.clone());
        self.sign(&claims, &self.access)
    }

    /// Long-lived token embedding only the user id
    pub fn issue_refresh_token(&self, identity_id: Uuid) -> AuthErrorResult<String> {
        let claims = self.claims(identity_id, TokenKind::Refresh);
        self.sign(&claims, &self.refresh)
    }

    pub fn issue_pair(&self, user: &User) -> AuthErrorResult<TokenPair> {
        Ok(TokenPair {
            access_token: self.issue_access_token(user)?,
            refresh_token: self.issue_refresh_token(user.id)?,
        })
    }

    /// Verify signature, expiry and kind.
    ///
    /// Lapsed expiry is [`AuthError::TokenExpired`]; anything else wrong with
    /// the token is [`AuthError::TokenInvalid`].
    #[track_caller]
    pub fn verify(&self, token: &str, kind: TokenKind) -> AuthErrorResult<VerifiedToken> {
        let key = match kind {
            TokenKind::Access => &self.access,
            TokenKind::Refresh => &self.refresh,
        };

        let token_data = decode::<Claims>(token, &key.decoding, &self.validation).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::TokenExpired {
                    location: ErrorLocation::from(Location::caller()),
                },
                _ => AuthError::TokenInvalid {
                    message: e.to_string(),
                    location: ErrorLocation::from(Location::caller()),
                },
            }
        })?;

        let claims = token_data.claims;
        claims.validate(kind)?;

        let identity_id = Uuid::parse_str(&claims.sub).map_err(|e| AuthError::TokenInvalid {
            message: format!("sub is not a user id: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        let expires_at =
            DateTime::from_timestamp(claims.exp, 0).ok_or_else(|| AuthError::TokenInvalid {
                message: "exp out of range".to_string(),
                location: ErrorLocation::from(Location::caller()),
            })?;

        Ok(VerifiedToken {
            identity_id,
            expires_at,
        })
    }

    fn claims(&self, identity_id: Uuid, kind: TokenKind) -> Claims {
        let ttl_secs = match kind {
            TokenKind::Access => self.access.ttl_secs,
            TokenKind::Refresh => self.refresh.ttl_secs,
        };
        let now = Utc::now().timestamp();

        Claims {
            sub: identity_id.to_string(),
            jti: Uuid::new_v4().to_string(),
            typ: kind,
            iat: now,
            exp: now.saturating_add(ttl_secs),
            username: None,
            email: None,
            fullname: None,
        }
    }

    #[track_caller]
    fn sign(&self, claims: &Claims, key: &SigningKey) -> AuthErrorResult<String> {
        encode(&Header::new(Algorithm::HS256), claims, &key.encoding)
            .map_err(|e| AuthError::internal(format!("Failed to sign {} token: {}", claims.typ, e)))
    }
}
