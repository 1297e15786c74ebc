use crate::{AuthError, AuthMetrics, IdentityContext, Result as AuthErrorResult, TokenIssuer, TokenKind};

use acct_db::UserRepository;

use std::sync::Arc;

use log::debug;

const BEARER_PREFIX: &str = "Bearer ";

/// Where a request may carry its access token.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestCredentials<'a> {
    /// Value of the `accessToken` cookie
    pub cookie_token: Option<&'a str>,
    /// Raw `Authorization` header value
    pub authorization: Option<&'a str>,
}

impl<'a> RequestCredentials<'a> {
    /// The cookie wins over the header. The header must use the Bearer
    /// scheme; anything else counts as absent.
    pub fn access_token(&self) -> Option<&'a str> {
        if let Some(token) = self.cookie_token.map(str::trim).filter(|t| !t.is_empty()) {
            return Some(token);
        }

        self.authorization
            .and_then(|header| header.strip_prefix(BEARER_PREFIX))
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }
}

/// Per-request gate: resolves an access token to a stored identity.
/// Never writes to the store.
pub struct RequestAuthenticator {
    users: UserRepository,
    issuer: Arc<TokenIssuer>,
    metrics: AuthMetrics,
}

impl RequestAuthenticator {
    pub fn new(users: UserRepository, issuer: Arc<TokenIssuer>) -> Self {
        Self {
            users,
            issuer,
            metrics: AuthMetrics::new(),
        }
    }

    pub async fn authenticate(
        &self,
        credentials: &RequestCredentials<'_>,
    ) -> AuthErrorResult<IdentityContext> {
        let token = credentials.access_token().ok_or_else(|| {
            self.metrics.authentication_rejected("missing");
            AuthError::unauthorized("Unauthorized request")
        })?;

        let verified = self
            .issuer
            .verify(token, TokenKind::Access)
            .map_err(|e| match e {
                AuthError::TokenExpired { .. } => {
                    self.metrics.authentication_rejected("expired");
                    AuthError::unauthorized("Access token expired")
                }
                other => {
                    self.metrics.authentication_rejected("invalid");
                    debug!("Access token rejected: {}", other);
                    AuthError::unauthorized("Invalid access token")
                }
            })?;

        let user = self
            .users
            .find_by_id(verified.identity_id)
            .await?
            .ok_or_else(|| {
                self.metrics.authentication_rejected("unknown_user");
                AuthError::unauthorized("Invalid access token")
            })?;

        self.metrics.authenticated();

        Ok(IdentityContext {
            user: user.to_public(),
            token_expires_at: verified.expires_at,
        })
    }
}
