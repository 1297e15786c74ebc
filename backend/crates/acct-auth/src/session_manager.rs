//! Session lifecycle: login, refresh-token rotation, logout, password change.
//!
//! Per user the session is either logged out (no stored refresh token) or
//! active (exactly one stored refresh token). Login overwrites the stored
//! token, so a second login ends the first session. Refresh rotates the
//! token with a compare-and-swap, so a rotated-out token is dead the moment
//! rotation commits and two racing refreshes cannot both succeed.

use crate::{
    AuthError, AuthMetrics, PasswordHasher, Result as AuthErrorResult, TokenIssuer, TokenKind,
    TokenPair,
};

use acct_core::{PublicUser, normalize_identifier, require_non_blank};
use acct_db::UserRepository;

use std::sync::Arc;

use log::{debug, info, warn};
use uuid::Uuid;

/// Login input. Either identifier may be used; the password is required.
#[derive(Debug, Clone, Default)]
pub struct LoginCredentials {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub user: PublicUser,
    pub tokens: TokenPair,
}

pub struct SessionManager {
    users: UserRepository,
    issuer: Arc<TokenIssuer>,
    hasher: PasswordHasher,
    metrics: AuthMetrics,
}

impl SessionManager {
    pub fn new(users: UserRepository, issuer: Arc<TokenIssuer>, hasher: PasswordHasher) -> Self {
        Self {
            users,
            issuer,
            hasher,
            metrics: AuthMetrics::new(),
        }
    }

    /// Verify credentials and start a session, replacing any existing one.
    pub async fn login(&self, credentials: &LoginCredentials) -> AuthErrorResult<LoginOutcome> {
        let username = non_blank(credentials.username.as_deref()).map(normalize_identifier);
        let email = non_blank(credentials.email.as_deref()).map(normalize_identifier);

        if username.is_none() && email.is_none() {
            return Err(AuthError::validation(
                "username or email is required",
                &["username", "email"],
            ));
        }
        require_non_blank(&[("password", credentials.password.as_deref())])?;
        let password = credentials.password.clone().unwrap_or_default();

        let user = self
            .users
            .find_by_username_or_email(username.as_deref(), email.as_deref())
            .await?
            .ok_or_else(|| {
                self.metrics.login_failed("not_found");
                AuthError::not_found("User does not exist")
            })?;

        let matches = self
            .hasher
            .verify_async(password, user.password_hash.clone())
            .await?;
        if !matches {
            self.metrics.login_failed("invalid_credentials");
            warn!("Rejected login for user {}: password mismatch", user.id);
            return Err(AuthError::invalid_credentials());
        }

        let tokens = self.issuer.issue_pair(&user)?;

        // Overwrites any previous refresh token; only one session per user
        if !self
            .users
            .set_refresh_token(user.id, Some(&tokens.refresh_token))
            .await?
        {
            return Err(AuthError::not_found("User does not exist"));
        }

        self.metrics.login_succeeded();
        info!("User {} logged in", user.id);

        Ok(LoginOutcome {
            user: user.to_public(),
            tokens,
        })
    }

    /// Exchange a refresh token for a new pair, invalidating the presented one.
    pub async fn refresh(&self, presented: Option<&str>) -> AuthErrorResult<TokenPair> {
        let presented = non_blank(presented).ok_or_else(|| {
            self.metrics.refresh_rejected("missing");
            AuthError::unauthorized("Refresh token is required")
        })?;

        let verified = self
            .issuer
            .verify(presented, TokenKind::Refresh)
            .map_err(|e| match e {
                AuthError::TokenExpired { .. } => {
                    self.metrics.refresh_rejected("expired");
                    e
                }
                other => {
                    self.metrics.refresh_rejected("invalid");
                    debug!("Refresh token rejected: {}", other);
                    AuthError::unauthorized("Invalid refresh token")
                }
            })?;

        let user = self
            .users
            .find_by_id(verified.identity_id)
            .await?
            .ok_or_else(|| {
                self.metrics.refresh_rejected("unknown_user");
                AuthError::unauthorized("Invalid refresh token")
            })?;

        if user.refresh_token.as_deref() != Some(presented) {
            self.metrics.refresh_rejected("stale");
            warn!(
                "Stale refresh token presented for user {} (rotated or logged out)",
                user.id
            );
            return Err(AuthError::token_stale());
        }

        let tokens = self.issuer.issue_pair(&user)?;

        // Lost the race against a concurrent rotation or logout
        if !self
            .users
            .swap_refresh_token(user.id, presented, &tokens.refresh_token)
            .await?
        {
            self.metrics.refresh_rejected("stale");
            warn!("Refresh token for user {} rotated concurrently", user.id);
            return Err(AuthError::token_stale());
        }

        self.metrics.refresh_rotated();
        debug!("Rotated refresh token for user {}", user.id);

        Ok(tokens)
    }

    /// End the session. Logging out twice is not an error.
    pub async fn logout(&self, identity_id: Uuid) -> AuthErrorResult<()> {
        self.users.set_refresh_token(identity_id, None).await?;

        self.metrics.logout();
        info!("User {} logged out", identity_id);
        Ok(())
    }

    /// Replace the password after verifying the current one.
    ///
    /// The stored refresh token is left as is, so existing sessions survive
    /// a password change.
    pub async fn change_password(
        &self,
        identity_id: Uuid,
        old_password: Option<&str>,
        new_password: Option<&str>,
    ) -> AuthErrorResult<()> {
        require_non_blank(&[("oldPassword", old_password), ("newPassword", new_password)])?;
        let old_password = old_password.unwrap_or_default().to_string();
        let new_password = new_password.unwrap_or_default().to_string();

        let user = self
            .users
            .find_by_id(identity_id)
            .await?
            .ok_or_else(|| AuthError::not_found("User does not exist"))?;

        if !self
            .hasher
            .verify_async(old_password, user.password_hash.clone())
            .await?
        {
            warn!("Rejected password change for user {}: wrong old password", user.id);
            return Err(AuthError::invalid_credentials());
        }

        let hash = self.hasher.hash_async(new_password).await?;
        // A concurrent change since the read means the old password no longer holds
        if !self
            .users
            .swap_password_hash(user.id, &user.password_hash, &hash)
            .await?
        {
            warn!("Rejected password change for user {}: changed concurrently", user.id);
            return Err(AuthError::invalid_credentials());
        }

        self.metrics.password_changed();
        info!("User {} changed password", user.id);
        Ok(())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
