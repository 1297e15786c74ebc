use crate::{
    ConfigError, ConfigErrorResult, DEFAULT_ACCESS_TOKEN_TTL, DEFAULT_COOKIE_SECURE,
    DEFAULT_REFRESH_TOKEN_TTL, MIN_SECRET_LENGTH,
};

use std::time::Duration;

use serde::Deserialize;

/// Token secrets and lifetimes.
///
/// Lifetimes are humantime strings ("15m", "10d"). Secrets have no default;
/// they must come from config.toml or the environment.
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    pub access_token_secret: Option<String>,
    pub access_token_ttl: String,
    pub refresh_token_secret: Option<String>,
    pub refresh_token_ttl: String,
    /// Mark session cookies `Secure`; disable only for plain-HTTP local dev
    pub cookie_secure: bool,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            access_token_secret: None,
            access_token_ttl: String::from(DEFAULT_ACCESS_TOKEN_TTL),
            refresh_token_secret: None,
            refresh_token_ttl: String::from(DEFAULT_REFRESH_TOKEN_TTL),
            cookie_secure: DEFAULT_COOKIE_SECURE,
        }
    }
}

// Secrets never reach Debug output
impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("access_token_secret", &self.access_token_secret.as_ref().map(|_| "***"))
            .field("access_token_ttl", &self.access_token_ttl)
            .field("refresh_token_secret", &self.refresh_token_secret.as_ref().map(|_| "***"))
            .field("refresh_token_ttl", &self.refresh_token_ttl)
            .field("cookie_secure", &self.cookie_secure)
            .finish()
    }
}

impl AuthConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        let access = Self::require_secret("access_token_secret", &self.access_token_secret)?;
        let refresh = Self::require_secret("refresh_token_secret", &self.refresh_token_secret)?;

        if access == refresh {
            return Err(ConfigError::auth(
                "auth.access_token_secret and auth.refresh_token_secret must differ",
            ));
        }

        let access_ttl = self.access_ttl()?;
        let refresh_ttl = self.refresh_ttl()?;

        if access_ttl >= refresh_ttl {
            return Err(ConfigError::auth(format!(
                "auth.access_token_ttl ({}) must be shorter than auth.refresh_token_ttl ({})",
                self.access_token_ttl, self.refresh_token_ttl
            )));
        }

        Ok(())
    }

    pub fn access_ttl(&self) -> ConfigErrorResult<Duration> {
        Self::parse_ttl("access_token_ttl", &self.access_token_ttl)
    }

    pub fn refresh_ttl(&self) -> ConfigErrorResult<Duration> {
        Self::parse_ttl("refresh_token_ttl", &self.refresh_token_ttl)
    }

    fn require_secret<'a>(name: &str, secret: &'a Option<String>) -> ConfigErrorResult<&'a str> {
        let secret = secret
            .as_deref()
            .ok_or_else(|| ConfigError::auth(format!("auth.{} is required", name)))?;

        if secret.len() < MIN_SECRET_LENGTH {
            return Err(ConfigError::auth(format!(
                "auth.{} must be at least {} characters",
                name, MIN_SECRET_LENGTH
            )));
        }

        Ok(secret)
    }

    fn parse_ttl(name: &str, value: &str) -> ConfigErrorResult<Duration> {
        let ttl = humantime::parse_duration(value)
            .map_err(|e| ConfigError::auth(format!("auth.{} '{}' is invalid: {}", name, value, e)))?;

        if ttl.is_zero() {
            return Err(ConfigError::auth(format!("auth.{} must be non-zero", name)));
        }

        Ok(ttl)
    }
}
