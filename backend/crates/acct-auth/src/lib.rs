pub mod account_service;
pub mod auth_metrics;
pub mod claims;
pub mod error;
pub mod identity_context;
pub mod password_hasher;
pub mod request_authenticator;
pub mod session_manager;
pub mod token_config;
pub mod token_issuer;
pub mod token_kind;
pub mod token_pair;

pub use account_service::{AccountService, Registration};
pub use auth_metrics::AuthMetrics;
pub use claims::Claims;
pub use error::{AuthError, Result};
pub use identity_context::IdentityContext;
pub use password_hasher::PasswordHasher;
pub use request_authenticator::{RequestAuthenticator, RequestCredentials};
pub use session_manager::{LoginCredentials, LoginOutcome, SessionManager};
pub use token_config::TokenConfig;
pub use token_issuer::{TokenIssuer, VerifiedToken};
pub use token_kind::TokenKind;
pub use token_pair::TokenPair;

#[cfg(test)]
mod tests;
