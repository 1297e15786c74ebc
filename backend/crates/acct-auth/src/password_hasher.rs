//! Password hashing and verification using Argon2id.
//!
//! Hashes are PHC strings carrying their own random salt and parameters.
//! Hashing is deliberately CPU-expensive; the async variants move the work
//! onto the blocking pool so request workers keep serving other requests.

use crate::{AuthError, Result as AuthErrorResult};

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, SaltString};
use argon2::{Argon2, PasswordHasher as _, PasswordVerifier as _};
use log::warn;

#[derive(Clone, Default)]
pub struct PasswordHasher {
    argon2: Argon2<'static>,
}

impl PasswordHasher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Salted one-way hash. Blank input is rejected rather than hashed into
    /// a valid credential.
    #[track_caller]
    pub fn hash(&self, plaintext: &str) -> AuthErrorResult<String> {
        if plaintext.trim().is_empty() {
            return Err(AuthError::validation("password is required", &["password"]));
        }

        let salt = SaltString::generate(&mut OsRng);
        self.argon2
            .hash_password(plaintext.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AuthError::internal(format!("Password hashing failed: {}", e)))
    }

    /// `true` only if `plaintext` produced `hash`. Never errors: empty input
    /// or an unparseable hash is simply a mismatch.
    pub fn verify(&self, plaintext: &str, hash: &str) -> bool {
        if plaintext.is_empty() {
            return false;
        }

        let parsed = match PasswordHash::new(hash) {
            Ok(parsed) => parsed,
            Err(e) => {
                warn!("Stored password hash is not a valid PHC string: {}", e);
                return false;
            }
        };

        self.argon2
            .verify_password(plaintext.as_bytes(), &parsed)
            .is_ok()
    }

    pub async fn hash_async(&self, plaintext: String) -> AuthErrorResult<String> {
        let hasher = self.clone();
        tokio::task::spawn_blocking(move || hasher.hash(&plaintext))
            .await
            .map_err(|e| AuthError::internal(format!("Password hashing task failed: {}", e)))?
    }

    pub async fn verify_async(&self, plaintext: String, hash: String) -> AuthErrorResult<bool> {
        let hasher = self.clone();
        tokio::task::spawn_blocking(move || hasher.verify(&plaintext, &hash))
            .await
            .map_err(|e| AuthError::internal(format!("Password verification task failed: {}", e)))
    }
}
