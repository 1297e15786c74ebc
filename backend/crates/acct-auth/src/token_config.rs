use std::time::Duration;

/// Secrets and lifetimes for both token kinds
#[derive(Debug, Clone)]
pub struct TokenConfig {
    pub access_secret: Vec<u8>,
    pub access_ttl: Duration,
    pub refresh_secret: Vec<u8>,
    pub refresh_ttl: Duration,
}
