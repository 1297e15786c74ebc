use crate::DEFAULT_CORS_ORIGIN;

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CorsConfig {
    /// The single origin allowed to call the API
    pub origin: String,
    pub allow_credentials: bool,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            origin: String::from(DEFAULT_CORS_ORIGIN),
            allow_credentials: true,
        }
    }
}
