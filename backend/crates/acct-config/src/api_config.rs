use crate::{ConfigError, ConfigErrorResult, DEFAULT_JSON_LIMIT_BYTES};

use serde::Deserialize;

/// Limits for the HTTP API layer
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Maximum accepted JSON request body
    pub json_limit_bytes: usize,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            json_limit_bytes: DEFAULT_JSON_LIMIT_BYTES,
        }
    }
}

impl ApiConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.json_limit_bytes == 0 {
            return Err(ConfigError::config("api.json_limit_bytes must be > 0"));
        }
        Ok(())
    }
}
