use crate::{
    ConfigError, ConfigErrorResult, DEFAULT_MAX_UPLOAD_BYTES, DEFAULT_MEDIA_DIRECTORY,
    DEFAULT_MEDIA_PUBLIC_BASE_URL,
};

use std::path::Path;

use serde::Deserialize;

/// Storage for uploaded avatars and cover images
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MediaConfig {
    /// Upload directory, relative to the config directory
    pub dir: String,
    /// Prefix of the URLs handed back for stored files
    pub public_base_url: String,
    pub max_upload_bytes: usize,
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            dir: String::from(DEFAULT_MEDIA_DIRECTORY),
            public_base_url: String::from(DEFAULT_MEDIA_PUBLIC_BASE_URL),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

impl MediaConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if Path::new(&self.dir).is_absolute() || self.dir.contains("..") {
            return Err(ConfigError::media(
                "media.dir must be relative and cannot contain '..'",
            ));
        }

        if self.max_upload_bytes == 0 {
            return Err(ConfigError::media("media.max_upload_bytes must be > 0"));
        }

        Ok(())
    }
}
