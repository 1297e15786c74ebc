use crate::{MediaFile, Result};

use async_trait::async_trait;

/// Result of a successful upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedMedia {
    /// Public URL the stored file is reachable at
    pub url: String,
}

/// Object storage for user media (avatars, cover images)
#[async_trait]
pub trait MediaUploader: Send + Sync {
    async fn upload(&self, file: MediaFile) -> Result<UploadedMedia>;

    /// Delete a file previously returned by [`MediaUploader::upload`].
    /// Removing a file that is already gone succeeds.
    async fn remove(&self, url: &str) -> Result<()>;
}
