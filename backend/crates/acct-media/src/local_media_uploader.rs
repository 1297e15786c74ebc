//! Filesystem-backed media storage.
//!
//! Files land in a single directory under a generated name, so nothing the
//! client sends can influence the storage path beyond a sanitised extension.

use crate::{MediaError, MediaFile, MediaUploader, Result, UploadedMedia};

use std::panic::Location;
use std::path::PathBuf;

use async_trait::async_trait;
use error_location::ErrorLocation;
use log::debug;
use uuid::Uuid;

pub struct LocalMediaUploader {
    dir: PathBuf,
    public_base_url: String,
    max_bytes: usize,
}

impl LocalMediaUploader {
    pub fn new(dir: impl Into<PathBuf>, public_base_url: impl Into<String>, max_bytes: usize) -> Self {
        Self {
            dir: dir.into(),
            public_base_url: public_base_url.into().trim_end_matches('/').to_string(),
            max_bytes,
        }
    }

    #[track_caller]
    fn check(&self, file: &MediaFile) -> Result<()> {
        if file.is_empty() {
            return Err(MediaError::EmptyFile {
                location: ErrorLocation::from(Location::caller()),
            });
        }

        if file.len() > self.max_bytes {
            return Err(MediaError::TooLarge {
                size: file.len(),
                limit: self.max_bytes,
                location: ErrorLocation::from(Location::caller()),
            });
        }

        if let Some(content_type) = &file.content_type
            && !content_type.starts_with("image/")
        {
            return Err(MediaError::UnsupportedType {
                content_type: content_type.clone(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(())
    }

    /// Stored file name behind a URL this uploader issued
    #[track_caller]
    fn stored_name<'u>(&self, url: &'u str) -> Result<&'u str> {
        url.strip_prefix(self.public_base_url.as_str())
            .and_then(|rest| rest.strip_prefix('/'))
            .filter(|name| {
                !name.is_empty() && !name.starts_with('.') && !name.contains(['/', '\\'])
            })
            .ok_or_else(|| MediaError::UnknownUrl {
                url: url.to_string(),
                location: ErrorLocation::from(Location::caller()),
            })
    }
}

#[async_trait]
impl MediaUploader for LocalMediaUploader {
    async fn upload(&self, file: MediaFile) -> Result<UploadedMedia> {
        self.check(&file)?;

        let name = match file.extension() {
            Some(ext) => format!("{}.{}", Uuid::new_v4(), ext),
            None => Uuid::new_v4().to_string(),
        };
        let path = self.dir.join(&name);

        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|source| MediaError::Io {
                path: self.dir.clone(),
                source,
                location: ErrorLocation::from(Location::caller()),
            })?;

        tokio::fs::write(&path, &file.bytes)
            .await
            .map_err(|source| MediaError::Io {
                path: path.clone(),
                source,
                location: ErrorLocation::from(Location::caller()),
            })?;

        debug!("Stored {} bytes at {}", file.len(), path.display());

        Ok(UploadedMedia {
            url: format!("{}/{}", self.public_base_url, name),
        })
    }

    async fn remove(&self, url: &str) -> Result<()> {
        let path = self.dir.join(self.stored_name(url)?);

        match tokio::fs::remove_file(&path).await {
            Ok(()) => {
                debug!("Removed {}", path.display());
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(MediaError::Io {
                path,
                source,
                location: ErrorLocation::from(Location::caller()),
            }),
        }
    }
}
