mod authenticator;

use crate::{
    AccountService, PasswordHasher, Registration, RequestAuthenticator, SessionManager,
    TokenConfig, TokenIssuer,
};

use acct_core::PublicUser;
use acct_db::{Database, UserRepository};
use acct_media::{LocalMediaUploader, MediaError, MediaFile, MediaUploader, UploadedMedia};

use std::panic::Location;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use error_location::ErrorLocation;
use tempfile::TempDir;

pub(crate) const ACCESS_SECRET: &[u8] = b"access-secret-for-tests-at-least-32-bytes";
pub(crate) const REFRESH_SECRET: &[u8] = b"refresh-secret-for-tests-at-least-32-bytes";

pub(crate) fn token_config() -> TokenConfig {
    TokenConfig {
        access_secret: ACCESS_SECRET.to_vec(),
        access_ttl: Duration::from_secs(900),
        refresh_secret: REFRESH_SECRET.to_vec(),
        refresh_ttl: Duration::from_secs(10 * 24 * 3600),
    }
}

pub(crate) fn png(name: &str) -> MediaFile {
    MediaFile::new(
        Some(name.to_string()),
        Some("image/png".to_string()),
        vec![0x89, b'P', b'N', b'G'],
    )
}

pub(crate) fn registration(username: &str, password: &str) -> Registration {
    Registration {
        fullname: Some("Nova".to_string()),
        email: Some(format!("{}@x.com", username)),
        username: Some(username.to_string()),
        password: Some(password.to_string()),
        avatar: Some(png("avatar.png")),
        cover_image: None,
    }
}

/// Uploader that always fails, for abort-on-upload tests
pub(crate) struct FailingUploader;

#[async_trait]
impl MediaUploader for FailingUploader {
    async fn upload(&self, _file: MediaFile) -> acct_media::Result<UploadedMedia> {
        Err(MediaError::Io {
            path: "/unwritable".into(),
            source: std::io::Error::other("storage offline"),
            location: ErrorLocation::from(Location::caller()),
        })
    }

    async fn remove(&self, _url: &str) -> acct_media::Result<()> {
        Ok(())
    }
}

/// All services wired against one in-memory database
pub(crate) struct Harness {
    pub users: UserRepository,
    pub issuer: Arc<TokenIssuer>,
    pub sessions: SessionManager,
    pub authenticator: RequestAuthenticator,
    pub accounts: AccountService,
    _db: Database,
    media: TempDir,
}

impl Harness {
    pub async fn new() -> Self {
        let media = TempDir::new().unwrap();
        let uploader: Arc<dyn MediaUploader> =
            Arc::new(LocalMediaUploader::new(media.path(), "/media", 1024 * 1024));
        Self::with_uploader(uploader, media).await
    }

    pub async fn with_failing_uploader() -> Self {
        Self::with_uploader(Arc::new(FailingUploader), TempDir::new().unwrap()).await
    }

    async fn with_uploader(uploader: Arc<dyn MediaUploader>, media: TempDir) -> Self {
        let db = Database::in_memory().await.unwrap();
        let users = UserRepository::new(db.pool().clone());
        let issuer = Arc::new(TokenIssuer::new(&token_config()).unwrap());
        let hasher = PasswordHasher::new();

        Self {
            sessions: SessionManager::new(users.clone(), issuer.clone(), hasher.clone()),
            authenticator: RequestAuthenticator::new(users.clone(), issuer.clone()),
            accounts: AccountService::new(users.clone(), hasher, uploader),
            users,
            issuer,
            _db: db,
            media,
        }
    }

    /// Number of files currently in the media directory
    pub fn stored_media(&self) -> usize {
        std::fs::read_dir(self.media.path()).unwrap().count()
    }

    pub async fn register(&self, username: &str, password: &str) -> PublicUser {
        self.accounts
            .register(registration(username, password))
            .await
            .unwrap()
    }
}
