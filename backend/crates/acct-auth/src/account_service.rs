//! Account registration and profile maintenance.

use crate::{AuthError, PasswordHasher, Result as AuthErrorResult};

use acct_core::{PublicUser, User, normalize_identifier, require_non_blank};
use acct_db::{UserFieldsUpdate, UserRepository};
use acct_media::{MediaFile, MediaUploader};

use std::sync::Arc;

use log::{info, warn};
use uuid::Uuid;

/// Registration input as received from the client
#[derive(Debug, Clone, Default)]
pub struct Registration {
    pub fullname: Option<String>,
    pub email: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub avatar: Option<MediaFile>,
    pub cover_image: Option<MediaFile>,
}

pub struct AccountService {
    users: UserRepository,
    hasher: PasswordHasher,
    uploader: Arc<dyn MediaUploader>,
}

impl AccountService {
    pub fn new(
        users: UserRepository,
        hasher: PasswordHasher,
        uploader: Arc<dyn MediaUploader>,
    ) -> Self {
        Self {
            users,
            hasher,
            uploader,
        }
    }

    /// Create a logged-out account.
    ///
    /// All validation and the duplicate check run before any upload, and a
    /// failed upload aborts before anything is stored. Files already uploaded
    /// when a later step fails are removed again.
    pub async fn register(&self, registration: Registration) -> AuthErrorResult<PublicUser> {
        require_non_blank(&[
            ("fullname", registration.fullname.as_deref()),
            ("email", registration.email.as_deref()),
            ("username", registration.username.as_deref()),
            ("password", registration.password.as_deref()),
        ])?;

        let Registration {
            fullname,
            email,
            username,
            password,
            avatar,
            cover_image,
        } = registration;

        let avatar =
            avatar.ok_or_else(|| AuthError::validation("avatar is required", &["avatar"]))?;

        let username = normalize_identifier(username.as_deref().unwrap_or_default());
        let email = normalize_identifier(email.as_deref().unwrap_or_default());

        if self
            .users
            .find_by_username_or_email(Some(&username), Some(&email))
            .await?
            .is_some()
        {
            return Err(AuthError::conflict(
                "User with email or username already exists",
            ));
        }

        let avatar_url = self.uploader.upload(avatar).await?.url;
        let cover_image_url = match cover_image {
            Some(file) => match self.uploader.upload(file).await {
                Ok(uploaded) => Some(uploaded.url),
                Err(e) => {
                    self.discard(&[avatar_url]).await;
                    return Err(e.into());
                }
            },
            None => None,
        };

        let stored = self
            .store_new_user(
                &username,
                &email,
                fullname.as_deref().unwrap_or_default(),
                password.unwrap_or_default(),
                &avatar_url,
                cover_image_url.as_deref(),
            )
            .await;

        let created = match stored {
            Ok(created) => created,
            Err(e) => {
                let uploaded: Vec<String> =
                    std::iter::once(avatar_url).chain(cover_image_url).collect();
                self.discard(&uploaded).await;
                return Err(e);
            }
        };

        info!("Registered user {} ({})", created.id, created.username);
        Ok(created)
    }

    pub async fn current_user(&self, identity_id: Uuid) -> AuthErrorResult<PublicUser> {
        self.users
            .find_by_id(identity_id)
            .await?
            .map(|user| user.to_public())
            .ok_or_else(|| AuthError::not_found("User does not exist"))
    }

    pub async fn update_details(
        &self,
        identity_id: Uuid,
        fullname: Option<&str>,
        email: Option<&str>,
    ) -> AuthErrorResult<PublicUser> {
        require_non_blank(&[("fullname", fullname), ("email", email)])?;

        let update = UserFieldsUpdate {
            fullname: fullname.map(|f| f.trim().to_string()),
            email: email.map(normalize_identifier),
            ..UserFieldsUpdate::default()
        };

        self.apply(identity_id, &update).await
    }

    pub async fn update_avatar(
        &self,
        identity_id: Uuid,
        avatar: Option<MediaFile>,
    ) -> AuthErrorResult<PublicUser> {
        let avatar =
            avatar.ok_or_else(|| AuthError::validation("avatar is required", &["avatar"]))?;
        self.ensure_exists(identity_id).await?;

        let url = self.uploader.upload(avatar).await?.url;
        self.apply_uploaded(identity_id, UserFieldsUpdate::avatar(url.clone()), url)
            .await
    }

    pub async fn update_cover_image(
        &self,
        identity_id: Uuid,
        cover_image: Option<MediaFile>,
    ) -> AuthErrorResult<PublicUser> {
        let cover_image = cover_image
            .ok_or_else(|| AuthError::validation("coverImage is required", &["coverImage"]))?;
        self.ensure_exists(identity_id).await?;

        let url = self.uploader.upload(cover_image).await?.url;
        self.apply_uploaded(identity_id, UserFieldsUpdate::cover_image(url.clone()), url)
            .await
    }

    async fn store_new_user(
        &self,
        username: &str,
        email: &str,
        fullname: &str,
        password: String,
        avatar_url: &str,
        cover_image_url: Option<&str>,
    ) -> AuthErrorResult<PublicUser> {
        let password_hash = self.hasher.hash_async(password).await?;

        let user = User::new(
            username,
            email,
            fullname,
            password_hash,
            avatar_url.to_string(),
            cover_image_url.map(str::to_string),
        );

        // A concurrent registration can still win the unique index here;
        // that surfaces as Conflict through the DbError conversion
        self.users.create(&user).await?;

        self.users
            .find_by_id(user.id)
            .await?
            .map(|created| created.to_public())
            .ok_or_else(|| AuthError::internal("Something went wrong while registering the user"))
    }

    /// Persist a freshly uploaded URL, removing the file if the write fails
    async fn apply_uploaded(
        &self,
        identity_id: Uuid,
        update: UserFieldsUpdate,
        url: String,
    ) -> AuthErrorResult<PublicUser> {
        let applied = self.apply(identity_id, &update).await;
        if applied.is_err() {
            self.discard(&[url]).await;
        }
        applied
    }

    /// Best-effort removal of uploads left without an owning record
    async fn discard(&self, urls: &[String]) {
        for url in urls {
            if let Err(e) = self.uploader.remove(url).await {
                warn!("Failed to remove orphaned upload {}: {}", url, e);
            }
        }
    }

    async fn ensure_exists(&self, identity_id: Uuid) -> AuthErrorResult<()> {
        self.current_user(identity_id).await.map(|_| ())
    }

    async fn apply(
        &self,
        identity_id: Uuid,
        update: &UserFieldsUpdate,
    ) -> AuthErrorResult<PublicUser> {
        if !self.users.update_fields(identity_id, update).await? {
            return Err(AuthError::not_found("User does not exist"));
        }
        self.current_user(identity_id).await
    }
}
