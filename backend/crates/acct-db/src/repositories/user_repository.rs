//! User repository - the credential store.
//!
//! Every mutation is a single SQL statement, so SQLite's per-statement
//! atomicity is the only concurrency control needed. Refresh-token rotation
//! goes through [`UserRepository::swap_refresh_token`], a compare-and-swap on
//! the stored token: of two racing rotations presenting the same token, only
//! one can match the stored value. Password changes use the same shape
//! through [`UserRepository::swap_password_hash`].

use crate::{DbError, Result as DbErrorResult, UserFieldsUpdate};

use acct_core::User;

use std::panic::Location;

use chrono::{DateTime, Utc};
use error_location::ErrorLocation;
use sqlx::{FromRow, QueryBuilder, Sqlite, SqlitePool};
use uuid::Uuid;

const USER_COLUMNS: &str = "id, username, email, fullname, password_hash, avatar, cover_image, \
     refresh_token, created_at, updated_at";

#[derive(Debug, FromRow)]
struct UserRow {
    id: String,
    username: String,
    email: String,
    fullname: String,
    password_hash: String,
    avatar: String,
    cover_image: Option<String>,
    refresh_token: Option<String>,
    created_at: i64,
    updated_at: i64,
}

impl TryFrom<UserRow> for User {
    type Error = DbError;

    #[track_caller]
    fn try_from(r: UserRow) -> DbErrorResult<Self> {
        Ok(User {
            id: Uuid::parse_str(&r.id).map_err(|e| DbError::InvalidRow {
                message: format!("Invalid UUID in users.id: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?,
            username: r.username,
            email: r.email,
            fullname: r.fullname,
            password_hash: r.password_hash,
            avatar: r.avatar,
            cover_image: r.cover_image,
            refresh_token: r.refresh_token,
            created_at: timestamp(r.created_at, "users.created_at")?,
            updated_at: timestamp(r.updated_at, "users.updated_at")?,
        })
    }
}

#[track_caller]
fn timestamp(secs: i64, column: &str) -> DbErrorResult<DateTime<Utc>> {
    DateTime::from_timestamp(secs, 0).ok_or_else(|| DbError::InvalidRow {
        message: format!("Invalid timestamp in {}", column),
        location: ErrorLocation::from(Location::caller()),
    })
}

#[derive(Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a new user. Duplicate username or email fails with
    /// [`DbError::UniqueViolation`] naming the column.
    pub async fn create(&self, user: &User) -> DbErrorResult<()> {
        sqlx::query(
            r#"
                INSERT INTO users (
                    id, username, email, fullname, password_hash, avatar,
                    cover_image, refresh_token, created_at, updated_at
                ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(user.id.to_string())
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.fullname)
        .bind(&user.password_hash)
        .bind(&user.avatar)
        .bind(&user.cover_image)
        .bind(&user.refresh_token)
        .bind(user.created_at.timestamp())
        .bind(user.updated_at.timestamp())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn find_by_id(&self, id: Uuid) -> DbErrorResult<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?");

        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await?;

        row.map(User::try_from).transpose()
    }

    /// Find the user whose username OR email matches. An absent argument
    /// never matches anything.
    pub async fn find_by_username_or_email(
        &self,
        username: Option<&str>,
        email: Option<&str>,
    ) -> DbErrorResult<Option<User>> {
        if username.is_none() && email.is_none() {
            return Ok(None);
        }

        let sql = format!(
            "SELECT {USER_COLUMNS} FROM users WHERE username = ? OR email = ? \
             ORDER BY created_at LIMIT 1"
        );

        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(username)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        row.map(User::try_from).transpose()
    }

    /// Apply a partial update in one statement. Returns `false` when no
    /// user has that id.
    pub async fn update_fields(&self, id: Uuid, update: &UserFieldsUpdate) -> DbErrorResult<bool> {
        let mut builder = QueryBuilder::<Sqlite>::new("UPDATE users SET updated_at = ");
        builder.push_bind(Utc::now().timestamp());

        if let Some(email) = &update.email {
            builder.push(", email = ").push_bind(email.clone());
        }
        if let Some(fullname) = &update.fullname {
            builder.push(", fullname = ").push_bind(fullname.clone());
        }
        if let Some(avatar) = &update.avatar {
            builder.push(", avatar = ").push_bind(avatar.clone());
        }
        if let Some(cover_image) = &update.cover_image {
            builder.push(", cover_image = ").push_bind(cover_image.clone());
        }

        builder.push(" WHERE id = ").push_bind(id.to_string());

        let result = builder.build().execute(&self.pool).await?;
        Ok(result.rows_affected() > 0)
    }

    /// Overwrite the stored refresh token unconditionally (`None` logs out).
    pub async fn set_refresh_token(&self, id: Uuid, token: Option<&str>) -> DbErrorResult<bool> {
        let result = sqlx::query(
            r#"
                UPDATE users
                SET refresh_token = ?, updated_at = ?
                WHERE id = ?
            "#,
        )
        .bind(token)
        .bind(Utc::now().timestamp())
        .bind(id.to_string())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Replace the stored refresh token only if it still equals `expected`.
    ///
    /// Returns `false` if the token was already rotated, revoked, or the
    /// user is gone.
    pub async fn swap_refresh_token(
        &self,
        id: Uuid,
        expected: &str,
        replacement: &str,
    ) -> DbErrorResult<bool> {
        let result = sqlx::query(
            r#"
                UPDATE users
                SET refresh_token = ?, updated_at = ?
                WHERE id = ? AND refresh_token = ?
            "#,
        )
        .bind(replacement)
        .bind(Utc::now().timestamp())
        .bind(id.to_string())
        .bind(expected)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    /// Replace the password hash only if it still equals `expected`.
    ///
    /// Returns `false` if another change landed first or the user is gone.
    pub async fn swap_password_hash(
        &self,
        id: Uuid,
        expected: &str,
        replacement: &str,
    ) -> DbErrorResult<bool> {
        let result = sqlx::query(
            r#"
                UPDATE users
                SET password_hash = ?, updated_at = ?
                WHERE id = ? AND password_hash = ?
            "#,
        )
        .bind(replacement)
        .bind(Utc::now().timestamp())
        .bind(id.to_string())
        .bind(expected)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }
}
