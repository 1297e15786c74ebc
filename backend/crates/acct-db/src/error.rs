use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("SQLx error: {source} {location}")]
    Sqlx {
        source: sqlx::Error,
        location: ErrorLocation,
    },

    #[error("Migration error: {message} {location}")]
    Migration {
        message: String,
        location: ErrorLocation,
    },

    #[error("Database initialization failed: {message} {location}")]
    Initialization {
        message: String,
        location: ErrorLocation,
    },

    #[error("Unique constraint violated on '{field}' {location}")]
    UniqueViolation {
        field: String,
        location: ErrorLocation,
    },

    #[error("Invalid stored row: {message} {location}")]
    InvalidRow {
        message: String,
        location: ErrorLocation,
    },
}

impl From<sqlx::Error> for DbError {
    #[track_caller]
    fn from(source: sqlx::Error) -> Self {
        if let Some(db_error) = source.as_database_error()
            && db_error.is_unique_violation()
        {
            // SQLite reports "UNIQUE constraint failed: users.email"
            let field = db_error
                .message()
                .rsplit('.')
                .next()
                .unwrap_or("unknown")
                .trim()
                .to_string();

            return Self::UniqueViolation {
                field,
                location: ErrorLocation::from(Location::caller()),
            };
        }

        Self::Sqlx {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = std::result::Result<T, DbError>;
