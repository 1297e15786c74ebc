use acct_core::CoreError;
use acct_db::DbError;
use acct_media::MediaError;

use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;

/// Every failure the session lifecycle can report to a caller.
///
/// Display output includes the capture location for logs; responses use
/// [`AuthError::client_message`] instead.
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Validation failed: {message} {location}")]
    Validation {
        message: String,
        fields: Vec<String>,
        location: ErrorLocation,
    },

    #[error("Conflict: {message} {location}")]
    Conflict {
        message: String,
        location: ErrorLocation,
    },

    #[error("Not found: {message} {location}")]
    NotFound {
        message: String,
        location: ErrorLocation,
    },

    #[error("Invalid user credentials {location}")]
    InvalidCredentials { location: ErrorLocation },

    #[error("Unauthorized: {message} {location}")]
    Unauthorized {
        message: String,
        location: ErrorLocation,
    },

    #[error("Token expired {location}")]
    TokenExpired { location: ErrorLocation },

    #[error("Invalid token: {message} {location}")]
    TokenInvalid {
        message: String,
        location: ErrorLocation,
    },

    #[error("Refresh token has been superseded {location}")]
    TokenStale { location: ErrorLocation },

    #[error("Upload failed: {message} {location}")]
    UploadFailed {
        message: String,
        location: ErrorLocation,
    },

    #[error("Internal error: {message} {location}")]
    Internal {
        message: String,
        location: ErrorLocation,
    },
}

impl AuthError {
    #[track_caller]
    pub fn validation<S: Into<String>>(message: S, fields: &[&str]) -> Self {
        Self::Validation {
            message: message.into(),
            fields: fields.iter().map(|f| (*f).to_string()).collect(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn conflict<S: Into<String>>(message: S) -> Self {
        Self::Conflict {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn not_found<S: Into<String>>(message: S) -> Self {
        Self::NotFound {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn invalid_credentials() -> Self {
        Self::InvalidCredentials {
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn unauthorized<S: Into<String>>(message: S) -> Self {
        Self::Unauthorized {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn token_stale() -> Self {
        Self::TokenStale {
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// HTTP-style status code for the envelope
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Validation { .. } | Self::UploadFailed { .. } => 400,
            Self::InvalidCredentials { .. }
            | Self::Unauthorized { .. }
            | Self::TokenExpired { .. }
            | Self::TokenInvalid { .. }
            | Self::TokenStale { .. } => 401,
            Self::NotFound { .. } => 404,
            Self::Conflict { .. } => 409,
            Self::Internal { .. } => 500,
        }
    }

    /// Machine-readable code, stable across message wording changes
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "VALIDATION_ERROR",
            Self::Conflict { .. } => "CONFLICT",
            Self::NotFound { .. } => "NOT_FOUND",
            Self::InvalidCredentials { .. } => "INVALID_CREDENTIALS",
            Self::Unauthorized { .. } => "UNAUTHORIZED",
            Self::TokenExpired { .. } => "TOKEN_EXPIRED",
            Self::TokenInvalid { .. } => "TOKEN_INVALID",
            Self::TokenStale { .. } => "TOKEN_STALE",
            Self::UploadFailed { .. } => "UPLOAD_FAILED",
            Self::Internal { .. } => "INTERNAL_ERROR",
        }
    }

    /// Message safe to return to the caller (no locations, no store details)
    pub fn client_message(&self) -> String {
        match self {
            Self::Validation { message, .. }
            | Self::Conflict { message, .. }
            | Self::NotFound { message, .. }
            | Self::Unauthorized { message, .. }
            | Self::UploadFailed { message, .. } => message.clone(),
            Self::InvalidCredentials { .. } => "Invalid user credentials".to_string(),
            Self::TokenExpired { .. } => "Token has expired".to_string(),
            Self::TokenInvalid { .. } => "Invalid token".to_string(),
            Self::TokenStale { .. } => "Refresh token is expired or already used".to_string(),
            Self::Internal { .. } => "Something went wrong".to_string(),
        }
    }

    /// Offending input fields, for validation failures
    pub fn fields(&self) -> &[String] {
        match self {
            Self::Validation { fields, .. } => fields,
            _ => &[],
        }
    }
}

impl From<CoreError> for AuthError {
    #[track_caller]
    fn from(e: CoreError) -> Self {
        match e {
            CoreError::Validation {
                message, fields, ..
            } => Self::Validation {
                message,
                fields,
                location: ErrorLocation::from(Location::caller()),
            },
        }
    }
}

impl From<DbError> for AuthError {
    #[track_caller]
    fn from(e: DbError) -> Self {
        match e {
            DbError::UniqueViolation { field, .. } => Self::Conflict {
                message: format!("User with this {} already exists", field),
                location: ErrorLocation::from(Location::caller()),
            },
            other => {
                // Store details stay in the log, never in the response
                log::error!("Credential store failure: {}", other);
                Self::Internal {
                    message: "Credential store operation failed".to_string(),
                    location: ErrorLocation::from(Location::caller()),
                }
            }
        }
    }
}

impl From<MediaError> for AuthError {
    #[track_caller]
    fn from(e: MediaError) -> Self {
        let message = match &e {
            MediaError::EmptyFile { .. } => "Uploaded file is empty".to_string(),
            MediaError::UnsupportedType { content_type, .. } => {
                format!("Unsupported media type '{}'", content_type)
            }
            MediaError::TooLarge { limit, .. } => {
                format!("File exceeds the {} byte limit", limit)
            }
            MediaError::Io { .. } | MediaError::UnknownUrl { .. } => {
                log::error!("Media storage failure: {}", e);
                "Failed to store uploaded file".to_string()
            }
        };

        Self::UploadFailed {
            message,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = std::result::Result<T, AuthError>;
