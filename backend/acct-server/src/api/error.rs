//! REST API error types
//!
//! Every failure renders the same envelope as a success, with `data: null`
//! and `success: false`, plus a machine-readable `code` and the offending
//! `errors` fields.

use acct_auth::AuthError;

use std::panic::Location;

use axum::{
    Json,
    extract::multipart::MultipartError,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use error_location::ErrorLocation;
use serde::Serialize;
use thiserror::Error;

/// JSON error response body
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiErrorResponse {
    pub status_code: u16,
    pub data: Option<()>,
    pub message: String,
    pub success: bool,
    /// Machine-readable error code (e.g. "TOKEN_STALE", "VALIDATION_ERROR")
    pub code: String,
    /// Offending input fields, empty unless validation failed
    pub errors: Vec<String>,
}

#[derive(Debug, Error)]
pub enum ApiError {
    /// Domain failure from the account and session services
    #[error("{source}")]
    Auth {
        #[from]
        source: AuthError,
    },

    /// Malformed request body (400)
    #[error("Bad request: {message} {location}")]
    BadRequest {
        message: String,
        location: ErrorLocation,
    },

    /// Body over the configured limit (413)
    #[error("Payload too large: {message} {location}")]
    PayloadTooLarge {
        message: String,
        location: ErrorLocation,
    },
}

impl ApiError {
    #[track_caller]
    pub fn bad_request<S: Into<String>>(message: S) -> Self {
        ApiError::BadRequest {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Auth { source } => StatusCode::from_u16(source.status_code())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            ApiError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            ApiError::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Log with location; the body never carries it
        if status.is_server_error() {
            log::error!("{}", self);
        } else {
            log::debug!("{}", self);
        }

        let (code, message, errors) = match self {
            ApiError::Auth { source } => (
                source.error_code().to_string(),
                source.client_message(),
                source.fields().to_vec(),
            ),
            ApiError::BadRequest { message, .. } => ("BAD_REQUEST".to_string(), message, vec![]),
            ApiError::PayloadTooLarge { message, .. } => {
                ("PAYLOAD_TOO_LARGE".to_string(), message, vec![])
            }
        };

        let body = ApiErrorResponse {
            status_code: status.as_u16(),
            data: None,
            message,
            success: false,
            code,
            errors,
        };

        (status, Json(body)).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    #[track_caller]
    fn from(rejection: JsonRejection) -> Self {
        let location = ErrorLocation::from(Location::caller());
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            return ApiError::PayloadTooLarge {
                message: rejection.body_text(),
                location,
            };
        }
        ApiError::BadRequest {
            message: rejection.body_text(),
            location,
        }
    }
}

impl From<MultipartError> for ApiError {
    #[track_caller]
    fn from(e: MultipartError) -> Self {
        let location = ErrorLocation::from(Location::caller());
        if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
            return ApiError::PayloadTooLarge {
                message: e.body_text(),
                location,
            };
        }
        ApiError::BadRequest {
            message: e.body_text(),
            location,
        }
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
