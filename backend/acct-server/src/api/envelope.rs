use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// Uniform success body: `{statusCode, data, message, success}`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T: Serialize> {
    pub status_code: u16,
    pub data: T,
    pub message: String,
    pub success: bool,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok<S: Into<String>>(data: T, message: S) -> Self {
        Self::with_status(StatusCode::OK, data, message)
    }

    pub fn created<S: Into<String>>(data: T, message: S) -> Self {
        Self::with_status(StatusCode::CREATED, data, message)
    }

    fn with_status<S: Into<String>>(status: StatusCode, data: T, message: S) -> Self {
        Self {
            status_code: status.as_u16(),
            data,
            message: message.into(),
            success: status.is_success(),
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::OK);
        (status, Json(self)).into_response()
    }
}
