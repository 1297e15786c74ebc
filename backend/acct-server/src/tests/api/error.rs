use crate::ApiError;

use acct_auth::AuthError;

use axum::response::IntoResponse;
use http::StatusCode;
use http_body_util::BodyExt;

async fn body_json(error: ApiError) -> (StatusCode, serde_json::Value) {
    let response = error.into_response();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn given_validation_error_then_400_envelope_names_fields() {
    let error = ApiError::from(AuthError::validation(
        "fullname, email are required",
        &["fullname", "email"],
    ));

    let (status, json) = body_json(error).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["statusCode"], 400);
    assert_eq!(json["success"], false);
    assert!(json["data"].is_null());
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["message"], "fullname, email are required");
    assert_eq!(json["errors"], serde_json::json!(["fullname", "email"]));
}

#[tokio::test]
async fn given_stale_token_then_401_with_distinct_code() {
    let (status, json) = body_json(ApiError::from(AuthError::token_stale())).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["code"], "TOKEN_STALE");
}

#[tokio::test]
async fn given_conflict_then_409() {
    let error = ApiError::from(AuthError::conflict("User with email or username already exists"));

    let (status, json) = body_json(error).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["message"], "User with email or username already exists");
}

#[tokio::test]
async fn given_internal_error_then_500_without_details() {
    let error = ApiError::from(AuthError::internal("sqlite: disk I/O error at users.rs:42"));

    let (status, json) = body_json(error).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["message"], "Something went wrong");
    assert!(!json.to_string().contains("users.rs"));
}

#[tokio::test]
async fn given_bad_request_then_400_bad_request_code() {
    let (status, json) = body_json(ApiError::bad_request("Invalid JSON body")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "BAD_REQUEST");
    assert_eq!(json["errors"], serde_json::json!([]));
}
