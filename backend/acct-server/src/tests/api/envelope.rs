use crate::ApiResponse;

use axum::response::IntoResponse;
use http::StatusCode;
use http_body_util::BodyExt;
use serde_json::json;

#[tokio::test]
async fn given_created_response_then_201_and_success_envelope() {
    let response = ApiResponse::created(json!({"id": 1}), "User registered successfully")
        .into_response();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["statusCode"], 201);
    assert_eq!(json["success"], true);
    assert_eq!(json["data"]["id"], 1);
    assert_eq!(json["message"], "User registered successfully");
}
