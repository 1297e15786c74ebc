#![allow(dead_code)]

//! Test infrastructure for acct-server API tests

use acct_auth::TokenConfig;
use acct_db::Database;
use acct_media::{LocalMediaUploader, MediaUploader};
use acct_server::{AppState, HttpSettings, build_router};

use std::sync::Arc;
use std::time::Duration;

use axum::{
    Router,
    body::Body,
    http::{Request, Response, header},
};
use http_body_util::BodyExt;
use tempfile::TempDir;
use tower::ServiceExt;

pub const BOUNDARY: &str = "acct-test-boundary";
pub const ORIGIN: &str = "http://localhost:3000";

/// Router over an in-memory store; keep the TempDir alive for media writes
pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    _media: TempDir,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_json_limit(16 * 1024).await
    }

    pub async fn with_json_limit(json_limit_bytes: usize) -> Self {
        let database = Database::in_memory()
            .await
            .expect("Failed to create test database");
        let media = TempDir::new().expect("Failed to create media dir");
        let uploader: Arc<dyn MediaUploader> =
            Arc::new(LocalMediaUploader::new(media.path(), "/media", 1024 * 1024));

        let tokens = TokenConfig {
            access_secret: b"access-secret-for-api-tests-0123456789".to_vec(),
            access_ttl: Duration::from_secs(900),
            refresh_secret: b"refresh-secret-for-api-tests-012345678".to_vec(),
            refresh_ttl: Duration::from_secs(864_000),
        };

        let settings = HttpSettings {
            cookie_secure: true,
            json_limit_bytes,
            max_upload_bytes: 1024 * 1024,
            cors_origin: ORIGIN.to_string(),
            cors_allow_credentials: true,
        };

        let state = AppState::new(database.pool().clone(), &tokens, uploader, settings)
            .expect("Failed to build app state");

        Self {
            router: build_router(state.clone()),
            state,
            _media: media,
        }
    }

    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router.clone().oneshot(request).await.unwrap()
    }

    /// Register and log in; returns (access token, refresh token)
    pub async fn logged_in(&self, username: &str, password: &str) -> (String, String) {
        let response = self.send(register_request(username, password, true)).await;
        assert_eq!(response.status(), 201);

        let response = self
            .send(json_request(
                "POST",
                "/api/v1/users/login",
                &serde_json::json!({"username": username, "password": password}),
            ))
            .await;
        assert_eq!(response.status(), 200);

        let json = body_json(response).await;
        (
            json["data"]["accessToken"].as_str().unwrap().to_string(),
            json["data"]["refreshToken"].as_str().unwrap().to_string(),
        )
    }
}

pub fn json_request(method: &str, uri: &str, body: &serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn bearer(request: Request<Body>, token: &str) -> Request<Body> {
    let (mut parts, body) = request.into_parts();
    parts.headers.insert(
        header::AUTHORIZATION,
        format!("Bearer {}", token).parse().unwrap(),
    );
    Request::from_parts(parts, body)
}

pub fn with_cookie(request: Request<Body>, cookie: &str) -> Request<Body> {
    let (mut parts, body) = request.into_parts();
    parts
        .headers
        .insert(header::COOKIE, cookie.parse().unwrap());
    Request::from_parts(parts, body)
}

/// One multipart part: (field name, optional file name + content type, bytes)
pub struct Part<'a> {
    pub name: &'a str,
    pub file: Option<(&'a str, &'a str)>,
    pub data: &'a [u8],
}

pub fn multipart_body(parts: &[Part<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        match part.file {
            Some((file_name, content_type)) => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n\
                         Content-Type: {}\r\n\r\n",
                        part.name, file_name, content_type
                    )
                    .as_bytes(),
                );
            }
            None => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{}\"\r\n\r\n",
                        part.name
                    )
                    .as_bytes(),
                );
            }
        }
        body.extend_from_slice(part.data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
    body
}

pub fn multipart_request(method: &str, uri: &str, parts: &[Part<'_>]) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(multipart_body(parts)))
        .unwrap()
}

pub const PNG: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

pub fn register_request(username: &str, password: &str, with_avatar: bool) -> Request<Body> {
    let email = format!("{}@x.com", username);
    let mut parts = vec![
        Part { name: "fullname", file: None, data: b"Nova" },
        Part { name: "email", file: None, data: email.as_bytes() },
        Part { name: "username", file: None, data: username.as_bytes() },
        Part { name: "password", file: None, data: password.as_bytes() },
    ];
    if with_avatar {
        parts.push(Part {
            name: "avatar",
            file: Some(("avatar.png", "image/png")),
            data: PNG,
        });
    }
    multipart_request("POST", "/api/v1/users/register", &parts)
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

/// `name=value` pairs from every Set-Cookie header
pub fn set_cookies(response: &Response<Body>) -> Vec<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .map(|v| v.to_str().unwrap().to_string())
        .collect()
}

pub fn cookie_pair(set_cookies: &[String], name: &str) -> Option<String> {
    set_cookies
        .iter()
        .find(|c| c.starts_with(&format!("{}=", name)))
        .and_then(|c| c.split(';').next())
        .map(str::to_string)
}
