use super::{ACCESS_SECRET, Harness};
use crate::{AuthError, Claims, LoginCredentials, RequestCredentials, TokenKind};

use chrono::Utc;
use googletest::prelude::*;
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use uuid::Uuid;

async fn logged_in(harness: &Harness) -> (Uuid, String) {
    let user = harness.register("nova", "p@ss1").await;
    let outcome = harness
        .sessions
        .login(&LoginCredentials {
            username: Some("nova".to_string()),
            email: None,
            password: Some("p@ss1".to_string()),
        })
        .await
        .unwrap();
    (user.id, outcome.tokens.access_token)
}

fn unauthorized_message(result: crate::Result<crate::IdentityContext>) -> String {
    match result {
        Err(e @ AuthError::Unauthorized { .. }) => e.client_message(),
        other => panic!("expected Unauthorized, got {:?}", other.map(|c| c.user.id)),
    }
}

#[test]
fn given_cookie_and_header_then_cookie_wins() {
    let credentials = RequestCredentials {
        cookie_token: Some("from-cookie"),
        authorization: Some("Bearer from-header"),
    };

    assert_eq!(credentials.access_token(), Some("from-cookie"));
}

#[test]
fn given_empty_cookie_then_falls_back_to_bearer_header() {
    let credentials = RequestCredentials {
        cookie_token: Some(""),
        authorization: Some("Bearer from-header"),
    };

    assert_eq!(credentials.access_token(), Some("from-header"));
}

#[test]
fn given_non_bearer_scheme_then_no_token() {
    let credentials = RequestCredentials {
        cookie_token: None,
        authorization: Some("Basic dXNlcjpwYXNz"),
    };

    assert_eq!(credentials.access_token(), None);
}

#[tokio::test]
async fn given_valid_bearer_token_when_authenticated_then_identity_attached_without_credentials() {
    // Given
    let harness = Harness::new().await;
    let (id, access) = logged_in(&harness).await;
    let header = format!("Bearer {}", access);

    // When
    let context = harness
        .authenticator
        .authenticate(&RequestCredentials {
            cookie_token: None,
            authorization: Some(&header),
        })
        .await
        .unwrap();

    // Then
    assert_that!(context.identity_id(), eq(id));
    assert_that!(context.user.username.as_str(), eq("nova"));
    assert_that!(context.token_expires_at > Utc::now(), eq(true));
}

#[tokio::test]
async fn given_valid_cookie_token_when_authenticated_then_ok() {
    let harness = Harness::new().await;
    let (id, access) = logged_in(&harness).await;

    let context = harness
        .authenticator
        .authenticate(&RequestCredentials {
            cookie_token: Some(&access),
            authorization: None,
        })
        .await
        .unwrap();

    assert_that!(context.identity_id(), eq(id));
}

#[tokio::test]
async fn given_no_token_when_authenticated_then_unauthorized() {
    let harness = Harness::new().await;

    let result = harness
        .authenticator
        .authenticate(&RequestCredentials::default())
        .await;

    assert_that!(unauthorized_message(result).as_str(), eq("Unauthorized request"));
}

#[tokio::test]
async fn given_expired_access_token_when_authenticated_then_unauthorized_expired() {
    let harness = Harness::new().await;
    let (id, _) = logged_in(&harness).await;
    let now = Utc::now().timestamp();
    let claims = Claims {
        sub: id.to_string(),
        jti: Uuid::new_v4().to_string(),
        typ: TokenKind::Access,
        iat: now - 1000,
        exp: now - 100,
        username: None,
        email: None,
        fullname: None,
    };
    let expired = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(ACCESS_SECRET),
    )
    .unwrap();

    let result = harness
        .authenticator
        .authenticate(&RequestCredentials {
            cookie_token: Some(&expired),
            authorization: None,
        })
        .await;

    assert_that!(unauthorized_message(result).as_str(), eq("Access token expired"));
}

#[tokio::test]
async fn given_refresh_token_as_access_token_when_authenticated_then_unauthorized() {
    let harness = Harness::new().await;
    let (id, _) = logged_in(&harness).await;
    let refresh = harness.issuer.issue_refresh_token(id).unwrap();

    let result = harness
        .authenticator
        .authenticate(&RequestCredentials {
            cookie_token: Some(&refresh),
            authorization: None,
        })
        .await;

    assert_that!(unauthorized_message(result).as_str(), eq("Invalid access token"));
}

#[tokio::test]
async fn given_logged_out_user_when_authenticated_then_access_token_still_valid_until_expiry() {
    let harness = Harness::new().await;
    let (id, access) = logged_in(&harness).await;
    harness.sessions.logout(id).await.unwrap();

    let result = harness
        .authenticator
        .authenticate(&RequestCredentials {
            cookie_token: Some(&access),
            authorization: None,
        })
        .await;

    assert_that!(result, ok(anything()));
}
