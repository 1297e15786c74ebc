//! Axum extractor for authenticated routes

use crate::{ApiError, AppState, api::cookies::ACCESS_TOKEN_COOKIE};

use acct_auth::{IdentityContext, RequestCredentials};

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use axum_extra::extract::cookie::CookieJar;

/// The authenticated caller.
///
/// Reads the `accessToken` cookie, falling back to `Authorization: Bearer`.
/// Rejects with 401 before the handler runs.
pub struct CurrentUser(pub IdentityContext);

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let credentials = RequestCredentials {
            cookie_token: jar.get(ACCESS_TOKEN_COOKIE).map(|c| c.value()),
            authorization: parts
                .headers
                .get(AUTHORIZATION)
                .and_then(|value| value.to_str().ok()),
        };

        let identity = state.authenticator.authenticate(&credentials).await?;
        log::debug!("Authenticated request for user {}", identity.identity_id());

        Ok(CurrentUser(identity))
    }
}
