//! User account REST API handlers
//!
//! Session endpoints set or clear the `accessToken` / `refreshToken`
//! cookies; every response uses the uniform envelope.

use crate::api::cookies::{self, REFRESH_TOKEN_COOKIE};
use crate::api::users::multipart_form::MultipartForm;
use crate::{
    ApiError, ApiResponse, ApiResult, AppState, ChangePasswordRequest, CurrentUser, LoginRequest,
    LoginResponse, RefreshTokenRequest, UpdateAccountRequest,
};

use acct_auth::{Registration, TokenPair};
use acct_core::PublicUser;

use axum::{
    Json,
    extract::{Multipart, State, multipart::MultipartRejection, rejection::JsonRejection},
};
use axum_extra::extract::cookie::CookieJar;
use bytes::Bytes;
use serde_json::{Value, json};

// =============================================================================
// Registration
// =============================================================================

/// POST /api/v1/users/register
///
/// Multipart: fullname, email, username, password, avatar (file, required),
/// coverImage (file, optional)
pub async fn register(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> ApiResult<ApiResponse<PublicUser>> {
    let multipart = multipart.map_err(|e| ApiError::bad_request(e.body_text()))?;
    let mut form = MultipartForm::read(multipart).await?;

    let registration = Registration {
        fullname: form.text("fullname"),
        email: form.text("email"),
        username: form.text("username"),
        password: form.text("password"),
        avatar: form.take_file("avatar"),
        cover_image: form.take_file("coverImage"),
    };

    let user = state.accounts.register(registration).await?;

    Ok(ApiResponse::created(user, "User registered successfully"))
}

// =============================================================================
// Session
// =============================================================================

/// POST /api/v1/users/login
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<(CookieJar, ApiResponse<LoginResponse>)> {
    let Json(request) = payload?;

    let outcome = state.sessions.login(&request.into()).await?;
    let jar = cookies::with_session(jar, &outcome.tokens, state.settings.cookie_secure);

    Ok((
        jar,
        ApiResponse::ok(LoginResponse::from(outcome), "User logged in successfully"),
    ))
}

/// POST /api/v1/users/logout
pub async fn logout(
    State(state): State<AppState>,
    CurrentUser(identity): CurrentUser,
    jar: CookieJar,
) -> ApiResult<(CookieJar, ApiResponse<Value>)> {
    state.sessions.logout(identity.identity_id()).await?;
    let jar = cookies::without_session(jar, state.settings.cookie_secure);

    Ok((jar, ApiResponse::ok(json!({}), "User logged out")))
}

/// POST /api/v1/users/refresh-token
///
/// The `refreshToken` cookie wins over a `{"refreshToken": ...}` body.
pub async fn refresh_token(
    State(state): State<AppState>,
    jar: CookieJar,
    body: Bytes,
) -> ApiResult<(CookieJar, ApiResponse<TokenPair>)> {
    let from_cookie = jar
        .get(REFRESH_TOKEN_COOKIE)
        .map(|c| c.value().to_string())
        .filter(|v| !v.is_empty());

    let presented = match from_cookie {
        Some(token) => Some(token),
        None => refresh_token_from_body(&body)?,
    };

    let tokens = state.sessions.refresh(presented.as_deref()).await?;
    let jar = cookies::with_session(jar, &tokens, state.settings.cookie_secure);

    Ok((jar, ApiResponse::ok(tokens, "Access token refreshed")))
}

fn refresh_token_from_body(body: &Bytes) -> ApiResult<Option<String>> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }

    let request: RefreshTokenRequest = serde_json::from_slice(body)
        .map_err(|e| ApiError::bad_request(format!("Invalid JSON body: {}", e)))?;
    Ok(request.refresh_token)
}

/// POST /api/v1/users/change-password
///
/// Existing sessions stay valid.
pub async fn change_password(
    State(state): State<AppState>,
    CurrentUser(identity): CurrentUser,
    payload: Result<Json<ChangePasswordRequest>, JsonRejection>,
) -> ApiResult<ApiResponse<Value>> {
    let Json(request) = payload?;

    state
        .sessions
        .change_password(
            identity.identity_id(),
            request.old_password.as_deref(),
            request.new_password.as_deref(),
        )
        .await?;

    Ok(ApiResponse::ok(json!({}), "Password changed successfully"))
}

// =============================================================================
// Profile
// =============================================================================

/// GET /api/v1/users/current-user
pub async fn current_user(CurrentUser(identity): CurrentUser) -> ApiResponse<PublicUser> {
    ApiResponse::ok(identity.user, "User fetched successfully")
}

/// PATCH /api/v1/users/update-account
pub async fn update_account(
    State(state): State<AppState>,
    CurrentUser(identity): CurrentUser,
    payload: Result<Json<UpdateAccountRequest>, JsonRejection>,
) -> ApiResult<ApiResponse<PublicUser>> {
    let Json(request) = payload?;

    let user = state
        .accounts
        .update_details(
            identity.identity_id(),
            request.fullname.as_deref(),
            request.email.as_deref(),
        )
        .await?;

    Ok(ApiResponse::ok(user, "Account details updated successfully"))
}

/// PATCH /api/v1/users/avatar (multipart field `avatar`)
pub async fn update_avatar(
    State(state): State<AppState>,
    CurrentUser(identity): CurrentUser,
    multipart: Result<Multipart, MultipartRejection>,
) -> ApiResult<ApiResponse<PublicUser>> {
    let multipart = multipart.map_err(|e| ApiError::bad_request(e.body_text()))?;
    let mut form = MultipartForm::read(multipart).await?;

    let user = state
        .accounts
        .update_avatar(identity.identity_id(), form.take_file("avatar"))
        .await?;

    Ok(ApiResponse::ok(user, "Avatar updated successfully"))
}

/// PATCH /api/v1/users/cover-image (multipart field `coverImage`)
pub async fn update_cover_image(
    State(state): State<AppState>,
    CurrentUser(identity): CurrentUser,
    multipart: Result<Multipart, MultipartRejection>,
) -> ApiResult<ApiResponse<PublicUser>> {
    let multipart = multipart.map_err(|e| ApiError::bad_request(e.body_text()))?;
    let mut form = MultipartForm::read(multipart).await?;

    let user = state
        .accounts
        .update_cover_image(identity.identity_id(), form.take_file("coverImage"))
        .await?;

    Ok(ApiResponse::ok(user, "Cover image updated successfully"))
}
