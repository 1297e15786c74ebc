use crate::api::users::users;
use crate::{AppState, health};

use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method, header},
    routing::{get, patch, post},
};
use tower_http::cors::{AllowOrigin, CorsLayer};

/// Multipart slack on top of the file payloads, for text fields and part headers
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

/// Build the application router with all endpoints
pub fn build_router(state: AppState) -> Router {
    let settings = state.settings.clone();
    // register carries up to two files
    let register_limit = settings.max_upload_bytes * 2 + MULTIPART_OVERHEAD_BYTES;
    let upload_limit = settings.max_upload_bytes + MULTIPART_OVERHEAD_BYTES;

    let users = Router::new()
        .route(
            "/register",
            post(users::register).layer(DefaultBodyLimit::max(register_limit)),
        )
        .route("/login", post(users::login))
        .route("/logout", post(users::logout))
        .route("/refresh-token", post(users::refresh_token))
        .route("/change-password", post(users::change_password))
        .route("/current-user", get(users::current_user))
        .route("/update-account", patch(users::update_account))
        .route(
            "/avatar",
            patch(users::update_avatar).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route(
            "/cover-image",
            patch(users::update_cover_image).layer(DefaultBodyLimit::max(upload_limit)),
        );

    Router::new()
        .nest("/api/v1/users", users)
        // Health check endpoints
        .route("/health", get(health::health))
        .route("/live", get(health::liveness))
        .route("/ready", get(health::readiness))
        .with_state(state)
        .layer(DefaultBodyLimit::max(settings.json_limit_bytes))
        .layer(cors_layer(&settings.cors_origin, settings.cors_allow_credentials))
}

/// CORS for the single configured origin. An origin that is not a valid
/// header value allows nothing.
fn cors_layer(origin: &str, allow_credentials: bool) -> CorsLayer {
    // A list only echoes a matching request origin
    let allowed = match HeaderValue::from_str(origin) {
        Ok(value) => vec![value],
        Err(e) => {
            log::error!("Invalid CORS origin '{}': {}", origin, e);
            Vec::new()
        }
    };

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::OPTIONS])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .allow_credentials(allow_credentials)
}
