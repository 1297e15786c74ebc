pub mod api;
pub mod app_state;
pub mod error;
pub mod health;
pub mod logger;
pub mod routes;

#[cfg(test)]
mod tests;

pub use api::{
    envelope::ApiResponse,
    error::ApiError,
    error::Result as ApiResult,
    extractors::current_user::CurrentUser,
    users::{
        change_password_request::ChangePasswordRequest,
        login_request::LoginRequest,
        login_response::LoginResponse,
        refresh_token_request::RefreshTokenRequest,
        update_account_request::UpdateAccountRequest,
        users::{
            change_password, current_user, login, logout, refresh_token, register,
            update_account, update_avatar, update_cover_image,
        },
    },
};
pub use app_state::{AppState, HttpSettings};

pub use crate::routes::build_router;
