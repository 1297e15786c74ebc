pub mod change_password_request;
pub mod login_request;
pub mod login_response;
pub mod multipart_form;
pub mod refresh_token_request;
pub mod update_account_request;
#[allow(clippy::module_inception)]
pub mod users;
