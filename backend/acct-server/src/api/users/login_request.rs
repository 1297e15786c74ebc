use acct_auth::LoginCredentials;

use serde::Deserialize;

/// POST /api/v1/users/login body. Either identifier may be sent.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

impl From<LoginRequest> for LoginCredentials {
    fn from(request: LoginRequest) -> Self {
        Self {
            username: request.username,
            email: request.email,
            password: request.password,
        }
    }
}
