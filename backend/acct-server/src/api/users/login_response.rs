use acct_auth::LoginOutcome;
use acct_core::PublicUser;

use serde::Serialize;

/// Login payload; tokens are returned in the body as well as in cookies
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub user: PublicUser,
    pub access_token: String,
    pub refresh_token: String,
}

impl From<LoginOutcome> for LoginResponse {
    fn from(outcome: LoginOutcome) -> Self {
        Self {
            user: outcome.user,
            access_token: outcome.tokens.access_token,
            refresh_token: outcome.tokens.refresh_token,
        }
    }
}
