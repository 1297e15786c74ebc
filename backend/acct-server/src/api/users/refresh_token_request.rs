use serde::Deserialize;

/// Optional body for POST /api/v1/users/refresh-token when no cookie is sent
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshTokenRequest {
    pub refresh_token: Option<String>,
}
