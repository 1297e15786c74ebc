use acct_auth::{
    AccountService, PasswordHasher, RequestAuthenticator, SessionManager, TokenConfig,
    TokenIssuer,
};
use acct_db::UserRepository;
use acct_media::MediaUploader;

use std::sync::Arc;

use sqlx::SqlitePool;

/// HTTP-layer knobs taken from config at startup
#[derive(Debug, Clone)]
pub struct HttpSettings {
    /// Mark session cookies `Secure`
    pub cookie_secure: bool,
    pub json_limit_bytes: usize,
    /// Per-file cap; multipart routes accept two files plus form fields
    pub max_upload_bytes: usize,
    pub cors_origin: String,
    pub cors_allow_credentials: bool,
}

/// Shared application state for request handlers
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub sessions: Arc<SessionManager>,
    pub authenticator: Arc<RequestAuthenticator>,
    pub accounts: Arc<AccountService>,
    pub settings: Arc<HttpSettings>,
}

impl AppState {
    /// Wire every service against one pool and one token issuer
    pub fn new(
        pool: SqlitePool,
        tokens: &TokenConfig,
        uploader: Arc<dyn MediaUploader>,
        settings: HttpSettings,
    ) -> acct_auth::Result<Self> {
        let users = UserRepository::new(pool.clone());
        let issuer = Arc::new(TokenIssuer::new(tokens)?);
        let hasher = PasswordHasher::new();

        Ok(Self {
            sessions: Arc::new(SessionManager::new(
                users.clone(),
                issuer.clone(),
                hasher.clone(),
            )),
            authenticator: Arc::new(RequestAuthenticator::new(users.clone(), issuer)),
            accounts: Arc::new(AccountService::new(users, hasher, uploader)),
            settings: Arc::new(settings),
            pool,
        })
    }
}
