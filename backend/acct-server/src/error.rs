use thiserror::Error;

/// Startup failures; each one aborts the process before it serves traffic
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Config error: {0}")]
    Config(#[from] acct_config::ConfigError),

    #[error("Database error: {0}")]
    Database(#[from] acct_db::DbError),

    #[error("Auth setup error: {0}")]
    Auth(#[from] acct_auth::AuthError),

    #[error("Invalid CORS origin '{origin}'")]
    CorsOrigin { origin: String },

    #[error("Logger error: {message}")]
    Logger { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ServerError>;
