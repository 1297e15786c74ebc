mod api_config;
mod auth_config;
mod config;
mod cors_config;
mod database_config;
mod error;
mod log_level;
mod logging_config;
mod media_config;
mod server_config;

pub use api_config::ApiConfig;
pub use auth_config::AuthConfig;
pub use config::Config;
pub use cors_config::CorsConfig;
pub use database_config::DatabaseConfig;
pub use error::{ConfigError, ConfigErrorResult};
pub use log_level::LogLevel;
pub use logging_config::LoggingConfig;
pub use media_config::MediaConfig;
pub use server_config::ServerConfig;

const CONFIG_DIR_ENV: &str = "ACCT_CONFIG_DIR";
const DEFAULT_CONFIG_DIR: &str = ".acct";

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8000;
const MIN_PORT: u16 = 1024;

const DEFAULT_DATABASE_FILENAME: &str = "accounts.db";
const DEFAULT_DATABASE_MAX_CONNECTIONS: u32 = 5;
const MAX_DATABASE_MAX_CONNECTIONS: u32 = 100;

const MIN_SECRET_LENGTH: usize = 32;
const DEFAULT_ACCESS_TOKEN_TTL: &str = "15m";
const DEFAULT_REFRESH_TOKEN_TTL: &str = "10d";
const DEFAULT_COOKIE_SECURE: bool = true;

const DEFAULT_LOG_LEVEL: log::LevelFilter = log::LevelFilter::Info;
const DEFAULT_LOG_DIRECTORY: &str = "log";

const DEFAULT_MEDIA_DIRECTORY: &str = "media";
const DEFAULT_MEDIA_PUBLIC_BASE_URL: &str = "/media";
const DEFAULT_MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

const DEFAULT_CORS_ORIGIN: &str = "http://localhost:3000";

const DEFAULT_JSON_LIMIT_BYTES: usize = 16 * 1024;

#[cfg(test)]
mod tests;
