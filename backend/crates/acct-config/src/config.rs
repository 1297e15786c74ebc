use crate::{
    ApiConfig, AuthConfig, CONFIG_DIR_ENV, ConfigError, ConfigErrorResult, CorsConfig,
    DEFAULT_CONFIG_DIR, DatabaseConfig, LoggingConfig, MediaConfig, ServerConfig,
};

use std::path::{Path, PathBuf};

use log::info;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub logging: LoggingConfig,
    pub media: MediaConfig,
    pub cors: CorsConfig,
    pub api: ApiConfig,
}

impl Config {
    /// Load config.
    ///
    /// Loading order:
    /// 1. ACCT_CONFIG_DIR env var, else ./.acct/
    /// 2. Create the config directory if missing
    /// 3. Parse config.toml if it exists, else use defaults
    /// 4. Apply ACCT_* environment variable overrides
    ///
    /// Does NOT validate - call validate() after load().
    pub fn load() -> ConfigErrorResult<Self> {
        let config_dir = Self::config_dir()?;

        if !config_dir.exists() {
            std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::Io {
                path: config_dir.clone(),
                source: e,
            })?;
        }

        let config_path = config_dir.join("config.toml");

        let mut config = if config_path.exists() {
            Self::load_toml(&config_path)?
        } else {
            Config::default()
        };

        config.apply_env_overrides();

        Ok(config)
    }

    fn load_toml(path: &Path) -> ConfigErrorResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::Toml {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Priority: ACCT_CONFIG_DIR env var > ./.acct/ (relative to cwd)
    pub fn config_dir() -> ConfigErrorResult<PathBuf> {
        if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
            return Ok(PathBuf::from(dir));
        }

        let cwd = std::env::current_dir()
            .map_err(|_| ConfigError::config("Cannot determine current working directory"))?;
        Ok(cwd.join(DEFAULT_CONFIG_DIR))
    }

    /// Validate every section. Call after load() so misconfiguration fails
    /// at startup.
    pub fn validate(&self) -> ConfigErrorResult<()> {
        self.server.validate()?;
        self.database.validate()?;
        self.auth.validate()?;
        self.media.validate()?;
        self.api.validate()?;
        Ok(())
    }

    pub fn database_path(&self) -> ConfigErrorResult<PathBuf> {
        Ok(Self::config_dir()?.join(&self.database.path))
    }

    pub fn media_dir(&self) -> ConfigErrorResult<PathBuf> {
        Ok(Self::config_dir()?.join(&self.media.dir))
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Log configuration summary (NEVER logs secrets).
    pub fn log_summary(&self) {
        info!("Configuration loaded:");
        info!("  server: {}:{}", self.server.host, self.server.port);
        info!(
            "  database: {} (max {} connections)",
            self.database.path, self.database.max_connections
        );
        info!(
            "  auth: access_ttl={}, refresh_ttl={}, secure_cookies={}",
            self.auth.access_token_ttl, self.auth.refresh_token_ttl, self.auth.cookie_secure
        );
        info!(
            "  logging: {} (colored: {})",
            *self.logging.level, self.logging.colored
        );
        info!(
            "  media: {} -> {} (max {} bytes)",
            self.media.dir, self.media.public_base_url, self.media.max_upload_bytes
        );
        info!(
            "  cors: {} (credentials: {})",
            self.cors.origin, self.cors.allow_credentials
        );
        info!("  api: json_limit={} bytes", self.api.json_limit_bytes);
    }

    fn apply_env_overrides(&mut self) {
        // Server
        Self::apply_env_string("ACCT_SERVER_HOST", &mut self.server.host);
        Self::apply_env_parse("ACCT_SERVER_PORT", &mut self.server.port);

        // Database
        Self::apply_env_string("ACCT_DATABASE_PATH", &mut self.database.path);
        Self::apply_env_parse(
            "ACCT_DATABASE_MAX_CONNECTIONS",
            &mut self.database.max_connections,
        );

        // Auth
        Self::apply_env_option_string(
            "ACCT_ACCESS_TOKEN_SECRET",
            &mut self.auth.access_token_secret,
        );
        Self::apply_env_string("ACCT_ACCESS_TOKEN_TTL", &mut self.auth.access_token_ttl);
        Self::apply_env_option_string(
            "ACCT_REFRESH_TOKEN_SECRET",
            &mut self.auth.refresh_token_secret,
        );
        Self::apply_env_string("ACCT_REFRESH_TOKEN_TTL", &mut self.auth.refresh_token_ttl);
        Self::apply_env_bool("ACCT_COOKIE_SECURE", &mut self.auth.cookie_secure);

        // Logging
        Self::apply_env_parse("ACCT_LOG_LEVEL", &mut self.logging.level);
        Self::apply_env_bool("ACCT_LOG_COLORED", &mut self.logging.colored);
        Self::apply_env_option_string("ACCT_LOG_FILE", &mut self.logging.file);

        // Media
        Self::apply_env_string("ACCT_MEDIA_DIR", &mut self.media.dir);
        Self::apply_env_string("ACCT_MEDIA_PUBLIC_BASE_URL", &mut self.media.public_base_url);
        Self::apply_env_parse("ACCT_MEDIA_MAX_UPLOAD_BYTES", &mut self.media.max_upload_bytes);

        // CORS
        Self::apply_env_string("ACCT_CORS_ORIGIN", &mut self.cors.origin);
        Self::apply_env_bool("ACCT_CORS_ALLOW_CREDENTIALS", &mut self.cors.allow_credentials);

        // API
        Self::apply_env_parse("ACCT_API_JSON_LIMIT_BYTES", &mut self.api.json_limit_bytes);
    }

    fn apply_env_string(var_name: &str, target: &mut String) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val;
        }
    }

    /// Accepts "true"/"1"; anything else is false
    fn apply_env_bool(var_name: &str, target: &mut bool) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val == "true" || val == "1";
        }
    }

    /// Unparseable values are ignored
    fn apply_env_parse<T: std::str::FromStr>(var_name: &str, target: &mut T) {
        if let Ok(val) = std::env::var(var_name)
            && let Ok(parsed) = val.parse()
        {
            *target = parsed;
        }
    }

    fn apply_env_option_string(var_name: &str, target: &mut Option<String>) {
        if let Ok(val) = std::env::var(var_name) {
            *target = Some(val);
        }
    }
}
