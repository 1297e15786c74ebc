use acct_server::error::ServerError;
use acct_server::{AppState, HttpSettings, build_router, logger};

use acct_auth::TokenConfig;
use acct_config::Config;
use acct_db::Database;
use acct_media::LocalMediaUploader;

use std::error::Error;
use std::sync::Arc;

use axum::http::HeaderValue;
use log::{error, info, warn};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // .env first so its values feed the ACCT_* overrides
    if let Err(e) = dotenvy::dotenv()
        && !e.not_found()
    {
        return Err(e.into());
    }

    // Load and validate configuration
    let config = Config::load()?;
    config.validate()?;

    let log_file_path = match &config.logging.file {
        Some(filename) => {
            let log_dir = Config::config_dir()?.join(&config.logging.dir);
            std::fs::create_dir_all(&log_dir)?;
            Some(log_dir.join(filename))
        }
        None => None,
    };

    // Initialize logger (before any other logging)
    logger::initialize(config.logging.level, log_file_path, config.logging.colored)?;

    info!("Starting acct-server v{}", env!("CARGO_PKG_VERSION"));
    config.log_summary();

    if HeaderValue::from_str(&config.cors.origin).is_err() {
        return Err(ServerError::CorsOrigin {
            origin: config.cors.origin.clone(),
        }
        .into());
    }

    // Store handle lives for the whole process and is closed on shutdown
    let database_path = config.database_path()?;
    info!("Connecting to database: {}", database_path.display());
    let database = Database::connect(&database_path, config.database.max_connections).await?;
    info!("Database ready");

    let tokens = TokenConfig {
        access_secret: config
            .auth
            .access_token_secret
            .clone()
            .unwrap_or_default()
            .into_bytes(),
        access_ttl: config.auth.access_ttl()?,
        refresh_secret: config
            .auth
            .refresh_token_secret
            .clone()
            .unwrap_or_default()
            .into_bytes(),
        refresh_ttl: config.auth.refresh_ttl()?,
    };

    let media_dir = config.media_dir()?;
    std::fs::create_dir_all(&media_dir)?;
    let uploader = Arc::new(LocalMediaUploader::new(
        media_dir,
        config.media.public_base_url.clone(),
        config.media.max_upload_bytes,
    ));

    if !config.auth.cookie_secure {
        warn!("Session cookies are NOT marked Secure - use only for local development");
    }

    let settings = HttpSettings {
        cookie_secure: config.auth.cookie_secure,
        json_limit_bytes: config.api.json_limit_bytes,
        max_upload_bytes: config.media.max_upload_bytes,
        cors_origin: config.cors.origin.clone(),
        cors_allow_credentials: config.cors.allow_credentials,
    };

    let state = AppState::new(database.pool().clone(), &tokens, uploader, settings)
        .map_err(ServerError::from)?;
    let app = build_router(state);

    let listener = TcpListener::bind(config.bind_addr()).await?;
    info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    database.close().await;
    info!("Graceful shutdown complete");

    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Received SIGINT (Ctrl+C), initiating graceful shutdown"),
        Err(e) => error!("Failed to listen for SIGINT: {}", e),
    }
}
