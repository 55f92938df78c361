//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors; request errors are rendered by the
//! `progress` crate.

use anyhow::Context;
use axum::{
    Router, http,
    http::{Method, header},
};
use progress::{PgProgressRepository, ProgressConfig, progress_router};
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use std::env;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:31113";

/// Parse an environment variable, falling back to `default` when unset
fn env_or<T>(key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{key} is not valid: {raw:?}")),
        Err(_) => Ok(default),
    }
}

/// Decode a base64 secret from the environment
fn env_secret(key: &str) -> anyhow::Result<Option<Vec<u8>>> {
    match env::var(key) {
        Ok(raw) => {
            let bytes = platform::crypto::from_base64(raw.trim())
                .with_context(|| format!("{key} must be base64"))?;
            Ok(Some(bytes))
        }
        Err(_) => Ok(None),
    }
}

fn load_progress_config() -> anyhow::Result<ProgressConfig> {
    let base = if cfg!(debug_assertions) {
        ProgressConfig::development()
    } else {
        ProgressConfig::default()
    };

    let token_secret = match env_secret("TOKEN_SECRET")? {
        Some(bytes) => <[u8; 32]>::try_from(bytes.as_slice())
            .map_err(|_| anyhow::anyhow!("TOKEN_SECRET must decode to exactly 32 bytes"))?,
        None if cfg!(debug_assertions) => {
            tracing::warn!("TOKEN_SECRET not set, using a random secret for this process");
            base.token_secret
        }
        None => anyhow::bail!("TOKEN_SECRET must be set in production"),
    };

    Ok(ProgressConfig {
        token_secret,
        password_pepper: env_secret("PASSWORD_PEPPER")?,
        ..base
    })
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=info,progress=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Database connection
    let database_url = env::var("DATABASE_URL").context("DATABASE_URL must be set in environment")?;
    let max_connections: u32 = env_or("DATABASE_MAX_CONNECTIONS", 5)?;
    let acquire_timeout_secs: u64 = env_or("DATABASE_ACQUIRE_TIMEOUT_SECS", 5)?;
    let statement_timeout_secs: u64 = env_or("DATABASE_STATEMENT_TIMEOUT_SECS", 10)?;

    let connect_options = PgConnectOptions::from_str(&database_url)
        .context("DATABASE_URL is not a valid PostgreSQL URL")?
        .options([("statement_timeout", format!("{}s", statement_timeout_secs))]);

    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(Duration::from_secs(acquire_timeout_secs))
        .connect_with(connect_options)
        .await?;

    tracing::info!(max_connections, "Connected to database");

    // Run migrations
    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await?;

    tracing::info!("Migrations completed");

    // Progress configuration
    let progress_config = load_progress_config()?;
    let progress_store = PgProgressRepository::new(pool.clone());

    // CORS configuration
    let frontend_origins = env::var("FRONTEND_ORIGINS")
        .unwrap_or_else(|_| "http://localhost:40922,http://127.0.0.1:40922".to_string());

    let allowed_origins: Vec<http::HeaderValue> = frontend_origins
        .split(',')
        .filter_map(|origin| origin.trim().parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]));

    // Build router
    let app = Router::new()
        .nest("/api", progress_router(progress_store, progress_config))
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    let addr: SocketAddr = env_or("BIND_ADDR", DEFAULT_BIND_ADDR.parse()?)?;
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}
