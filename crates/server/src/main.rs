use std::sync::Arc;

use anyhow::Context;
use logicode_server::api::{AppState, build_router};
use logicode_server::config::{DEFAULT_CONFIG_PATH, ServerConfig};
use logicode_server::db;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing()?;

    info!("starting logicode similarity server");
    let config_path =
        std::env::var("LOGICODE_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    info!(path = %config_path, "loading server config");
    let config = ServerConfig::load(&config_path)
        .with_context(|| format!("failed to load server config from {config_path}"))?;
    info!(
        threshold = config.similarity.threshold,
        exclude_same_user = config.similarity.exclude_same_user,
        timeout_secs = config.similarity.timeout_secs,
        "similarity defaults loaded"
    );

    let db = db::init_pool_and_migrate(config.database_url.as_deref())
        .await
        .context("failed to initialize database")?;

    let state = Arc::new(AppState::from_database(db, config.similarity));
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;
    info!(addr = %config.bind_addr, "server is ready, press Ctrl+C to shut down");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutdown signal received, stopping server");
    }
}

fn init_tracing() -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?;

    tracing_subscriber::fmt().with_env_filter(env_filter).init();
    Ok(())
}
