//! Glossa HTTP server.
//!
//! Serves translations from the configured directory. See `glossa::server`
//! for the routes.

use std::sync::Arc;

use glossa::config::{Config, DEFAULT_LOG_FILTER};
use glossa::hook::LogHook;
use glossa::server::{self, AppState};
use glossa::service::TranslatorFactory;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file first (before anything else)
    dotenvy::dotenv().ok();

    // If RUST_LOG is not set, default to "info" level for our crate
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .init();

    info!("Starting Glossa...");

    let config = Config::from_env();
    info!("Configuration loaded successfully");
    info!("Translation directory: {}", config.translation_dir.display());

    let factory = TranslatorFactory::from_config(&config, Arc::new(LogHook));
    let app = server::router(AppState::new(factory));

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!("Listening on: {}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}
