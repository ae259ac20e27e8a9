mod api_doc;
mod app;
mod config;
mod error;
mod extract;
mod handlers;
mod memory;
mod models;
mod routes;
mod spanner;
mod state;
mod store;

use anyhow::Context;
use config::{Config, StorageBackend};
use memory::MemoryStore;
use spanner::SpannerClient;
use state::AppState;
use store::DisconnectedStore;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    tracing::info!("rust-spanner-todos starting");

    let config = Config::from_env()?;
    config.log_startup();

    let addr = format!("{}:{}", config.service_host, config.service_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    tracing::info!("Service running on {}", addr);

    let app = app::build_router(build_state(&config).await?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn build_state(config: &Config) -> anyhow::Result<AppState> {
    match (config.storage_backend, &config.spanner) {
        (StorageBackend::Spanner, Some(database)) => {
            match SpannerClient::connect(database, config.spanner_emulator_host.as_deref()).await {
                Ok(client) => Ok(AppState::new(client)),
                Err(e) => {
                    // Keep serving; todo requests answer 500 with this error
                    tracing::error!("Database not connected: {:#}", e);
                    Ok(AppState::new(DisconnectedStore::new(&e)))
                }
            }
        }
        (StorageBackend::Spanner, None) => anyhow::bail!("Spanner database is not configured"),
        (StorageBackend::Memory, _) => {
            tracing::warn!("Using in-memory store; todos will not survive a restart");
            Ok(AppState::new(MemoryStore::new()))
        }
    }
}

/// Resolve on SIGINT (Ctrl-C) or, on Unix, SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl-C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("Received SIGINT, shutting down"),
        () = terminate => tracing::info!("Received SIGTERM, shutting down"),
    }
}
