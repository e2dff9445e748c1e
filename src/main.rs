use anyhow::Context;
use clap::Parser;
use gatekeeper_cors_rs::config::ServerConfig;
use gatekeeper_cors_rs::server::{AppState, router};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let gatekeeper = config
        .build_gatekeeper()
        .context("refusing to start with an invalid CORS configuration")?;
    let state = AppState::new(Arc::new(gatekeeper), config.environment);

    if config.environment.is_development() {
        let snapshot = serde_json::to_string_pretty(&state.gatekeeper.snapshot())?;
        tracing::info!("CORS config: {snapshot}");
    }

    let addr = config.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(%addr, environment = ?config.environment, "server running");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
