mod cli;

use std::sync::Arc;

use anyhow::Context;
use burrow_gateway::{App, AppState};
use burrow_generator::RandomGenerator;
use burrow_shortener::ShortenerService;
use burrow_storage::{Repository, Storage};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::cli::CLI;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = CLI::parse();

    info!(
        listen_addr = %config.listen_addr,
        base_url = %config.base_url,
        storage_backend = %config.storage,
        "starting gateway server"
    );

    // A snapshot that cannot be loaded stops the process here, before any
    // request is served.
    let storage = Storage::open(&config.storage_config()?).context("failed to open storage")?;
    info!(entries = storage.len()?, "mapping table loaded");

    let service = ShortenerService::new(storage, RandomGenerator::default());
    let state = AppState::new(Arc::new(service), config.base_url);

    let listener = tokio::net::TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.listen_addr))?;
    info!(listen_addr = %listener.local_addr()?, "listening");

    axum::serve(listener, App::router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("gateway server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
    }
}
