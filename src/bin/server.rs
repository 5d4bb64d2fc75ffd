//! Bankcast server - prediction web UI and JSON API.
//!
//! Loads the trained pipeline artifact once at startup and serves it
//! read-only. Startup fails if the artifact is missing or unreadable.
//!
//! # Usage
//! ```sh
//! MODEL_PATH=data/model/bank_pipeline.json cargo run --bin server
//! ```
//!
//! # Environment Variables
//! - `BIND_ADDRESS` - Listen address (default: 0.0.0.0)
//! - `PORT` - Listen port (default: 5000)
//! - `MODEL_PATH` - Serialized pipeline artifact (default: data/model/bank_pipeline.json)

use anyhow::{Context, Result};
use bankcast::application::engine::PredictionEngine;
use bankcast::config::Config;
use bankcast::interfaces::http::{AppState, router};
use std::sync::Arc;
use tracing::{Level, info};
use tracing_subscriber::prelude::*;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Setup logging (stdout only)
    let stdout_layer = tracing_subscriber::fmt::layer().with_target(false).pretty();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .with(stdout_layer)
        .init();

    info!("Bankcast Server {} starting...", env!("CARGO_PKG_VERSION"));

    let config = Config::from_env();
    info!(
        "Configuration loaded: bind={}:{}, model={:?}",
        config.bind_address, config.port, config.model_path
    );

    // No serving without a valid model artifact.
    let engine = PredictionEngine::load(config.model_path.clone())
        .context("Failed to load model artifact; run the `train` binary first")?;

    let state = AppState::new(Arc::new(engine));
    let app = router(state);

    let addr = format!("{}:{}", config.bind_address, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    info!("Server listening on http://{addr}. Press Ctrl+C to shutdown.");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutdown signal received. Exiting...");
        })
        .await?;

    Ok(())
}
