// =============================================================================
// Indicator Builder — Main Entry Point
// =============================================================================
//
// Serves technical indicators derived from a market data backend's close
// price series.  Each chart view (EMA, MACD, Ichimoku, ...) fetches one
// series and renders its indicator bundle for the chart front-end.
// =============================================================================

mod api;
mod app_state;
mod config;
mod indicators;
mod market_data;
mod types;
mod views;

use std::sync::Arc;

use anyhow::Context;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use crate::app_state::AppState;
use crate::config::{AppConfig, CONFIG_PATH};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // ── 1. Environment & config ──────────────────────────────────────────
    let _ = dotenv::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Indicator Builder starting up");

    let mut config = AppConfig::load_or_default(CONFIG_PATH);
    config.apply_env_overrides();

    // ── 2. Build shared state ────────────────────────────────────────────
    let bind_addr = config.bind_addr.clone();
    let default_interval = config.default_interval;
    let state = Arc::new(AppState::new(config).context("failed to build application state")?);

    info!(
        backend = %state.client.base_url(),
        %default_interval,
        "Market data backend configured"
    );

    // ── 3. Start the API server ──────────────────────────────────────────
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind API server on {bind_addr}"))?;
    info!(addr = %bind_addr, "API server listening");

    let app = api::rest::router(state.clone());
    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            error!(error = %e, "API server failed");
        }
    });

    info!("Ready. Press Ctrl+C to stop.");

    // ── 4. Graceful shutdown ─────────────────────────────────────────────
    tokio::signal::ctrl_c().await?;
    warn!("Shutdown signal received, stopping");

    info!("Indicator Builder shut down complete.");
    Ok(())
}
