//! # pnr-api — Binary Entry Point
//!
//! Parses configuration, initializes tracing, and starts the Axum server.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use pnr_api::cli::{Cli, LogFormat};
use pnr_api::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match cli.log_format {
        LogFormat::Json => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init(),
        LogFormat::Text => tracing_subscriber::fmt().with_env_filter(filter).init(),
    }

    let config = cli.app_config();
    let port = config.port;
    let state = AppState::with_config(config);

    if !state.dataset_available().await {
        tracing::warn!(
            path = %state.config.dataset_path.display(),
            "dataset not found; registry routes will fail until it exists"
        );
    }
    if let Some(date) = state.config.reference_date {
        tracing::info!(%date, "reference date pinned");
    }

    let app = pnr_api::app(state);

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("PNR API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
