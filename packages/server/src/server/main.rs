// Main entry point for the jobs embed server

use anyhow::{Context, Result};
use server_core::{server::build_app, Config};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,server_core=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting monday.com jobs embed server");

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    let port = config.port;
    tracing::info!(board_id = %config.board.board_id, "Configuration loaded");

    // Build application
    let app = build_app(config);

    // Start server
    let addr = format!("0.0.0.0:{port}");
    tracing::info!("Starting server on {}", addr);
    tracing::info!("Jobs embed: http://localhost:{}/jobs", port);
    tracing::info!("Health check: http://localhost:{}/health", port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
