// Decimal Calculator - Web Server
// JSON API with Axum

use anyhow::{Context, Result};
use decimal_calculator::api::{self, AppState};
use decimal_calculator::{logging, Evaluator, ServerConfig};

#[tokio::main]
async fn main() -> Result<()> {
    logging::init("info");

    let config = ServerConfig::from_env()?;
    let state = AppState::new(Evaluator::new());
    let app = api::router(state);

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    tracing::info!(%addr, version = decimal_calculator::VERSION, "Calculator server running");
    tracing::info!("UI:  http://{}/", addr);
    tracing::info!("API: POST http://{}/calculate", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "Failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
}
