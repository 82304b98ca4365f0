//! Quotelens API Server
//!
//! HTTP API with health check, metrics, and market-data lookup.
//! Stateless apart from the in-memory quote cache, so it can be
//! horizontally scaled.

use dotenvy::dotenv;
use quotelens::core::http::start_server;
use quotelens::logging;
use std::env;
use tokio::signal;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env if present
    dotenv().ok();

    // Initialize logging based on environment
    logging::init_logging();

    let port = env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);

    let env = quotelens::config::get_environment();
    info!("Starting Quotelens API Server");
    info!(environment = %env, "Environment");
    info!(port = port, "HTTP Server: http://0.0.0.0:{}", port);
    if quotelens::config::polygon_api_key().is_none() {
        info!("POLYGON_API_KEY not set, premium aggregator will be skipped");
    }

    let server_handle = tokio::spawn(async move {
        if let Err(e) = start_server(port).await {
            error!(error = %e, "HTTP server error");
        }
    });

    // Graceful shutdown
    tokio::select! {
        _ = signal::ctrl_c() => {
            info!("Shutting down API server...");
        }
        _ = server_handle => {
            error!("HTTP server stopped");
        }
    }

    Ok(())
}
