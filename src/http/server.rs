//! HTTP server startup.

use std::net::SocketAddr;

use axum::Router;
use tokio::net::TcpListener;

use crate::config::AppConfig;

use super::shutdown;

/// Startup and serve failures. All of these are fatal to the process.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Invalid listen address: {0}")]
    Address(String),

    #[error("Failed to bind server: {0}")]
    Bind(#[from] std::io::Error),

    #[error("Server error: {0}")]
    Server(String),
}

/// Bind the configured address and serve until a shutdown signal arrives
/// and in-flight requests have drained.
pub async fn start_server(app: Router, config: &AppConfig) -> Result<(), ServerError> {
    let addr: SocketAddr = format!("{}:{}", config.http.host, config.http.port)
        .parse()
        .map_err(|e| {
            ServerError::Address(format!("{}:{}: {}", config.http.host, config.http.port, e))
        })?;

    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "Starting HTTP server");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown::shutdown_signal())
        .await
        .map_err(|e| ServerError::Server(e.to_string()))
}
