//! Liveness responder for the hosting platform's health checks

use axum::{routing::get, Router};
use std::future::Future;
use tokio::net::TcpListener;

use crate::application::errors::BotError;
use crate::infrastructure::config::HealthConfig;

/// Always answers `200 OK`, independent of the chat connection
pub async fn health_check() -> &'static str {
    "OK"
}

pub fn router() -> Router {
    Router::new()
        .route("/", get(health_check))
        .route("/health", get(health_check))
}

/// Bind the listening socket. Done before the chat connection starts so probes
/// see the port open during the gateway handshake.
pub async fn bind(config: &HealthConfig) -> Result<TcpListener, BotError> {
    let listener = TcpListener::bind((config.host.as_str(), config.port)).await?;
    tracing::info!("Health check server running on port {}", listener.local_addr()?.port());
    Ok(listener)
}

/// Serve until `shutdown` resolves
pub async fn serve<F>(listener: TcpListener, shutdown: F) -> Result<(), BotError>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, router())
        .with_graceful_shutdown(shutdown)
        .await?;
    tracing::info!("Health check server stopped");
    Ok(())
}
