//! HTTP API over the quote operations.

mod handlers;
pub mod routes;
mod state;
mod websocket;

#[cfg(test)]
mod websocket_test;

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

use miette::Diagnostic;
use thiserror::Error;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::db::Database;
use crate::service::{ChangeNotifier, DEFAULT_STORE_TIMEOUT, QuotesService};

pub use handlers::{SERVER_ERROR_MESSAGE, TOTAL_COUNT_HEADER};
pub use state::AppState;

/// API server errors.
#[derive(Error, Diagnostic, Debug)]
pub enum ApiError {
    #[error("Server I/O error: {0}")]
    #[diagnostic(code(citazioni::api::io))]
    Io(#[from] std::io::Error),
}

/// API server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Host address to bind to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Bound on each store call made while serving a request
    pub store_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 3000,
            store_timeout: DEFAULT_STORE_TIMEOUT,
        }
    }
}

impl Config {
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// Initialize tracing subscriber with env filter
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "citazioni=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Run the API server with the given configuration and database.
///
/// The database must already be migrated.
pub async fn run<D: Database>(config: Config, db: D) -> Result<(), ApiError> {
    let service =
        QuotesService::new(db, ChangeNotifier::new()).with_store_timeout(config.store_timeout);
    let app = routes::create_router(AppState::new(service)).layer(TraceLayer::new_for_http());

    let addr = config.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("API server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("API server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
