//! agenda: contact management over HTTP.
//!
//! Five routes map onto five single-row operations on the `contacts` table.

pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod schema;
pub mod store;
pub mod telemetry;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

pub use config::Config;
pub use error::ApiError;
pub use store::{connect, ContactStore, Store, StoreError};

#[derive(Clone)]
pub struct AppState {
    pub store: Store,
}

impl AppState {
    pub fn new(store: Store) -> Self {
        Self { store }
    }
}

/// Build the application router.
pub fn app(store: Store) -> Router {
    routes::router()
        .layer(TraceLayer::new_for_http())
        .with_state(AppState::new(store))
}

/// Serve until Ctrl+C or SIGTERM, then close the store.
pub async fn serve(listener: TcpListener, store: Store) -> std::io::Result<()> {
    let result = axum::serve(listener, app(store.clone()))
        .with_graceful_shutdown(shutdown_signal())
        .await;

    store.close().await;
    tracing::info!("server shutdown complete");
    result
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("received Ctrl+C, shutting down"),
        _ = terminate => tracing::info!("received SIGTERM, shutting down"),
    }
}
