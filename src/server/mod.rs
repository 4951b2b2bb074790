//! Web server exposing the crime dataset as a read-only JSON API.

mod error;
mod handlers;
mod routes;

pub use error::ApiError;
pub use handlers::WELCOME_MESSAGE;
pub use routes::create_router;

use std::sync::Arc;

use crate::dataset::{LoadOutcome, Table};

/// Shared state for the web server.
#[derive(Clone)]
pub struct AppState {
    /// The table, published once loading has finished.
    pub table: Arc<Table>,
    /// Why loading failed, when the empty table is being served.
    pub load_error: Option<Arc<str>>,
}

impl AppState {
    pub fn new(outcome: LoadOutcome) -> Self {
        let load_error = outcome.failure().map(Arc::<str>::from);
        Self {
            table: Arc::new(outcome.into_table()),
            load_error,
        }
    }

    pub fn from_table(table: Table) -> Self {
        Self::new(LoadOutcome::Loaded(table))
    }
}

/// Start the web server.
pub async fn serve(state: AppState, host: &str, port: u16) -> anyhow::Result<()> {
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind((host, port)).await?;
    tracing::info!("Starting server at http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("Shutting down gracefully...");
}
