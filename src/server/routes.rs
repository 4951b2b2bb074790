//! Router configuration for the web server.

use axum::{routing::get, Router};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::handlers;
use super::AppState;

/// Create the main router with all routes.
pub fn create_router(state: AppState) -> Router {
    let api = Router::new()
        .route("/all", get(handlers::all_records))
        .route("/district/:district", get(handlers::records_by_district))
        .route("/year/:year", get(handlers::records_by_year))
        .route("/top-crime-districts", get(handlers::top_crime_districts))
        .route("/stats", get(handlers::stats))
        .route("/filters", get(handlers::filters))
        .route("/health", get(handlers::health));

    Router::new()
        .route("/", get(handlers::home))
        .nest("/api", api)
        .fallback(handlers::not_found)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
