// Library exports for the server binary, the export tool and tests
pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use sqlx::SqlitePool;
use tower_http::trace::TraceLayer;

use config::Config;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(db: SqlitePool, config: Config) -> Self {
        Self {
            db,
            config: Arc::new(config),
        }
    }
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(routes::journal::new_entry_form))
        .route("/submit", post(routes::journal::submit_entry))
        .route("/entries", get(routes::entries::list_entries))
        .route(
            "/edit/{id}",
            get(routes::entries::edit_form).post(routes::entries::update_entry),
        )
        .route("/delete/{id}", post(routes::entries::delete_entry))
        .route("/visualization", get(routes::visualization::month_view))
        .route("/health", get(routes::health::health_check))
        .route("/metrics", get(routes::metrics::metrics_handler))
        .layer(axum::middleware::from_fn(
            middleware::request_metrics::count_requests,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
