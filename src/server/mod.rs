pub mod form;
pub mod routes;

use crate::state::AppState;
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;

/// Build the HTTP router: JSON API plus the static form page.
pub fn router(state: Arc<AppState>) -> Router {
    let dashboard_dir = state.config.dashboard_dir.clone();
    let index = dashboard_dir.join("index.html");

    Router::new()
        .route("/api/form", get(routes::get_form))
        .route("/api/form/{mode}", get(routes::get_field))
        .route("/api/calculate", post(routes::post_calculate))
        .route("/api/samples", get(routes::get_samples))
        .route("/api/counters", get(routes::get_counters))
        .route("/health", get(routes::health))
        .fallback_service(
            tower_http::services::ServeDir::new(dashboard_dir)
                .fallback(tower_http::services::ServeFile::new(index)),
        )
        .layer(
            tower_http::cors::CorsLayer::new()
                .allow_origin(tower_http::cors::Any)
                .allow_methods(tower_http::cors::Any)
                .allow_headers(tower_http::cors::Any),
        )
        .with_state(state)
}
