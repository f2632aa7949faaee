//! Route Configuration
//!
//! Configures all HTTP routes for the API.

use axum::{
    middleware,
    response::IntoResponse,
    routing::{get, post},
    Router,
};

use super::handlers;
use crate::infrastructure::metrics;
use crate::presentation::middleware::{auth_middleware, metrics_middleware};
use crate::presentation::websocket::ws_handler;
use crate::startup::AppState;

/// Create the main API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api", api_routes(state.clone()))
        // WebSocket endpoint; identity comes from the query string
        .route("/ws", get(ws_handler))
        // Health check endpoints
        .route("/health", get(handlers::health::health_check))
        .route("/health/live", get(handlers::health::liveness))
        .route("/health/ready", get(handlers::health::readiness))
        // Prometheus metrics endpoint
        .route("/metrics", get(metrics_handler))
        .layer(middleware::from_fn(metrics_middleware))
        .with_state(state)
}

/// Prometheus metrics endpoint handler
async fn metrics_handler() -> impl IntoResponse {
    let metrics = metrics::gather_metrics();
    (
        [(
            axum::http::header::CONTENT_TYPE,
            "text/plain; version=0.0.4; charset=utf-8",
        )],
        metrics,
    )
}

/// Publish API routes (protected)
fn api_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/rooms/{room_id}/messages", post(handlers::publish::send_message))
        .route(
            "/rooms/{room_id}/announcements",
            post(handlers::publish::send_announcement),
        )
        .route("/broadcast", post(handlers::publish::send_notice))
        .route("/hub/stats", get(handlers::hub::get_stats))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}
