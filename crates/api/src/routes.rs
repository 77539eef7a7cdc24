use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};

/// Routes relative to the `/api` prefix the server nests them under.
pub fn create_api_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/resolve", post(handlers::resolve))
        .route("/packet", post(handlers::build_packet))
        .route(
            "/cache",
            get(handlers::get_cache).delete(handlers::clear_cache),
        )
        .route("/benchmark", post(handlers::run_benchmark))
        .route("/metrics", get(handlers::get_metrics))
        .with_state(state)
}
