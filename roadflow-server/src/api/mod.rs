//! HTTP surface of the routing engine

mod error;
mod handlers;
mod requests;
mod responses;

use std::sync::Arc;

use axum::{
    BoxError, Router,
    error_handling::HandleErrorLayer,
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower::limit::GlobalConcurrencyLimitLayer;
use tower::timeout::error::Elapsed;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use error::ApiError;
pub use requests::{PathRequest, TrafficRequest};

use crate::state::AppState;

/// Build the Axum router. Every endpoint is served at the root and again
/// under `/api`.
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let routes: Router<Arc<AppState>> = Router::new()
        .route("/health", get(handlers::health))
        .route("/junctions", get(handlers::junctions))
        .route("/junctions/search", get(handlers::search_junctions))
        .route("/junctions/{id}", get(handlers::junction))
        .route("/path", post(handlers::shortest_path))
        .route("/traffic", post(handlers::update_traffic))
        .route("/traffic/reset", post(handlers::reset_traffic))
        .route("/traffic/history", get(handlers::traffic_history))
        .route("/traffic/severe", get(handlers::severe_roads))
        .route("/traffic/analytics", get(handlers::analytics));

    let guard = ServiceBuilder::new()
        .layer(HandleErrorLayer::new(handle_layer_error))
        .timeout(state.request_timeout)
        .layer(GlobalConcurrencyLimitLayer::new(state.concurrency_limit));

    Router::new()
        .merge(routes.clone())
        .nest("/api", routes)
        .layer(guard)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn handle_layer_error(err: BoxError) -> ApiError {
    if err.is::<Elapsed>() {
        ApiError::Timeout
    } else {
        ApiError::Internal(format!("middleware failure: {err}"))
    }
}
