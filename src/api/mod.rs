pub mod routes;

use crate::middleware::request_logging_simple;
use crate::AppState;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(routes::health))
        .route("/predictions/generate", post(routes::generate_predictions))
        .route("/markets", get(routes::list_markets))
        .route("/predictions", get(routes::list_predictions))
        .route("/signals", get(routes::list_signals))
        .route("/trades", get(routes::list_trades))
        .route("/portfolio/latest", get(routes::latest_portfolio))
        .layer(axum::middleware::from_fn(request_logging_simple))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
