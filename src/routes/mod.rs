use std::sync::Arc;

use axum::{http::StatusCode, routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::services::recommendations::RecommendationService;

pub mod recommendations;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub recommender: Arc<RecommendationService>,
}

/// Creates the application router with all routes
pub fn create_router(state: AppState) -> Router {
    // Any origin, the usual verbs and headers; the API is read-only
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_check))
        .route("/recommendations", get(recommendations::by_director))
        .route("/movie-recommendations", get(recommendations::by_movie))
        .route("/actor-recommendations", get(recommendations::by_actor))
        .route("/history-recommendations", get(recommendations::by_history))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> StatusCode {
    StatusCode::OK
}
