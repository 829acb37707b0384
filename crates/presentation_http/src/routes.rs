//! Route definitions

use axum::{
    Router,
    routing::{get, post},
};

use crate::{handlers, state::AppState};

/// Create the main router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Form page
        .route("/", get(handlers::form::index))
        // Health and status endpoints
        .route("/health", get(handlers::health::health_check))
        .route("/ready", get(handlers::health::readiness_check))
        // Prediction API (v1)
        .route("/v1/predict", post(handlers::predict::predict))
        .route("/v1/model", get(handlers::model::model_info))
        .route("/v1/live/{city}", get(handlers::live::live_predict))
        // Attach state
        .with_state(state)
}
