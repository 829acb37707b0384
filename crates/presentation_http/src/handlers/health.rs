//! Health check handlers

use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};

use crate::{error::ApiError, state::AppState};

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Liveness check - is the server running?
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Readiness response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadinessResponse {
    pub ready: bool,
    pub model: ModelStatus,
    pub live_weather: ServiceStatus,
}

/// Status of the loaded model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelStatus {
    pub loaded: bool,
    pub classes: usize,
}

/// Status of an upstream service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceStatus {
    pub healthy: bool,
}

/// Readiness check - is the server ready to accept requests?
///
/// The model is loaded before the server starts, so readiness hinges on
/// it alone; live weather health is reported but does not gate
/// predictions.
pub async fn readiness_check(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<ReadinessResponse>), ApiError> {
    let info = state.predictor.model_info()?;
    let live_healthy = state.live.is_available().await;

    Ok((
        StatusCode::OK,
        Json(ReadinessResponse {
            ready: true,
            model: ModelStatus {
                loaded: true,
                classes: info.classes.len(),
            },
            live_weather: ServiceStatus {
                healthy: live_healthy,
            },
        }),
    ))
}
