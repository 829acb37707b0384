//! Live prediction handler
//!
//! Fetches current conditions for a city and runs them through the
//! model in one request.

use axum::{
    Json,
    extract::{Path, State},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::{
    error::ApiError,
    handlers::predict::PredictResponse,
    state::AppState,
};

/// Response for a live prediction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LiveResponse {
    /// Resolved city name
    pub city: String,
    /// Resolved latitude
    pub latitude: f64,
    /// Resolved longitude
    pub longitude: f64,
    /// When the conditions were observed
    pub observed_at: DateTime<Utc>,
    /// The fetched conditions in training units
    pub conditions: LiveConditionsBody,
    /// The model's verdict
    pub prediction: PredictResponse,
}

/// Fetched conditions echoed back to the caller
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LiveConditionsBody {
    pub temperature_c: f64,
    pub dew_point_c: f64,
    pub humidity: u8,
    pub wind_speed_kmh: f64,
    pub visibility_km: f64,
    pub pressure_kpa: f64,
}

/// Fetch and classify current conditions for a city
///
/// GET /v1/live/{city}
#[instrument(skip(state))]
pub async fn live_predict(
    State(state): State<AppState>,
    Path(city): Path<String>,
) -> Result<Json<LiveResponse>, ApiError> {
    let city = city.trim();
    if city.is_empty() {
        return Err(ApiError::BadRequest("city must not be empty".to_string()));
    }

    let result = state.live.predict_for_city(city).await?;
    let features = &result.conditions.features;

    Ok(Json(LiveResponse {
        city: result.conditions.city.clone(),
        latitude: result.conditions.location.latitude(),
        longitude: result.conditions.location.longitude(),
        observed_at: result.conditions.observed_at,
        conditions: LiveConditionsBody {
            temperature_c: features.temperature_c,
            dew_point_c: features.dew_point_c,
            humidity: features.humidity.value(),
            wind_speed_kmh: features.wind_speed_kmh,
            visibility_km: features.visibility_km,
            pressure_kpa: features.pressure.as_kpa(),
        },
        prediction: PredictResponse::from(result.prediction),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn live_response_serialization() {
        let resp = LiveResponse {
            city: "Toronto".to_string(),
            latitude: 43.65,
            longitude: -79.38,
            observed_at: Utc::now(),
            conditions: LiveConditionsBody {
                temperature_c: 8.0,
                dew_point_c: 7.5,
                humidity: 98,
                wind_speed_kmh: 4.0,
                visibility_km: 0.4,
                pressure_kpa: 101.2,
            },
            prediction: PredictResponse {
                label: "Fog".to_string(),
                confidence: 0.9,
                probabilities: vec![],
            },
        };
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("Toronto"));
        assert!(json.contains("observed_at"));
        assert!(json.contains("prediction"));
    }
}
