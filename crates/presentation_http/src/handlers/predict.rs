//! Prediction handler
//!
//! POST /v1/predict takes the six training features as JSON and returns
//! the predicted label with the full probability distribution.

use axum::{Json, extract::State};
use domain::{FeatureVector, Humidity, Prediction, Pressure};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::{error::ApiError, state::AppState};

/// Request body for a prediction
#[derive(Debug, Clone, Deserialize)]
pub struct PredictRequest {
    /// Air temperature in degrees Celsius
    pub temperature_c: f64,
    /// Dew point temperature in degrees Celsius
    pub dew_point_c: f64,
    /// Relative humidity in percent, clamped to [0, 100]
    pub humidity: f64,
    /// Wind speed in km/h, must be non-negative
    pub wind_speed_kmh: f64,
    /// Visibility in km, must be non-negative
    pub visibility_km: f64,
    /// Station pressure in kPa, clamped to the plausible range
    pub pressure_kpa: f64,
}

/// One class with its probability
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbabilityEntry {
    pub label: String,
    pub probability: f64,
}

/// Response body for a prediction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictResponse {
    /// Predicted weather condition
    pub label: String,
    /// Probability of the predicted condition
    pub confidence: f64,
    /// Probability for every condition the model knows
    pub probabilities: Vec<ProbabilityEntry>,
}

impl From<Prediction> for PredictResponse {
    fn from(prediction: Prediction) -> Self {
        Self {
            label: prediction.label.clone(),
            confidence: prediction.confidence(),
            probabilities: prediction
                .probabilities
                .into_iter()
                .map(|(label, probability)| ProbabilityEntry { label, probability })
                .collect(),
        }
    }
}

impl PredictRequest {
    /// Validate the request and assemble a feature vector
    ///
    /// Humidity and pressure are clamped the way training data was;
    /// negative wind speed or visibility is physically meaningless and
    /// rejected instead.
    pub fn into_features(self) -> Result<FeatureVector, ApiError> {
        let fields = [
            ("temperature_c", self.temperature_c),
            ("dew_point_c", self.dew_point_c),
            ("humidity", self.humidity),
            ("wind_speed_kmh", self.wind_speed_kmh),
            ("visibility_km", self.visibility_km),
            ("pressure_kpa", self.pressure_kpa),
        ];
        for (name, value) in fields {
            if !value.is_finite() {
                return Err(ApiError::BadRequest(format!("{name} must be a finite number")));
            }
        }
        if self.wind_speed_kmh < 0.0 {
            return Err(ApiError::BadRequest(
                "wind_speed_kmh must be non-negative".to_string(),
            ));
        }
        if self.visibility_km < 0.0 {
            return Err(ApiError::BadRequest(
                "visibility_km must be non-negative".to_string(),
            ));
        }

        Ok(FeatureVector {
            temperature_c: self.temperature_c,
            dew_point_c: self.dew_point_c,
            humidity: Humidity::clamped(self.humidity.round().clamp(0.0, 100.0) as u8),
            wind_speed_kmh: self.wind_speed_kmh,
            visibility_km: self.visibility_km,
            pressure: Pressure::clamped(self.pressure_kpa),
        })
    }
}

/// Classify one set of conditions
///
/// POST /v1/predict
#[instrument(skip(state, request))]
pub async fn predict(
    State(state): State<AppState>,
    Json(request): Json<PredictRequest>,
) -> Result<Json<PredictResponse>, ApiError> {
    let features = request.into_features()?;
    let prediction = state.predictor.predict(&features)?;
    Ok(Json(PredictResponse::from(prediction)))
}
