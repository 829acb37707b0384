//! Model metadata handler

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::{error::ApiError, state::AppState};

/// Model metadata response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelResponse {
    /// Conditions the model can predict, in class-code order
    pub classes: Vec<String>,
    /// Number of trees in the ensemble
    pub n_trees: usize,
    /// Input columns in training order
    pub feature_names: Vec<String>,
}

/// Describe the loaded model
///
/// GET /v1/model
pub async fn model_info(State(state): State<AppState>) -> Result<Json<ModelResponse>, ApiError> {
    let info = state.predictor.model_info()?;
    Ok(Json(ModelResponse {
        classes: info.classes,
        n_trees: info.n_trees,
        feature_names: info.feature_names,
    }))
}
