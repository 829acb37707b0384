//! Prediction form page

use axum::{extract::State, response::Html};
use tracing::instrument;

use crate::{error::ApiError, state::AppState, templates::INDEX_TEMPLATE};

/// Render the prediction form
///
/// GET /
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<Html<String>, ApiError> {
    let info = state.predictor.model_info()?;

    let mut context = tera::Context::new();
    context.insert("classes", &info.classes);
    context.insert("version", env!("CARGO_PKG_VERSION"));

    let html = state
        .templates
        .render(INDEX_TEMPLATE, &context)
        .map_err(|e| ApiError::Internal(format!("Template rendering failed: {e}")))?;
    Ok(Html(html))
}
