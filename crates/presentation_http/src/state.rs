//! Application state shared across handlers

use std::sync::Arc;

use application::{LiveWeatherService, PredictionService};
use tera::Tera;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Prediction service over the loaded artifact pair
    pub predictor: Arc<PredictionService>,
    /// Live fetch-and-classify service
    pub live: Arc<LiveWeatherService>,
    /// Template engine for the form page
    pub templates: Arc<Tera>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("predictor", &self.predictor)
            .finish_non_exhaustive()
    }
}
