//! Live weather service - Fetch current conditions and classify them
//!
//! Glues the live observation port to the prediction service: the fetcher
//! already delivers measurements in the training schema, so the model
//! consumes them directly.

use std::{fmt, sync::Arc};

use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::{
    error::ApplicationError,
    ports::{LiveConditions, LiveObservationPort},
    services::PredictionService,
};
use domain::Prediction;

/// A live fetch plus the model's verdict on it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LivePrediction {
    /// What was fetched, and for where
    pub conditions: LiveConditions,
    /// What the model made of it
    pub prediction: Prediction,
}

/// Service classifying current conditions for a named city
pub struct LiveWeatherService {
    source: Arc<dyn LiveObservationPort>,
    predictor: Arc<PredictionService>,
}

impl fmt::Debug for LiveWeatherService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LiveWeatherService").finish_non_exhaustive()
    }
}

impl LiveWeatherService {
    /// Create a live weather service
    pub fn new(source: Arc<dyn LiveObservationPort>, predictor: Arc<PredictionService>) -> Self {
        Self { source, predictor }
    }

    /// Fetch current conditions for `city` and classify them
    #[instrument(skip(self))]
    pub async fn predict_for_city(&self, city: &str) -> Result<LivePrediction, ApplicationError> {
        let conditions = self.source.current_conditions(city).await?;
        let prediction = self.predictor.predict(&conditions.features)?;

        info!(
            city = %conditions.city,
            label = %prediction.label,
            "Live conditions classified"
        );

        Ok(LivePrediction {
            conditions,
            prediction,
        })
    }

    /// Check if the upstream weather provider is reachable
    pub async fn is_available(&self) -> bool {
        self.source.is_available().await
    }
}
