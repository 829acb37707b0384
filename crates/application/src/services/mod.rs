//! Application services

mod live_weather_service;
mod prediction_service;
mod training_service;

pub use live_weather_service::{LivePrediction, LiveWeatherService};
pub use prediction_service::{ModelInfo, PredictionService};
pub use training_service::{TrainingConfig, TrainingOutcome, TrainingService};
