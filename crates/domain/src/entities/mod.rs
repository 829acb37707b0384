//! Domain entities

mod label_encoder;
mod observation;
mod prediction;

pub use label_encoder::LabelEncoder;
pub use observation::{FEATURE_COUNT, FEATURE_NAMES, FeatureVector, LABEL_COLUMN, Observation};
pub use prediction::Prediction;
