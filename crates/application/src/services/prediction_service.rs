//! Prediction service - Classify one feature row
//!
//! Holds the loaded artifact pair as immutable shared state. The pair is
//! validated once at load time; after that every prediction is a pure read
//! and safe to run concurrently.

use std::{fmt, sync::Arc};

use domain::{FEATURE_NAMES, FeatureVector, Prediction};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::{
    error::ApplicationError,
    ports::{ArtifactStorePort, ModelArtifacts},
};

/// Static facts about the loaded model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelInfo {
    /// Vocabulary in class-code order
    pub classes: Vec<String>,
    /// Number of trees in the ensemble
    pub n_trees: usize,
    /// Feature column names in training order
    pub feature_names: Vec<String>,
}

/// Service answering prediction requests against a loaded model
#[derive(Clone)]
pub struct PredictionService {
    artifacts: Arc<ModelArtifacts>,
}

impl fmt::Debug for PredictionService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PredictionService")
            .field("n_classes", &self.artifacts.forest.n_classes())
            .finish_non_exhaustive()
    }
}

impl PredictionService {
    /// Load the artifact pair from the store and validate it
    ///
    /// # Errors
    ///
    /// Fails when either artifact is missing or unreadable, or when the
    /// two halves come from different training runs.
    pub async fn load(store: &dyn ArtifactStorePort) -> Result<Self, ApplicationError> {
        let artifacts = store.load().await?;
        Self::from_artifacts(artifacts)
    }

    /// Wrap an already-loaded artifact pair, validating it first
    ///
    /// # Errors
    ///
    /// Fails when the forest and encoder disagree on class count.
    pub fn from_artifacts(artifacts: ModelArtifacts) -> Result<Self, ApplicationError> {
        artifacts.validate()?;
        Ok(Self {
            artifacts: Arc::new(artifacts),
        })
    }

    /// Classify one feature row
    ///
    /// Returns the decoded label plus the full probability distribution,
    /// one entry per trained class in class-code order.
    #[instrument(skip(self))]
    pub fn predict(&self, features: &FeatureVector) -> Result<Prediction, ApplicationError> {
        let encoder = self.artifacts.encoder()?;
        let row = features.to_row();

        let code = self.artifacts.forest.predict(&row)?;
        let proba = self.artifacts.forest.predict_proba(&row)?;
        let label = encoder.decode(code)?.to_string();

        let probabilities = encoder
            .classes()
            .iter()
            .cloned()
            .zip(proba)
            .collect::<Vec<_>>();

        debug!(%label, "Prediction computed");
        Ok(Prediction {
            label,
            probabilities,
        })
    }

    /// Metadata about the loaded model
    ///
    /// # Errors
    ///
    /// Fails when the encoder map lacks the condition-label entry.
    pub fn model_info(&self) -> Result<ModelInfo, ApplicationError> {
        let encoder = self.artifacts.encoder()?;
        Ok(ModelInfo {
            classes: encoder.classes().to_vec(),
            n_trees: self.artifacts.forest.n_trees(),
            feature_names: FEATURE_NAMES.iter().map(|&n| n.to_string()).collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use domain::{Humidity, LabelEncoder, Pressure};
    use ml_core::{ForestConfig, RandomForest};
    use ndarray::{Array1, Array2};

    use super::*;

    // A tiny but real model: cold humid rows are "Rain", warm dry rows
    // are "Clear".
    fn trained_service() -> PredictionService {
        let mut x = Array2::<f64>::zeros((20, 6));
        let mut y = Array1::<usize>::zeros(20);
        for i in 0..20 {
            let rainy = i % 2 == 0;
            let jitter = i as f64 * 0.05;
            if rainy {
                x[[i, 0]] = 10.0 + jitter;
                x[[i, 1]] = 8.0 + jitter;
                x[[i, 2]] = 92.0;
            } else {
                x[[i, 0]] = 26.0 + jitter;
                x[[i, 1]] = 12.0 + jitter;
                x[[i, 2]] = 35.0;
            }
            x[[i, 3]] = 10.0;
            x[[i, 4]] = 10.0;
            x[[i, 5]] = 101.0;
            y[i] = usize::from(rainy); // Clear = 0, Rain = 1 after sorting
        }
        let config = ForestConfig {
            n_trees: 15,
            ..ForestConfig::default()
        };
        let forest = RandomForest::fit(config, &x, &y, 2).unwrap();
        let encoder = LabelEncoder::fit(["Clear", "Rain"]).unwrap();
        PredictionService::from_artifacts(ModelArtifacts::new(forest, encoder)).unwrap()
    }

    fn features(temperature_c: f64, dew_point_c: f64, humidity: u8) -> FeatureVector {
        FeatureVector {
            temperature_c,
            dew_point_c,
            humidity: Humidity::clamped(humidity),
            wind_speed_kmh: 10.0,
            visibility_km: 10.0,
            pressure: Pressure::clamped(101.0),
        }
    }

    #[test]
    fn predicts_a_label_from_the_vocabulary() {
        let service = trained_service();
        let prediction = service.predict(&features(25.0, 20.0, 70)).unwrap();
        assert!(["Clear", "Rain"].contains(&prediction.label.as_str()));
    }

    #[test]
    fn distribution_covers_every_class_and_sums_to_one() {
        let service = trained_service();
        let prediction = service.predict(&features(18.0, 14.0, 60)).unwrap();

        assert_eq!(prediction.probabilities.len(), 2);
        assert!(prediction.is_normalized(1e-9));
        let labels: Vec<&str> = prediction
            .probabilities
            .iter()
            .map(|(l, _)| l.as_str())
            .collect();
        assert_eq!(labels, ["Clear", "Rain"]);
    }

    #[test]
    fn separable_inputs_get_the_expected_label() {
        let service = trained_service();
        assert_eq!(service.predict(&features(10.5, 8.5, 92)).unwrap().label, "Rain");
        assert_eq!(service.predict(&features(26.5, 12.5, 35)).unwrap().label, "Clear");
    }

    #[test]
    fn confidence_matches_the_winning_probability() {
        let service = trained_service();
        let prediction = service.predict(&features(10.0, 8.0, 92)).unwrap();
        let max = prediction
            .probabilities
            .iter()
            .map(|(_, p)| *p)
            .fold(0.0f64, f64::max);
        assert!((prediction.confidence() - max).abs() < 1e-12);
    }

    #[test]
    fn mismatched_pair_is_rejected_at_construction() {
        let service = trained_service();
        let mut artifacts = (*service.artifacts).clone();
        artifacts
            .encoders
            .insert(
                "Weather".to_string(),
                LabelEncoder::fit(["Clear", "Fog", "Rain"]).unwrap(),
            );
        assert!(PredictionService::from_artifacts(artifacts).is_err());
    }

    #[test]
    fn model_info_reports_schema_and_vocabulary() {
        let service = trained_service();
        let info = service.model_info().unwrap();
        assert_eq!(info.classes, ["Clear", "Rain"]);
        assert_eq!(info.n_trees, 15);
        assert_eq!(info.feature_names.len(), 6);
        assert_eq!(info.feature_names[0], "Temp_C");
    }
}
