//! Artifact store port
//!
//! Defines the interface for persisting and reloading a trained model
//! together with its label encoder.

use std::collections::BTreeMap;

use async_trait::async_trait;
use domain::{DomainError, LABEL_COLUMN, LabelEncoder};
use ml_core::RandomForest;
#[cfg(test)]
use mockall::automock;
use serde::{Deserialize, Serialize};

use crate::error::ApplicationError;

/// A trained forest and the encoders it was trained with
///
/// The two halves are only meaningful together; the store persists them as
/// separate files but they travel through the application as one unit. The
/// encoder map is keyed by target column name and today holds the single
/// `"Weather"` entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelArtifacts {
    /// The fitted ensemble
    pub forest: RandomForest,
    /// Target column name → fitted encoder
    pub encoders: BTreeMap<String, LabelEncoder>,
}

impl ModelArtifacts {
    /// Bundle a forest with the encoder for the condition label
    #[must_use]
    pub fn new(forest: RandomForest, encoder: LabelEncoder) -> Self {
        let mut encoders = BTreeMap::new();
        encoders.insert(LABEL_COLUMN.to_string(), encoder);
        Self { forest, encoders }
    }

    /// The encoder for the condition label
    ///
    /// # Errors
    ///
    /// Fails when the encoder map lacks the `"Weather"` entry, which means
    /// the artifacts on disk were not produced by this trainer.
    pub fn encoder(&self) -> Result<&LabelEncoder, ApplicationError> {
        self.encoders.get(LABEL_COLUMN).ok_or_else(|| {
            ApplicationError::Internal(format!(
                "encoder map is missing the '{LABEL_COLUMN}' entry"
            ))
        })
    }

    /// Verify the two halves belong to the same training run
    ///
    /// # Errors
    ///
    /// Fails when the forest's class count disagrees with the encoder
    /// vocabulary, which means the files were mixed from different runs.
    pub fn validate(&self) -> Result<(), ApplicationError> {
        let encoder = self.encoder()?;
        if self.forest.n_classes() != encoder.len() {
            return Err(DomainError::MismatchedArtifacts {
                model_classes: self.forest.n_classes(),
                encoder_classes: encoder.len(),
            }
            .into());
        }
        Ok(())
    }
}

/// Port for persisting and loading the trained artifact pair
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ArtifactStorePort: Send + Sync {
    /// Persist both artifacts atomically with respect to each file
    async fn save(&self, artifacts: &ModelArtifacts) -> Result<(), ApplicationError>;

    /// Load both artifacts from their configured locations
    async fn load(&self) -> Result<ModelArtifacts, ApplicationError>;

    /// Whether both artifact files currently exist
    async fn exists(&self) -> bool;
}

#[cfg(test)]
mod tests {
    use domain::{FEATURE_COUNT, LabelEncoder};
    use ml_core::{ForestConfig, RandomForest};
    use ndarray::{Array1, Array2};

    use super::*;

    fn assert_send_sync<T: Send + Sync + ?Sized>() {}

    #[test]
    fn trait_is_send_sync() {
        assert_send_sync::<dyn ArtifactStorePort>();
    }

    fn tiny_forest(n_classes: usize) -> RandomForest {
        let rows = n_classes * 3;
        let mut x = Array2::<f64>::zeros((rows, FEATURE_COUNT));
        let mut y = Array1::<usize>::zeros(rows);
        for i in 0..rows {
            let class = i % n_classes;
            x[[i, 0]] = class as f64 * 10.0;
            y[i] = class;
        }
        let config = ForestConfig {
            n_trees: 3,
            ..ForestConfig::default()
        };
        RandomForest::fit(config, &x, &y, n_classes).unwrap()
    }

    #[test]
    fn matched_pair_validates() {
        let encoder = LabelEncoder::fit(["Clear", "Rain"]).unwrap();
        let artifacts = ModelArtifacts::new(tiny_forest(2), encoder);
        assert!(artifacts.validate().is_ok());
    }

    #[test]
    fn mismatched_pair_is_rejected() {
        let encoder = LabelEncoder::fit(["Clear", "Fog", "Rain"]).unwrap();
        let artifacts = ModelArtifacts::new(tiny_forest(2), encoder);
        let err = artifacts.validate().unwrap_err();
        assert!(matches!(
            err,
            ApplicationError::Domain(DomainError::MismatchedArtifacts {
                model_classes: 2,
                encoder_classes: 3,
            })
        ));
    }

    #[test]
    fn missing_weather_entry_is_rejected() {
        let encoder = LabelEncoder::fit(["Clear", "Rain"]).unwrap();
        let mut artifacts = ModelArtifacts::new(tiny_forest(2), encoder);
        artifacts.encoders.clear();
        assert!(artifacts.encoder().is_err());
    }
}
