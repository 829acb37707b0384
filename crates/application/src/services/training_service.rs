//! Training service - Fit and persist the classifier
//!
//! Orchestrates one training run: load observations, drop multi-condition
//! rows, fit the encoder and the forest, evaluate on a held-out split, and
//! persist the artifact pair through the store port.

use std::{fmt, path::Path, sync::Arc};

use domain::{FEATURE_COUNT, LabelEncoder, Observation};
use ml_core::{ClassificationReport, ForestConfig, RandomForest, train_test_split};
use ndarray::{Array1, Array2};
use tracing::{info, instrument, warn};

use crate::{
    error::ApplicationError,
    ports::{ArtifactStorePort, DatasetPort, ModelArtifacts},
};

/// Knobs for one training run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrainingConfig {
    /// Fraction of rows held out for evaluation
    pub test_fraction: f64,
    /// Seed for the train/test shuffle
    pub split_seed: u64,
    /// Forest hyperparameters
    pub forest: ForestConfig,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            test_fraction: 0.25,
            split_seed: 42,
            forest: ForestConfig::default(),
        }
    }
}

/// What one training run produced
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingOutcome {
    /// Held-out evaluation of the fitted model
    pub report: ClassificationReport,
    /// Rows that entered training after cleaning
    pub rows_used: usize,
    /// Rows dropped for carrying a multi-condition label
    pub rows_dropped: usize,
    /// Fitted vocabulary in class-code order
    pub classes: Vec<String>,
}

/// Service for fitting and persisting the classifier
pub struct TrainingService {
    dataset: Arc<dyn DatasetPort>,
    store: Arc<dyn ArtifactStorePort>,
    config: TrainingConfig,
}

impl fmt::Debug for TrainingService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrainingService")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl TrainingService {
    /// Create a training service with default hyperparameters
    pub fn new(dataset: Arc<dyn DatasetPort>, store: Arc<dyn ArtifactStorePort>) -> Self {
        Self::with_config(dataset, store, TrainingConfig::default())
    }

    /// Create a training service with explicit hyperparameters
    pub fn with_config(
        dataset: Arc<dyn DatasetPort>,
        store: Arc<dyn ArtifactStorePort>,
        config: TrainingConfig,
    ) -> Self {
        Self {
            dataset,
            store,
            config,
        }
    }

    /// Run one full training pass over the dataset at `path`
    ///
    /// Nothing is written unless every step up to persistence succeeds, so
    /// a failed run never clobbers an existing artifact pair.
    #[instrument(skip(self), fields(path = %path.display()))]
    pub async fn train(&self, path: &Path) -> Result<TrainingOutcome, ApplicationError> {
        let observations = self.dataset.load_observations(path).await?;
        let total = observations.len();

        let observations: Vec<Observation> = observations
            .into_iter()
            .filter(Observation::has_single_label)
            .collect();
        let rows_dropped = total - observations.len();
        if rows_dropped > 0 {
            warn!(rows_dropped, "Dropped multi-condition rows");
        }

        let encoder = LabelEncoder::fit(observations.iter().map(|o| o.label.as_str()))?;
        let n_classes = encoder.len();

        let (x, y) = Self::to_matrices(&observations, &encoder)?;
        let split = train_test_split(x.nrows(), self.config.test_fraction, self.config.split_seed)?;

        let x_train = x.select(ndarray::Axis(0), &split.train);
        let y_train = Array1::from_iter(split.train.iter().map(|&i| y[i]));
        let forest = RandomForest::fit(self.config.forest, &x_train, &y_train, n_classes)?;

        let mut y_true = Vec::with_capacity(split.test.len());
        let mut y_pred = Vec::with_capacity(split.test.len());
        for &i in &split.test {
            let row = x.row(i);
            let row = row.as_slice().ok_or_else(|| {
                ApplicationError::Internal("feature matrix row is not contiguous".to_string())
            })?;
            let code = forest.predict(row)?;
            y_pred.push(encoder.decode(code)?.to_string());
            y_true.push(encoder.decode(y[i])?.to_string());
        }
        let report = ClassificationReport::compute(&y_true, &y_pred)?;

        info!(
            rows_used = observations.len(),
            rows_dropped,
            n_classes,
            accuracy = report.accuracy,
            "Training run complete"
        );

        let classes = encoder.classes().to_vec();
        let artifacts = ModelArtifacts::new(forest, encoder);
        self.store.save(&artifacts).await?;

        Ok(TrainingOutcome {
            report,
            rows_used: observations.len(),
            rows_dropped,
            classes,
        })
    }

    fn to_matrices(
        observations: &[Observation],
        encoder: &LabelEncoder,
    ) -> Result<(Array2<f64>, Vec<usize>), ApplicationError> {
        let mut x = Array2::<f64>::zeros((observations.len(), FEATURE_COUNT));
        let mut y = Vec::with_capacity(observations.len());
        for (i, obs) in observations.iter().enumerate() {
            let row = obs.features.to_row();
            for (j, value) in row.into_iter().enumerate() {
                x[[i, j]] = value;
            }
            y.push(encoder.encode(&obs.label)?);
        }
        Ok((x, y))
    }
}
