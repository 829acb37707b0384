//! CSV dataset loader
//!
//! Reads historical observations from the training CSV. Columns are
//! located by header name, not position, so extra columns (dates,
//! station identifiers) pass through harmlessly. Rows with missing or
//! unparsable required fields are dropped and counted, never surfaced
//! as errors.

use std::path::{Path, PathBuf};

use application::{error::ApplicationError, ports::DatasetPort};
use async_trait::async_trait;
use csv::StringRecord;
use domain::{FEATURE_COUNT, FEATURE_NAMES, FeatureVector, Humidity, LABEL_COLUMN, Observation, Pressure};
use tracing::{info, instrument, warn};

use crate::config::DataConfig;

/// Loads observations from a headered CSV file
#[derive(Debug, Clone)]
pub struct CsvDatasetLoader {
    config: DataConfig,
}

/// Column indices resolved from the header row
struct ColumnMap {
    features: [usize; FEATURE_COUNT],
    label: usize,
}

impl CsvDatasetLoader {
    /// Create a loader over the configured dataset location
    #[must_use]
    pub const fn new(config: DataConfig) -> Self {
        Self { config }
    }

    fn resolve_columns(headers: &StringRecord) -> Result<ColumnMap, ApplicationError> {
        let position = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim() == name)
                .ok_or_else(|| {
                    ApplicationError::Configuration(format!(
                        "dataset is missing required column '{name}'"
                    ))
                })
        };

        let mut features = [0usize; FEATURE_COUNT];
        for (slot, name) in features.iter_mut().zip(FEATURE_NAMES) {
            *slot = position(name)?;
        }
        Ok(ColumnMap {
            features,
            label: position(LABEL_COLUMN)?,
        })
    }

    /// Parse one record; `None` means the row is dropped
    fn parse_record(record: &StringRecord, columns: &ColumnMap) -> Option<Observation> {
        let mut values = [0.0f64; FEATURE_COUNT];
        for (value, &idx) in values.iter_mut().zip(&columns.features) {
            let field = record.get(idx)?.trim();
            if field.is_empty() {
                return None;
            }
            *value = field.parse().ok()?;
            if !value.is_finite() {
                return None;
            }
        }

        let label = record.get(columns.label)?.trim();
        if label.is_empty() {
            return None;
        }

        let humidity = values[2].round();
        if !(0.0..=f64::from(Humidity::MAX)).contains(&humidity) {
            return None;
        }

        Some(Observation {
            features: FeatureVector {
                temperature_c: values[0],
                dew_point_c: values[1],
                humidity: Humidity::clamped(humidity as u8),
                wind_speed_kmh: values[3],
                visibility_km: values[4],
                pressure: Pressure::clamped(values[5]),
            },
            label: label.to_string(),
        })
    }
}

#[async_trait]
impl DatasetPort for CsvDatasetLoader {
    #[instrument(skip(self), fields(path = %path.display()))]
    async fn load_observations(&self, path: &Path) -> Result<Vec<Observation>, ApplicationError> {
        if !path.exists() {
            return Err(ApplicationError::InvalidInput(format!(
                "dataset not found: {}",
                path.display()
            )));
        }

        let mut reader = csv::Reader::from_path(path)
            .map_err(|e| ApplicationError::Internal(format!("cannot open dataset: {e}")))?;
        let headers = reader
            .headers()
            .map_err(|e| ApplicationError::Internal(format!("cannot read header row: {e}")))?
            .clone();
        let columns = Self::resolve_columns(&headers)?;

        let mut observations = Vec::new();
        let mut dropped = 0usize;
        for record in reader.records() {
            let record =
                record.map_err(|e| ApplicationError::Internal(format!("cannot read row: {e}")))?;
            match Self::parse_record(&record, &columns) {
                Some(obs) => observations.push(obs),
                None => dropped += 1,
            }
        }

        if dropped > 0 {
            warn!(dropped, "Dropped rows with missing or unparsable fields");
        }
        info!(rows = observations.len(), "Dataset loaded");
        Ok(observations)
    }

    fn default_path(&self) -> PathBuf {
        self.config.dataset_path.clone()
    }
}
