//! Bincode artifact store
//!
//! Persists the trained forest and its encoder map as two bincode files.
//! Writes go through a temp file plus rename in the same directory, so a
//! crash mid-write never leaves a truncated artifact behind.

use std::collections::BTreeMap;
use std::path::Path;

use application::{
    error::ApplicationError,
    ports::{ArtifactStorePort, ModelArtifacts},
};
use async_trait::async_trait;
use domain::LabelEncoder;
use ml_core::RandomForest;
use tracing::{info, instrument};

use crate::config::DataConfig;

/// Stores the artifact pair under the configured artifacts directory
#[derive(Debug, Clone)]
pub struct BincodeArtifactStore {
    config: DataConfig,
}

impl BincodeArtifactStore {
    /// Create a store over the configured artifact locations
    #[must_use]
    pub const fn new(config: DataConfig) -> Self {
        Self { config }
    }

    fn encode<T: serde::Serialize>(value: &T) -> Result<Vec<u8>, ApplicationError> {
        bincode::serde::encode_to_vec(value, bincode::config::standard())
            .map_err(|e| ApplicationError::Internal(format!("cannot encode artifact: {e}")))
    }

    fn decode<T: serde::de::DeserializeOwned>(
        bytes: &[u8],
        path: &Path,
    ) -> Result<T, ApplicationError> {
        bincode::serde::decode_from_slice(bytes, bincode::config::standard())
            .map(|(value, _)| value)
            .map_err(|e| {
                ApplicationError::Internal(format!(
                    "cannot decode artifact {}: {e}",
                    path.display()
                ))
            })
    }

    fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), ApplicationError> {
        let io_err = |e: std::io::Error| {
            ApplicationError::Internal(format!("cannot write {}: {e}", path.display()))
        };

        // The temp file lives next to the target so the rename stays on
        // one filesystem.
        let mut tmp = path.as_os_str().to_owned();
        tmp.push(".tmp");
        std::fs::write(&tmp, bytes).map_err(io_err)?;
        std::fs::rename(&tmp, path).map_err(io_err)
    }

    fn read(path: &Path) -> Result<Vec<u8>, ApplicationError> {
        if !path.exists() {
            return Err(ApplicationError::ArtifactsMissing(
                path.display().to_string(),
            ));
        }
        std::fs::read(path).map_err(|e| {
            ApplicationError::Internal(format!("cannot read {}: {e}", path.display()))
        })
    }
}

#[async_trait]
impl ArtifactStorePort for BincodeArtifactStore {
    #[instrument(skip(self, artifacts))]
    async fn save(&self, artifacts: &ModelArtifacts) -> Result<(), ApplicationError> {
        std::fs::create_dir_all(&self.config.artifacts_dir).map_err(|e| {
            ApplicationError::Internal(format!(
                "cannot create {}: {e}",
                self.config.artifacts_dir.display()
            ))
        })?;

        let model_bytes = Self::encode(&artifacts.forest)?;
        let encoder_bytes = Self::encode(&artifacts.encoders)?;

        Self::write_atomic(&self.config.model_path(), &model_bytes)?;
        Self::write_atomic(&self.config.encoders_path(), &encoder_bytes)?;

        info!(
            model = %self.config.model_path().display(),
            encoders = %self.config.encoders_path().display(),
            "Artifacts saved"
        );
        Ok(())
    }

    #[instrument(skip(self))]
    async fn load(&self) -> Result<ModelArtifacts, ApplicationError> {
        let model_path = self.config.model_path();
        let encoders_path = self.config.encoders_path();

        let forest: RandomForest = Self::decode(&Self::read(&model_path)?, &model_path)?;
        let encoders: BTreeMap<String, LabelEncoder> =
            Self::decode(&Self::read(&encoders_path)?, &encoders_path)?;

        Ok(ModelArtifacts { forest, encoders })
    }

    async fn exists(&self) -> bool {
        self.config.model_path().exists() && self.config.encoders_path().exists()
    }
}
