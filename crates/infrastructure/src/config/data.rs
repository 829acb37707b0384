//! Dataset and artifact location configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Where the training data lives and where artifacts go
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// Path to the training CSV
    #[serde(default = "default_dataset_path")]
    pub dataset_path: PathBuf,

    /// Directory the artifact pair is written to
    #[serde(default = "default_artifacts_dir")]
    pub artifacts_dir: PathBuf,

    /// Model artifact filename
    #[serde(default = "default_model_file")]
    pub model_file: String,

    /// Encoder artifact filename
    #[serde(default = "default_encoders_file")]
    pub encoders_file: String,
}

fn default_dataset_path() -> PathBuf {
    PathBuf::from("data/weather.csv")
}

fn default_artifacts_dir() -> PathBuf {
    PathBuf::from("artifacts")
}

fn default_model_file() -> String {
    "weather_model.bin".to_string()
}

fn default_encoders_file() -> String {
    "weather_encoders.bin".to_string()
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            dataset_path: default_dataset_path(),
            artifacts_dir: default_artifacts_dir(),
            model_file: default_model_file(),
            encoders_file: default_encoders_file(),
        }
    }
}

impl DataConfig {
    /// Full path of the model artifact
    #[must_use]
    pub fn model_path(&self) -> PathBuf {
        self.artifacts_dir.join(&self.model_file)
    }

    /// Full path of the encoder artifact
    #[must_use]
    pub fn encoders_path(&self) -> PathBuf {
        self.artifacts_dir.join(&self.encoders_file)
    }

    /// A copy pointing at a different artifacts directory
    #[must_use]
    pub fn with_artifacts_dir(mut self, dir: &Path) -> Self {
        self.artifacts_dir = dir.to_path_buf();
        self
    }
}
