//! Dataset port
//!
//! Defines the interface for loading historical observations. The CSV
//! adapter in infrastructure implements it; tests mock it.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use domain::Observation;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for reading a labelled observation dataset
#[cfg_attr(test, automock)]
#[async_trait]
pub trait DatasetPort: Send + Sync {
    /// Load all parseable observations from `path`
    ///
    /// Rows with missing or unparsable required fields are dropped, not
    /// surfaced as errors; a missing file is an error.
    async fn load_observations(&self, path: &Path) -> Result<Vec<Observation>, ApplicationError>;

    /// Default dataset location from configuration
    fn default_path(&self) -> PathBuf;
}
