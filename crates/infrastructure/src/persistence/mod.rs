//! Persistence adapters
//!
//! CSV dataset loading and bincode artifact storage.

mod artifact_store;
mod dataset;

pub use artifact_store::BincodeArtifactStore;
pub use dataset::CsvDatasetLoader;
