//! Port definitions for application layer
//!
//! Ports are interfaces that define how the application interacts with
//! external systems. Adapters in the infrastructure layer implement these ports.

mod artifact_store;
mod dataset_port;
mod observation_source;

#[cfg(test)]
pub use artifact_store::MockArtifactStorePort;
pub use artifact_store::{ArtifactStorePort, ModelArtifacts};
#[cfg(test)]
pub use dataset_port::MockDatasetPort;
pub use dataset_port::DatasetPort;
#[cfg(test)]
pub use observation_source::MockLiveObservationPort;
pub use observation_source::{LiveConditions, LiveObservationPort};
