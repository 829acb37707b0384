//! Live observation port
//!
//! Defines the interface for fetching current conditions for a city in
//! the exact schema the classifier was trained on.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use domain::{FeatureVector, value_objects::GeoLocation};
#[cfg(test)]
use mockall::automock;
use serde::{Deserialize, Serialize};

use crate::error::ApplicationError;

/// Current conditions for a resolved city, in training units
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiveConditions {
    /// Resolved place name, e.g. "Toronto"
    pub city: String,
    /// Coordinates the conditions were fetched for
    pub location: GeoLocation,
    /// Measurements converted to the training schema
    pub features: FeatureVector,
    /// When the provider observed this data
    pub observed_at: DateTime<Utc>,
}

/// Port for live weather retrieval
#[cfg_attr(test, automock)]
#[async_trait]
pub trait LiveObservationPort: Send + Sync {
    /// Geocode a city name and fetch its current conditions
    async fn current_conditions(&self, city: &str) -> Result<LiveConditions, ApplicationError>;

    /// Check if the provider is reachable
    async fn is_available(&self) -> bool;
}
