//! Open-Meteo API response models and their parsed forms
//!
//! The wire types mirror the JSON the APIs actually return; the public
//! types carry the data onward in training units (visibility in km,
//! pressure in kPa).

use chrono::{DateTime, Utc};
use domain::{FeatureVector, GeoLocation};
use serde::{Deserialize, Serialize};

/// Forecast API response envelope
///
/// Only the `current` block is read; the coordinate echo and metadata the
/// API also returns are ignored.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ForecastResponse {
    pub current: Option<CurrentData>,
}

/// The `current` block of a forecast response
///
/// Units as delivered by the API: temperatures in °C, humidity in %,
/// wind speed in km/h, visibility in metres, pressure in hPa.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct CurrentData {
    pub time: String,
    pub temperature_2m: f64,
    pub dew_point_2m: f64,
    pub relative_humidity_2m: f64,
    pub wind_speed_10m: f64,
    pub visibility: Option<f64>,
    pub surface_pressure: f64,
}

/// Geocoding API response envelope
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct GeocodingResponse {
    pub results: Option<Vec<GeocodingHit>>,
}

/// One match from the geocoding search
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct GeocodingHit {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub country: Option<String>,
}

/// Current conditions in the training measurement schema
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    /// When the provider observed this data
    pub observed_at: DateTime<Utc>,
    /// Measurements converted to training units
    pub features: FeatureVector,
}

/// A geocoded place
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedCity {
    /// Canonical place name as the geocoder knows it
    pub name: String,
    /// Coordinates of the place
    pub location: GeoLocation,
    /// Country name, when the geocoder reports one
    pub country: Option<String>,
}
