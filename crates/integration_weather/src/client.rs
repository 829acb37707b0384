//! Open-Meteo weather client
//!
//! HTTP client for the Open-Meteo Forecast and Geocoding APIs. Requests
//! exactly the six variables the classifier consumes and converts them to
//! training units on the way in, so the rest of the system never sees the
//! provider's schema.

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use domain::{FeatureVector, GeoLocation, Humidity, Pressure};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument};

use crate::models::{
    CurrentConditions, ForecastResponse, GeocodingResponse, ResolvedCity,
};

/// Metres per kilometre, for visibility conversion
const METRES_PER_KM: f64 = 1000.0;

/// Hectopascals per kilopascal, for pressure conversion
const HPA_PER_KPA: f64 = 10.0;

/// Weather client errors
#[derive(Debug, Error)]
pub enum WeatherError {
    /// Connection to the weather service failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Request to the weather service failed
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Failed to parse response from weather service
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Invalid coordinates provided
    #[error("Invalid coordinates: latitude must be -90 to 90, longitude must be -180 to 180")]
    InvalidCoordinates,

    /// Geocoding returned no match for the requested name
    #[error("City not found: {0}")]
    CityNotFound(String),

    /// Service is temporarily unavailable
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,
}

/// Weather service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// Open-Meteo forecast API base URL (default: <https://api.open-meteo.com/v1>)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Open-Meteo geocoding API base URL
    /// (default: <https://geocoding-api.open-meteo.com/v1>)
    #[serde(default = "default_geocoding_url")]
    pub geocoding_url: String,

    /// Connection timeout in seconds (default: 30)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "https://api.open-meteo.com/v1".to_string()
}

fn default_geocoding_url() -> String {
    "https://geocoding-api.open-meteo.com/v1".to_string()
}

const fn default_timeout() -> u64 {
    30
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            geocoding_url: default_geocoding_url(),
            timeout_secs: default_timeout(),
        }
    }
}

/// Weather client trait for fetching weather data
#[async_trait]
pub trait WeatherClient: Send + Sync {
    /// Get current conditions for a location, in training units
    async fn get_current(
        &self,
        location: &GeoLocation,
    ) -> Result<CurrentConditions, WeatherError>;

    /// Resolve a city name to coordinates
    async fn resolve_city(&self, name: &str) -> Result<ResolvedCity, WeatherError>;

    /// Check if the weather service is healthy
    async fn is_healthy(&self) -> bool;
}

/// Open-Meteo HTTP client implementation
#[derive(Debug)]
pub struct OpenMeteoClient {
    client: Client,
    config: WeatherConfig,
}

impl OpenMeteoClient {
    /// Create a new Open-Meteo client with the given configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: WeatherConfig) -> Result<Self, WeatherError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| WeatherError::ConnectionFailed(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Create a new client with default configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn with_defaults() -> Result<Self, WeatherError> {
        Self::new(WeatherConfig::default())
    }

    /// Build the API URL for a current-conditions request
    ///
    /// Asks for exactly the model's six variables, nothing more.
    fn build_current_url(&self, location: &GeoLocation) -> String {
        format!(
            "{}/forecast?latitude={}&longitude={}&current={}&timezone=auto",
            self.config.base_url,
            location.latitude(),
            location.longitude(),
            "temperature_2m,dew_point_2m,relative_humidity_2m,wind_speed_10m,\
             visibility,surface_pressure",
        )
    }

    /// Convert the API's current block into training units
    fn parse_current_conditions(
        data: &crate::models::CurrentData,
    ) -> Result<CurrentConditions, WeatherError> {
        let observed_at = Self::parse_datetime(&data.time)?;

        let visibility_km = data
            .visibility
            .ok_or_else(|| {
                WeatherError::ParseError("No visibility in current weather data".to_string())
            })?
            / METRES_PER_KM;

        let humidity =
            Humidity::clamped(data.relative_humidity_2m.round().clamp(0.0, 100.0) as u8);

        Ok(CurrentConditions {
            observed_at,
            features: FeatureVector {
                temperature_c: data.temperature_2m,
                dew_point_c: data.dew_point_2m,
                humidity,
                wind_speed_kmh: data.wind_speed_10m,
                visibility_km,
                pressure: Pressure::clamped(data.surface_pressure / HPA_PER_KPA),
            },
        })
    }

    /// Parse datetime string to `DateTime<Utc>`
    fn parse_datetime(s: &str) -> Result<DateTime<Utc>, WeatherError> {
        // Try ISO 8601 format first (2026-02-05T14:00)
        if let Ok(dt) = chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M") {
            return Ok(Utc.from_utc_datetime(&dt));
        }

        // Try with seconds
        if let Ok(dt) = chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
            return Ok(Utc.from_utc_datetime(&dt));
        }

        // Try RFC 3339
        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Ok(dt.with_timezone(&Utc));
        }

        Err(WeatherError::ParseError(format!(
            "Invalid datetime format: {s}"
        )))
    }

    fn check_status(status: reqwest::StatusCode) -> Result<(), WeatherError> {
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(WeatherError::RateLimitExceeded);
        }
        if status.is_server_error() {
            return Err(WeatherError::ServiceUnavailable(format!("HTTP {status}")));
        }
        if !status.is_success() {
            return Err(WeatherError::RequestFailed(format!("HTTP {status}")));
        }
        Ok(())
    }
}

#[async_trait]
impl WeatherClient for OpenMeteoClient {
    #[instrument(skip(self), fields(location = %location))]
    async fn get_current(
        &self,
        location: &GeoLocation,
    ) -> Result<CurrentConditions, WeatherError> {
        let url = self.build_current_url(location);
        debug!(url = %url, "Fetching current conditions");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| WeatherError::RequestFailed(e.to_string()))?;

        Self::check_status(response.status())?;

        let api_response: ForecastResponse = response
            .json()
            .await
            .map_err(|e| WeatherError::ParseError(e.to_string()))?;

        let current = api_response.current.ok_or_else(|| {
            WeatherError::ParseError("No current weather data in response".to_string())
        })?;

        Self::parse_current_conditions(&current)
    }

    #[instrument(skip(self))]
    async fn resolve_city(&self, name: &str) -> Result<ResolvedCity, WeatherError> {
        let url = format!("{}/search", self.config.geocoding_url);
        debug!(url = %url, city = %name, "Geocoding city");

        let response = self
            .client
            .get(&url)
            .query(&[("name", name), ("count", "1")])
            .send()
            .await
            .map_err(|e| WeatherError::RequestFailed(e.to_string()))?;

        Self::check_status(response.status())?;

        let api_response: GeocodingResponse = response
            .json()
            .await
            .map_err(|e| WeatherError::ParseError(e.to_string()))?;

        let hit = api_response
            .results
            .and_then(|mut results| {
                if results.is_empty() {
                    None
                } else {
                    Some(results.remove(0))
                }
            })
            .ok_or_else(|| WeatherError::CityNotFound(name.to_string()))?;

        let location = GeoLocation::new(hit.latitude, hit.longitude)
            .map_err(|_| WeatherError::InvalidCoordinates)?;

        Ok(ResolvedCity {
            name: hit.name,
            location,
            country: hit.country,
        })
    }

    async fn is_healthy(&self) -> bool {
        // Simple health check using Berlin coordinates
        let berlin = GeoLocation::new_unchecked(52.52, 13.41);
        self.get_current(&berlin).await.is_ok()
    }
}
