//! Live weather adapter - Implements `LiveObservationPort` using `integration_weather`

use application::error::ApplicationError;
use application::ports::{LiveConditions, LiveObservationPort};
use async_trait::async_trait;
use integration_weather::{OpenMeteoClient, WeatherClient, WeatherConfig, WeatherError};
use tracing::{debug, instrument};

/// Adapter fetching live conditions through the Open-Meteo client
pub struct LiveWeatherAdapter {
    client: OpenMeteoClient,
}

impl std::fmt::Debug for LiveWeatherAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LiveWeatherAdapter")
            .field("client", &"OpenMeteoClient")
            .finish()
    }
}

impl LiveWeatherAdapter {
    /// Create a new adapter with default configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to initialize.
    pub fn new() -> Result<Self, ApplicationError> {
        Self::with_config(WeatherConfig::default())
    }

    /// Create with custom configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to initialize.
    pub fn with_config(config: WeatherConfig) -> Result<Self, ApplicationError> {
        let client =
            OpenMeteoClient::new(config).map_err(|e| ApplicationError::Internal(e.to_string()))?;
        Ok(Self { client })
    }

    /// Map integration weather error to application error
    fn map_error(err: WeatherError) -> ApplicationError {
        match err {
            WeatherError::ConnectionFailed(e)
            | WeatherError::RequestFailed(e)
            | WeatherError::ServiceUnavailable(e) => ApplicationError::ExternalService(e),
            WeatherError::ParseError(e) => ApplicationError::Internal(e),
            WeatherError::InvalidCoordinates => {
                ApplicationError::InvalidInput("Invalid coordinates".into())
            },
            WeatherError::CityNotFound(city) => ApplicationError::CityNotFound(city),
            WeatherError::RateLimitExceeded => ApplicationError::RateLimited,
        }
    }
}

#[async_trait]
impl LiveObservationPort for LiveWeatherAdapter {
    #[instrument(skip(self))]
    async fn current_conditions(&self, city: &str) -> Result<LiveConditions, ApplicationError> {
        let resolved = self
            .client
            .resolve_city(city)
            .await
            .map_err(Self::map_error)?;
        debug!(city = %resolved.name, location = %resolved.location, "City resolved");

        let conditions = self
            .client
            .get_current(&resolved.location)
            .await
            .map_err(Self::map_error)?;

        Ok(LiveConditions {
            city: resolved.name,
            location: resolved.location,
            features: conditions.features,
            observed_at: conditions.observed_at,
        })
    }

    #[instrument(skip(self))]
    async fn is_available(&self) -> bool {
        self.client.is_healthy().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_creates_adapter() {
        let adapter = LiveWeatherAdapter::new();
        assert!(adapter.is_ok());
    }

    #[test]
    fn debug_impl() {
        let adapter = LiveWeatherAdapter::new().unwrap();
        let debug_str = format!("{adapter:?}");
        assert!(debug_str.contains("LiveWeatherAdapter"));
    }

    #[test]
    fn map_error_city_not_found() {
        let err = WeatherError::CityNotFound("Atlantis".into());
        let app_err = LiveWeatherAdapter::map_error(err);
        assert!(matches!(app_err, ApplicationError::CityNotFound(ref c) if c == "Atlantis"));
    }

    #[test]
    fn map_error_rate_limited() {
        let err = WeatherError::RateLimitExceeded;
        let app_err = LiveWeatherAdapter::map_error(err);
        assert!(matches!(app_err, ApplicationError::RateLimited));
    }

    #[test]
    fn map_error_connection_failed() {
        let err = WeatherError::ConnectionFailed("timeout".into());
        let app_err = LiveWeatherAdapter::map_error(err);
        assert!(matches!(app_err, ApplicationError::ExternalService(_)));
    }

    #[test]
    fn trait_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<LiveWeatherAdapter>();
    }
}
