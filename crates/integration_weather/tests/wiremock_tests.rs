//! Integration tests for the weather client using wiremock
//!
//! These tests verify the client's behavior against a mock HTTP server,
//! ensuring proper handling of various response scenarios.

use domain::GeoLocation;
use integration_weather::{OpenMeteoClient, WeatherClient, WeatherConfig, WeatherError};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param},
};

/// Sample Open-Meteo forecast response for testing
fn sample_current_response() -> serde_json::Value {
    serde_json::json!({
        "latitude": 43.65,
        "longitude": -79.38,
        "generationtime_ms": 0.123,
        "utc_offset_seconds": -18000,
        "timezone": "America/Toronto",
        "timezone_abbreviation": "EST",
        "elevation": 76.0,
        "current_units": {
            "time": "iso8601",
            "temperature_2m": "°C",
            "dew_point_2m": "°C",
            "relative_humidity_2m": "%",
            "wind_speed_10m": "km/h",
            "visibility": "m",
            "surface_pressure": "hPa"
        },
        "current": {
            "time": "2024-01-15T12:00",
            "temperature_2m": 5.5,
            "dew_point_2m": 2.0,
            "relative_humidity_2m": 75,
            "wind_speed_10m": 12.5,
            "visibility": 24100.0,
            "surface_pressure": 1013.25
        }
    })
}

/// Sample geocoding response for testing
fn sample_geocoding_response() -> serde_json::Value {
    serde_json::json!({
        "results": [
            {
                "id": 6167865,
                "name": "Toronto",
                "latitude": 43.70011,
                "longitude": -79.4163,
                "country": "Canada",
                "admin1": "Ontario"
            }
        ],
        "generationtime_ms": 0.5
    })
}

/// Create a test client configured to use the mock server
///
/// # Panics
///
/// Panics if the client cannot be created (should not happen in tests).
fn create_test_client(mock_server: &MockServer) -> OpenMeteoClient {
    let config = WeatherConfig {
        base_url: mock_server.uri(),
        geocoding_url: mock_server.uri(),
        timeout_secs: 5,
    };
    #[allow(clippy::expect_used)]
    OpenMeteoClient::new(config).expect("Failed to create client")
}

/// Setup a mock for the /forecast endpoint with the given response
async fn setup_forecast_mock(mock_server: &MockServer, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path("/forecast"))
        .respond_with(response)
        .mount(mock_server)
        .await;
}

fn toronto() -> GeoLocation {
    GeoLocation::new_unchecked(43.65, -79.38)
}

// ============================================================================
// Success scenarios
// ============================================================================

#[tokio::test]
async fn test_get_current_conditions_success() {
    let mock_server = MockServer::start().await;

    setup_forecast_mock(
        &mock_server,
        ResponseTemplate::new(200).set_body_json(sample_current_response()),
    )
    .await;

    let client = create_test_client(&mock_server);
    let result = client.get_current(&toronto()).await;

    assert!(result.is_ok(), "Expected success, got: {result:?}");

    let conditions = result.unwrap();
    let f = conditions.features;
    assert!((f.temperature_c - 5.5).abs() < 0.1);
    assert!((f.dew_point_c - 2.0).abs() < 0.1);
    assert_eq!(f.humidity.value(), 75);
    assert!((f.wind_speed_kmh - 12.5).abs() < 0.1);
    // Visibility arrives in metres and must come out in kilometres.
    assert!((f.visibility_km - 24.1).abs() < 0.01);
    // Pressure arrives in hPa and must come out in kPa.
    assert!((f.pressure.as_kpa() - 101.325).abs() < 0.001);
}

#[tokio::test]
async fn test_resolve_city_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("name", "Toronto"))
        .and(query_param("count", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_geocoding_response()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let result = client.resolve_city("Toronto").await;

    assert!(result.is_ok(), "Expected success, got: {result:?}");

    let city = result.unwrap();
    assert_eq!(city.name, "Toronto");
    assert_eq!(city.country.as_deref(), Some("Canada"));
    assert!((city.location.latitude() - 43.70011).abs() < 0.001);
}

#[tokio::test]
async fn test_health_check_success() {
    let mock_server = MockServer::start().await;

    setup_forecast_mock(
        &mock_server,
        ResponseTemplate::new(200).set_body_json(sample_current_response()),
    )
    .await;

    let client = create_test_client(&mock_server);
    let is_healthy = client.is_healthy().await;

    assert!(is_healthy, "Expected health check to succeed");
}

// ============================================================================
// Error handling scenarios
// ============================================================================

#[tokio::test]
async fn test_server_error_returns_service_unavailable() {
    let mock_server = MockServer::start().await;

    setup_forecast_mock(
        &mock_server,
        ResponseTemplate::new(500).set_body_string("Internal Server Error"),
    )
    .await;

    let client = create_test_client(&mock_server);
    let result = client.get_current(&toronto()).await;

    assert!(
        matches!(result, Err(WeatherError::ServiceUnavailable(_))),
        "Expected ServiceUnavailable, got: {result:?}"
    );
}

#[tokio::test]
async fn test_rate_limit_error() {
    let mock_server = MockServer::start().await;

    setup_forecast_mock(
        &mock_server,
        ResponseTemplate::new(429).set_body_string("Rate limit exceeded"),
    )
    .await;

    let client = create_test_client(&mock_server);
    let result = client.get_current(&toronto()).await;

    assert!(
        matches!(result, Err(WeatherError::RateLimitExceeded)),
        "Expected RateLimitExceeded, got: {result:?}"
    );
}

#[tokio::test]
async fn test_invalid_json_response() {
    let mock_server = MockServer::start().await;

    setup_forecast_mock(
        &mock_server,
        ResponseTemplate::new(200).set_body_string("not valid json"),
    )
    .await;

    let client = create_test_client(&mock_server);
    let result = client.get_current(&toronto()).await;

    assert!(
        matches!(result, Err(WeatherError::ParseError(_))),
        "Expected ParseError, got: {result:?}"
    );
}

#[tokio::test]
async fn test_unknown_city_returns_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "generationtime_ms": 0.5
            })),
        )
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let result = client.resolve_city("Atlantis").await;

    assert!(
        matches!(result, Err(WeatherError::CityNotFound(ref city)) if city == "Atlantis"),
        "Expected CityNotFound, got: {result:?}"
    );
}

#[tokio::test]
async fn test_empty_geocoding_results_returns_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "results": [],
                "generationtime_ms": 0.5
            })),
        )
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let result = client.resolve_city("Xyzzy").await;

    assert!(
        matches!(result, Err(WeatherError::CityNotFound(_))),
        "Expected CityNotFound, got: {result:?}"
    );
}

#[tokio::test]
async fn test_health_check_fails_on_server_error() {
    let mock_server = MockServer::start().await;

    setup_forecast_mock(
        &mock_server,
        ResponseTemplate::new(500).set_body_string("Internal Server Error"),
    )
    .await;

    let client = create_test_client(&mock_server);
    let is_healthy = client.is_healthy().await;

    assert!(!is_healthy, "Expected health check to fail");
}

// ============================================================================
// Query parameter verification
// ============================================================================

#[tokio::test]
async fn test_request_contains_correct_query_params() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/forecast"))
        .and(query_param("latitude", "43.65"))
        .and(query_param("longitude", "-79.38"))
        .and(query_param("timezone", "auto"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_current_response()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let result = client.get_current(&toronto()).await;

    assert!(result.is_ok(), "Expected success, got: {result:?}");
}
