//! Application configuration
//!
//! Split into focused sub-modules:
//! - `server`: HTTP server settings
//! - `data`: dataset and artifact locations
//!
//! Weather provider settings reuse `integration_weather::WeatherConfig`.

mod data;
mod server;

use serde::{Deserialize, Serialize};

pub use data::DataConfig;
pub use server::ServerConfig;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Dataset and artifact locations
    #[serde(default)]
    pub data: DataConfig,

    /// Weather provider configuration (optional; live predictions are
    /// disabled without it)
    #[serde(default)]
    pub weather: Option<integration_weather::WeatherConfig>,
}

impl AppConfig {
    /// Load configuration from environment and optional file
    ///
    /// Layering: built-in defaults, then `config.toml` if present, then
    /// `WEATHERVANE_*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error when a source is present but malformed.
    pub fn load() -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder()
            // Start with defaults
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?
            .set_default("data.dataset_path", "data/weather.csv")?
            .set_default("data.artifacts_dir", "artifacts")?
            // Load from file if exists
            .add_source(config::File::with_name("config").required(false))
            // Override with environment variables (e.g., WEATHERVANE_SERVER_PORT)
            .add_source(
                config::Environment::with_prefix("WEATHERVANE")
                    .separator("_")
                    .try_parsing(true),
            );

        let config = builder.build()?;
        config.try_deserialize()
    }
}
