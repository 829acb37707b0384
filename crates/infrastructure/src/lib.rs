//! Infrastructure layer for Weathervane
//!
//! Implements the application ports against the outside world: CSV
//! dataset loading, bincode artifact persistence, the live Open-Meteo
//! adapter, configuration loading and tracing setup.

pub mod adapters;
pub mod config;
pub mod persistence;
pub mod telemetry;

pub use adapters::LiveWeatherAdapter;
pub use config::{AppConfig, DataConfig, ServerConfig};
pub use persistence::{BincodeArtifactStore, CsvDatasetLoader};
pub use telemetry::init_tracing;
