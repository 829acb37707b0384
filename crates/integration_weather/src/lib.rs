//! Open-Meteo weather integration
//!
//! Client for the Open-Meteo Weather and Geocoding APIs
//! (<https://open-meteo.com>). Fetches current conditions in exactly the
//! measurement schema the classifier is trained on, so live data feeds the
//! model without any adaptation layer. No API key required.

pub mod client;
mod models;

pub use client::{OpenMeteoClient, WeatherClient, WeatherConfig, WeatherError};
pub use models::{CurrentConditions, ResolvedCity};
