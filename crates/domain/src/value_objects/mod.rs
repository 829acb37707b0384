//! Value objects
//!
//! Validated measurement types used across the feature schema.

mod geo_location;
mod humidity;
mod pressure;

pub use geo_location::{GeoLocation, InvalidCoordinates};
pub use humidity::{Humidity, InvalidHumidity};
pub use pressure::{InvalidPressure, Pressure};
