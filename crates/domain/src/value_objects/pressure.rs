//! Atmospheric pressure value object
//!
//! Sea-level pressure in kilopascals. The training data never leaves the
//! [98.0, 105.0] kPa band, so the prediction form clamps user input to the
//! same range instead of feeding the model values it has never seen.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Error returned when a pressure value is out of range
#[derive(Debug, Clone, Copy, Error, PartialEq)]
#[error("invalid pressure: {0} kPa is out of range (must be 98.0-105.0)")]
pub struct InvalidPressure(f64);

/// Atmospheric pressure in kPa, bounded to [98.0, 105.0]
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
pub struct Pressure(f64);

impl Pressure {
    /// Lower bound of the supported pressure band
    pub const MIN_KPA: f64 = 98.0;

    /// Upper bound of the supported pressure band
    pub const MAX_KPA: f64 = 105.0;

    /// Create a new validated pressure value
    ///
    /// # Errors
    ///
    /// Returns `InvalidPressure` if the value is outside [98.0, 105.0] kPa
    /// or is not a finite number.
    pub fn new(kpa: f64) -> Result<Self, InvalidPressure> {
        if !kpa.is_finite() || !(Self::MIN_KPA..=Self::MAX_KPA).contains(&kpa) {
            return Err(InvalidPressure(kpa));
        }
        Ok(Self(kpa))
    }

    /// Create a pressure value, clamping to the supported band
    ///
    /// Non-finite input falls back to standard pressure (101.325 kPa).
    #[must_use]
    pub fn clamped(kpa: f64) -> Self {
        if kpa.is_finite() {
            Self(kpa.clamp(Self::MIN_KPA, Self::MAX_KPA))
        } else {
            Self(101.325)
        }
    }

    /// The pressure in kilopascals
    #[must_use]
    pub const fn as_kpa(self) -> f64 {
        self.0
    }
}

impl fmt::Display for Pressure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1} kPa", self.0)
    }
}

impl TryFrom<f64> for Pressure {
    type Error = InvalidPressure;

    fn try_from(kpa: f64) -> Result<Self, Self::Error> {
        Self::new(kpa)
    }
}

/// Custom deserialization that validates the pressure band
impl<'de> Deserialize<'de> for Pressure {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let kpa = f64::deserialize(deserializer)?;
        Self::new(kpa).map_err(serde::de::Error::custom)
    }
}
