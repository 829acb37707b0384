//! Relative humidity value object
//!
//! A validated relative humidity percentage, stored as an integer 0-100 the
//! way the training data records it.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Error returned when a humidity value is out of range
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("invalid humidity: {0}% is out of range (must be 0-100)")]
pub struct InvalidHumidity(u8);

/// Relative humidity percentage (0-100%)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Humidity(u8);

impl Humidity {
    /// Maximum valid humidity percentage
    pub const MAX: u8 = 100;

    /// Create a new validated humidity value
    ///
    /// # Errors
    ///
    /// Returns `InvalidHumidity` if the value is greater than 100.
    pub const fn new(value: u8) -> Result<Self, InvalidHumidity> {
        if value > Self::MAX {
            Err(InvalidHumidity(value))
        } else {
            Ok(Self(value))
        }
    }

    /// Create a humidity value, clamping to the valid range
    ///
    /// The interactive form treats out-of-range humidity as a slider pushed
    /// to its end stop, so values above 100 become 100.
    #[must_use]
    pub const fn clamped(value: u8) -> Self {
        if value > Self::MAX {
            Self(Self::MAX)
        } else {
            Self(value)
        }
    }

    /// The percentage as an integer
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// The percentage as a feature-vector component
    #[must_use]
    pub fn as_feature(self) -> f64 {
        f64::from(self.0)
    }
}

impl fmt::Display for Humidity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

impl TryFrom<u8> for Humidity {
    type Error = InvalidHumidity;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Humidity> for u8 {
    fn from(h: Humidity) -> Self {
        h.0
    }
}

/// Custom deserialization that validates humidity values
impl<'de> Deserialize<'de> for Humidity {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = u8::deserialize(deserializer)?;
        Self::new(value).map_err(serde::de::Error::custom)
    }
}
