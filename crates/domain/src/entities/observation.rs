//! Weather observations and the canonical feature schema
//!
//! The model consumes exactly six numeric measurements. Their names and
//! order are fixed at training time and must be reproduced bit-for-bit at
//! prediction time, so both live here as constants rather than strings
//! scattered across the codebase.

use serde::{Deserialize, Serialize};

use crate::value_objects::{Humidity, Pressure};

/// Number of features the classifier consumes
pub const FEATURE_COUNT: usize = 6;

/// Column names of the feature schema, in training order
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "Temp_C",
    "Dew Point Temp_C",
    "Rel Hum_%",
    "Wind Speed_km/h",
    "Visibility_km",
    "Press_kPa",
];

/// Name of the label column in the training data
pub const LABEL_COLUMN: &str = "Weather";

/// One row of classifier input: the six weather measurements
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    /// Air temperature in °C
    pub temperature_c: f64,
    /// Dew point temperature in °C
    pub dew_point_c: f64,
    /// Relative humidity in percent (0-100)
    pub humidity: Humidity,
    /// Wind speed in km/h
    pub wind_speed_kmh: f64,
    /// Visibility in km
    pub visibility_km: f64,
    /// Atmospheric pressure in kPa
    pub pressure: Pressure,
}

impl FeatureVector {
    /// The measurements as a dense row in training column order
    #[must_use]
    pub fn to_row(&self) -> [f64; FEATURE_COUNT] {
        [
            self.temperature_c,
            self.dew_point_c,
            self.humidity.as_feature(),
            self.wind_speed_kmh,
            self.visibility_km,
            self.pressure.as_kpa(),
        ]
    }
}

/// A historical observation: one feature row plus its condition label
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// The six numeric measurements
    pub features: FeatureVector,
    /// Recorded weather condition, e.g. "Fog" or "Rain"
    pub label: String,
}

impl Observation {
    /// Multi-condition rows join labels with this separator and are
    /// excluded from training.
    pub const LABEL_SEPARATOR: char = ',';

    /// Whether this row carries a single-condition label usable for training
    #[must_use]
    pub fn has_single_label(&self) -> bool {
        !self.label.contains(Self::LABEL_SEPARATOR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_features() -> FeatureVector {
        FeatureVector {
            temperature_c: 25.0,
            dew_point_c: 20.0,
            humidity: Humidity::clamped(70),
            wind_speed_kmh: 15.0,
            visibility_km: 10.0,
            pressure: Pressure::clamped(101.0),
        }
    }

    #[test]
    fn row_preserves_training_column_order() {
        let row = sample_features().to_row();
        assert!((row[0] - 25.0).abs() < f64::EPSILON);
        assert!((row[1] - 20.0).abs() < f64::EPSILON);
        assert!((row[2] - 70.0).abs() < f64::EPSILON);
        assert!((row[3] - 15.0).abs() < f64::EPSILON);
        assert!((row[4] - 10.0).abs() < f64::EPSILON);
        assert!((row[5] - 101.0).abs() < f64::EPSILON);
    }

    #[test]
    fn feature_names_match_row_length() {
        assert_eq!(FEATURE_NAMES.len(), sample_features().to_row().len());
    }

    #[test]
    fn single_label_detection() {
        let mut obs = Observation {
            features: sample_features(),
            label: "Fog".to_string(),
        };
        assert!(obs.has_single_label());

        obs.label = "Rain,Fog".to_string();
        assert!(!obs.has_single_label());
    }

    #[test]
    fn serde_round_trip() {
        let obs = Observation {
            features: sample_features(),
            label: "Snow".to_string(),
        };
        let json = serde_json::to_string(&obs).unwrap();
        let back: Observation = serde_json::from_str(&json).unwrap();
        assert_eq!(obs, back);
    }
}
