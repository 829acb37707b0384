//! Prediction result

use serde::{Deserialize, Serialize};

/// A decoded prediction: the most likely condition plus the full
/// distribution over every class the model was trained on.
///
/// Entries are kept in class-code order so the probability at index `i`
/// belongs to the label the encoder assigns code `i`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// The most probable condition label
    pub label: String,
    /// Label → probability, one entry per trained class
    pub probabilities: Vec<(String, f64)>,
}

impl Prediction {
    /// Probability assigned to the predicted label
    #[must_use]
    pub fn confidence(&self) -> f64 {
        self.probabilities
            .iter()
            .find(|(label, _)| *label == self.label)
            .map_or(0.0, |(_, p)| *p)
    }

    /// Whether the distribution sums to 1 within `tolerance`
    #[must_use]
    pub fn is_normalized(&self, tolerance: f64) -> bool {
        let sum: f64 = self.probabilities.iter().map(|(_, p)| p).sum();
        (sum - 1.0).abs() <= tolerance
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Prediction {
        Prediction {
            label: "Rain".to_string(),
            probabilities: vec![
                ("Clear".to_string(), 0.1),
                ("Fog".to_string(), 0.2),
                ("Rain".to_string(), 0.6),
                ("Snow".to_string(), 0.1),
            ],
        }
    }

    #[test]
    fn confidence_matches_predicted_label() {
        assert!((sample().confidence() - 0.6).abs() < f64::EPSILON);
    }

    #[test]
    fn confidence_is_zero_for_missing_label() {
        let mut p = sample();
        p.label = "Hail".to_string();
        assert!((p.confidence() - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn normalization_check() {
        assert!(sample().is_normalized(1e-9));

        let mut p = sample();
        p.probabilities[0].1 = 0.5;
        assert!(!p.is_normalized(1e-9));
    }

    #[test]
    fn serializes_probability_pairs() {
        let json = serde_json::to_string(&sample()).unwrap();
        assert!(json.contains("Rain"));
        assert!(json.contains("0.6"));
    }
}
