//! Label encoder
//!
//! A bijection between condition labels and contiguous class codes, fitted
//! once from training data. The classifier only ever sees the codes; the
//! encoder is persisted next to the model so predictions can be decoded
//! back to strings. A model decoded through any other encoder instance is
//! invalid, which is why decode failures are explicit errors.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::errors::DomainError;

/// Fitted label ↔ class-code bijection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelEncoder {
    /// Vocabulary in code order: `classes[code]` is the label for `code`.
    /// Sorted lexicographically at fit time, so codes are stable for a
    /// given label set regardless of row order.
    classes: Vec<String>,
}

impl LabelEncoder {
    /// Fit an encoder over a set of labels
    ///
    /// Duplicates are collapsed and the vocabulary is sorted, so the code
    /// assignment depends only on the distinct labels present.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::EmptyVocabulary` if no labels are provided.
    pub fn fit<I, S>(labels: I) -> Result<Self, DomainError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let distinct: BTreeSet<String> = labels
            .into_iter()
            .map(|l| l.as_ref().to_string())
            .collect();

        if distinct.is_empty() {
            return Err(DomainError::EmptyVocabulary);
        }

        Ok(Self {
            classes: distinct.into_iter().collect(),
        })
    }

    /// Encode a label to its class code
    ///
    /// # Errors
    ///
    /// Returns `DomainError::UnknownLabel` if the label was not seen at fit
    /// time.
    pub fn encode(&self, label: &str) -> Result<usize, DomainError> {
        self.classes
            .binary_search_by(|c| c.as_str().cmp(label))
            .map_err(|_| DomainError::UnknownLabel(label.to_string()))
    }

    /// Decode a class code back to its label
    ///
    /// # Errors
    ///
    /// Returns `DomainError::UnknownClassCode` if the code is outside the
    /// fitted vocabulary. This is the signal for a mismatched artifact pair.
    pub fn decode(&self, code: usize) -> Result<&str, DomainError> {
        self.classes
            .get(code)
            .map(String::as_str)
            .ok_or(DomainError::UnknownClassCode {
                code,
                vocabulary_size: self.classes.len(),
            })
    }

    /// The fitted vocabulary in code order
    #[must_use]
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Number of distinct classes
    #[must_use]
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// Whether the vocabulary is empty (never true for a fitted encoder)
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fitted() -> LabelEncoder {
        LabelEncoder::fit(["Rain", "Clear", "Fog", "Snow", "Fog"]).unwrap()
    }

    #[test]
    fn fit_sorts_and_dedups() {
        let enc = fitted();
        assert_eq!(enc.classes(), ["Clear", "Fog", "Rain", "Snow"]);
        assert_eq!(enc.len(), 4);
    }

    #[test]
    fn fit_rejects_empty_input() {
        let result = LabelEncoder::fit(Vec::<String>::new());
        assert_eq!(result.unwrap_err(), DomainError::EmptyVocabulary);
    }

    #[test]
    fn encode_decode_round_trip() {
        let enc = fitted();
        for label in ["Clear", "Fog", "Rain", "Snow"] {
            let code = enc.encode(label).unwrap();
            assert_eq!(enc.decode(code).unwrap(), label);
        }
    }

    #[test]
    fn encode_unknown_label_fails() {
        let enc = fitted();
        assert_eq!(
            enc.encode("Hail").unwrap_err(),
            DomainError::UnknownLabel("Hail".to_string())
        );
    }

    #[test]
    fn decode_out_of_range_code_fails() {
        let enc = fitted();
        assert_eq!(
            enc.decode(4).unwrap_err(),
            DomainError::UnknownClassCode {
                code: 4,
                vocabulary_size: 4
            }
        );
    }

    #[test]
    fn codes_do_not_depend_on_row_order() {
        let a = LabelEncoder::fit(["Rain", "Fog", "Clear"]).unwrap();
        let b = LabelEncoder::fit(["Clear", "Rain", "Fog", "Rain"]).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn serde_round_trip_preserves_codes() {
        let enc = fitted();
        let json = serde_json::to_string(&enc).unwrap();
        let back: LabelEncoder = serde_json::from_str(&json).unwrap();
        assert_eq!(enc, back);
        assert_eq!(back.encode("Rain").unwrap(), enc.encode("Rain").unwrap());
    }
}
