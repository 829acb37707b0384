//! Classification evaluation report
//!
//! Per-class precision, recall, f1 and support, plus accuracy and the
//! macro / weighted averages, rendered as a fixed-width table. Divisions
//! with a zero denominator score 0 rather than erroring out.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::MlError;

/// Precision/recall/f1 for one class
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassMetrics {
    pub label: String,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    /// Number of true instances of this class
    pub support: usize,
}

/// Full evaluation over a labelled test set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationReport {
    pub classes: Vec<ClassMetrics>,
    pub accuracy: f64,
    pub macro_precision: f64,
    pub macro_recall: f64,
    pub macro_f1: f64,
    pub weighted_precision: f64,
    pub weighted_recall: f64,
    pub weighted_f1: f64,
    pub total_support: usize,
}

impl ClassificationReport {
    /// Compare predictions against ground truth, label by label
    ///
    /// Classes are reported in sorted label order over the union of labels
    /// seen in either vector.
    ///
    /// # Errors
    ///
    /// Fails when the inputs are empty or differ in length.
    pub fn compute(y_true: &[String], y_pred: &[String]) -> Result<Self, MlError> {
        if y_true.is_empty() {
            return Err(MlError::EmptyTrainingSet);
        }
        if y_true.len() != y_pred.len() {
            return Err(MlError::RowCountMismatch {
                x_rows: y_true.len(),
                y_rows: y_pred.len(),
            });
        }

        #[derive(Default)]
        struct Tally {
            true_pos: usize,
            false_pos: usize,
            false_neg: usize,
        }

        let mut tallies: BTreeMap<&str, Tally> = BTreeMap::new();
        let mut correct = 0usize;
        for (truth, pred) in y_true.iter().zip(y_pred) {
            if truth == pred {
                correct += 1;
                tallies.entry(truth).or_default().true_pos += 1;
            } else {
                tallies.entry(truth).or_default().false_neg += 1;
                tallies.entry(pred).or_default().false_pos += 1;
            }
        }

        let classes: Vec<ClassMetrics> = tallies
            .iter()
            .map(|(label, t)| {
                let precision = ratio(t.true_pos, t.true_pos + t.false_pos);
                let recall = ratio(t.true_pos, t.true_pos + t.false_neg);
                let f1 = if precision + recall > 0.0 {
                    2.0 * precision * recall / (precision + recall)
                } else {
                    0.0
                };
                ClassMetrics {
                    label: (*label).to_owned(),
                    precision,
                    recall,
                    f1,
                    support: t.true_pos + t.false_neg,
                }
            })
            .collect();

        let n_classes = classes.len() as f64;
        let total_support = y_true.len();
        let total = total_support as f64;

        let mut macro_precision = 0.0;
        let mut macro_recall = 0.0;
        let mut macro_f1 = 0.0;
        let mut weighted_precision = 0.0;
        let mut weighted_recall = 0.0;
        let mut weighted_f1 = 0.0;
        for c in &classes {
            macro_precision += c.precision;
            macro_recall += c.recall;
            macro_f1 += c.f1;
            let weight = c.support as f64 / total;
            weighted_precision += weight * c.precision;
            weighted_recall += weight * c.recall;
            weighted_f1 += weight * c.f1;
        }

        Ok(Self {
            classes,
            accuracy: correct as f64 / total,
            macro_precision: macro_precision / n_classes,
            macro_recall: macro_recall / n_classes,
            macro_f1: macro_f1 / n_classes,
            weighted_precision,
            weighted_recall,
            weighted_f1,
            total_support,
        })
    }
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

impl fmt::Display for ClassificationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self
            .classes
            .iter()
            .map(|c| c.label.len())
            .chain(["weighted avg".len()])
            .max()
            .unwrap_or(12);

        writeln!(
            f,
            "{:>width$}  precision    recall  f1-score   support",
            "",
        )?;
        writeln!(f)?;
        for c in &self.classes {
            writeln!(
                f,
                "{:>width$}  {:>9.2}  {:>8.2}  {:>8.2}  {:>8}",
                c.label, c.precision, c.recall, c.f1, c.support,
            )?;
        }
        writeln!(f)?;
        writeln!(
            f,
            "{:>width$}  {:>9}  {:>8}  {:>8.2}  {:>8}",
            "accuracy", "", "", self.accuracy, self.total_support,
        )?;
        writeln!(
            f,
            "{:>width$}  {:>9.2}  {:>8.2}  {:>8.2}  {:>8}",
            "macro avg",
            self.macro_precision,
            self.macro_recall,
            self.macro_f1,
            self.total_support,
        )?;
        writeln!(
            f,
            "{:>width$}  {:>9.2}  {:>8.2}  {:>8.2}  {:>8}",
            "weighted avg",
            self.weighted_precision,
            self.weighted_recall,
            self.weighted_f1,
            self.total_support,
        )
    }
}
