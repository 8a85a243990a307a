//! Binary confusion matrix over the fixed label order `[0, 1]`.

use crate::error::{Result, RiskError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the two classes of the default/no-default problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassLabel {
    /// No default (label 0).
    Negative,
    /// Default (label 1).
    Positive,
}

impl ClassLabel {
    pub fn as_u8(self) -> u8 {
        match self {
            Self::Negative => 0,
            Self::Positive => 1,
        }
    }

    /// Column of a `[prob_negative, prob_positive]` row holding this class.
    pub fn proba_column(self) -> usize {
        self.as_u8() as usize
    }
}

impl TryFrom<u8> for ClassLabel {
    type Error = RiskError;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            0 => Ok(Self::Negative),
            1 => Ok(Self::Positive),
            other => Err(RiskError::validation(format!(
                "label {other} is not a binary class (expected 0 or 1)"
            ))),
        }
    }
}

impl fmt::Display for ClassLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_u8())
    }
}

/// A cell of the 2x2 confusion matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfusionCell {
    TrueNegative,
    FalsePositive,
    FalseNegative,
    TruePositive,
}

impl ConfusionCell {
    /// Cells in unpacking order (tn, fp, fn, tp).
    pub const ALL: [ConfusionCell; 4] = [
        Self::TrueNegative,
        Self::FalsePositive,
        Self::FalseNegative,
        Self::TruePositive,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Self::TrueNegative => "tn",
            Self::FalsePositive => "fp",
            Self::FalseNegative => "fn",
            Self::TruePositive => "tp",
        }
    }
}

/// Counts of a binary classifier's outcomes.
///
/// Rows are actual labels, columns predicted labels, both ordered `[0, 1]`,
/// so the cells always unpack as (tn, fp, fn, tp) even when a class is absent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfusionMatrix {
    pub true_negatives: usize,
    pub false_positives: usize,
    pub false_negatives: usize,
    pub true_positives: usize,
}

impl ConfusionMatrix {
    /// Count outcomes from equal-length label vectors restricted to {0, 1}.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the lengths differ or a label is outside {0, 1}.
    pub fn from_labels(y_true: &[u8], y_pred: &[u8]) -> Result<Self> {
        check_same_len("y_pred", y_true.len(), y_pred.len())?;
        check_binary("y_true", y_true)?;
        check_binary("y_pred", y_pred)?;

        let mut matrix = Self::default();
        for (&actual, &predicted) in y_true.iter().zip(y_pred) {
            match (actual, predicted) {
                (0, 0) => matrix.true_negatives += 1,
                (0, _) => matrix.false_positives += 1,
                (_, 0) => matrix.false_negatives += 1,
                _ => matrix.true_positives += 1,
            }
        }
        Ok(matrix)
    }

    pub fn get(&self, cell: ConfusionCell) -> usize {
        match cell {
            ConfusionCell::TrueNegative => self.true_negatives,
            ConfusionCell::FalsePositive => self.false_positives,
            ConfusionCell::FalseNegative => self.false_negatives,
            ConfusionCell::TruePositive => self.true_positives,
        }
    }

    /// Flattened cells in (tn, fp, fn, tp) order.
    pub fn ravel(&self) -> [usize; 4] {
        ConfusionCell::ALL.map(|cell| self.get(cell))
    }

    pub fn total(&self) -> usize {
        self.ravel().iter().sum()
    }

    /// (tp, fp, fn) when `label` is treated as the positive class.
    pub fn one_vs_rest(&self, label: ClassLabel) -> (usize, usize, usize) {
        match label {
            ClassLabel::Positive => (
                self.true_positives,
                self.false_positives,
                self.false_negatives,
            ),
            ClassLabel::Negative => (
                self.true_negatives,
                self.false_negatives,
                self.false_positives,
            ),
        }
    }
}

/// Count of one confusion-matrix cell, as a float for scorer use.
pub fn confusion_metric(y_true: &[u8], y_pred: &[u8], which: ConfusionCell) -> Result<f64> {
    Ok(ConfusionMatrix::from_labels(y_true, y_pred)?.get(which) as f64)
}

pub(crate) fn check_same_len(name: &str, expected: usize, actual: usize) -> Result<()> {
    if expected != actual {
        return Err(RiskError::validation(format!(
            "{name} has length {actual} but y_true has length {expected}"
        )));
    }
    Ok(())
}

pub(crate) fn check_binary(name: &str, labels: &[u8]) -> Result<()> {
    match labels.iter().find(|&&l| l > 1) {
        Some(bad) => Err(RiskError::validation(format!(
            "{name} contains label {bad}; only 0 and 1 are allowed"
        ))),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binary_counts() {
        let y_true = [0, 0, 1, 1, 1, 0];
        let y_pred = [0, 1, 1, 0, 1, 0];
        let cm = ConfusionMatrix::from_labels(&y_true, &y_pred).unwrap();
        assert_eq!(cm.ravel(), [2, 1, 1, 2]);
        assert_eq!(cm.total(), 6);
    }

    #[test]
    fn test_absent_class_keeps_order() {
        // Only negatives present: everything lands in tn.
        let cm = ConfusionMatrix::from_labels(&[0, 0, 0], &[0, 0, 0]).unwrap();
        assert_eq!(cm.ravel(), [3, 0, 0, 0]);

        // Only positives present: everything lands in tp.
        let cm = ConfusionMatrix::from_labels(&[1, 1], &[1, 1]).unwrap();
        assert_eq!(cm.ravel(), [0, 0, 0, 2]);
    }

    #[test]
    fn test_confusion_metric_each_cell() {
        let y_true = [0, 0, 1, 1, 1, 0];
        let y_pred = [0, 1, 1, 0, 1, 0];
        let values: Vec<f64> = ConfusionCell::ALL
            .iter()
            .map(|&cell| confusion_metric(&y_true, &y_pred, cell).unwrap())
            .collect();
        assert_eq!(values, vec![2.0, 1.0, 1.0, 2.0]);
    }

    #[test]
    fn test_non_binary_label_rejected() {
        let result = ConfusionMatrix::from_labels(&[0, 2], &[0, 1]);
        assert!(matches!(result, Err(RiskError::Validation(_))));
    }

    #[test]
    fn test_length_mismatch_rejected() {
        let result = ConfusionMatrix::from_labels(&[0, 1, 1], &[0, 1]);
        assert!(matches!(result, Err(RiskError::Validation(_))));
    }

    #[test]
    fn test_empty_input_is_all_zero() {
        let cm = ConfusionMatrix::from_labels(&[], &[]).unwrap();
        assert_eq!(cm.total(), 0);
    }

    #[test]
    fn test_one_vs_rest_negative_swaps_roles() {
        let cm = ConfusionMatrix {
            true_negatives: 5,
            false_positives: 1,
            false_negatives: 2,
            true_positives: 3,
        };
        assert_eq!(cm.one_vs_rest(ClassLabel::Positive), (3, 1, 2));
        assert_eq!(cm.one_vs_rest(ClassLabel::Negative), (5, 2, 1));
    }

    #[test]
    fn test_class_label_try_from() {
        assert_eq!(ClassLabel::try_from(0).unwrap(), ClassLabel::Negative);
        assert_eq!(ClassLabel::try_from(1).unwrap(), ClassLabel::Positive);
        assert!(ClassLabel::try_from(3).is_err());
    }
}
