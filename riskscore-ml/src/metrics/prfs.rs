//! Per-class precision, recall, F-beta and support.

use crate::error::{Result, RiskError};
use crate::metrics::confusion::{ClassLabel, ConfusionMatrix};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Default beta: recall weighs twice as much as precision.
pub const DEFAULT_BETA: f64 = 2.0;

/// Which member of the precision/recall/F-score/support family to extract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrfsMetric {
    Precision,
    Recall,
    Fscore,
    Support,
}

impl PrfsMetric {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Precision => "precision",
            Self::Recall => "recall",
            Self::Fscore => "fscore",
            Self::Support => "support",
        }
    }
}

impl FromStr for PrfsMetric {
    type Err = RiskError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "precision" => Ok(Self::Precision),
            "recall" => Ok(Self::Recall),
            "fscore" => Ok(Self::Fscore),
            "support" => Ok(Self::Support),
            other => Err(RiskError::validation(format!("Unknown metric: {other}"))),
        }
    }
}

impl fmt::Display for PrfsMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Precision, recall, F-beta and support of one class.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassScores {
    pub precision: f64,
    pub recall: f64,
    pub fscore: f64,
    pub support: f64,
}

impl ClassScores {
    /// Scores of `label` taken one-vs-rest from a confusion matrix.
    ///
    /// Zero denominators give 0.0 rather than NaN.
    pub fn from_matrix(matrix: &ConfusionMatrix, label: ClassLabel, beta: f64) -> Self {
        let (tp, fp, fn_) = matrix.one_vs_rest(label);
        let precision = ratio(tp, tp + fp);
        let recall = ratio(tp, tp + fn_);
        Self {
            precision,
            recall,
            fscore: fbeta(precision, recall, beta),
            support: (tp + fn_) as f64,
        }
    }

    pub fn get(&self, metric: PrfsMetric) -> f64 {
        match metric {
            PrfsMetric::Precision => self.precision,
            PrfsMetric::Recall => self.recall,
            PrfsMetric::Fscore => self.fscore,
            PrfsMetric::Support => self.support,
        }
    }
}

/// Weighted harmonic mean of precision and recall; 0 when both are 0.
pub fn fbeta(precision: f64, recall: f64, beta: f64) -> f64 {
    let beta2 = beta * beta;
    let denom = beta2 * precision + recall;
    if precision + recall == 0.0 || denom == 0.0 {
        return 0.0;
    }
    (1.0 + beta2) * precision * recall / denom
}

/// One metric of the precision/recall/F-beta/support family for class `label`.
pub fn prfs_metric(
    y_true: &[u8],
    y_pred: &[u8],
    metric: PrfsMetric,
    label: ClassLabel,
    beta: f64,
) -> Result<f64> {
    let matrix = ConfusionMatrix::from_labels(y_true, y_pred)?;
    Ok(ClassScores::from_matrix(&matrix, label, beta).get(metric))
}

fn ratio(num: usize, denom: usize) -> f64 {
    if denom == 0 {
        0.0
    } else {
        num as f64 / denom as f64
    }
}
