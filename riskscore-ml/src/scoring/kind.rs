//! The closed set of named metrics exposed through the scorer map.

use crate::config::MetricsConfig;
use crate::error::{Result, RiskError};
use crate::metrics::{
    ClassLabel, ConfusionCell, PrfsMetric, confusion_metric, custom_cost_score, log_loss, pr_auc,
    prfs_metric, roc_auc,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which estimator output a metric consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseMethod {
    /// Hard 0/1 predictions.
    Predict,
    /// `[prob_negative, prob_positive]` rows.
    PredictProba,
}

impl ResponseMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Predict => "predict",
            Self::PredictProba => "predict_proba",
        }
    }
}

impl fmt::Display for ResponseMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Estimator output handed to [`MetricKind::compute`].
#[derive(Debug, Clone, Copy)]
pub enum MetricInput<'a> {
    Labels(&'a [u8]),
    Probabilities(&'a [[f64; 2]]),
}

impl MetricInput<'_> {
    pub fn response_method(&self) -> ResponseMethod {
        match self {
            Self::Labels(_) => ResponseMethod::Predict,
            Self::Probabilities(_) => ResponseMethod::PredictProba,
        }
    }
}

/// Every metric the scorer map knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MetricKind {
    Tn,
    Fp,
    Fn,
    Tp,
    PrecisionN,
    PrecisionP,
    RecallN,
    RecallP,
    F2ScoreN,
    F2ScoreP,
    SupportN,
    SupportP,
    CustomCost,
    PrAucN,
    PrAucP,
    RocAuc,
    LogLoss,
}

impl MetricKind {
    pub const ALL: [MetricKind; 17] = [
        Self::Tn,
        Self::Fp,
        Self::Fn,
        Self::Tp,
        Self::PrecisionN,
        Self::PrecisionP,
        Self::RecallN,
        Self::RecallP,
        Self::F2ScoreN,
        Self::F2ScoreP,
        Self::SupportN,
        Self::SupportP,
        Self::CustomCost,
        Self::PrAucN,
        Self::PrAucP,
        Self::RocAuc,
        Self::LogLoss,
    ];

    /// Stable key used in the scorer map and in reports.
    pub fn key(self) -> &'static str {
        match self {
            Self::Tn => "tn",
            Self::Fp => "fp",
            Self::Fn => "fn",
            Self::Tp => "tp",
            Self::PrecisionN => "precision_n",
            Self::PrecisionP => "precision_p",
            Self::RecallN => "recall_n",
            Self::RecallP => "recall_p",
            Self::F2ScoreN => "f2_score_n",
            Self::F2ScoreP => "f2_score_p",
            Self::SupportN => "support_n",
            Self::SupportP => "support_p",
            Self::CustomCost => "custom_cost",
            Self::PrAucN => "pr_auc_n",
            Self::PrAucP => "pr_auc_p",
            Self::RocAuc => "roc_auc",
            Self::LogLoss => "logloss",
        }
    }

    pub fn response_method(self) -> ResponseMethod {
        match self {
            Self::PrAucN | Self::PrAucP | Self::RocAuc | Self::LogLoss => {
                ResponseMethod::PredictProba
            }
            _ => ResponseMethod::Predict,
        }
    }

    /// Log-loss is the only metric to minimise.
    pub fn greater_is_better(self) -> bool {
        !matches!(self, Self::LogLoss)
    }

    /// Compute the raw (unsigned) metric value.
    ///
    /// # Errors
    ///
    /// Returns a validation error when `input` is not the kind of output this
    /// metric consumes, and propagates any error of the underlying metric.
    pub fn compute(
        self,
        y_true: &[u8],
        input: MetricInput<'_>,
        params: &MetricsConfig,
    ) -> Result<f64> {
        let value = match input {
            MetricInput::Labels(y_pred) => self.label_value(y_true, y_pred, params),
            MetricInput::Probabilities(proba) => self.proba_value(y_true, proba),
        };
        value.unwrap_or_else(|| {
            Err(RiskError::validation(format!(
                "metric `{}` needs {} output, got {}",
                self.key(),
                self.response_method(),
                input.response_method()
            )))
        })
    }

    /// `None` when this metric does not consume hard labels.
    fn label_value(
        self,
        y_true: &[u8],
        y_pred: &[u8],
        params: &MetricsConfig,
    ) -> Option<Result<f64>> {
        use ClassLabel::{Negative, Positive};
        let prfs = |metric, label| prfs_metric(y_true, y_pred, metric, label, params.beta);
        let confusion = |cell| confusion_metric(y_true, y_pred, cell);
        let value = match self {
            Self::Tn => confusion(ConfusionCell::TrueNegative),
            Self::Fp => confusion(ConfusionCell::FalsePositive),
            Self::Fn => confusion(ConfusionCell::FalseNegative),
            Self::Tp => confusion(ConfusionCell::TruePositive),
            Self::PrecisionN => prfs(PrfsMetric::Precision, Negative),
            Self::PrecisionP => prfs(PrfsMetric::Precision, Positive),
            Self::RecallN => prfs(PrfsMetric::Recall, Negative),
            Self::RecallP => prfs(PrfsMetric::Recall, Positive),
            Self::F2ScoreN => prfs(PrfsMetric::Fscore, Negative),
            Self::F2ScoreP => prfs(PrfsMetric::Fscore, Positive),
            Self::SupportN => prfs(PrfsMetric::Support, Negative),
            Self::SupportP => prfs(PrfsMetric::Support, Positive),
            Self::CustomCost => custom_cost_score(y_true, y_pred, params.fn_weight),
            Self::PrAucN | Self::PrAucP | Self::RocAuc | Self::LogLoss => return None,
        };
        Some(value)
    }

    /// `None` when this metric does not consume probabilities.
    fn proba_value(self, y_true: &[u8], proba: &[[f64; 2]]) -> Option<Result<f64>> {
        let column = |label: ClassLabel| -> Vec<f64> {
            proba.iter().map(|row| row[label.proba_column()]).collect()
        };
        let value = match self {
            Self::PrAucN => pr_auc(y_true, &column(ClassLabel::Negative), ClassLabel::Negative),
            Self::PrAucP => pr_auc(y_true, &column(ClassLabel::Positive), ClassLabel::Positive),
            Self::RocAuc => roc_auc(y_true, &column(ClassLabel::Positive)),
            Self::LogLoss => log_loss(y_true, &column(ClassLabel::Positive)),
            _ => return None,
        };
        Some(value)
    }
}

impl FromStr for MetricKind {
    type Err = RiskError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.key() == s)
            .ok_or_else(|| RiskError::validation(format!("Unknown metric: {s}")))
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
