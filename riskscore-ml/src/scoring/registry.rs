//! Entry point to the metric layer, carrying the business parameters.

use crate::config::MetricsConfig;
use crate::error::Result;
use crate::metrics::{ClassLabel, PrfsMetric, custom_cost_score, prfs_metric};
use crate::scoring::kind::MetricKind;
use crate::scoring::scorer::{Scorer, ScorerMap};

/// Builds scorer maps and computes parameterised metrics with a fixed
/// [`MetricsConfig`].
#[derive(Debug, Clone, Default)]
pub struct MetricRegistry {
    config: MetricsConfig,
}

impl MetricRegistry {
    /// # Errors
    ///
    /// Returns a configuration error when `fn_weight <= 1` or `beta <= 0`.
    pub fn new(config: MetricsConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &MetricsConfig {
        &self.config
    }

    /// A fresh map of every named scorer.
    pub fn scoring_dict(&self) -> ScorerMap {
        MetricKind::ALL
            .into_iter()
            .map(|kind| Scorer::new(kind, self.config))
            .collect()
    }

    /// Business cost score, with `fn_weight` taken from the configuration
    /// unless overridden.
    pub fn custom_cost(
        &self,
        y_true: &[u8],
        y_pred: &[u8],
        fn_weight: Option<f64>,
    ) -> Result<f64> {
        custom_cost_score(y_true, y_pred, fn_weight.unwrap_or(self.config.fn_weight))
    }

    /// Precision / recall / F-beta / support for `label` with the configured beta.
    pub fn prfs(
        &self,
        y_true: &[u8],
        y_pred: &[u8],
        metric: PrfsMetric,
        label: ClassLabel,
    ) -> Result<f64> {
        prfs_metric(y_true, y_pred, metric, label, self.config.beta)
    }
}
