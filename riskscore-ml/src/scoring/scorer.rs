//! Scorers: a metric bound to its parameters, response method and sign.

use crate::config::MetricsConfig;
use crate::error::{Result, RiskError};
use crate::features::FeatureFrame;
use crate::scoring::estimator::Estimator;
use crate::scoring::kind::{MetricInput, MetricKind, ResponseMethod};
use std::collections::BTreeMap;

/// A callable `(estimator, x, y_true) -> score`.
///
/// Scores follow the "greater is better" convention: metrics to minimise are
/// reported negated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scorer {
    metric: MetricKind,
    params: MetricsConfig,
}

impl Scorer {
    pub fn new(metric: MetricKind, params: MetricsConfig) -> Self {
        Self { metric, params }
    }

    pub fn key(&self) -> &'static str {
        self.metric.key()
    }

    pub fn metric(&self) -> MetricKind {
        self.metric
    }

    pub fn response_method(&self) -> ResponseMethod {
        self.metric.response_method()
    }

    pub fn greater_is_better(&self) -> bool {
        self.metric.greater_is_better()
    }

    /// Run the estimator on `x` with the metric's response method and score
    /// the result against `y_true`.
    pub fn score(
        &self,
        estimator: &dyn Estimator,
        x: &FeatureFrame,
        y_true: &[u8],
    ) -> Result<f64> {
        let raw = match self.response_method() {
            ResponseMethod::Predict => {
                let y_pred = estimator.predict(x)?;
                self.metric
                    .compute(y_true, MetricInput::Labels(&y_pred), &self.params)?
            }
            ResponseMethod::PredictProba => {
                let proba = estimator.predict_proba(x)?;
                self.metric
                    .compute(y_true, MetricInput::Probabilities(&proba), &self.params)?
            }
        };
        Ok(self.apply_sign(raw))
    }

    /// Score precomputed estimator output, skipping the estimator call.
    pub fn score_output(&self, y_true: &[u8], input: MetricInput<'_>) -> Result<f64> {
        let raw = self.metric.compute(y_true, input, &self.params)?;
        Ok(self.apply_sign(raw))
    }

    fn apply_sign(&self, raw: f64) -> f64 {
        if self.greater_is_better() { raw } else { -raw }
    }
}

/// Scorers keyed by metric name, iterated in key order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScorerMap {
    scorers: BTreeMap<&'static str, Scorer>,
}

impl ScorerMap {
    pub fn get(&self, key: &str) -> Option<&Scorer> {
        self.scorers.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.scorers.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.scorers.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &Scorer)> {
        self.scorers.iter().map(|(k, v)| (*k, v))
    }

    pub fn len(&self) -> usize {
        self.scorers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scorers.is_empty()
    }

    /// Score `estimator` with every scorer in the map.
    ///
    /// The estimator is invoked at most once per response method; each score
    /// is logged at debug level.
    pub fn evaluate(
        &self,
        estimator: &dyn Estimator,
        x: &FeatureFrame,
        y_true: &[u8],
    ) -> Result<BTreeMap<String, f64>> {
        if y_true.len() != x.n_rows() {
            return Err(RiskError::validation(format!(
                "y_true has {} labels for {} rows",
                y_true.len(),
                x.n_rows()
            )));
        }
        let needs = |method: ResponseMethod| {
            self.scorers
                .values()
                .any(|s| s.response_method() == method)
        };
        let labels = if needs(ResponseMethod::Predict) {
            Some(estimator.predict(x)?)
        } else {
            None
        };
        let proba = if needs(ResponseMethod::PredictProba) {
            Some(estimator.predict_proba(x)?)
        } else {
            None
        };

        let mut results = BTreeMap::new();
        for (key, scorer) in &self.scorers {
            let input = match (scorer.response_method(), &labels, &proba) {
                (ResponseMethod::Predict, Some(y_pred), _) => MetricInput::Labels(y_pred),
                (ResponseMethod::PredictProba, _, Some(p)) => MetricInput::Probabilities(p),
                (method, _, _) => {
                    return Err(RiskError::validation(format!(
                        "no {method} output available for `{key}`"
                    )));
                }
            };
            let value = scorer.score_output(y_true, input)?;
            tracing::debug!(metric = *key, value, "Scored metric");
            results.insert((*key).to_string(), value);
        }
        Ok(results)
    }
}

impl FromIterator<Scorer> for ScorerMap {
    fn from_iter<I: IntoIterator<Item = Scorer>>(iter: I) -> Self {
        Self {
            scorers: iter.into_iter().map(|s| (s.key(), s)).collect(),
        }
    }
}
