//! The estimator interface scorers call into.

use crate::config::validate_threshold;
use crate::error::{Result, RiskError};
use crate::features::FeatureFrame;
use crate::prediction::ProbabilityModel;

/// A fitted classifier exposing hard predictions and class probabilities.
pub trait Estimator {
    /// Predicted labels (0 or 1), one per row of `x`.
    fn predict(&self, x: &FeatureFrame) -> Result<Vec<u8>>;

    /// `[prob_negative, prob_positive]` per row of `x`.
    fn predict_proba(&self, x: &FeatureFrame) -> Result<Vec<[f64; 2]>>;
}

/// Turns a [`ProbabilityModel`] into an [`Estimator`] by thresholding the
/// probability of default.
pub struct ThresholdClassifier<M> {
    model: M,
    threshold: f64,
}

impl<M: ProbabilityModel> ThresholdClassifier<M> {
    pub fn new(model: M, threshold: f64) -> Result<Self> {
        validate_threshold(threshold)?;
        Ok(Self { model, threshold })
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }
}

impl<M: ProbabilityModel> Estimator for ThresholdClassifier<M> {
    fn predict(&self, x: &FeatureFrame) -> Result<Vec<u8>> {
        Ok(self
            .predict_proba(x)?
            .iter()
            .map(|[_, pos]| u8::from(*pos >= self.threshold))
            .collect())
    }

    fn predict_proba(&self, x: &FeatureFrame) -> Result<Vec<[f64; 2]>> {
        let rows = self
            .model
            .predict(x)
            .map_err(RiskError::ModelInvocation)?
            .probability_rows()?;
        if rows.len() != x.n_rows() {
            return Err(RiskError::invalid_model_output(format!(
                "model returned {} rows for {} inputs",
                rows.len(),
                x.n_rows()
            )));
        }
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prediction::LogisticModel;

    #[test]
    fn test_threshold_classifier() {
        let model = LogisticModel::new(vec!["x".to_string()], vec![1.0], 0.0).unwrap();
        let clf = ThresholdClassifier::new(model, 0.5).unwrap();
        let x = FeatureFrame::new(
            vec!["x".to_string()],
            vec![vec![-3.0], vec![0.0], vec![3.0]],
        )
        .unwrap();

        assert_eq!(clf.predict(&x).unwrap(), vec![0, 1, 1]);
        let proba = clf.predict_proba(&x).unwrap();
        assert_eq!(proba.len(), 3);
        assert!(proba.iter().all(|[n, p]| (n + p - 1.0).abs() < 1e-12));
    }

    #[test]
    fn test_threshold_classifier_rejects_bad_threshold() {
        let model = LogisticModel::new(vec!["x".to_string()], vec![1.0], 0.0).unwrap();
        assert!(ThresholdClassifier::new(model, 1.0).is_err());
    }
}
