//! Single-applicant scoring against a trained model.

use crate::config::validate_threshold;
use crate::error::{Result, RiskError};
use crate::features::{FeatureSchema, FeatureTable, LoanId};
use crate::prediction::model::ProbabilityModel;
use serde::{Deserialize, Serialize};

/// Outcome of scoring one applicant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub probability_neg: f64,
    pub probability_pos: f64,
    /// 1 when the applicant is predicted to default.
    pub decision: u8,
}

impl PredictionResult {
    pub fn from_probabilities(probability_neg: f64, probability_pos: f64, threshold: f64) -> Self {
        Self {
            probability_neg,
            probability_pos,
            decision: u8::from(probability_pos >= threshold),
        }
    }
}

/// Scores applicants from a feature table with a fixed model and threshold.
///
/// Holds no per-call state, so one instance can serve any number of requests.
pub struct PredictionService<M> {
    model: M,
    features: FeatureTable,
    expected_features: FeatureSchema,
    threshold: f64,
}

impl<M: ProbabilityModel> PredictionService<M> {
    /// # Errors
    ///
    /// Returns a configuration error when `threshold` is not in (0, 1).
    pub fn new(
        model: M,
        features: FeatureTable,
        expected_features: FeatureSchema,
        threshold: f64,
    ) -> Result<Self> {
        validate_threshold(threshold)?;
        tracing::info!(
            clients = features.len(),
            features = expected_features.len(),
            threshold,
            "Prediction service ready"
        );
        Ok(Self {
            model,
            features,
            expected_features,
            threshold,
        })
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn expected_features(&self) -> &FeatureSchema {
        &self.expected_features
    }

    /// Loan ids available for scoring.
    pub fn loan_ids(&self) -> impl Iterator<Item = LoanId> + '_ {
        self.features.loan_ids()
    }

    /// Score the applicant identified by `loan_id`.
    ///
    /// # Errors
    ///
    /// - [`RiskError::NotFound`] when the loan id is not in the table.
    /// - [`RiskError::Service`] (status 500, "Feature mismatch ...") when the
    ///   row's columns differ from the expected features.
    /// - [`RiskError::ModelInvocation`] when the model fails.
    /// - [`RiskError::InvalidModelOutput`] when the output cannot be read as
    ///   two class probabilities.
    pub fn get_prediction_for_specific_client(&self, loan_id: LoanId) -> Result<PredictionResult> {
        let record = self
            .features
            .get(loan_id)
            .ok_or_else(|| RiskError::not_found(format!("loan id {loan_id}")))?;

        let input = self.expected_features.align(&record).map_err(|err| {
            tracing::warn!(loan_id, detail = %err.detail, "Rejected client row");
            err
        })?;

        let output = self
            .model
            .predict(&input)
            .map_err(RiskError::ModelInvocation)?;
        let (probability_neg, probability_pos) = output.into_probabilities()?;

        let result =
            PredictionResult::from_probabilities(probability_neg, probability_pos, self.threshold);
        tracing::debug!(
            loan_id,
            probability_pos,
            decision = result.decision,
            "Scored client"
        );
        Ok(result)
    }

    /// Score several applicants, stopping at the first failure.
    pub fn predict_batch(&self, loan_ids: &[LoanId]) -> Result<Vec<PredictionResult>> {
        loan_ids
            .iter()
            .map(|&id| self.get_prediction_for_specific_client(id))
            .collect()
    }
}
