//! Model abstraction and normalisation of its probability output.

use crate::error::{ModelError, Result, RiskError};
use crate::features::FeatureFrame;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;

/// Raw probability output of a model, in one of the shapes models produce.
///
/// Both shapes carry one `[prob_negative, prob_positive]` row per input row;
/// table column names are informational only.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelOutput {
    /// Plain two-column array.
    Array(Vec<Vec<f64>>),
    /// Two-column table with named columns.
    Table {
        columns: Vec<String>,
        rows: Vec<Vec<f64>>,
    },
}

impl ModelOutput {
    /// Every row as `[prob_negative, prob_positive]`.
    ///
    /// # Errors
    ///
    /// Any shape other than non-empty rows of exactly two finite probabilities
    /// in [0, 1] is rejected.
    pub fn probability_rows(self) -> Result<Vec<[f64; 2]>> {
        let rows = match self {
            Self::Array(rows) => rows,
            Self::Table { columns, rows } => {
                if columns.len() != 2 {
                    return Err(RiskError::invalid_model_output(format!(
                        "expected 2 output columns, got {}",
                        columns.len()
                    )));
                }
                rows
            }
        };
        if rows.is_empty() {
            return Err(RiskError::invalid_model_output("model returned no rows"));
        }
        rows.into_iter()
            .enumerate()
            .map(|(i, row)| match row.as_slice() {
                &[neg, pos] if is_probability(neg) && is_probability(pos) => Ok([neg, pos]),
                &[neg, pos] => Err(RiskError::invalid_model_output(format!(
                    "row {i} holds values outside [0, 1]: [{neg}, {pos}]"
                ))),
                other => Err(RiskError::invalid_model_output(format!(
                    "row {i} has {} values, expected 2",
                    other.len()
                ))),
            })
            .collect()
    }

    /// `(prob_negative, prob_positive)` of the first row.
    pub fn into_probabilities(self) -> Result<(f64, f64)> {
        let [neg, pos] = self.probability_rows()?[0];
        Ok((neg, pos))
    }
}

fn is_probability(value: f64) -> bool {
    (0.0..=1.0).contains(&value)
}

/// A trained model able to produce class probabilities for a feature frame.
pub trait ProbabilityModel: Send + Sync {
    fn predict(&self, input: &FeatureFrame) -> std::result::Result<ModelOutput, ModelError>;
}

impl<M: ProbabilityModel + ?Sized> ProbabilityModel for Box<M> {
    fn predict(&self, input: &FeatureFrame) -> std::result::Result<ModelOutput, ModelError> {
        (**self).predict(input)
    }
}

impl<M: ProbabilityModel + ?Sized> ProbabilityModel for Arc<M> {
    fn predict(&self, input: &FeatureFrame) -> std::result::Result<ModelOutput, ModelError> {
        (**self).predict(input)
    }
}

/// Logistic regression over named features.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticModel {
    pub features: Vec<String>,
    pub coefficients: Vec<f64>,
    #[serde(default)]
    pub intercept: f64,
}

impl LogisticModel {
    pub fn new(features: Vec<String>, coefficients: Vec<f64>, intercept: f64) -> Result<Self> {
        let model = Self {
            features,
            coefficients,
            intercept,
        };
        model.validate()?;
        Ok(model)
    }

    /// Parse model parameters from JSON.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let model: Self = serde_json::from_str(json)?;
        model.validate()?;
        Ok(model)
    }

    /// Load model parameters from a JSON file.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        Self::from_json_str(&std::fs::read_to_string(path)?)
    }

    fn validate(&self) -> Result<()> {
        if self.features.len() != self.coefficients.len() {
            return Err(RiskError::config(format!(
                "logistic model has {} features but {} coefficients",
                self.features.len(),
                self.coefficients.len()
            )));
        }
        Ok(())
    }

    /// Probability of default for a row whose features sit at `positions`.
    fn probability(&self, positions: &[usize], row: &[f64]) -> Result<f64> {
        let mut z = self.intercept;
        let weights = self.features.iter().zip(&self.coefficients);
        for (&i, (name, w)) in positions.iter().zip(weights) {
            let value = row.get(i).ok_or_else(|| {
                RiskError::validation(format!(
                    "row has {} values, feature `{name}` expects column {i}",
                    row.len()
                ))
            })?;
            z += value * w;
        }
        Ok(sigmoid(z))
    }
}

impl ProbabilityModel for LogisticModel {
    fn predict(&self, input: &FeatureFrame) -> std::result::Result<ModelOutput, ModelError> {
        if input.n_columns() != self.features.len() {
            return Err(RiskError::validation(format!(
                "model expects {} features, input has {} columns",
                self.features.len(),
                input.n_columns()
            ))
            .into());
        }
        let positions = self
            .features
            .iter()
            .map(|name| {
                input
                    .column_index(name)
                    .ok_or_else(|| RiskError::validation(format!("input lacks feature `{name}`")))
            })
            .collect::<Result<Vec<usize>>>()?;

        let rows = input
            .rows()
            .iter()
            .map(|row| {
                let pos = self.probability(&positions, row)?;
                Ok(vec![1.0 - pos, pos])
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(ModelOutput::Array(rows))
    }
}

fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}
