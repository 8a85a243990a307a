//! # riskscore-ml
//!
//! Evaluation metrics for a binary default / no-default classifier, the named
//! scorer map built on them, and a prediction service scoring one loan
//! applicant against a trained model.
//!
//! - [`metrics`]: confusion-matrix counts, per-class precision / recall /
//!   F-beta / support, the asymmetric business cost, PR / ROC AUC and log-loss.
//! - [`scoring`]: [`MetricKind`], [`Scorer`] and the [`ScorerMap`] returned by
//!   [`MetricRegistry::scoring_dict`].
//! - [`prediction`]: feature alignment, model invocation, output
//!   normalisation and the threshold decision.
//! - [`timing`] and [`logging`]: step timing and subscriber setup.

// Foundation
pub mod config;
pub mod error;
pub mod logging;
pub mod timing;

// Data
pub mod features;

// Evaluation
pub mod metrics;
pub mod scoring;

// Serving
pub mod prediction;

// Re-exports
pub use config::{MetricsConfig, RiskConfig, load_config};
pub use error::{RiskError, ServiceError};
pub use features::{FeatureFrame, FeatureSchema, FeatureTable, LoanId};
pub use prediction::{
    LogisticModel, ModelOutput, PredictionResult, PredictionService, ProbabilityModel,
};
pub use scoring::{
    Estimator, MetricKind, MetricRegistry, Scorer, ScorerMap, ThresholdClassifier,
};
pub use timing::TimingLog;
