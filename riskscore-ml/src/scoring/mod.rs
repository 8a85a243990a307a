//! Scorer map over the metric functions, consumable by model selection.

pub mod estimator;
pub mod kind;
pub mod registry;
pub mod scorer;

pub use estimator::{Estimator, ThresholdClassifier};
pub use kind::{MetricInput, MetricKind, ResponseMethod};
pub use registry::MetricRegistry;
pub use scorer::{Scorer, ScorerMap};
