//! Prediction service: feature alignment, model invocation and threshold decision.

pub mod model;
pub mod service;

pub use model::{LogisticModel, ModelOutput, ProbabilityModel};
pub use service::{PredictionResult, PredictionService};
