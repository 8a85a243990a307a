//! Error types for the riskscore-ml crate.

use thiserror::Error;

/// Status code attached to feature-mismatch failures.
pub const FEATURE_MISMATCH_STATUS: u16 = 500;

/// Boxed error returned by model implementations.
pub type ModelError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, RiskError>;

/// Top-level error type for scoring and prediction.
#[derive(Debug, Error)]
pub enum RiskError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Model invocation failed: {0}")]
    ModelInvocation(#[source] ModelError),

    #[error("Invalid model output: {0}")]
    InvalidModelOutput(String),

    #[error(transparent)]
    Service(#[from] ServiceError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl RiskError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn invalid_model_output(msg: impl Into<String>) -> Self {
        Self::InvalidModelOutput(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// HTTP-style status a transport layer should answer with.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Service(err) => err.status_code,
            Self::Validation(_) => 400,
            Self::NotFound(_) => 404,
            _ => 500,
        }
    }
}

/// A request-scoped failure that must cross a service boundary intact.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{detail}")]
pub struct ServiceError {
    pub status_code: u16,
    pub detail: String,
}

impl ServiceError {
    pub fn new(status_code: u16, detail: impl Into<String>) -> Self {
        Self {
            status_code,
            detail: detail.into(),
        }
    }

    /// Build the error raised when a client row does not match the model schema.
    pub fn feature_mismatch(missing: &[String], extra: &[String]) -> Self {
        Self::new(
            FEATURE_MISMATCH_STATUS,
            format!(
                "Feature mismatch: missing columns {:?}, unexpected columns {:?}",
                missing, extra
            ),
        )
    }
}
