//! Evaluation metrics for the default / no-default classifier.
//!
//! Every function is pure: the confusion matrix is rebuilt from the label
//! vectors on each call, so call order never affects results.

pub mod confusion;
pub mod cost;
pub mod prfs;
pub mod ranking;

pub use confusion::{ClassLabel, ConfusionCell, ConfusionMatrix, confusion_metric};
pub use cost::custom_cost_score;
pub use prfs::{ClassScores, DEFAULT_BETA, PrfsMetric, fbeta, prfs_metric};
pub use ranking::{log_loss, pr_auc, roc_auc};
