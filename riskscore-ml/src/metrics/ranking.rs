//! Probability-based metrics: average precision, ROC AUC and log-loss.
//!
//! These take class probabilities, never hard predictions.

use crate::error::{Result, RiskError};
use crate::metrics::confusion::{ClassLabel, check_binary, check_same_len};

/// Area under the precision-recall curve, as average precision.
///
/// `AP = Σ (Rₙ − Rₙ₋₁) · Pₙ` over distinct score thresholds in descending
/// order, where samples whose label equals `pos_label` count as positives
/// and `scores` are that class's probabilities.
///
/// # Errors
///
/// Returns a validation error for empty or mismatched input, non-binary
/// labels, non-finite scores, or when `pos_label` never occurs.
pub fn pr_auc(y_true: &[u8], scores: &[f64], pos_label: ClassLabel) -> Result<f64> {
    check_scores(y_true, scores)?;
    let positives: Vec<bool> = y_true.iter().map(|&l| l == pos_label.as_u8()).collect();
    let total_pos = positives.iter().filter(|&&p| p).count();
    if total_pos == 0 {
        return Err(RiskError::validation(format!(
            "average precision needs at least one sample of class {pos_label}"
        )));
    }

    let mut ap = 0.0;
    let mut prev_recall = 0.0;
    for (tp, fp) in threshold_counts(&positives, scores) {
        let precision = tp as f64 / (tp + fp) as f64;
        let recall = tp as f64 / total_pos as f64;
        ap += (recall - prev_recall) * precision;
        prev_recall = recall;
    }
    Ok(ap)
}

/// Area under the ROC curve for the positive class (label 1).
///
/// Tied scores form a single threshold; the area is integrated with the
/// trapezoidal rule from (0, 0) to (1, 1).
///
/// # Errors
///
/// Returns a validation error for empty or mismatched input, non-binary
/// labels, non-finite scores, or when only one class is present.
pub fn roc_auc(y_true: &[u8], scores: &[f64]) -> Result<f64> {
    check_scores(y_true, scores)?;
    let positives: Vec<bool> = y_true.iter().map(|&l| l == 1).collect();
    let total_pos = positives.iter().filter(|&&p| p).count();
    let total_neg = positives.len() - total_pos;
    if total_pos == 0 || total_neg == 0 {
        return Err(RiskError::validation(
            "ROC AUC is undefined when only one class is present in y_true",
        ));
    }

    let (p, n) = (total_pos as f64, total_neg as f64);
    let mut auc = 0.0;
    let (mut prev_fpr, mut prev_tpr) = (0.0, 0.0);
    for (tp, fp) in threshold_counts(&positives, scores) {
        let fpr = fp as f64 / n;
        let tpr = tp as f64 / p;
        auc += (fpr - prev_fpr) * (tpr + prev_tpr) / 2.0;
        prev_fpr = fpr;
        prev_tpr = tpr;
    }
    Ok(auc)
}

/// Mean binary cross-entropy of the positive-class probabilities.
///
/// Probabilities are clipped to `[ε, 1 − ε]` with `ε = f64::EPSILON`. Lower is better.
pub fn log_loss(y_true: &[u8], prob_positive: &[f64]) -> Result<f64> {
    check_scores(y_true, prob_positive)?;
    let eps = f64::EPSILON;
    let total: f64 = y_true
        .iter()
        .zip(prob_positive)
        .map(|(&label, &p)| {
            let p = p.clamp(eps, 1.0 - eps);
            if label == 1 { -p.ln() } else { -(1.0 - p).ln() }
        })
        .sum();
    Ok(total / y_true.len() as f64)
}

/// Cumulative (tp, fp) after each distinct score, walking scores from high to low.
fn threshold_counts(positives: &[bool], scores: &[f64]) -> Vec<(usize, usize)> {
    let mut order: Vec<usize> = (0..scores.len()).collect();
    order.sort_by(|&a, &b| scores[b].total_cmp(&scores[a]));

    let mut counts = Vec::new();
    let (mut tp, mut fp) = (0usize, 0usize);
    let mut i = 0;
    while i < order.len() {
        let current = scores[order[i]];
        while i < order.len() && scores[order[i]] == current {
            if positives[order[i]] {
                tp += 1;
            } else {
                fp += 1;
            }
            i += 1;
        }
        counts.push((tp, fp));
    }
    counts
}

fn check_scores(y_true: &[u8], scores: &[f64]) -> Result<()> {
    if y_true.is_empty() {
        return Err(RiskError::validation("empty input"));
    }
    check_same_len("scores", y_true.len(), scores.len())?;
    check_binary("y_true", y_true)?;
    if let Some(bad) = scores.iter().find(|s| !s.is_finite()) {
        return Err(RiskError::validation(format!(
            "scores must be finite, found {bad}"
        )));
    }
    Ok(())
}
