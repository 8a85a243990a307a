//! Business cost metric penalising missed defaulters.

use crate::error::{Result, RiskError};
use crate::metrics::confusion::ConfusionMatrix;

/// Score derived from the misclassification cost `(FP + FN * fn_weight) / N`.
///
/// Returns `1 - cost`, so a perfect classifier scores exactly 1 and every
/// missed defaulter lowers the score `fn_weight` times more than a false alarm.
///
/// # Errors
///
/// Label errors from [`ConfusionMatrix::from_labels`] are returned unchanged;
/// empty input is rejected instead of dividing by zero.
pub fn custom_cost_score(y_true: &[u8], y_pred: &[u8], fn_weight: f64) -> Result<f64> {
    let matrix = ConfusionMatrix::from_labels(y_true, y_pred)?;
    if y_true.is_empty() {
        return Err(RiskError::validation(
            "custom cost needs at least one sample",
        ));
    }
    let cost = (matrix.false_positives as f64 + matrix.false_negatives as f64 * fn_weight)
        / y_true.len() as f64;
    Ok(1.0 - cost)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perfect_classifier_scores_one() {
        let y = [0, 1, 1, 0, 1];
        assert_eq!(custom_cost_score(&y, &y, 10.0).unwrap(), 1.0);
    }

    #[test]
    fn test_false_negative_costs_more() {
        let y_true = [0, 0, 1, 1];
        let one_fp = custom_cost_score(&y_true, &[1, 0, 1, 1], 10.0).unwrap();
        let one_fn = custom_cost_score(&y_true, &[0, 0, 0, 1], 10.0).unwrap();
        assert!((one_fp - 0.75).abs() < 1e-12);
        assert!((one_fn - (1.0 - 10.0 / 4.0)).abs() < 1e-12);
        assert!(one_fn < one_fp);
    }

    #[test]
    fn test_per_call_weight_override() {
        let y_true = [1, 1];
        let y_pred = [0, 1];
        assert!((custom_cost_score(&y_true, &y_pred, 2.0).unwrap() - 0.0).abs() < 1e-12);
        assert!((custom_cost_score(&y_true, &y_pred, 4.0).unwrap() + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_empty_input_rejected() {
        assert!(matches!(
            custom_cost_score(&[], &[], 10.0),
            Err(RiskError::Validation(_))
        ));
    }
}
