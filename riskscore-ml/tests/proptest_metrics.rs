//! Property-based tests for the metric functions using proptest.

use proptest::prelude::*;

use riskscore_ml::metrics::{
    ClassLabel, ConfusionMatrix, PrfsMetric, custom_cost_score, fbeta, prfs_metric, roc_auc,
};

/// Paired binary label vectors of equal length.
fn label_pairs(max_len: usize) -> impl Strategy<Value = (Vec<u8>, Vec<u8>)> {
    (1..=max_len).prop_flat_map(|n| {
        (
            prop::collection::vec(0u8..=1, n),
            prop::collection::vec(0u8..=1, n),
        )
    })
}

// --- Confusion matrix properties ---

proptest! {
    #[test]
    fn confusion_cells_sum_to_len((y_true, y_pred) in label_pairs(64)) {
        let m = ConfusionMatrix::from_labels(&y_true, &y_pred).unwrap();
        let [tn, fp, fn_, tp] = m.ravel();
        prop_assert_eq!(tn + fp + fn_ + tp, y_true.len());
    }

    #[test]
    fn out_of_range_labels_rejected(
        (mut y_true, y_pred) in label_pairs(16),
        bad in 2u8..=255,
    ) {
        y_true[0] = bad;
        prop_assert!(ConfusionMatrix::from_labels(&y_true, &y_pred).is_err());
    }
}

// --- Precision / recall / F-beta properties ---

proptest! {
    #[test]
    fn precision_and_recall_in_unit_interval((y_true, y_pred) in label_pairs(64)) {
        for label in [ClassLabel::Negative, ClassLabel::Positive] {
            for metric in [PrfsMetric::Precision, PrfsMetric::Recall, PrfsMetric::Fscore] {
                let v = prfs_metric(&y_true, &y_pred, metric, label, 2.0).unwrap();
                prop_assert!((0.0..=1.0).contains(&v), "{metric} = {v}");
            }
        }
    }

    #[test]
    fn f2_matches_closed_form((y_true, y_pred) in label_pairs(64)) {
        let label = ClassLabel::Positive;
        let p = prfs_metric(&y_true, &y_pred, PrfsMetric::Precision, label, 2.0).unwrap();
        let r = prfs_metric(&y_true, &y_pred, PrfsMetric::Recall, label, 2.0).unwrap();
        let f2 = prfs_metric(&y_true, &y_pred, PrfsMetric::Fscore, label, 2.0).unwrap();
        let expected = if p + r > 0.0 { 5.0 * p * r / (4.0 * p + r) } else { 0.0 };
        prop_assert!((f2 - expected).abs() < 1e-12);
        prop_assert!((fbeta(p, r, 2.0) - expected).abs() < 1e-12);
    }

    #[test]
    fn supports_count_true_labels((y_true, y_pred) in label_pairs(64)) {
        let positives = y_true.iter().filter(|&&y| y == 1).count() as f64;
        let pos = prfs_metric(&y_true, &y_pred, PrfsMetric::Support, ClassLabel::Positive, 2.0)
            .unwrap();
        let neg = prfs_metric(&y_true, &y_pred, PrfsMetric::Support, ClassLabel::Negative, 2.0)
            .unwrap();
        prop_assert_eq!(pos, positives);
        prop_assert_eq!(neg + pos, y_true.len() as f64);
    }
}

// --- Custom cost properties ---

proptest! {
    #[test]
    fn perfect_classifier_costs_nothing(
        y in prop::collection::vec(0u8..=1, 1..64),
        fn_weight in 1.01f64..50.0,
    ) {
        prop_assert_eq!(custom_cost_score(&y, &y, fn_weight).unwrap(), 1.0);
    }

    #[test]
    fn cost_decreases_as_false_negatives_grow(
        n_pos in 1usize..32,
        n_neg in 0usize..32,
        fn_weight in 1.01f64..50.0,
    ) {
        let y_true: Vec<u8> = std::iter::repeat_n(1u8, n_pos)
            .chain(std::iter::repeat_n(0u8, n_neg))
            .collect();
        let mut y_pred = y_true.clone();
        let mut previous = custom_cost_score(&y_true, &y_pred, fn_weight).unwrap();
        for i in 0..n_pos {
            y_pred[i] = 0;
            let score = custom_cost_score(&y_true, &y_pred, fn_weight).unwrap();
            prop_assert!(score < previous);
            previous = score;
        }
    }
}

// --- Ranking properties ---

proptest! {
    #[test]
    fn roc_auc_in_unit_interval(
        scores in prop::collection::vec(0.0f64..1.0, 2..64),
        seed in prop::collection::vec(0u8..=1, 2..64),
    ) {
        let n = scores.len().min(seed.len());
        let mut y_true = seed[..n].to_vec();
        y_true[0] = 0;
        y_true[1] = 1;
        let auc = roc_auc(&y_true, &scores[..n]).unwrap();
        prop_assert!((0.0..=1.0).contains(&auc));
    }
}
