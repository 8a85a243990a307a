//! Scorer map contract and evaluation against a real estimator.

use pretty_assertions::assert_eq;
use riskscore_ml::config::MetricsConfig;
use riskscore_ml::scoring::ResponseMethod;
use riskscore_ml::{
    Estimator, FeatureFrame, LogisticModel, MetricRegistry, ScorerMap, ThresholdClassifier,
};

const EXPECTED_KEYS: [&str; 17] = [
    "custom_cost",
    "f2_score_n",
    "f2_score_p",
    "fn",
    "fp",
    "logloss",
    "pr_auc_n",
    "pr_auc_p",
    "precision_n",
    "precision_p",
    "recall_n",
    "recall_p",
    "roc_auc",
    "support_n",
    "support_p",
    "tn",
    "tp",
];

fn scoring_dict() -> ScorerMap {
    MetricRegistry::default().scoring_dict()
}

/// One feature, ten applicants; label 1 mostly for large values.
fn fixture() -> (ThresholdClassifier<LogisticModel>, FeatureFrame, Vec<u8>) {
    let model = LogisticModel::new(vec!["score".to_string()], vec![1.5], 0.0).unwrap();
    let classifier = ThresholdClassifier::new(model, 0.5).unwrap();
    let values = [-3.0, -2.0, -1.5, -1.0, -0.5, 0.5, 1.0, 1.5, 2.0, 3.0];
    let x = FeatureFrame::new(
        vec!["score".to_string()],
        values.iter().map(|&v| vec![v]).collect(),
    )
    .unwrap();
    let y_true = vec![0, 0, 0, 1, 0, 0, 1, 1, 1, 1];
    (classifier, x, y_true)
}

#[test]
fn has_exactly_the_documented_keys() {
    let map = scoring_dict();
    let keys: Vec<&str> = map.keys().collect();
    assert_eq!(keys, EXPECTED_KEYS.to_vec());
}

#[test]
fn response_methods_and_signs() {
    let map = scoring_dict();
    for (key, scorer) in map.iter() {
        let expects_proba = matches!(key, "pr_auc_n" | "pr_auc_p" | "roc_auc" | "logloss");
        let method = if expects_proba {
            ResponseMethod::PredictProba
        } else {
            ResponseMethod::Predict
        };
        assert_eq!(scorer.response_method(), method, "{key}");
        assert_eq!(scorer.greater_is_better(), key != "logloss", "{key}");
    }
}

#[test]
fn two_calls_are_equivalent() {
    let (classifier, x, y) = fixture();
    let first = scoring_dict().evaluate(&classifier, &x, &y).unwrap();
    let second = scoring_dict().evaluate(&classifier, &x, &y).unwrap();
    assert_eq!(first, second);
    assert_eq!(scoring_dict(), scoring_dict());
}

#[test]
fn evaluate_reports_expected_values() {
    let (classifier, x, y) = fixture();
    assert_eq!(classifier.predict(&x).unwrap(), vec![0, 0, 0, 0, 0, 1, 1, 1, 1, 1]);

    let results = scoring_dict().evaluate(&classifier, &x, &y).unwrap();
    assert_eq!(results.len(), 17);
    assert_eq!(results["tn"], 4.0);
    assert_eq!(results["fp"], 1.0);
    assert_eq!(results["fn"], 1.0);
    assert_eq!(results["tp"], 4.0);
    assert_eq!(results["support_n"], 5.0);
    assert_eq!(results["support_p"], 5.0);
    assert!((results["precision_p"] - 0.8).abs() < 1e-12);
    assert!((results["recall_p"] - 0.8).abs() < 1e-12);
    assert!((results["f2_score_p"] - 0.8).abs() < 1e-12);
    // 1 - (1 + 1 * 10) / 10
    assert!((results["custom_cost"] - (-0.1)).abs() < 1e-12);
    // The positive at -1.0 ranks below the negatives at -0.5 and 0.5.
    assert!((results["roc_auc"] - 23.0 / 25.0).abs() < 1e-12);
    assert!(results["logloss"] < 0.0);
    // Class 1 ranked by its probability: precisions 1, 1, 1, 1 and 5/7.
    assert!((results["pr_auc_p"] - 33.0 / 35.0).abs() < 1e-12);
    // Class 0 ranked by its own probability: precisions 1, 1, 1, 4/5 and 5/6.
    assert!((results["pr_auc_n"] - 139.0 / 150.0).abs() < 1e-12);
}

#[test]
fn custom_cost_follows_configured_weight() {
    let (classifier, x, y) = fixture();
    let registry = MetricRegistry::new(MetricsConfig {
        fn_weight: 2.0,
        beta: 2.0,
    })
    .unwrap();
    let results = registry.scoring_dict().evaluate(&classifier, &x, &y).unwrap();
    assert!((results["custom_cost"] - 0.7).abs() < 1e-12);
}

#[test]
fn single_scorer_matches_evaluate() {
    let (classifier, x, y) = fixture();
    let map = scoring_dict();
    let results = map.evaluate(&classifier, &x, &y).unwrap();
    for key in EXPECTED_KEYS {
        let score = map.get(key).unwrap().score(&classifier, &x, &y).unwrap();
        assert_eq!(score, results[key], "{key}");
    }
}

#[test]
fn invalid_labels_propagate() {
    let (classifier, x, mut y) = fixture();
    y[0] = 7;
    assert!(scoring_dict().evaluate(&classifier, &x, &y).is_err());
}
