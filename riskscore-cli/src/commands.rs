//! CLI subcommand handlers.

use crate::{Commands, ConfigAction};
use anyhow::{Context, bail};
use riskscore_ml::config::{RiskConfig, user_config_path, validate_threshold};
use riskscore_ml::{
    FeatureSchema, FeatureTable, LogisticModel, MetricRegistry, PredictionService,
    ThresholdClassifier, TimingLog,
};
use std::path::Path;

/// Handle a CLI subcommand.
pub async fn handle_command(command: Commands, config: &RiskConfig) -> anyhow::Result<()> {
    match command {
        Commands::Predict {
            features,
            model,
            loan_id,
            id_column,
            threshold,
        } => {
            let threshold = resolve_threshold(threshold, config)?;
            handle_predict(&features, &model, loan_id, &id_column, threshold).await
        }
        Commands::Evaluate {
            features,
            labels,
            model,
            id_column,
            threshold,
        } => {
            let threshold = resolve_threshold(threshold, config)?;
            handle_evaluate(&features, &labels, &model, &id_column, threshold, config).await
        }
        Commands::Scorers => handle_scorers(config),
        Commands::Config { action } => handle_config(action, config),
    }
}

fn resolve_threshold(threshold: Option<f64>, config: &RiskConfig) -> anyhow::Result<f64> {
    let threshold = threshold.unwrap_or(config.prediction.threshold);
    validate_threshold(threshold)?;
    Ok(threshold)
}

async fn load_table(path: &Path, id_column: &str) -> anyhow::Result<FeatureTable> {
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read feature table {}", path.display()))?;
    let table = FeatureTable::from_json_str(&content, id_column)
        .with_context(|| format!("Invalid feature table {}", path.display()))?;
    Ok(table)
}

async fn load_model(path: &Path) -> anyhow::Result<LogisticModel> {
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read model {}", path.display()))?;
    let model = LogisticModel::from_json_str(&content)
        .with_context(|| format!("Invalid model {}", path.display()))?;
    Ok(model)
}

async fn handle_predict(
    features: &Path,
    model: &Path,
    loan_id: i64,
    id_column: &str,
    threshold: f64,
) -> anyhow::Result<()> {
    let timing = TimingLog::global();

    let (table, model) = {
        let _step = timing.start("Load inputs");
        (load_table(features, id_column).await?, load_model(model).await?)
    };

    let schema = FeatureSchema::new(model.features.clone())?;
    let service = PredictionService::new(model, table, schema, threshold)?;
    let result = timing
        .time("Predict", || service.get_prediction_for_specific_client(loan_id))
        .with_context(|| format!("Failed to score loan {loan_id}"))?;

    println!("{}", serde_json::to_string(&result)?);
    Ok(())
}

async fn handle_evaluate(
    features: &Path,
    labels: &str,
    model: &Path,
    id_column: &str,
    threshold: f64,
    config: &RiskConfig,
) -> anyhow::Result<()> {
    let timing = TimingLog::global();

    let (mut table, model) = {
        let _step = timing.start("Load inputs");
        (load_table(features, id_column).await?, load_model(model).await?)
    };

    let y_true = to_labels(&table.take_column(labels)?)
        .with_context(|| format!("Invalid label column `{labels}`"))?;
    let x = table.to_frame();
    let classifier = ThresholdClassifier::new(model, threshold)?;
    let registry = MetricRegistry::new(config.metrics)?;

    let results = timing.time("Evaluate", || {
        registry.scoring_dict().evaluate(&classifier, &x, &y_true)
    })?;

    println!("{}", serde_json::to_string_pretty(&results)?);
    Ok(())
}

/// Labels must be exactly 0 or 1.
fn to_labels(values: &[f64]) -> anyhow::Result<Vec<u8>> {
    values
        .iter()
        .enumerate()
        .map(|(i, &v)| {
            if v == 0.0 {
                Ok(0)
            } else if v == 1.0 {
                Ok(1)
            } else {
                bail!("row {i} has label {v}, expected 0 or 1")
            }
        })
        .collect()
}

fn handle_scorers(config: &RiskConfig) -> anyhow::Result<()> {
    let registry = MetricRegistry::new(config.metrics)?;
    let scorers = registry.scoring_dict();
    println!("{:<14} {:<14} DIRECTION", "KEY", "RESPONSE");
    for (key, scorer) in scorers.iter() {
        let direction = if scorer.greater_is_better() {
            "maximise"
        } else {
            "minimise (negated)"
        };
        println!(
            "{:<14} {:<14} {}",
            key,
            scorer.response_method().as_str(),
            direction
        );
    }
    Ok(())
}

fn handle_config(action: ConfigAction, config: &RiskConfig) -> anyhow::Result<()> {
    match action {
        ConfigAction::Show => {
            println!("{}", serde_json::to_string_pretty(config)?);
        }
        ConfigAction::Path => match user_config_path() {
            Some(path) => println!("{}", path.display()),
            None => bail!("No home directory found for the user configuration"),
        },
    }
    Ok(())
}
