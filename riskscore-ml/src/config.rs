//! Configuration for metric computation, prediction and logging.
//!
//! Uses `figment` for layered configuration: defaults -> config file -> environment.
//! Environment variables use the `RISKSCORE_` prefix with `__` between sections,
//! e.g. `RISKSCORE_METRICS__FN_WEIGHT=5`.

use crate::error::{Result, RiskError};
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RiskConfig {
    /// Business parameters of the evaluation metrics.
    #[serde(default)]
    pub metrics: MetricsConfig,
    /// Decision parameters of the prediction service.
    #[serde(default)]
    pub prediction: PredictionConfig,
    /// Log output settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl RiskConfig {
    /// Check every section, returning the first violation.
    pub fn validate(&self) -> Result<()> {
        self.metrics.validate()?;
        self.prediction.validate()?;
        Ok(())
    }
}

/// Metric parameters shared by every scorer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricsConfig {
    /// Cost of one false negative relative to one false positive.
    #[serde(default = "default_fn_weight")]
    pub fn_weight: f64,
    /// Beta of the F-beta score; 2 weighs recall twice as much as precision.
    #[serde(default = "default_beta")]
    pub beta: f64,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            fn_weight: default_fn_weight(),
            beta: default_beta(),
        }
    }
}

impl MetricsConfig {
    pub fn validate(&self) -> Result<()> {
        if !self.fn_weight.is_finite() || self.fn_weight <= 1.0 {
            return Err(RiskError::config(format!(
                "metrics.fn_weight must be a finite value > 1, got {}",
                self.fn_weight
            )));
        }
        if !self.beta.is_finite() || self.beta <= 0.0 {
            return Err(RiskError::config(format!(
                "metrics.beta must be a finite value > 0, got {}",
                self.beta
            )));
        }
        Ok(())
    }
}

fn default_fn_weight() -> f64 {
    10.0
}

fn default_beta() -> f64 {
    crate::metrics::DEFAULT_BETA
}

/// Prediction service parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionConfig {
    /// Probability of default at or above which an applicant is rejected.
    #[serde(default = "default_threshold")]
    pub threshold: f64,
}

impl Default for PredictionConfig {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
        }
    }
}

impl PredictionConfig {
    pub fn validate(&self) -> Result<()> {
        validate_threshold(self.threshold)
    }
}

/// A decision threshold must lie strictly between 0 and 1.
pub fn validate_threshold(threshold: f64) -> Result<()> {
    if threshold.is_finite() && threshold > 0.0 && threshold < 1.0 {
        Ok(())
    } else {
        Err(RiskError::config(format!(
            "threshold must be in (0, 1), got {threshold}"
        )))
    }
}

fn default_threshold() -> f64 {
    0.5
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive, overridden by `RUST_LOG`.
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Emit JSON lines instead of bare messages.
    #[serde(default)]
    pub json: bool,
    /// Also append JSON lines to this file.
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
            file: None,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Load configuration from layered sources.
///
/// Priority (highest to lowest):
/// 1. Environment variables (prefixed with `RISKSCORE_`)
/// 2. The TOML file at `path`, when given
/// 3. The user-level `config.toml`, when present
/// 4. Built-in defaults
pub fn load_config(path: Option<&Path>) -> Result<RiskConfig> {
    let mut figment = Figment::from(Serialized::defaults(RiskConfig::default()));

    if let Some(user_config) = user_config_path().filter(|p| p.exists()) {
        figment = figment.merge(Toml::file(user_config));
    }

    if let Some(path) = path {
        if !path.exists() {
            return Err(RiskError::config(format!(
                "config file not found: {}",
                path.display()
            )));
        }
        figment = figment.merge(Toml::file(path));
    }

    figment = figment.merge(Env::prefixed("RISKSCORE_").split("__"));

    let config: RiskConfig = figment
        .extract()
        .map_err(|e| RiskError::config(e.to_string()))?;
    config.validate()?;
    Ok(config)
}

/// `config.toml` in the platform config directory, e.g.
/// `~/.config/riskscore/config.toml` on Linux.
pub fn user_config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("dev", "riskscore", "riskscore")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RiskConfig::default();
        assert_eq!(config.metrics.fn_weight, 10.0);
        assert_eq!(config.metrics.beta, 2.0);
        assert_eq!(config.prediction.threshold, 0.5);
        assert_eq!(config.logging.level, "info");
        assert!(!config.logging.json);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_serde_roundtrip() {
        let config = RiskConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let parsed: RiskConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.metrics, config.metrics);
        assert_eq!(parsed.prediction, config.prediction);
    }

    #[test]
    fn test_partial_sections_use_defaults() {
        let parsed: RiskConfig = serde_json::from_str(r#"{"metrics":{"beta":1.0}}"#).unwrap();
        assert_eq!(parsed.metrics.beta, 1.0);
        assert_eq!(parsed.metrics.fn_weight, 10.0);
        assert_eq!(parsed.prediction.threshold, 0.5);
    }

    #[test]
    fn test_threshold_bounds() {
        assert!(validate_threshold(0.5).is_ok());
        assert!(validate_threshold(0.0).is_err());
        assert!(validate_threshold(1.0).is_err());
        assert!(validate_threshold(f64::NAN).is_err());
    }

    #[test]
    fn test_invalid_fn_weight() {
        let config = MetricsConfig {
            fn_weight: 1.0,
            beta: 2.0,
        };
        assert!(matches!(config.validate(), Err(RiskError::Config(_))));
    }

    #[test]
    fn test_load_config_from_file() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "riskscore.toml",
                r#"
[metrics]
fn_weight = 5.0

[prediction]
threshold = 0.35
"#,
            )?;
            let config =
                load_config(Some(Path::new("riskscore.toml"))).map_err(|e| e.to_string())?;
            assert_eq!(config.metrics.fn_weight, 5.0);
            assert_eq!(config.metrics.beta, 2.0);
            assert_eq!(config.prediction.threshold, 0.35);
            Ok(())
        });
    }

    #[test]
    fn test_env_overrides_file() {
        figment::Jail::expect_with(|jail| {
            jail.create_file("riskscore.toml", "[prediction]\nthreshold = 0.35\n")?;
            jail.set_env("RISKSCORE_PREDICTION__THRESHOLD", "0.42");
            let config =
                load_config(Some(Path::new("riskscore.toml"))).map_err(|e| e.to_string())?;
            assert_eq!(config.prediction.threshold, 0.42);
            Ok(())
        });
    }

    #[test]
    fn test_load_config_rejects_invalid_values() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("RISKSCORE_PREDICTION__THRESHOLD", "1.5");
            let result = load_config(None);
            assert!(matches!(result, Err(RiskError::Config(_))));
            Ok(())
        });
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config(Some(Path::new("/nonexistent/riskscore.toml")));
        assert!(matches!(result, Err(RiskError::Config(_))));
    }
}
