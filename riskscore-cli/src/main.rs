//! riskscore CLI: score loan applicants and evaluate credit-risk models from
//! files on disk.

mod commands;

use clap::Parser;
use std::path::PathBuf;

/// Credit-risk scoring: single-applicant predictions and model evaluation
#[derive(Parser, Debug)]
#[command(name = "riskscore", version, about, long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Score one applicant and print the prediction as JSON
    Predict {
        /// JSON array of preprocessed feature records
        #[arg(short, long)]
        features: PathBuf,

        /// JSON logistic model (`features`, `coefficients`, `intercept`)
        #[arg(short, long)]
        model: PathBuf,

        /// Applicant to score
        #[arg(short, long)]
        loan_id: i64,

        /// Name of the identifier field in the feature records
        #[arg(long, default_value = "SK_ID_CURR")]
        id_column: String,

        /// Decision threshold (overrides `prediction.threshold`)
        #[arg(short, long)]
        threshold: Option<f64>,
    },
    /// Score a labelled table with every named metric
    Evaluate {
        /// JSON array of feature records including the label column
        #[arg(short, long)]
        features: PathBuf,

        /// Label column (0 = repaid, 1 = default)
        #[arg(long, default_value = "TARGET")]
        labels: String,

        /// JSON logistic model
        #[arg(short, long)]
        model: PathBuf,

        /// Name of the identifier field in the feature records
        #[arg(long, default_value = "SK_ID_CURR")]
        id_column: String,

        /// Decision threshold for the label metrics
        #[arg(short, long)]
        threshold: Option<f64>,
    },
    /// List the named scorers
    Scorers,
    /// Inspect configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(clap::Subcommand, Debug)]
enum ConfigAction {
    /// Print the effective configuration as JSON
    Show,
    /// Print the user-level configuration file location
    Path,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let config = riskscore_ml::load_config(cli.config.as_deref())
        .map_err(|e| anyhow::anyhow!("Configuration error: {}", e))?;

    let level = riskscore_ml::logging::verbosity_level(cli.verbose, cli.quiet);
    let _log_guard = riskscore_ml::logging::init_logging(&config.logging, level);

    let result = commands::handle_command(cli.command, &config).await;

    let timings = riskscore_ml::TimingLog::global().timing_data();
    tracing::debug!(?timings, "Timing summary");
    result
}
