//! Tracing subscriber setup shared by the binaries.

use crate::config::LoggingConfig;
use std::ffi::OsStr;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Install the global subscriber.
///
/// `RUST_LOG` takes precedence over `level_override`, which takes precedence
/// over `config.level`. Console output is either the bare message or JSON
/// lines; when `config.file` is set, JSON lines are also appended there.
///
/// Returns the file writer's guard, which must be kept alive to flush it.
/// A second call leaves the existing subscriber in place.
pub fn init_logging(config: &LoggingConfig, level_override: Option<&str>) -> Option<WorkerGuard> {
    let level = level_override.unwrap_or(config.level.as_str());

    let console = if config.json {
        tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_filter(filter(level))
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .without_time()
            .with_target(false)
            .with_level(false)
            .with_writer(std::io::stderr)
            .with_filter(filter(level))
            .boxed()
    };

    let (file_layer, guard) = match config.file.as_deref().and_then(file_writer) {
        Some((writer, guard)) => {
            let layer = tracing_subscriber::fmt::layer()
                .json()
                .with_ansi(false)
                .with_writer(writer)
                .with_filter(filter(level));
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    if tracing_subscriber::registry()
        .with(console)
        .with(file_layer)
        .try_init()
        .is_err()
    {
        tracing::debug!("Logging already initialised");
    }
    guard
}

fn filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
}

fn file_writer(
    path: &Path,
) -> Option<(tracing_appender::non_blocking::NonBlocking, WorkerGuard)> {
    let (dir, name) = split_log_path(path)?;
    if let Err(err) = std::fs::create_dir_all(dir) {
        eprintln!("cannot create log directory {}: {err}", dir.display());
        return None;
    }
    let appender = tracing_appender::rolling::never(dir, name);
    Some(tracing_appender::non_blocking(appender))
}

/// Directory and file name of a log path; a bare name lives in the working directory.
fn split_log_path(path: &Path) -> Option<(&Path, &OsStr)> {
    let name = path.file_name()?;
    let dir = path
        .parent()
        .filter(|d| !d.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    Some((dir, name))
}

/// Map CLI verbosity flags to a filter directive.
pub fn verbosity_level(verbose: u8, quiet: bool) -> Option<&'static str> {
    match verbose {
        0 if quiet => Some("error"),
        0 => None,
        1 => Some("debug"),
        _ => Some("trace"),
    }
}
