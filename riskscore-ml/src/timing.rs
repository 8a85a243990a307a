//! Step timing: logs the start and duration of named steps and keeps a table
//! of the latest duration per step.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, OnceLock};
use std::time::Instant;

/// One completed step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimingEntry {
    pub step: String,
    pub elapsed_secs: f64,
    pub finished_at: DateTime<Utc>,
}

/// Append-only log of step durations.
#[derive(Debug, Default)]
pub struct TimingLog {
    entries: Mutex<Vec<TimingEntry>>,
}

static GLOBAL: OnceLock<TimingLog> = OnceLock::new();

impl TimingLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide log.
    pub fn global() -> &'static TimingLog {
        GLOBAL.get_or_init(TimingLog::new)
    }

    /// Start timing `step`. The step is recorded when the guard drops.
    pub fn start(&self, step: impl Into<String>) -> StepTimer<'_> {
        let step = step.into();
        tracing::info!("Starting step: {step}");
        StepTimer {
            log: self,
            step,
            started: Instant::now(),
        }
    }

    /// Run `f` as a timed step.
    pub fn time<T>(&self, step: impl Into<String>, f: impl FnOnce() -> T) -> T {
        let _timer = self.start(step);
        f()
    }

    /// Latest elapsed seconds per step.
    pub fn timing_data(&self) -> BTreeMap<String, f64> {
        self.lock()
            .iter()
            .map(|e| (e.step.clone(), e.elapsed_secs))
            .collect()
    }

    pub fn entries(&self) -> Vec<TimingEntry> {
        self.lock().clone()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    fn record(&self, entry: TimingEntry) {
        self.lock().push(entry);
    }

    fn lock(&self) -> MutexGuard<'_, Vec<TimingEntry>> {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Drop guard of a running step.
#[must_use = "the step is timed until the guard is dropped"]
pub struct StepTimer<'a> {
    log: &'a TimingLog,
    step: String,
    started: Instant,
}

impl StepTimer<'_> {
    pub fn step(&self) -> &str {
        &self.step
    }
}

impl Drop for StepTimer<'_> {
    fn drop(&mut self) {
        let elapsed_secs = self.started.elapsed().as_secs_f64();
        tracing::info!(
            "Completed step: {} in {:.2} seconds",
            self.step,
            elapsed_secs
        );
        self.log.record(TimingEntry {
            step: std::mem::take(&mut self.step),
            elapsed_secs,
            finished_at: Utc::now(),
        });
    }
}
