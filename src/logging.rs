//! Console logging facade with warning collection and a run summary.
//!
//! Output goes through [`tracing`]; [`init`] installs a compact
//! [`tracing_subscriber`] console subscriber (no timestamps, `RUST_LOG`
//! respected, `--verbose` lowers the threshold to `debug`). The [`Logger`]
//! additionally collects per-profile entry counts and every warning emitted
//! during the run so the final summary can list skipped entries — per-entry
//! failures are warnings here, never errors.
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

/// Install the global console subscriber.
///
/// Safe to call more than once (subsequent calls are no-ops), which keeps
/// integration tests that construct the full pipeline from panicking.
pub fn init(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .without_time()
        .with_target(false)
        .try_init();
}

/// A per-profile materialization result recorded for the summary.
#[derive(Debug, Clone)]
pub struct ProfileEntry {
    /// Profile name (e.g. `claude`).
    pub name: String,
    /// Number of entries materialized into the profile directory.
    pub entries: usize,
}

/// Logger with summary collection.
///
/// All display methods delegate to [`tracing`] macros; the struct itself
/// only accumulates state for [`print_summary`](Self::print_summary).
#[derive(Debug, Default)]
pub struct Logger {
    profiles: Mutex<Vec<ProfileEntry>>,
    warnings: Mutex<Vec<String>>,
}

impl Logger {
    /// Create a new logger with an empty summary.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Log a stage header (major section).
    pub fn stage(&self, msg: &str) {
        tracing::info!("\x1b[36m==> {msg}\x1b[0m");
    }

    /// Log an informational message.
    pub fn info(&self, msg: &str) {
        tracing::info!("{msg}");
    }

    /// Log a debug message (suppressed unless verbose).
    pub fn debug(&self, msg: &str) {
        tracing::debug!("{msg}");
    }

    /// Log a warning and record it for the summary.
    pub fn warn(&self, msg: &str) {
        if let Ok(mut guard) = self.warnings.lock() {
            guard.push(msg.to_string());
        }
        tracing::warn!("\x1b[33m{msg}\x1b[0m");
    }

    /// Record a profile's materialization count for the summary.
    pub fn record_profile(&self, name: &str, entries: usize) {
        if let Ok(mut guard) = self.profiles.lock() {
            guard.push(ProfileEntry {
                name: name.to_string(),
                entries,
            });
        }
    }

    /// Number of warnings recorded so far.
    #[must_use]
    pub fn warning_count(&self) -> usize {
        self.warnings.lock().map_or(0, |guard| guard.len())
    }

    /// Return a clone of all recorded profile entries (test-only).
    #[cfg(test)]
    pub(crate) fn profile_entries(&self) -> Vec<ProfileEntry> {
        self.profiles.lock().map_or_else(|_| vec![], |g| g.clone())
    }

    /// Print the run summary: per-profile entry counts and skipped entries.
    pub fn print_summary(&self) {
        let profiles = match self.profiles.lock() {
            Ok(guard) => guard.clone(),
            Err(_) => return,
        };
        if profiles.is_empty() {
            return;
        }

        self.stage("Summary");
        for entry in &profiles {
            self.info(&format!(
                "\x1b[32m✓ {}\x1b[0m ({} entries)",
                entry.name, entry.entries
            ));
        }

        let warnings = self
            .warnings
            .lock()
            .map_or_else(|_| vec![], |guard| guard.clone());
        if !warnings.is_empty() {
            self.info(&format!("\x1b[33m{} skipped:\x1b[0m", warnings.len()));
            for w in &warnings {
                self.info(&format!("\x1b[2m  {w}\x1b[0m"));
            }
        }
    }
}
