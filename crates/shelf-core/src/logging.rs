//! `tracing` subscriber setup.
//!
//! The filter comes from `SHELF_LOG`, then the configured `log_filter`, then
//! `warn`.

use std::path::Path;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt};

pub const LOG_ENV: &str = "SHELF_LOG";
const DEFAULT_FILTER: &str = "warn";
const LOG_FILE_PREFIX: &str = "shelf.log";

/// Builds the filter with precedence env > config > default.
pub fn env_filter(configured: Option<&str>) -> EnvFilter {
    let directive = std::env::var(LOG_ENV)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .or_else(|| configured.map(ToString::to_string))
        .unwrap_or_else(|| DEFAULT_FILTER.to_string());

    EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Logs to stderr. Used by the one-shot CLI commands.
pub fn init_stderr(configured: Option<&str>) {
    // A second init (tests, embedding) keeps the first subscriber.
    let _ = fmt()
        .with_env_filter(env_filter(configured))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Logs to a daily-rolling file under `dir`. The returned guard flushes on drop.
///
/// # Errors
/// Returns an error if the log directory cannot be created.
pub fn init_file(dir: &Path, configured: Option<&str>) -> Result<WorkerGuard> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create log directory {}", dir.display()))?;

    let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let _ = fmt()
        .with_env_filter(env_filter(configured))
        .with_writer(writer)
        .with_ansi(false)
        .try_init();

    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_directive_falls_back() {
        // Only exercised when SHELF_LOG is unset in the test environment.
        if std::env::var(LOG_ENV).is_err() {
            let filter = env_filter(Some("shelf=notalevel"));
            assert_eq!(filter.to_string(), DEFAULT_FILTER);
        }
    }

    #[test]
    fn test_configured_directive_is_used() {
        if std::env::var(LOG_ENV).is_err() {
            let filter = env_filter(Some("shelf_core=debug"));
            assert_eq!(filter.to_string(), "shelf_core=debug");
        }
    }

    #[test]
    fn test_init_file_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let logs = dir.path().join("logs");
        let _guard = init_file(&logs, None).unwrap();
        assert!(logs.is_dir());
    }
}
