//! File-backed `tracing` subscriber.
//!
//! The terminal belongs to the UI while the app runs, so log output goes to
//! a file instead of stderr.

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("could not open log file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid log filter: {0}")]
    Filter(#[from] tracing_subscriber::filter::ParseError),
    #[error("logging already initialized")]
    AlreadyInitialized,
}

/// `<cache dir>/tcalc/tcalc.log`, or `./tcalc.log` without a cache dir.
pub fn default_log_path() -> PathBuf {
    dirs::cache_dir()
        .map(|dir| dir.join("tcalc").join("tcalc.log"))
        .unwrap_or_else(|| PathBuf::from("tcalc.log"))
}

/// Builds the filter: `RUST_LOG` wins over the configured level.
pub fn build_filter(level: &str) -> Result<EnvFilter, LoggingError> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => Ok(EnvFilter::try_new(level)?),
    }
}

/// Installs the global subscriber, appending to `path`.
pub fn init_logging(path: &Path, level: &str) -> Result<(), LoggingError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    tracing_subscriber::fmt()
        .with_env_filter(build_filter(level)?)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|_| LoggingError::AlreadyInitialized)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_log_path_names_the_file() {
        let path = default_log_path();
        assert_eq!(path.file_name().and_then(|n| n.to_str()), Some("tcalc.log"));
    }

    #[test]
    fn test_build_filter_uses_configured_level() {
        if std::env::var_os("RUST_LOG").is_some() {
            return;
        }
        assert!(build_filter("debug").is_ok());
        assert!(build_filter("tcalc=trace,warn").is_ok());
    }

    #[test]
    fn test_build_filter_rejects_bad_level() {
        if std::env::var_os("RUST_LOG").is_some() {
            return;
        }
        assert!(matches!(
            build_filter("tcalc=notalevel"),
            Err(LoggingError::Filter(_))
        ));
    }

    #[test]
    fn test_init_logging_creates_file_once() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("tcalc.log");

        init_logging(&path, "info").unwrap();
        assert!(path.is_file());

        assert!(matches!(
            init_logging(&path, "info"),
            Err(LoggingError::AlreadyInitialized)
        ));
    }
}
