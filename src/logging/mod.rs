//! Tracing subscriber initialization.
//!
//! The input bar owns the whole terminal while it runs, so logs go to a
//! file. Follow them with `tail -f` from another terminal.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Filter used when `RUST_LOG` is unset or unparseable.
pub const DEFAULT_FILTER: &str = "growbar=info";

/// Error type for logging initialization failures.
#[derive(Debug, Error)]
pub enum LoggingError {
    /// Failed to create log directory
    #[error("Failed to create log directory at {path:?}: {source}")]
    DirectoryCreation {
        /// The directory path that failed to be created
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Log path has no usable file name component
    #[error("Invalid log file path: {0:?}")]
    InvalidPath(PathBuf),

    /// Tracing subscriber already initialized
    #[error("Tracing subscriber already initialized")]
    SubscriberAlreadySet,
}

/// Split a log path into the directory the appender writes to and the file name.
///
/// A bare file name logs into the current directory.
fn split_log_path(log_path: &Path) -> Result<(&Path, &str), LoggingError> {
    let file_name = log_path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| LoggingError::InvalidPath(log_path.to_path_buf()))?;

    let directory = match log_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    Ok((directory, file_name))
}

/// Initialize the tracing subscriber with file-based logging.
///
/// Respects `RUST_LOG`, defaulting to [`DEFAULT_FILTER`]. The log directory
/// is created if missing, even when the subscriber turns out to be taken.
///
/// # Errors
///
/// Returns `LoggingError` if the path is unusable, the directory cannot be
/// created, or a global subscriber was already installed.
pub fn init(log_path: &Path) -> Result<(), LoggingError> {
    use tracing_subscriber::EnvFilter;

    let (directory, file_name) = split_log_path(log_path)?;

    std::fs::create_dir_all(directory).map_err(|source| LoggingError::DirectoryCreation {
        path: directory.to_path_buf(),
        source,
    })?;

    let file_appender = tracing_appender::rolling::never(directory, file_name);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(file_appender)
        .with_ansi(false)
        .try_init()
        .map_err(|_| LoggingError::SubscriberAlreadySet)?;

    tracing::info!(path = %log_path.display(), "Logging initialized");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::fs;

    #[test]
    fn split_log_path_separates_directory_and_name() {
        let path = Path::new("/var/state/growbar/growbar.log");
        let (dir, name) = split_log_path(path).expect("valid path");
        assert_eq!(dir, Path::new("/var/state/growbar"));
        assert_eq!(name, "growbar.log");
    }

    #[test]
    fn split_log_path_bare_name_uses_current_dir() {
        let (dir, name) = split_log_path(Path::new("growbar.log")).expect("valid path");
        assert_eq!(dir, Path::new("."));
        assert_eq!(name, "growbar.log");
    }

    #[test]
    fn split_log_path_rejects_root() {
        let result = split_log_path(Path::new("/"));
        assert!(matches!(result, Err(LoggingError::InvalidPath(_))));
    }

    #[test]
    #[serial(tracing_init)]
    fn init_creates_log_directory_if_missing() {
        let test_dir = std::env::temp_dir().join("growbar_test_logs_create");
        let log_file = test_dir.join("growbar.log");

        let _ = fs::remove_dir_all(&test_dir);

        // Subscriber may already be set by another test
        let _ = init(&log_file);

        assert!(
            test_dir.exists(),
            "Log directory should be created: {:?}",
            test_dir
        );

        let _ = fs::remove_dir_all(&test_dir);
    }

    #[test]
    #[serial(tracing_init)]
    fn init_succeeds_when_directory_already_exists() {
        let test_dir = std::env::temp_dir().join("growbar_test_logs_exists");
        let log_file = test_dir.join("growbar.log");

        let _ = fs::create_dir_all(&test_dir);

        let result = init(&log_file);
        assert!(
            !matches!(result, Err(LoggingError::DirectoryCreation { .. })),
            "Existing directory must not be an error"
        );

        let _ = fs::remove_dir_all(&test_dir);
    }
}
