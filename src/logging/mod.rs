//! Tracing subscriber initialization.
//!
//! The terminal belongs to the grid, so logs go to a file. Follow them with `tail -f` in
//! another terminal. Verbosity comes from `RUST_LOG` and defaults to `info`.

use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset or unparsable.
pub const DEFAULT_FILTER: &str = "info";

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

    /// Log path has no usable file name
    #[error("Invalid log file path: {0:?}")]
    InvalidPath(PathBuf),

    /// Tracing subscriber already initialized
    #[error("Tracing subscriber already initialized")]
    SubscriberAlreadySet,
}

/// Split a log path into the directory to create and the file name to append to.
///
/// A bare file name logs to the current directory.
pub fn split_log_path(log_path: &Path) -> Result<(&Path, &str), LoggingError> {
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

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the global subscriber, appending to `log_path`.
///
/// Creates the log directory if it doesn't exist.
///
/// # Errors
///
/// Fails if the path has no file name, the directory cannot be created, or a subscriber
/// is already installed. The directory is created before the last check, so it exists
/// even when `SubscriberAlreadySet` is returned.
pub fn init(log_path: &Path) -> Result<(), LoggingError> {
    let (directory, file_name) = split_log_path(log_path)?;

    std::fs::create_dir_all(directory).map_err(|source| LoggingError::DirectoryCreation {
        path: directory.to_path_buf(),
        source,
    })?;

    let file_appender = tracing_appender::rolling::never(directory, file_name);

    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(file_appender)
        .with_ansi(false)
        .try_init()
        .map_err(|_| LoggingError::SubscriberAlreadySet)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::fs;

    mod paths {
        use super::*;

        #[test]
        fn splits_directory_and_name() {
            let (dir, name) = split_log_path(Path::new("/var/log/hexmark/run.log")).unwrap();
            assert_eq!(dir, Path::new("/var/log/hexmark"));
            assert_eq!(name, "run.log");
        }

        #[test]
        fn bare_name_uses_current_directory() {
            let (dir, name) = split_log_path(Path::new("hexmark.log")).unwrap();
            assert_eq!(dir, Path::new("."));
            assert_eq!(name, "hexmark.log");
        }

        #[test]
        fn root_has_no_file_name() {
            assert!(matches!(
                split_log_path(Path::new("/")),
                Err(LoggingError::InvalidPath(_))
            ));
        }

        #[test]
        fn trailing_parent_component_is_invalid() {
            assert!(matches!(
                split_log_path(Path::new("logs/..")),
                Err(LoggingError::InvalidPath(_))
            ));
        }
    }

    mod install {
        use super::*;

        #[test]
        #[serial(tracing_init)]
        fn creates_missing_log_directory() {
            let test_dir = std::env::temp_dir().join("hexmark_test_logs_create");
            let _ = fs::remove_dir_all(&test_dir);

            // Another test may already have installed a subscriber; the directory is
            // created either way
            let _ = init(&test_dir.join("nested").join("test.log"));

            assert!(test_dir.join("nested").exists());
            let _ = fs::remove_dir_all(&test_dir);
        }

        #[test]
        #[serial(tracing_init)]
        fn second_init_reports_subscriber_already_set() {
            let test_dir = std::env::temp_dir().join("hexmark_test_logs_twice");
            let log_file = test_dir.join("test.log");

            let _ = init(&log_file);
            let second = init(&log_file);

            assert!(matches!(second, Err(LoggingError::SubscriberAlreadySet)));
            let _ = fs::remove_dir_all(&test_dir);
        }

        #[test]
        #[serial(tracing_init)]
        fn invalid_path_creates_nothing() {
            assert!(matches!(
                init(Path::new("/")),
                Err(LoggingError::InvalidPath(_))
            ));
        }
    }
}
