//! Error types for hexmark.
//!
//! This module defines a small error taxonomy using `thiserror`. Errors compose via `?` and
//! `From` conversions up to [`AppError`].
//!
//! # Error Hierarchy
//!
//! - [`AppError`] - Top-level error returned from the shell
//!   - [`OpenError`] - Reading the inspected file failed
//!   - [`AnnotationError`] - Appending to or reading the sidecar log failed
//!   - `std::io::Error` - Terminal/TUI rendering failures
//!
//! # Recovery Strategy
//!
//! None of the core operations are fatal to a session. A failed open leaves the previous
//! buffer, index and selection in place. A failed append leaves in-memory state untouched.
//! Malformed or stale annotation lines are not errors at all: the matcher skips them and
//! reports counts in its `MatchReport`.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error encompassing all failure modes.
#[derive(Debug, Error)]
pub enum AppError {
    /// Failed to open the file under inspection.
    #[error("Failed to open file: {0}")]
    Open(#[from] OpenError),

    /// Failed to write or read the annotation log.
    #[error("Annotation error: {0}")]
    Annotation(#[from] AnnotationError),

    /// Terminal or TUI rendering error.
    ///
    /// Without a working terminal the shell cannot function; the caller restores the
    /// terminal and exits.
    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),
}

/// Errors encountered when loading the inspected file into memory.
///
/// # Examples
///
/// ```
/// use std::path::PathBuf;
/// use hexmark::model::error::OpenError;
///
/// let err = OpenError::FileNotFound {
///     path: PathBuf::from("/tmp/missing.bin")
/// };
/// assert!(err.to_string().contains("/tmp/missing.bin"));
/// ```
#[derive(Debug, Error)]
pub enum OpenError {
    /// The file does not exist at the given path.
    #[error("File not found: {path}")]
    FileNotFound {
        /// The path that was attempted.
        path: PathBuf,
    },

    /// Any other I/O failure (permissions, disk errors, a directory instead of a file).
    #[error("Failed to read {path}: {source}")]
    Io {
        /// The path being read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// Errors from explicit annotation write and load actions.
///
/// Per-line problems while loading (bad hex, unknown layout, stale bytes) are never
/// represented here; they are skipped by the matcher.
#[derive(Debug, Error)]
pub enum AnnotationError {
    /// A write was requested while no non-empty selection was finalized.
    #[error("Nothing selected: finish a selection before writing an annotation")]
    NoSelection,

    /// No file is open and the caller did not supply a log path.
    #[error("No annotation log path: open a file or pass an explicit path")]
    NoTarget,

    /// The log could not be opened for appending or the append itself failed.
    #[error("Failed to append to {path}: {source}")]
    Append {
        /// Log path that failed.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The log could not be read.
    #[error("Failed to read annotation log {path}: {source}")]
    Read {
        /// Log path that failed.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// A grouping size outside `{1, 2, 4}` was requested.
///
/// # Examples
///
/// ```
/// use hexmark::model::error::InvalidGrouping;
///
/// let err = InvalidGrouping(3);
/// assert!(err.to_string().contains('3'));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Invalid grouping size {0}: expected 1, 2 or 4")]
pub struct InvalidGrouping(pub u8);
