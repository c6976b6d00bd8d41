//! Sidecar annotation log: path resolution, append and read.
//!
//! The log is never rewritten. Appending is the only mutation.

use super::AnnotationRecord;
use crate::model::AnnotationError;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Log path for an inspected file: `<dir>/<file name>.txt`.
///
/// Returns `None` for paths without a file name (e.g. `/` or `..`).
///
/// # Examples
///
/// ```
/// # use std::path::{Path, PathBuf};
/// # use hexmark::annotation::sidecar_path;
/// assert_eq!(
///     sidecar_path(Path::new("/data/dump.bin")),
///     Some(PathBuf::from("/data/dump.bin.txt"))
/// );
/// ```
pub fn sidecar_path(file: &Path) -> Option<PathBuf> {
    let mut name = file.file_name()?.to_os_string();
    name.push(".txt");
    Some(file.with_file_name(name))
}

/// Append one record line, creating the log if needed.
///
/// # Errors
///
/// Returns [`AnnotationError::Append`] if the log cannot be opened or written.
pub fn append_record(path: &Path, record: &AnnotationRecord) -> Result<(), AnnotationError> {
    let append_err = |source| AnnotationError::Append {
        path: path.to_path_buf(),
        source,
    };

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(append_err)?;
    writeln!(file, "{}", record).map_err(append_err)
}

/// Read the whole log.
///
/// Invalid UTF-8 is replaced rather than rejected, so one corrupt line only spoils itself.
///
/// # Errors
///
/// Returns [`AnnotationError::Read`] if the log cannot be read.
pub fn read_log(path: &Path) -> Result<String, AnnotationError> {
    let bytes = std::fs::read(path).map_err(|source| AnnotationError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
