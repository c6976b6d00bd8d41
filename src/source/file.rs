//! Whole-file reads for the inspected file.

use crate::model::error::OpenError;
use crate::model::ByteBuffer;
use std::path::Path;
use tracing::debug;

/// Read the entire file at `path` into a [`ByteBuffer`].
///
/// # Errors
///
/// Returns `OpenError::FileNotFound` if nothing exists at `path`.
/// Returns `OpenError::Io` for other I/O errors (permissions, directories, ...).
pub fn read_file(path: impl AsRef<Path>) -> Result<ByteBuffer, OpenError> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(OpenError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let bytes = std::fs::read(path).map_err(|source| OpenError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), len = bytes.len(), "Read file");

    Ok(ByteBuffer::from(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn reads_all_bytes() {
        let path = std::env::temp_dir().join(format!("hexmark_read_file_{}.bin", std::process::id()));
        fs::write(&path, [0x00u8, 0xFF, 0x41]).unwrap();

        let buffer = read_file(&path).unwrap();

        let _ = fs::remove_file(&path);
        assert_eq!(buffer.as_slice(), &[0x00, 0xFF, 0x41]);
    }

    #[test]
    fn empty_file_gives_empty_buffer() {
        let path = std::env::temp_dir().join(format!("hexmark_read_empty_{}.bin", std::process::id()));
        fs::write(&path, []).unwrap();

        let buffer = read_file(&path).unwrap();

        let _ = fs::remove_file(&path);
        assert!(buffer.is_empty());
    }

    #[test]
    fn missing_file_is_file_not_found() {
        let path = std::env::temp_dir().join("hexmark_definitely_missing_file.bin");
        let _ = fs::remove_file(&path);

        match read_file(&path) {
            Err(OpenError::FileNotFound { path: p }) => assert_eq!(p, path),
            other => panic!("expected FileNotFound, got {:?}", other),
        }
    }

    #[test]
    fn directory_is_io_error() {
        let dir = std::env::temp_dir();
        assert!(matches!(read_file(&dir), Err(OpenError::Io { .. })));
    }
}
