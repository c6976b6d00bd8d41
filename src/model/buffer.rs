//! Immutable byte snapshot of the inspected file.

use std::ops::RangeInclusive;
use std::sync::Arc;

/// Immutable snapshot of a file's bytes.
///
/// Cloning is cheap (shared `Arc`). There is no way to mutate the contents; a changed file
/// is represented by a new `ByteBuffer` that replaces the old one wholesale.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ByteBuffer(Arc<[u8]>);

impl ByteBuffer {
    /// Take ownership of `bytes` as a new snapshot.
    pub fn new(bytes: impl Into<Arc<[u8]>>) -> Self {
        Self(bytes.into())
    }

    /// Number of bytes in the snapshot.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the snapshot holds no bytes.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The full contents.
    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    /// Bytes of an inclusive range, or `None` if it reaches past the end.
    ///
    /// # Examples
    ///
    /// ```
    /// # use hexmark::model::ByteBuffer;
    /// let buffer = ByteBuffer::new(vec![1u8, 2, 3]);
    /// assert_eq!(buffer.slice(1..=2), Some(&[2u8, 3][..]));
    /// assert_eq!(buffer.slice(2..=3), None);
    /// ```
    pub fn slice(&self, range: RangeInclusive<usize>) -> Option<&[u8]> {
        self.0.get(range)
    }

    /// Bytes in `[start, start + len)` truncated to the end of the buffer.
    ///
    /// Returns an empty slice when `start` is at or past the end.
    pub fn slice_clamped(&self, start: usize, len: usize) -> &[u8] {
        let start = start.min(self.len());
        let end = start.saturating_add(len).min(self.len());
        &self.0[start..end]
    }
}

impl From<Vec<u8>> for ByteBuffer {
    fn from(bytes: Vec<u8>) -> Self {
        Self::new(bytes)
    }
}

impl From<&[u8]> for ByteBuffer {
    fn from(bytes: &[u8]) -> Self {
        Self::new(bytes)
    }
}
