//! Selection model: anchor/cursor tracking and range normalization.
//!
//! State machine:
//!
//! ```text
//! Empty --begin(Some)--> Active --finalize--> Finalized
//!   ^                      |  ^                  |
//!   +------begin(None)-----+  +------begin-------+
//! ```
//!
//! `extend` moves the cursor only while `Active`. Offsets come from the position index, so
//! they are always group start offsets.

use crate::index::{GroupRecord, PositionIndex};
use crate::interpret::{interpret, InterpretationResult};
use crate::model::ByteBuffer;
use std::ops::RangeInclusive;

/// Inclusive byte range `[start, end]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ByteRange {
    /// First byte.
    pub start: usize,
    /// Last byte, inclusive.
    pub end: usize,
}

impl ByteRange {
    /// Number of bytes covered. Never zero.
    pub fn len(&self) -> usize {
        self.end - self.start + 1
    }

    /// As a standard inclusive range.
    pub fn as_range(&self) -> RangeInclusive<usize> {
        self.start..=self.end
    }
}

/// Where the selection is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionState {
    /// No anchor.
    #[default]
    Empty,
    /// Pointer held; the cursor follows drags.
    Active {
        /// Where the press landed.
        anchor: usize,
        /// Latest resolved drag position.
        cursor: usize,
    },
    /// Pointer released; interpretation computed.
    Finalized {
        /// Where the press landed.
        anchor: usize,
        /// Where the drag ended.
        cursor: usize,
    },
}

/// Result of releasing the pointer.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Finalized {
    /// Normalized range, `None` when nothing valid is selected.
    pub range: Option<ByteRange>,
    /// Decoding of the range's bytes; all fields empty when `range` is `None`.
    pub interpretation: InterpretationResult,
}

/// Anchor/cursor selection over file offsets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionModel {
    state: SelectionState,
}

impl SelectionModel {
    /// An empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    pub fn state(&self) -> SelectionState {
        self.state
    }

    /// Drop any selection.
    pub fn reset(&mut self) {
        self.state = SelectionState::Empty;
    }

    /// Start a new selection at `offset`.
    ///
    /// A press that resolved to nothing leaves the selection empty.
    pub fn begin(&mut self, offset: Option<usize>) {
        self.state = match offset {
            Some(offset) => SelectionState::Active {
                anchor: offset,
                cursor: offset,
            },
            None => SelectionState::Empty,
        };
    }

    /// Move the cursor while the pointer is held. `None` is ignored.
    pub fn extend(&mut self, offset: Option<usize>) {
        if let (SelectionState::Active { cursor, .. }, Some(offset)) = (&mut self.state, offset) {
            *cursor = offset;
        }
    }

    /// `(min(anchor, cursor), max(anchor, cursor))` without clamping.
    pub fn raw_bounds(&self) -> Option<(usize, usize)> {
        match self.state {
            SelectionState::Empty => None,
            SelectionState::Active { anchor, cursor }
            | SelectionState::Finalized { anchor, cursor } => {
                Some((anchor.min(cursor), anchor.max(cursor)))
            }
        }
    }

    /// The selected bytes as an inclusive range clamped to a buffer of `buffer_len` bytes.
    ///
    /// `None` if nothing is anchored, the buffer is empty, or the range starts past the end.
    pub fn normalized_range(&self, buffer_len: usize) -> Option<ByteRange> {
        let (start, end) = self.raw_bounds()?;
        let last = buffer_len.checked_sub(1)?;
        if start > last {
            return None;
        }
        Some(ByteRange {
            start,
            end: end.min(last),
        })
    }

    /// The normalized range, but only once the selection is finalized.
    pub fn finalized_range(&self, buffer_len: usize) -> Option<ByteRange> {
        match self.state {
            SelectionState::Finalized { .. } => self.normalized_range(buffer_len),
            _ => None,
        }
    }

    /// Release the pointer: normalize the range and interpret its bytes.
    pub fn finalize(&mut self, buffer: &ByteBuffer) -> Finalized {
        if let SelectionState::Active { anchor, cursor } = self.state {
            self.state = SelectionState::Finalized { anchor, cursor };
        }

        let Some(range) = self.normalized_range(buffer.len()) else {
            return Finalized::default();
        };
        let bytes = buffer.slice(range.as_range()).unwrap_or_default();
        Finalized {
            range: Some(range),
            interpretation: interpret(bytes),
        }
    }

    /// Groups to draw as selected.
    ///
    /// Membership tests each group's *start* offset against `[min, max]` of anchor and
    /// cursor, so the group starting at the upper bound is included in full even though
    /// only its first byte is part of the interpreted range.
    pub fn highlighted<'a>(&self, index: &'a PositionIndex) -> &'a [GroupRecord] {
        match self.raw_bounds() {
            Some((start, end)) => index.records_starting_in(start..=end),
            None => &[],
        }
    }
}
