//! Position index: maps display coordinates to file offsets and back.
//!
//! Built from the layout builder's lines. Each group gets one [`GroupRecord`] holding its
//! half-open spans in the hex and ASCII panes.
//!
//! # Complexity
//!
//! - `build`: O(groups)
//! - `resolve_hex` / `resolve_ascii`: O(log groups_per_line) (line lookup is O(1))
//! - `record_for_offset`: O(log groups)
//! - `records_starting_in`: O(log groups)
//!
//! Resolution is per group. A coordinate anywhere in a group's span, padding included,
//! resolves to the group's first offset; there is no sub-group resolution.

use crate::layout::{GroupingSize, Line};
use std::ops::RangeInclusive;

/// A position in a pane: zero-based line and column.
///
/// Ordered by line, then column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct DisplayCoord {
    /// Zero-based line number.
    pub line: usize,
    /// Zero-based column within the line.
    pub column: usize,
}

impl DisplayCoord {
    /// Create a coordinate.
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// Half-open range `[start, end)` of display coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    /// First coordinate covered.
    pub start: DisplayCoord,
    /// First coordinate past the span.
    pub end: DisplayCoord,
}

impl Span {
    /// Span on one line covering `[column, column + width)`.
    pub const fn on_line(line: usize, column: usize, width: usize) -> Self {
        Self {
            start: DisplayCoord::new(line, column),
            end: DisplayCoord::new(line, column + width),
        }
    }

    /// Whether the coordinate falls inside the span.
    pub fn contains(&self, coord: DisplayCoord) -> bool {
        self.start <= coord && coord < self.end
    }

    /// Number of columns covered. Spans never cross lines.
    pub fn width(&self) -> usize {
        self.end.column - self.start.column
    }
}

/// Which pane a coordinate belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pane {
    /// Hex digits.
    Hex,
    /// Character rendering.
    Ascii,
}

/// Display location of one group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupRecord {
    /// Cell in the hex pane, always the full cell width.
    pub hex_span: Span,
    /// Cells in the ASCII pane, one per byte present.
    pub ascii_span: Span,
    /// Offset of the group's first byte.
    pub file_offset: usize,
    /// Bytes present in the group.
    pub byte_length: usize,
}

impl GroupRecord {
    /// Span in the given pane.
    pub fn span(&self, pane: Pane) -> Span {
        match pane {
            Pane::Hex => self.hex_span,
            Pane::Ascii => self.ascii_span,
        }
    }

    /// Whether the byte at `offset` belongs to this group.
    pub fn contains_offset(&self, offset: usize) -> bool {
        offset >= self.file_offset && offset - self.file_offset < self.byte_length
    }
}

/// Lookup structure from display coordinates to groups.
///
/// Records are stored flat in ascending offset order; `line_starts[l]..line_starts[l + 1]`
/// is the slice belonging to line `l`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PositionIndex {
    records: Vec<GroupRecord>,
    line_starts: Vec<usize>,
    grouping: GroupingSize,
}

impl PositionIndex {
    /// Build the index for the given lines.
    pub fn build(lines: &[Line], grouping: GroupingSize) -> Self {
        let cell_width = grouping.hex_cell_width();
        let group_bytes = grouping.bytes();

        let mut records = Vec::with_capacity(lines.len() * grouping.groups_per_line());
        let mut line_starts = Vec::with_capacity(lines.len() + 1);

        for line in lines {
            line_starts.push(records.len());
            for (k, group) in line.groups.iter().enumerate() {
                records.push(GroupRecord {
                    hex_span: Span::on_line(line.line_index, k * cell_width, cell_width),
                    ascii_span: Span::on_line(line.line_index, k * group_bytes, group.byte_length),
                    file_offset: group.file_offset,
                    byte_length: group.byte_length,
                });
            }
        }
        line_starts.push(records.len());

        Self {
            records,
            line_starts,
            grouping,
        }
    }

    /// Grouping size the index was built for.
    pub fn grouping(&self) -> GroupingSize {
        self.grouping
    }

    /// Number of lines.
    pub fn line_count(&self) -> usize {
        self.line_starts.len().saturating_sub(1)
    }

    /// All records in ascending offset order.
    pub fn records(&self) -> &[GroupRecord] {
        &self.records
    }

    /// Records of one line; empty past the last line.
    pub fn line_records(&self, line: usize) -> &[GroupRecord] {
        let next = line.checked_add(1).and_then(|n| self.line_starts.get(n));
        match (self.line_starts.get(line), next) {
            (Some(&start), Some(&end)) => &self.records[start..end],
            _ => &[],
        }
    }

    /// Offset of the group under a coordinate in the given pane.
    pub fn resolve(&self, pane: Pane, coord: DisplayCoord) -> Option<usize> {
        let line = self.line_records(coord.line);
        let idx = line.partition_point(|r| r.span(pane).end <= coord);
        line.get(idx)
            .filter(|r| r.span(pane).contains(coord))
            .map(|r| r.file_offset)
    }

    /// Offset of the group under a hex pane coordinate.
    pub fn resolve_hex(&self, coord: DisplayCoord) -> Option<usize> {
        self.resolve(Pane::Hex, coord)
    }

    /// Offset of the group under an ASCII pane coordinate.
    pub fn resolve_ascii(&self, coord: DisplayCoord) -> Option<usize> {
        self.resolve(Pane::Ascii, coord)
    }

    /// The group containing a byte offset.
    pub fn record_for_offset(&self, offset: usize) -> Option<&GroupRecord> {
        let idx = self.records.partition_point(|r| r.file_offset <= offset);
        idx.checked_sub(1)
            .and_then(|i| self.records.get(i))
            .filter(|r| r.contains_offset(offset))
    }

    /// Records whose *first* offset lies in `range`.
    ///
    /// A group that starts inside the range is included even if its bytes extend past the
    /// range's end.
    pub fn records_starting_in(&self, range: RangeInclusive<usize>) -> &[GroupRecord] {
        let (start, end) = range.into_inner();
        if start > end {
            return &[];
        }
        let lo = self.records.partition_point(|r| r.file_offset < start);
        let hi = self.records.partition_point(|r| r.file_offset <= end);
        &self.records[lo..hi]
    }
}
