//! Layout builder: splits a byte buffer into fixed-width lines of groups.
//!
//! A line always covers [`BYTES_PER_LINE`] bytes except the last one. Each line is divided
//! into groups of [`GroupingSize`] bytes; only the very last group of the buffer can be
//! shorter, and it still occupies a full-width hex cell so that columns line up.

use crate::model::{ByteBuffer, InvalidGrouping};
use serde::Deserialize;
use std::fmt::Write as _;

/// Bytes shown on one grid line. Divisible by every [`GroupingSize`].
pub const BYTES_PER_LINE: usize = 32;

/// Number of bytes per display group.
///
/// Deserializes from the integers `1`, `2` and `4`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(try_from = "u8")]
pub enum GroupingSize {
    /// One byte per group.
    #[default]
    One,
    /// Two bytes per group.
    Two,
    /// Four bytes per group.
    Four,
}

impl GroupingSize {
    /// Bytes covered by one full group.
    pub fn bytes(self) -> usize {
        match self {
            GroupingSize::One => 1,
            GroupingSize::Two => 2,
            GroupingSize::Four => 4,
        }
    }

    /// Width of a hex cell in columns: two digits per byte plus a separating space.
    pub fn hex_cell_width(self) -> usize {
        self.bytes() * 2 + 1
    }

    /// Groups on a full line.
    pub fn groups_per_line(self) -> usize {
        BYTES_PER_LINE / self.bytes()
    }
}

impl TryFrom<u8> for GroupingSize {
    type Error = InvalidGrouping;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(GroupingSize::One),
            2 => Ok(GroupingSize::Two),
            4 => Ok(GroupingSize::Four),
            other => Err(InvalidGrouping(other)),
        }
    }
}

impl From<GroupingSize> for u8 {
    fn from(size: GroupingSize) -> Self {
        size.bytes() as u8
    }
}

/// Layout parameters for building the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LayoutConfig {
    /// Bytes per group.
    pub grouping: GroupingSize,
}

impl LayoutConfig {
    /// Create a layout with the given grouping size.
    pub fn new(grouping: GroupingSize) -> Self {
        Self { grouping }
    }

    /// Bytes per line. Fixed.
    pub const fn bytes_per_line(&self) -> usize {
        BYTES_PER_LINE
    }
}

/// The smallest addressable display unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Group {
    /// Offset of the group's first byte in the file.
    pub file_offset: usize,
    /// Bytes actually present; less than the grouping size only for the buffer's last group.
    pub byte_length: usize,
}

/// One row of the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    /// Zero-based line number.
    pub line_index: usize,
    /// `line_index * BYTES_PER_LINE`.
    pub start_offset: usize,
    /// Groups in ascending offset order.
    pub groups: Vec<Group>,
}

impl Line {
    /// Bytes covered by this line.
    pub fn byte_len(&self) -> usize {
        self.groups.iter().map(|g| g.byte_length).sum()
    }

    /// Offset gutter label, e.g. `00000020`.
    pub fn offset_label(&self) -> String {
        format!("{:08X}", self.start_offset)
    }

    /// Hex pane text for this line.
    ///
    /// Every group renders as a fixed-width cell, padded with spaces when truncated.
    pub fn hex_text(&self, buffer: &ByteBuffer, grouping: GroupingSize) -> String {
        let mut text = String::with_capacity(self.groups.len() * grouping.hex_cell_width());
        for group in &self.groups {
            text.push_str(&hex_cell(
                buffer.slice_clamped(group.file_offset, group.byte_length),
                grouping,
            ));
        }
        text
    }

    /// ASCII pane text for this line, one character per byte.
    pub fn ascii_text(&self, buffer: &ByteBuffer) -> String {
        buffer
            .slice_clamped(self.start_offset, self.byte_len())
            .iter()
            .map(|&b| ascii_char(b))
            .collect()
    }
}

/// Character shown in the ASCII pane for a byte: itself when printable, `.` otherwise.
///
/// # Examples
///
/// ```
/// # use hexmark::layout::ascii_char;
/// assert_eq!(ascii_char(b'A'), 'A');
/// assert_eq!(ascii_char(b' '), ' ');
/// assert_eq!(ascii_char(0x7F), '.');
/// ```
pub fn ascii_char(byte: u8) -> char {
    if (0x20..=0x7E).contains(&byte) {
        byte as char
    } else {
        '.'
    }
}

/// One hex cell: uppercase digits left-justified to the full group width, then a space.
pub fn hex_cell(bytes: &[u8], grouping: GroupingSize) -> String {
    let mut cell = String::with_capacity(grouping.hex_cell_width());
    for b in bytes {
        // Writing to a String cannot fail
        let _ = write!(cell, "{:02X}", b);
    }
    while cell.len() < grouping.bytes() * 2 {
        cell.push(' ');
    }
    cell.push(' ');
    cell
}

/// Split the buffer into lines and groups.
///
/// Every offset in `[0, buffer.len())` ends up in exactly one group. Group offsets within
/// a line are `start_offset + k * grouping`.
pub fn build_lines(buffer: &ByteBuffer, config: LayoutConfig) -> Vec<Line> {
    let len = buffer.len();
    let group_bytes = config.grouping.bytes();
    let per_line = config.bytes_per_line();

    (0..len.div_ceil(per_line))
        .map(|line_index| {
            let start_offset = line_index * per_line;
            let line_end = (start_offset + per_line).min(len);
            let groups = (start_offset..line_end)
                .step_by(group_bytes)
                .map(|file_offset| Group {
                    file_offset,
                    byte_length: (line_end - file_offset).min(group_bytes),
                })
                .collect();
            Line {
                line_index,
                start_offset,
                groups,
            }
        })
        .collect()
}
