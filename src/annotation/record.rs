//! Annotation record line format.
//!
//! One record per line:
//!
//! ```text
//! |OFFSET_HEX8|0xHEXBE|KIND|TEXT|
//! ```
//!
//! `OFFSET_HEX8` is the selection start as eight uppercase hex digits, `0xHEXBE` the
//! selection's big-end hex at write time, `KIND` an interpretation label and `TEXT` the
//! displayed value of that interpretation.

use crate::model::InterpretationKind;
use std::fmt;

/// A record as written by a write action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotationRecord {
    /// Start offset of the annotated selection.
    pub offset: u64,
    /// `0x`-prefixed big-end hex of the selection.
    pub raw_hex_be: String,
    /// Interpretation the text belongs to.
    pub kind: InterpretationKind,
    /// Displayed interpretation text.
    pub text: String,
}

impl AnnotationRecord {
    /// Create a record. Surrounding whitespace is trimmed from `text`.
    pub fn new(
        offset: u64,
        raw_hex_be: impl Into<String>,
        kind: InterpretationKind,
        text: &str,
    ) -> Self {
        Self {
            offset,
            raw_hex_be: raw_hex_be.into(),
            kind,
            text: text.trim().to_string(),
        }
    }
}

impl fmt::Display for AnnotationRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "|{:08X}|{}|{}|{}|",
            self.offset,
            self.raw_hex_be,
            self.kind.label(),
            self.text
        )
    }
}

/// A log line that has the record shape. Fields are borrowed from the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedLine<'a> {
    /// Parsed offset.
    pub offset: u64,
    /// Stored hex with any `0x` prefix removed.
    pub hex_payload: &'a str,
    /// Label as stored, trimmed.
    pub kind_label: &'a str,
    /// Text field, if present.
    pub text: Option<&'a str>,
}

impl ParsedLine<'_> {
    /// Recognized interpretation kind, if the label is one.
    pub fn kind(&self) -> Option<InterpretationKind> {
        InterpretationKind::from_label(self.kind_label)
    }

    /// Bytes the record covers.
    ///
    /// Two for `SignedInt16`, four for `Float32`, otherwise half the number of stored hex
    /// digits, rounded down. Unknown labels use the hex rule.
    pub fn expected_len(&self) -> usize {
        self.kind()
            .and_then(InterpretationKind::fixed_width)
            .unwrap_or_else(|| self.hex_payload.chars().count() / 2)
    }
}

/// Why a log line produced no highlight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SkipReason {
    /// Does not start with `|` or has fewer than four `|`-separated fields.
    NotARecord,
    /// Offset field is not hexadecimal.
    BadOffset,
    /// Offset is at or past the end of the buffer.
    OffsetOutOfRange,
    /// Bytes at the offset no longer match the stored hex.
    Stale,
}

/// Split a log line into record fields.
///
/// Leading/trailing whitespace around the line and around each of the first three fields
/// is ignored.
pub fn parse_line(line: &str) -> Result<ParsedLine<'_>, SkipReason> {
    let line = line.trim();
    let rest = line.strip_prefix('|').ok_or(SkipReason::NotARecord)?;

    let mut fields = rest.splitn(4, '|');
    let (Some(offset), Some(hex), Some(kind)) = (fields.next(), fields.next(), fields.next())
    else {
        return Err(SkipReason::NotARecord);
    };
    let text = fields.next().map(|t| t.strip_suffix('|').unwrap_or(t));

    let offset = parse_offset(offset.trim()).ok_or(SkipReason::BadOffset)?;

    Ok(ParsedLine {
        offset,
        hex_payload: strip_hex_prefix(hex.trim()),
        kind_label: kind.trim(),
        text,
    })
}

fn parse_offset(field: &str) -> Option<u64> {
    u64::from_str_radix(strip_hex_prefix(field), 16).ok()
}

/// Remove a leading `0x`/`0X`.
pub fn strip_hex_prefix(s: &str) -> &str {
    s.strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s)
}
