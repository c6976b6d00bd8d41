//! Re-validates logged records against the current buffer.
//!
//! Every line is checked independently. Anything that does not parse, points outside the
//! buffer, or whose stored hex no longer equals the bytes at its offset is skipped without
//! error. Matching records highlight every group whose start offset lies in
//! `[offset, offset + expected_len - 1]`.

use super::record::{parse_line, SkipReason};
use crate::index::PositionIndex;
use crate::interpret::upper_hex;
use crate::model::ByteBuffer;
use std::collections::BTreeSet;
use tracing::debug;

/// A record whose stored hex matches the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchedRecord {
    /// Record offset.
    pub offset: usize,
    /// Bytes the record covers.
    pub expected_len: usize,
}

/// Outcome of loading a log.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchReport {
    /// Lines examined.
    pub lines_read: usize,
    /// Records that matched the buffer.
    pub matched: usize,
    /// Lines skipped for any reason.
    pub skipped: usize,
    /// Start offsets of highlighted groups.
    pub highlighted: BTreeSet<usize>,
}

/// Check one log line against the buffer.
pub fn check_line(line: &str, buffer: &ByteBuffer) -> Result<MatchedRecord, SkipReason> {
    let parsed = parse_line(line)?;
    let expected_len = parsed.expected_len();

    let offset = usize::try_from(parsed.offset).map_err(|_| SkipReason::OffsetOutOfRange)?;
    if offset >= buffer.len() {
        return Err(SkipReason::OffsetOutOfRange);
    }

    let actual = upper_hex(buffer.slice_clamped(offset, expected_len));
    if !actual.eq_ignore_ascii_case(parsed.hex_payload) {
        return Err(SkipReason::Stale);
    }

    Ok(MatchedRecord {
        offset,
        expected_len,
    })
}

/// Check every line of `log` and collect highlights.
pub fn match_log(log: &str, buffer: &ByteBuffer, index: &PositionIndex) -> MatchReport {
    let mut report = MatchReport::default();

    for (line_no, line) in log.lines().enumerate() {
        report.lines_read += 1;
        match check_line(line, buffer) {
            Ok(record) => {
                report.matched += 1;
                if let Some(last) = record
                    .expected_len
                    .checked_sub(1)
                    .and_then(|n| record.offset.checked_add(n))
                {
                    report.highlighted.extend(
                        index
                            .records_starting_in(record.offset..=last)
                            .iter()
                            .map(|r| r.file_offset),
                    );
                }
            }
            Err(reason) => {
                debug!(line = line_no + 1, ?reason, "Skipping annotation line");
                report.skipped += 1;
            }
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{build_lines, GroupingSize, LayoutConfig};

    fn buffer_with(at: usize, bytes: &[u8], len: usize) -> ByteBuffer {
        let mut data = vec![0u8; len];
        data[at..at + bytes.len()].copy_from_slice(bytes);
        ByteBuffer::new(data)
    }

    fn index_for(buffer: &ByteBuffer, grouping: GroupingSize) -> PositionIndex {
        PositionIndex::build(&build_lines(buffer, LayoutConfig::new(grouping)), grouping)
    }

    mod check {
        use super::*;

        #[test]
        fn matching_hex_record() {
            let buffer = buffer_with(0x10, &[0x01, 0x02], 64);
            assert_eq!(
                check_line("|00000010|0x0102|Hex (BE)|0x0102|", &buffer),
                Ok(MatchedRecord {
                    offset: 0x10,
                    expected_len: 2
                })
            );
        }

        #[test]
        fn comparison_ignores_case() {
            let buffer = buffer_with(0, &[0xAB, 0xCD], 4);
            assert!(check_line("|00000000|0xabcd|Hex (BE)|x|", &buffer).is_ok());
        }

        #[test]
        fn changed_bytes_are_stale() {
            let buffer = buffer_with(0x10, &[0x03, 0x04], 64);
            assert_eq!(
                check_line("|00000010|0x0102|Hex (BE)|0x0102|", &buffer),
                Err(SkipReason::Stale)
            );
        }

        #[test]
        fn offset_at_end_is_out_of_range() {
            let buffer = buffer_with(0, &[], 16);
            assert_eq!(
                check_line("|00000010|0x00|Hex (BE)|0x00|", &buffer),
                Err(SkipReason::OffsetOutOfRange)
            );
        }

        #[test]
        fn truncated_range_at_end_is_stale() {
            let buffer = buffer_with(14, &[0x01, 0x02], 16);
            assert_eq!(
                check_line("|0000000E|0x010203|Hex (BE)|x|", &buffer),
                Err(SkipReason::Stale)
            );
        }

        #[test]
        fn signed_int16_compares_two_bytes_against_stored_hex() {
            let buffer = buffer_with(0, &[0xFF, 0xFF, 0x00, 0x00], 4);
            assert!(check_line("|00000000|0xFFFF|SignedInt16|-1|", &buffer).is_ok());
            // A four-byte selection written as SignedInt16 only checks two bytes, so it
            // can never match its own stored hex
            assert_eq!(
                check_line("|00000000|0xFFFF0000|SignedInt16|-1|", &buffer),
                Err(SkipReason::Stale)
            );
        }

        #[test]
        fn float32_uses_four_bytes() {
            let buffer = buffer_with(4, &[0x00, 0x00, 0x80, 0x3F], 8);
            assert!(check_line("|00000004|0x0000803F|Float32|1.0|", &buffer).is_ok());
        }
    }

    mod load {
        use super::*;

        #[test]
        fn match_highlights_every_covered_group() {
            let buffer = buffer_with(0x10, &[0x01, 0x02], 64);
            let index = index_for(&buffer, GroupingSize::One);
            let report = match_log("|00000010|0x0102|Hex (BE)|0x0102|\n", &buffer, &index);
            assert_eq!(report.matched, 1);
            assert_eq!(report.highlighted, BTreeSet::from([0x10, 0x11]));
        }

        #[test]
        fn stale_record_highlights_nothing() {
            let buffer = buffer_with(0x10, &[0x03, 0x04], 64);
            let index = index_for(&buffer, GroupingSize::One);
            let report = match_log("|00000010|0x0102|Hex (BE)|0x0102|\n", &buffer, &index);
            assert_eq!(report.matched, 0);
            assert_eq!(report.skipped, 1);
            assert!(report.highlighted.is_empty());
        }

        #[test]
        fn bad_lines_do_not_stop_the_load() {
            let buffer = buffer_with(0, &[0xAA, 0xBB], 8);
            let index = index_for(&buffer, GroupingSize::One);
            let log = "garbage\n\
                       |zz|0xAA|Hex (BE)|x|\n\
                       |00000100|0xAA|Hex (BE)|x|\n\
                       \n\
                       |00000001|0xBB|Hex (LE)|0xBB|\n";
            let report = match_log(log, &buffer, &index);
            assert_eq!(report.lines_read, 5);
            assert_eq!(report.matched, 1);
            assert_eq!(report.skipped, 4);
            assert_eq!(report.highlighted, BTreeSet::from([1]));
        }

        #[test]
        fn range_covers_groups_by_start_offset() {
            // Six bytes from offset 2 with 4-byte groups: the group at 4 starts inside
            // [2, 7]; group 0 starts before it and group 8 after it
            let buffer = buffer_with(2, &[1, 2, 3, 4, 5, 6], 16);
            let index = index_for(&buffer, GroupingSize::Four);
            let report = match_log("|00000002|0x010203040506|Hex (BE)|x|", &buffer, &index);
            assert_eq!(report.highlighted, BTreeSet::from([4]));
        }

        #[test]
        fn empty_payload_matches_without_highlight() {
            let buffer = buffer_with(0, &[], 4);
            let index = index_for(&buffer, GroupingSize::One);
            let report = match_log("|00000000|0x|Hex (BE)||", &buffer, &index);
            assert_eq!(report.matched, 1);
            assert!(report.highlighted.is_empty());
        }

        #[test]
        fn empty_log() {
            let buffer = buffer_with(0, &[], 4);
            let index = index_for(&buffer, GroupingSize::One);
            assert_eq!(match_log("", &buffer, &index), MatchReport::default());
        }
    }
}
