//! Annotation store and matcher.
//!
//! - [`record`]: the one-line-per-record text format
//! - [`store`]: sidecar path resolution, append and read
//! - [`matcher`]: re-validation of logged records against the live buffer

pub mod matcher;
pub mod record;
pub mod store;

pub use matcher::{check_line, match_log, MatchReport, MatchedRecord};
pub use record::{parse_line, AnnotationRecord, ParsedLine, SkipReason};
pub use store::{append_record, read_log, sidecar_path};
