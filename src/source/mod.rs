//! Input sources.
//!
//! The inspected file is read once, in full, on open. Nothing watches it afterwards.

pub mod file;

pub use file::read_file;
