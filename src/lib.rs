//! hexmark
//!
//! Byte-grid viewer with annotations that are re-validated against the file on load.
//!
//! The core (`layout`, `index`, `selection`, `interpret`, `annotation`) is pure data in,
//! data out. `session` owns the state that ties them together and `view` is the
//! terminal shell on top.

pub mod annotation;
pub mod config;
pub mod index;
pub mod interpret;
pub mod layout;
pub mod logging;
pub mod model;
pub mod selection;
pub mod session;
pub mod source;
pub mod view;
