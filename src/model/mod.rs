//! Domain model types (pure).
//!
//! All types in this module are plain data shared by the core engine and the shell.

pub mod buffer;
pub mod error;
pub mod key_action;
pub mod kind;

// Re-export for convenience
pub use buffer::ByteBuffer;
pub use error::{AnnotationError, AppError, InvalidGrouping, OpenError};
pub use key_action::KeyAction;
pub use kind::InterpretationKind;
