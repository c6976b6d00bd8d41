//! Domain-level keyboard actions independent of key bindings.

use super::InterpretationKind;
use crate::layout::GroupingSize;

/// Domain-level actions that can be mapped to configurable key bindings.
///
/// These represent user intent, not specific keys. The mapping from
/// `crossterm::event::KeyEvent` to `KeyAction` is handled by `KeyBindings`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    // Scrolling
    /// Scroll the grid up by one line. Default: k/↑
    ScrollUp,
    /// Scroll the grid down by one line. Default: j/↓
    ScrollDown,
    /// Scroll up by one page. Default: Page Up
    PageUp,
    /// Scroll down by one page. Default: Page Down
    PageDown,
    /// Jump to the first line. Default: g/Home
    ScrollToTop,
    /// Jump to the last line. Default: G/End
    ScrollToBottom,

    // Layout
    /// Switch the grouping size. Default: 1/2/4
    SetGrouping(GroupingSize),

    // Annotations
    /// Append an annotation of the given kind for the current selection.
    /// Default: b/l/s/f/d, with or without Ctrl
    WriteAnnotation(InterpretationKind),
    /// Load the annotation log and highlight records that still match. Default: p
    LoadAnnotations,

    // Editing
    /// Start editing an interpretation field; the next kind key picks the field. Default: e
    StartEdit,

    // Application
    /// Quit. Default: q
    Quit,
}
