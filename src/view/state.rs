//! Shell-only state: scroll position, input mode, pointer capture and status line.
//!
//! Nothing here affects what the core computes. It only decides which lines are visible
//! and what the keyboard currently means.

use crate::index::Pane;
use crate::model::InterpretationKind;

/// What keystrokes currently do.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Keys go through the bindings.
    #[default]
    Normal,
    /// `e` was pressed; the next write key picks the field to edit.
    ChoosingField,
    /// Typing into one interpretation field.
    Editing {
        /// Field being edited.
        kind: InterpretationKind,
        /// Text typed so far.
        text: String,
    },
}

/// Outcome of the last operation, shown on the status line.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum StatusMessage {
    /// Nothing to report.
    #[default]
    None,
    /// Operation succeeded.
    Info(String),
    /// Operation failed.
    Error(String),
}

impl StatusMessage {
    /// Message text, empty for `None`.
    pub fn text(&self) -> &str {
        match self {
            StatusMessage::None => "",
            StatusMessage::Info(text) | StatusMessage::Error(text) => text,
        }
    }
}

/// Scroll position, input mode and pointer capture.
#[derive(Debug, Clone, Default)]
pub struct ViewState {
    /// First grid line on screen.
    pub top_line: usize,
    /// Keyboard mode.
    pub mode: InputMode,
    /// Pane that received the last left press, while the button is held.
    pub drag_pane: Option<Pane>,
    /// Status line content.
    pub status: StatusMessage,
}

impl ViewState {
    /// Largest useful `top_line` for `line_count` lines in a viewport of `rows` rows.
    pub fn max_top_line(line_count: usize, rows: usize) -> usize {
        line_count.saturating_sub(rows.max(1))
    }

    /// Scroll by `delta` lines, clamped to the content.
    pub fn scroll_by(&mut self, delta: isize, line_count: usize, rows: usize) {
        let max = Self::max_top_line(line_count, rows);
        let target = if delta < 0 {
            self.top_line.saturating_sub(delta.unsigned_abs())
        } else {
            self.top_line.saturating_add(delta.unsigned_abs())
        };
        self.top_line = target.min(max);
    }

    /// Jump to the first line.
    pub fn scroll_to_top(&mut self) {
        self.top_line = 0;
    }

    /// Jump so the last line is at the bottom of the viewport.
    pub fn scroll_to_bottom(&mut self, line_count: usize, rows: usize) {
        self.top_line = Self::max_top_line(line_count, rows);
    }

    /// Re-clamp after the line count changed (regrouping or a new file).
    pub fn clamp(&mut self, line_count: usize, rows: usize) {
        self.top_line = self.top_line.min(Self::max_top_line(line_count, rows));
    }

    /// Report a success.
    pub fn info(&mut self, text: impl Into<String>) {
        self.status = StatusMessage::Info(text.into());
    }

    /// Report a failure.
    pub fn error(&mut self, text: impl Into<String>) {
        self.status = StatusMessage::Error(text.into());
    }
}
