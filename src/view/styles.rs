//! Grid styling.
//!
//! Selected groups, annotation-matched groups and groups that are both each get a
//! distinct look. Without colors the distinction is carried by modifiers instead.

use ratatui::style::{Color, Modifier, Style};

// ===== ColorConfig =====

/// Whether colors are used at all.
///
/// Disabled by the `--no-color` flag or by `NO_COLOR` being set to any value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorConfig {
    enabled: bool,
}

impl ColorConfig {
    /// Create a ColorConfig from CLI args and environment.
    ///
    /// Priority (first match wins):
    /// 1. `--no-color` flag (disables colors)
    /// 2. `NO_COLOR` env var (any value disables colors)
    /// 3. Default: colors enabled
    pub fn from_env_and_args(no_color_flag: bool) -> Self {
        let enabled = !no_color_flag && std::env::var_os("NO_COLOR").is_none();
        Self { enabled }
    }

    /// Check if colors are enabled.
    pub fn colors_enabled(self) -> bool {
        self.enabled
    }
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

// ===== GridStyles =====

/// Styles for every element the shell draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridStyles {
    /// Groups in the live selection.
    pub selection: Style,
    /// Groups matched by a loaded annotation.
    pub annotation: Style,
    /// Groups that are both.
    pub selected_annotation: Style,
    /// Offset gutter.
    pub gutter: Style,
    /// Title bar.
    pub header: Style,
    /// Interpretation labels.
    pub label: Style,
    /// Field being edited.
    pub editing: Style,
    /// Status line after a successful operation.
    pub status_info: Style,
    /// Status line after a failed operation.
    pub status_error: Style,
}

impl GridStyles {
    /// Styles for the given color configuration.
    pub fn with_color_config(config: ColorConfig) -> Self {
        if config.colors_enabled() {
            Self {
                selection: Style::default().fg(Color::Black).bg(Color::Cyan),
                annotation: Style::default().fg(Color::Black).bg(Color::Yellow),
                selected_annotation: Style::default().fg(Color::Black).bg(Color::Green),
                gutter: Style::default().fg(Color::DarkGray),
                header: Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
                label: Style::default().fg(Color::Cyan),
                editing: Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                status_info: Style::default().fg(Color::Green),
                status_error: Style::default().fg(Color::Red),
            }
        } else {
            Self {
                selection: Style::default().add_modifier(Modifier::REVERSED),
                annotation: Style::default().add_modifier(Modifier::UNDERLINED),
                selected_annotation: Style::default()
                    .add_modifier(Modifier::REVERSED | Modifier::UNDERLINED),
                gutter: Style::default(),
                header: Style::default().add_modifier(Modifier::BOLD),
                label: Style::default(),
                editing: Style::default().add_modifier(Modifier::BOLD),
                status_info: Style::default(),
                status_error: Style::default().add_modifier(Modifier::BOLD),
            }
        }
    }

    /// Style for a group given its highlight membership.
    pub fn for_group(&self, selected: bool, annotated: bool) -> Style {
        match (selected, annotated) {
            (true, true) => self.selected_annotation,
            (true, false) => self.selection,
            (false, true) => self.annotation,
            (false, false) => Style::default(),
        }
    }
}

impl Default for GridStyles {
    fn default() -> Self {
        Self::with_color_config(ColorConfig::default())
    }
}

// ===== Tests =====
