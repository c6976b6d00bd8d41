//! TUI rendering and terminal management (impure shell)
//!
//! The shell owns the terminal. It translates mouse cells into [`DisplayCoord`]s for the
//! pane under the pointer, forwards keys as [`KeyAction`]s and draws whatever the
//! [`Session`] currently holds. All indexing, selection and matching happens in the core.

mod layout;
mod state;
mod styles;

pub use layout::{calculate_areas, ScreenAreas};
pub use state::{InputMode, StatusMessage, ViewState};
pub use styles::{ColorConfig, GridStyles};

use crate::config::KeyBindings;
use crate::index::{DisplayCoord, Pane};
use crate::model::{AppError, InterpretationKind, KeyAction};
use crate::session::Session;
use crossterm::{
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
        MouseEventKind,
    },
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use layout::RenderContext;
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Position, Rect},
    Terminal,
};
use std::io::{self, Stdout};
use std::path::PathBuf;
use tracing::debug;

/// Shell settings that come from the command line and config file.
#[derive(Debug, Clone)]
pub struct ShellOptions {
    /// Lines per scroll step.
    pub scroll_lines: usize,
    /// Explicit annotation log, overriding the sidecar next to the open file.
    pub annotations_path: Option<PathBuf>,
    /// Color configuration.
    pub colors: ColorConfig,
}

impl Default for ShellOptions {
    fn default() -> Self {
        Self {
            scroll_lines: 1,
            annotations_path: None,
            colors: ColorConfig::default(),
        }
    }
}

/// Main TUI application
///
/// Generic over backend to support testing with TestBackend
pub struct TuiApp<B>
where
    B: Backend,
{
    terminal: Terminal<B>,
    session: Session,
    view: ViewState,
    key_bindings: KeyBindings,
    styles: GridStyles,
    options: ShellOptions,
    /// Last rendered hex pane (for mouse mapping)
    last_hex_area: Option<Rect>,
    /// Last rendered ASCII pane (for mouse mapping)
    last_ascii_area: Option<Rect>,
}

impl TuiApp<CrosstermBackend<Stdout>> {
    /// Put the terminal in raw mode on the alternate screen with mouse capture.
    pub fn new(session: Session, options: ShellOptions) -> Result<Self, AppError> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        stdout.execute(EnterAlternateScreen)?;
        stdout.execute(event::EnableMouseCapture)?;
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        Ok(Self::with_terminal(terminal, session, options))
    }

    /// Run the event loop until the user quits.
    pub fn run(&mut self) -> Result<(), AppError> {
        self.draw()?;

        loop {
            let redraw = match event::read()? {
                Event::Key(key) if key.kind != KeyEventKind::Release => {
                    if self.handle_key(key) {
                        return Ok(());
                    }
                    true
                }
                Event::Mouse(mouse) => self.handle_mouse(mouse),
                Event::Resize(width, height) => {
                    debug!(width, height, "Terminal resized");
                    true
                }
                _ => false,
            };

            if redraw {
                self.draw()?;
            }
        }
    }
}

impl<B> TuiApp<B>
where
    B: Backend,
{
    /// Wrap an already initialized terminal.
    pub fn with_terminal(terminal: Terminal<B>, session: Session, options: ShellOptions) -> Self {
        Self {
            terminal,
            session,
            view: ViewState::default(),
            key_bindings: KeyBindings::default(),
            styles: GridStyles::with_color_config(options.colors),
            options,
            last_hex_area: None,
            last_ascii_area: None,
        }
    }

    /// The session being displayed.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Shell state.
    pub fn view(&self) -> &ViewState {
        &self.view
    }

    /// The terminal, e.g. to inspect a test backend.
    pub fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }

    /// Rows of the grid currently on screen.
    fn visible_rows(&self) -> usize {
        self.last_hex_area
            .map(|area| area.height as usize)
            .unwrap_or(1)
    }

    fn line_count(&self) -> usize {
        self.session.grid().lines().len()
    }

    /// Handle a single keyboard event
    ///
    /// Returns true if app should quit
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return true;
        }

        match std::mem::take(&mut self.view.mode) {
            InputMode::Normal => self.handle_normal_key(key),
            InputMode::ChoosingField => {
                self.choose_field(key);
                false
            }
            InputMode::Editing { kind, text } => {
                self.edit_field(key, kind, text);
                false
            }
        }
    }

    fn handle_normal_key(&mut self, key: KeyEvent) -> bool {
        let Some(action) = self.key_bindings.get(key) else {
            return false;
        };

        let rows = self.visible_rows();
        let lines = self.line_count();
        let step = self.options.scroll_lines as isize;
        let page = rows.max(1) as isize;

        match action {
            KeyAction::ScrollUp => self.view.scroll_by(-step, lines, rows),
            KeyAction::ScrollDown => self.view.scroll_by(step, lines, rows),
            KeyAction::PageUp => self.view.scroll_by(-page, lines, rows),
            KeyAction::PageDown => self.view.scroll_by(page, lines, rows),
            KeyAction::ScrollToTop => self.view.scroll_to_top(),
            KeyAction::ScrollToBottom => self.view.scroll_to_bottom(lines, rows),

            KeyAction::SetGrouping(grouping) => {
                self.session.set_grouping(grouping);
                self.view.drag_pane = None;
                self.view.clamp(self.line_count(), rows);
                self.view
                    .info(format!("Grouping set to {} byte(s)", u8::from(grouping)));
            }

            KeyAction::WriteAnnotation(kind) => {
                let explicit = self.options.annotations_path.as_deref();
                match self.session.write_annotation(kind, explicit) {
                    Ok(path) => self.view.info(format!(
                        "Wrote {} annotation to {}",
                        kind.label(),
                        path.display()
                    )),
                    Err(e) => self.view.error(e.to_string()),
                }
            }

            KeyAction::LoadAnnotations => {
                let explicit = self.options.annotations_path.as_deref();
                match self.session.load_annotations(explicit) {
                    Ok(report) => self.view.info(format!(
                        "Loaded annotations: {} matched, {} skipped",
                        report.matched, report.skipped
                    )),
                    Err(e) => self.view.error(e.to_string()),
                }
            }

            KeyAction::StartEdit => self.view.mode = InputMode::ChoosingField,

            KeyAction::Quit => return true,
        }

        false
    }

    fn choose_field(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Esc {
            self.view.info("Edit cancelled");
            return;
        }
        match self.key_bindings.kind_for(key) {
            Some(kind) => {
                let text = kind
                    .select(self.session.interpretation())
                    .unwrap_or_default()
                    .to_string();
                self.view.mode = InputMode::Editing { kind, text };
            }
            None => self.view.error("Not an interpretation key"),
        }
    }

    fn edit_field(&mut self, key: KeyEvent, kind: InterpretationKind, mut text: String) {
        match key.code {
            KeyCode::Enter => {
                self.session.set_display_text(kind, text);
                self.view.info(format!("Updated {} text", kind.label()));
            }
            KeyCode::Esc => self.view.info("Edit cancelled"),
            KeyCode::Backspace => {
                text.pop();
                self.view.mode = InputMode::Editing { kind, text };
            }
            KeyCode::Char(c) => {
                text.push(c);
                self.view.mode = InputMode::Editing { kind, text };
            }
            _ => self.view.mode = InputMode::Editing { kind, text },
        }
    }

    /// Translate a screen cell to a coordinate in `pane`.
    ///
    /// `line = top_line + row - pane.y`, `column = col - pane.x`. Cells above or left of
    /// the pane have no coordinate. Rows below the pane count as its last visible row.
    fn coord_in(&self, pane: Pane, column: u16, row: u16) -> Option<DisplayCoord> {
        let area = match pane {
            Pane::Hex => self.last_hex_area?,
            Pane::Ascii => self.last_ascii_area?,
        };
        let last_row = area.height.checked_sub(1)?;
        let dy = row.checked_sub(area.y)?.min(last_row);
        let dx = column.checked_sub(area.x)?;
        Some(DisplayCoord::new(
            self.view.top_line + dy as usize,
            dx as usize,
        ))
    }

    /// Pane whose last rendered area contains the cell.
    fn pane_at(&self, column: u16, row: u16) -> Option<Pane> {
        let position = Position::new(column, row);
        if self.last_hex_area.is_some_and(|a| a.contains(position)) {
            Some(Pane::Hex)
        } else if self.last_ascii_area.is_some_and(|a| a.contains(position)) {
            Some(Pane::Ascii)
        } else {
            None
        }
    }

    /// Handle a single mouse event
    ///
    /// Returns true if the screen needs a redraw.
    pub fn handle_mouse(&mut self, mouse: MouseEvent) -> bool {
        let rows = self.visible_rows();
        let lines = self.line_count();
        let step = self.options.scroll_lines as isize;

        match mouse.kind {
            MouseEventKind::ScrollUp => {
                self.view.scroll_by(-step, lines, rows);
                true
            }
            MouseEventKind::ScrollDown => {
                self.view.scroll_by(step, lines, rows);
                true
            }
            MouseEventKind::Down(MouseButton::Left) => {
                self.view.drag_pane = self.pane_at(mouse.column, mouse.row);
                let Some(pane) = self.view.drag_pane else {
                    return false;
                };
                if let Some(coord) = self.coord_in(pane, mouse.column, mouse.row) {
                    self.session.press(pane, coord);
                }
                true
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                let Some(pane) = self.view.drag_pane else {
                    return false;
                };
                if let Some(coord) = self.coord_in(pane, mouse.column, mouse.row) {
                    self.session.drag(pane, coord);
                }
                true
            }
            MouseEventKind::Up(MouseButton::Left) => {
                if self.view.drag_pane.take().is_none() {
                    return false;
                }
                if let Some(range) = self.session.release() {
                    self.view.info(format!(
                        "Selected {:08X}..{:08X} ({} bytes)",
                        range.start,
                        range.end,
                        range.len()
                    ));
                }
                true
            }
            _ => false,
        }
    }

    /// Render the current frame
    pub fn draw(&mut self) -> Result<(), AppError> {
        let size = self.terminal.size()?;
        let frame_area = Rect::new(0, 0, size.width, size.height);
        let areas = calculate_areas(frame_area, self.session.grouping());
        self.last_hex_area = Some(areas.hex);
        self.last_ascii_area = Some(areas.ascii);
        self.view.clamp(self.line_count(), areas.hex.height as usize);

        let ctx = RenderContext {
            session: &self.session,
            view: &self.view,
            styles: &self.styles,
            bindings: &self.key_bindings,
        };
        self.terminal.draw(|frame| {
            layout::render_layout(frame, &areas, &ctx);
        })?;

        Ok(())
    }
}

/// Run the TUI over `session` until the user quits.
///
/// Note: Logging must be initialized by caller before calling this function.
pub fn run(session: Session, options: ShellOptions) -> Result<(), AppError> {
    let mut app = TuiApp::new(session, options)?;

    let result = app.run();

    // Always restore terminal state
    restore_terminal()?;

    result
}

/// Restore terminal to normal state
///
/// Disables raw mode, mouse capture, and leaves alternate screen
fn restore_terminal() -> Result<(), AppError> {
    disable_raw_mode()?;
    io::stdout().execute(event::DisableMouseCapture)?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}
