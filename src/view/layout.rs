//! Screen layout and rendering.
//!
//! Area calculation is kept separate from drawing so the event loop can remember where
//! the hex and ASCII panes were and translate mouse positions without re-rendering.

use super::state::{InputMode, StatusMessage, ViewState};
use super::styles::GridStyles;
use crate::config::KeyBindings;
use crate::index::GroupRecord;
use crate::layout::{ascii_char, hex_cell, GroupingSize, BYTES_PER_LINE};
use crate::model::InterpretationKind;
use crate::session::Session;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use std::ops::RangeInclusive;

/// Width of the offset gutter: eight hex digits and two spaces.
pub const GUTTER_WIDTH: u16 = 10;

/// Blank columns between the hex and ASCII panes.
pub const PANE_GAP: u16 = 2;

/// Height of the interpretation panel: a border line plus one row per kind.
pub const INTERPRETATION_HEIGHT: u16 = 1 + InterpretationKind::ALL.len() as u16;

/// Where each part of the screen goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenAreas {
    /// Title bar.
    pub header: Rect,
    /// Offset labels.
    pub gutter: Rect,
    /// Hex pane; column 0 is display column 0.
    pub hex: Rect,
    /// ASCII pane; column 0 is display column 0.
    pub ascii: Rect,
    /// Interpretation panel.
    pub interpretation: Rect,
    /// Status line.
    pub status: Rect,
}

/// Columns a full hex line takes for `grouping`.
pub fn hex_pane_width(grouping: GroupingSize) -> u16 {
    (grouping.groups_per_line() * grouping.hex_cell_width()) as u16
}

/// Split the frame into the shell's areas.
pub fn calculate_areas(frame_area: Rect, grouping: GroupingSize) -> ScreenAreas {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),                     // Header
            Constraint::Min(0),                        // Grid
            Constraint::Length(INTERPRETATION_HEIGHT), // Interpretation panel
            Constraint::Length(1),                     // Status line
        ])
        .split(frame_area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(GUTTER_WIDTH),
            Constraint::Length(hex_pane_width(grouping)),
            Constraint::Length(PANE_GAP),
            Constraint::Length(BYTES_PER_LINE as u16),
            Constraint::Min(0),
        ])
        .split(vertical[1]);

    ScreenAreas {
        header: vertical[0],
        gutter: horizontal[0],
        hex: horizontal[1],
        ascii: horizontal[3],
        interpretation: vertical[2],
        status: vertical[3],
    }
}

/// Everything a frame is drawn from.
pub struct RenderContext<'a> {
    /// Core state to draw.
    pub session: &'a Session,
    /// Scroll position and input mode.
    pub view: &'a ViewState,
    /// Styles for the current color configuration.
    pub styles: &'a GridStyles,
    /// Bindings, for the key hints in the interpretation panel.
    pub bindings: &'a KeyBindings,
}

/// Draw the whole screen.
pub fn render_layout(frame: &mut Frame, areas: &ScreenAreas, ctx: &RenderContext<'_>) {
    render_header(frame, areas.header, ctx);
    render_grid(frame, areas, ctx);
    render_interpretation(frame, areas.interpretation, ctx);
    render_status_bar(frame, areas.status, ctx);
}

fn render_header(frame: &mut Frame, area: Rect, ctx: &RenderContext<'_>) {
    let session = ctx.session;
    let name = session
        .source_path()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "[no file]".to_string());
    let text = format!(
        " hexmark | {} | {} bytes | grouping {}",
        name,
        session.buffer().len(),
        u8::from(session.grouping())
    );
    frame.render_widget(Paragraph::new(text).style(ctx.styles.header), area);
}

/// Offset range of the live selection highlight, by group start.
fn selection_bounds(session: &Session) -> Option<RangeInclusive<usize>> {
    let selected = session.selection_highlights();
    let first = selected.first()?;
    let last = selected.last()?;
    Some(first.file_offset..=last.file_offset)
}

fn group_style(
    record: &GroupRecord,
    selected: Option<&RangeInclusive<usize>>,
    ctx: &RenderContext<'_>,
) -> Style {
    let is_selected = selected.is_some_and(|r| r.contains(&record.file_offset));
    let is_annotated = ctx.session.is_annotated(record.file_offset);
    ctx.styles.for_group(is_selected, is_annotated)
}

/// Styled hex pane row for grid line `line`.
pub fn hex_row(line: usize, ctx: &RenderContext<'_>) -> Line<'static> {
    let session = ctx.session;
    let grouping = session.grouping();
    let selected = selection_bounds(session);
    session
        .grid()
        .index()
        .line_records(line)
        .iter()
        .map(|record| {
            let bytes = session
                .buffer()
                .slice_clamped(record.file_offset, record.byte_length);
            Span::styled(
                hex_cell(bytes, grouping),
                group_style(record, selected.as_ref(), ctx),
            )
        })
        .collect::<Vec<_>>()
        .into()
}

/// Styled ASCII pane row for grid line `line`.
pub fn ascii_row(line: usize, ctx: &RenderContext<'_>) -> Line<'static> {
    let session = ctx.session;
    let selected = selection_bounds(session);
    session
        .grid()
        .index()
        .line_records(line)
        .iter()
        .map(|record| {
            let text: String = session
                .buffer()
                .slice_clamped(record.file_offset, record.byte_length)
                .iter()
                .map(|&b| ascii_char(b))
                .collect();
            Span::styled(text, group_style(record, selected.as_ref(), ctx))
        })
        .collect::<Vec<_>>()
        .into()
}

fn render_grid(frame: &mut Frame, areas: &ScreenAreas, ctx: &RenderContext<'_>) {
    let lines = ctx.session.grid().lines();
    let visible = lines
        .iter()
        .skip(ctx.view.top_line)
        .take(areas.hex.height as usize);

    let mut gutter = Vec::new();
    let mut hex = Vec::new();
    let mut ascii = Vec::new();
    for line in visible {
        gutter.push(Line::from(line.offset_label()));
        hex.push(hex_row(line.line_index, ctx));
        ascii.push(ascii_row(line.line_index, ctx));
    }

    frame.render_widget(Paragraph::new(gutter).style(ctx.styles.gutter), areas.gutter);
    frame.render_widget(Paragraph::new(hex), areas.hex);
    frame.render_widget(Paragraph::new(ascii), areas.ascii);
}

fn render_interpretation(frame: &mut Frame, area: Rect, ctx: &RenderContext<'_>) {
    let interpretation = ctx.session.interpretation();
    let rows: Vec<Line> = InterpretationKind::ALL
        .iter()
        .map(|&kind| {
            let hint = ctx
                .bindings
                .hint_for(kind)
                .map(|c| format!("[{}] ", c))
                .unwrap_or_else(|| "    ".to_string());
            let label = Span::styled(format!("{}{:<12}", hint, kind.label()), ctx.styles.label);
            let value = match &ctx.view.mode {
                InputMode::Editing { kind: editing, text } if *editing == kind => {
                    Span::styled(format!("{}_", text), ctx.styles.editing)
                }
                _ => Span::raw(kind.select(interpretation).unwrap_or_default().to_string()),
            };
            Line::from(vec![label, value])
        })
        .collect();

    let block = Block::default()
        .borders(Borders::TOP)
        .title(" Interpretation ");
    frame.render_widget(Paragraph::new(rows).block(block), area);
}

fn render_status_bar(frame: &mut Frame, area: Rect, ctx: &RenderContext<'_>) {
    let (text, style) = match (&ctx.view.mode, &ctx.view.status) {
        (InputMode::ChoosingField, _) => (
            "Edit which field? Press its write key, Esc to cancel".to_string(),
            ctx.styles.editing,
        ),
        (InputMode::Editing { kind, .. }, _) => (
            format!("Editing {}: Enter to keep, Esc to cancel", kind.label()),
            ctx.styles.editing,
        ),
        (InputMode::Normal, StatusMessage::Error(msg)) => (msg.clone(), ctx.styles.status_error),
        (InputMode::Normal, StatusMessage::Info(msg)) => (msg.clone(), ctx.styles.status_info),
        (InputMode::Normal, StatusMessage::None) => (
            "drag to select | b/l/s/f/d: write | p: load | e: edit | 1/2/4: grouping | q: quit"
                .to_string(),
            Style::default(),
        ),
    };
    frame.render_widget(Paragraph::new(text).style(style), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ByteBuffer;

    fn ctx_parts(bytes: Vec<u8>, grouping: GroupingSize) -> (Session, ViewState, GridStyles, KeyBindings) {
        (
            Session::from_bytes(ByteBuffer::from(bytes), grouping),
            ViewState::default(),
            GridStyles::default(),
            KeyBindings::default(),
        )
    }

    fn text_of(line: &Line<'_>) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    mod areas {
        use super::*;

        #[test]
        fn panes_follow_gutter_and_gap() {
            let areas = calculate_areas(Rect::new(0, 0, 160, 30), GroupingSize::One);
            assert_eq!(areas.header.height, 1);
            assert_eq!(areas.gutter.x, 0);
            assert_eq!(areas.gutter.width, GUTTER_WIDTH);
            assert_eq!(areas.hex.x, GUTTER_WIDTH);
            assert_eq!(areas.hex.width, 96);
            assert_eq!(areas.ascii.x, GUTTER_WIDTH + 96 + PANE_GAP);
            assert_eq!(areas.ascii.width, 32);
            assert_eq!(areas.hex.y, 1);
            assert_eq!(areas.hex.height, 30 - 1 - INTERPRETATION_HEIGHT - 1);
        }

        #[test]
        fn hex_width_depends_on_grouping() {
            assert_eq!(hex_pane_width(GroupingSize::One), 96);
            assert_eq!(hex_pane_width(GroupingSize::Two), 80);
            assert_eq!(hex_pane_width(GroupingSize::Four), 72);
        }
    }

    mod rows {
        use super::*;

        #[test]
        fn hex_row_pads_trailing_group() {
            let (session, view, styles, bindings) =
                ctx_parts(vec![0x48, 0x65, 0x6C, 0x6C, 0x6F], GroupingSize::Four);
            let ctx = RenderContext {
                session: &session,
                view: &view,
                styles: &styles,
                bindings: &bindings,
            };
            assert_eq!(text_of(&hex_row(0, &ctx)), "48656C6C 6F       ");
            assert_eq!(text_of(&ascii_row(0, &ctx)), "Hello");
        }

        #[test]
        fn selected_groups_use_selection_style() {
            let (mut session, view, styles, bindings) = ctx_parts(vec![0u8; 8], GroupingSize::Two);
            session.begin_at(Some(2));
            session.extend_to(Some(4));
            let ctx = RenderContext {
                session: &session,
                view: &view,
                styles: &styles,
                bindings: &bindings,
            };

            let row = hex_row(0, &ctx);
            let styles_by_group: Vec<Style> = row.spans.iter().map(|s| s.style).collect();
            assert_eq!(
                styles_by_group,
                vec![
                    Style::default(),
                    styles.selection,
                    styles.selection,
                    Style::default()
                ]
            );
        }

        #[test]
        fn out_of_range_line_is_empty() {
            let (session, view, styles, bindings) = ctx_parts(vec![1, 2, 3], GroupingSize::One);
            let ctx = RenderContext {
                session: &session,
                view: &view,
                styles: &styles,
                bindings: &bindings,
            };
            assert!(hex_row(4, &ctx).spans.is_empty());
        }
    }
}
