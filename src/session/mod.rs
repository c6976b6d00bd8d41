//! Session: the single owner of everything the core computes.
//!
//! A session holds the current [`Grid`] (buffer, lines and position index built together),
//! the selection, the interpretation shown for it and the annotation highlight set. Every
//! change to the buffer or the layout builds a complete new grid first and only then
//! replaces the old one, so a failed open leaves the previous state untouched and no
//! lookup ever sees a half-built index.

use crate::annotation::{append_record, match_log, read_log, sidecar_path, AnnotationRecord, MatchReport};
use crate::index::{DisplayCoord, GroupRecord, Pane, PositionIndex};
use crate::interpret::{upper_hex, InterpretationResult};
use crate::layout::{build_lines, GroupingSize, LayoutConfig, Line};
use crate::model::{AnnotationError, ByteBuffer, InterpretationKind, OpenError};
use crate::selection::{ByteRange, SelectionModel};
use crate::source::read_file;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// A buffer together with the layout and index derived from it.
#[derive(Debug, Clone)]
pub struct Grid {
    buffer: ByteBuffer,
    layout: LayoutConfig,
    lines: Vec<Line>,
    index: PositionIndex,
}

impl Grid {
    /// Lay out `buffer` and index the result.
    pub fn build(buffer: ByteBuffer, layout: LayoutConfig) -> Self {
        let lines = build_lines(&buffer, layout);
        let index = PositionIndex::build(&lines, layout.grouping);
        debug!(
            bytes = buffer.len(),
            lines = lines.len(),
            groups = index.records().len(),
            grouping = u8::from(layout.grouping),
            "Built grid"
        );
        Self {
            buffer,
            layout,
            lines,
            index,
        }
    }

    /// Bytes the grid was built from.
    pub fn buffer(&self) -> &ByteBuffer {
        &self.buffer
    }

    /// Layout the grid was built with.
    pub fn layout(&self) -> LayoutConfig {
        self.layout
    }

    /// Lines in display order.
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Coordinate lookup for the lines.
    pub fn index(&self) -> &PositionIndex {
        &self.index
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::build(ByteBuffer::default(), LayoutConfig::default())
    }
}

/// Inspection session over one file (or one in-memory buffer).
#[derive(Debug, Clone, Default)]
pub struct Session {
    grid: Grid,
    source_path: Option<PathBuf>,
    selection: SelectionModel,
    interpretation: InterpretationResult,
    annotation_highlights: BTreeSet<usize>,
}

impl Session {
    /// An empty session with no file.
    pub fn new(grouping: GroupingSize) -> Self {
        Self::from_bytes(ByteBuffer::default(), grouping)
    }

    /// A session over bytes that did not come from a file.
    ///
    /// Writing and loading annotations then need an explicit log path.
    pub fn from_bytes(buffer: impl Into<ByteBuffer>, grouping: GroupingSize) -> Self {
        Self {
            grid: Grid::build(buffer.into(), LayoutConfig::new(grouping)),
            ..Self::default()
        }
    }

    /// Open `path`, replacing the current buffer.
    ///
    /// The grouping size is kept. Selection, interpretation and annotation highlights are
    /// cleared.
    ///
    /// # Errors
    ///
    /// Returns the [`OpenError`] from reading the file. On error nothing changes.
    pub fn open(&mut self, path: impl AsRef<Path>) -> Result<(), OpenError> {
        let path = path.as_ref();
        let buffer = read_file(path)?;
        let grid = Grid::build(buffer, self.grid.layout);

        info!(path = %path.display(), bytes = grid.buffer.len(), "Opened file");
        self.grid = grid;
        self.source_path = Some(path.to_path_buf());
        self.clear_derived();
        Ok(())
    }

    /// Re-lay the current buffer with a different grouping size.
    ///
    /// Clears selection, interpretation and annotation highlights even when the size is
    /// unchanged.
    pub fn set_grouping(&mut self, grouping: GroupingSize) {
        let grid = Grid::build(self.grid.buffer.clone(), LayoutConfig::new(grouping));
        self.grid = grid;
        self.clear_derived();
    }

    fn clear_derived(&mut self) {
        self.selection.reset();
        self.interpretation = InterpretationResult::default();
        self.annotation_highlights.clear();
    }

    /// Current grid.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Bytes of the open file, empty before the first open.
    pub fn buffer(&self) -> &ByteBuffer {
        &self.grid.buffer
    }

    /// Current grouping size.
    pub fn grouping(&self) -> GroupingSize {
        self.grid.layout.grouping
    }

    /// Path of the open file, if the buffer came from one.
    pub fn source_path(&self) -> Option<&Path> {
        self.source_path.as_deref()
    }

    /// Selection state.
    pub fn selection(&self) -> &SelectionModel {
        &self.selection
    }

    /// Interpretation currently displayed, including edits.
    pub fn interpretation(&self) -> &InterpretationResult {
        &self.interpretation
    }

    /// Pointer pressed at `coord` in `pane`. Returns the resolved offset.
    pub fn press(&mut self, pane: Pane, coord: DisplayCoord) -> Option<usize> {
        let offset = self.grid.index.resolve(pane, coord);
        self.begin_at(offset);
        offset
    }

    /// Pointer dragged to `coord` in `pane`. Returns the resolved offset.
    pub fn drag(&mut self, pane: Pane, coord: DisplayCoord) -> Option<usize> {
        let offset = self.grid.index.resolve(pane, coord);
        self.extend_to(offset);
        offset
    }

    /// Start a selection at a file offset. `None` clears it.
    pub fn begin_at(&mut self, offset: Option<usize>) {
        self.selection.begin(offset);
    }

    /// Move the cursor of an active selection.
    pub fn extend_to(&mut self, offset: Option<usize>) {
        self.selection.extend(offset);
    }

    /// Pointer released: interpret the selected bytes.
    ///
    /// The result replaces any edited text from before.
    pub fn release(&mut self) -> Option<ByteRange> {
        let finalized = self.selection.finalize(&self.grid.buffer);
        self.interpretation = finalized.interpretation;
        if let Some(range) = finalized.range {
            debug!(start = range.start, end = range.end, "Selection finalized");
        }
        finalized.range
    }

    /// Finalized selection range, if any.
    pub fn selected_range(&self) -> Option<ByteRange> {
        self.selection.finalized_range(self.grid.buffer.len())
    }

    /// Replace the displayed text of one interpretation.
    ///
    /// This is what gets written by [`Session::write_annotation`] for that kind.
    pub fn set_display_text(&mut self, kind: InterpretationKind, text: impl Into<String>) {
        *self.interpretation.field_mut(kind) = Some(text.into());
    }

    /// Groups drawn as selected, by start offset.
    pub fn selection_highlights(&self) -> &[GroupRecord] {
        self.selection.highlighted(&self.grid.index)
    }

    /// Start offsets of groups matched by the last annotation load.
    pub fn annotation_highlights(&self) -> &BTreeSet<usize> {
        &self.annotation_highlights
    }

    /// Whether the group starting at `offset` was matched by the last load.
    pub fn is_annotated(&self, offset: usize) -> bool {
        self.annotation_highlights.contains(&offset)
    }

    /// Log path for write and load: `explicit` if given, otherwise the open file's sidecar.
    pub fn annotation_target(&self, explicit: Option<&Path>) -> Option<PathBuf> {
        match explicit {
            Some(path) => Some(path.to_path_buf()),
            None => self.source_path.as_deref().and_then(sidecar_path),
        }
    }

    /// Append a record for the finalized selection under `kind`.
    ///
    /// The record text is the currently displayed value for `kind`, which may have been
    /// edited. Returns the path written to.
    ///
    /// # Errors
    ///
    /// - [`AnnotationError::NoSelection`] without a finalized, non-empty selection
    /// - [`AnnotationError::NoTarget`] without an open file or explicit path
    /// - [`AnnotationError::Append`] if the log cannot be written
    pub fn write_annotation(
        &self,
        kind: InterpretationKind,
        explicit: Option<&Path>,
    ) -> Result<PathBuf, AnnotationError> {
        let range = self.selected_range().ok_or(AnnotationError::NoSelection)?;
        let target = self
            .annotation_target(explicit)
            .ok_or(AnnotationError::NoTarget)?;

        let bytes = self
            .grid
            .buffer
            .slice(range.as_range())
            .ok_or(AnnotationError::NoSelection)?;
        let text = kind.select(&self.interpretation).unwrap_or_default();
        let record = AnnotationRecord::new(
            range.start as u64,
            format!("0x{}", upper_hex(bytes)),
            kind,
            text,
        );

        if let Err(e) = append_record(&target, &record) {
            warn!(path = %target.display(), error = %e, "Failed to append annotation");
            return Err(e);
        }
        info!(
            path = %target.display(),
            offset = range.start,
            kind = kind.label(),
            "Wrote annotation"
        );
        Ok(target)
    }

    /// Read the log and highlight every record that still matches the buffer.
    ///
    /// The new highlight set replaces the previous one.
    ///
    /// # Errors
    ///
    /// - [`AnnotationError::NoTarget`] without an open file or explicit path
    /// - [`AnnotationError::Read`] if the log cannot be read
    pub fn load_annotations(
        &mut self,
        explicit: Option<&Path>,
    ) -> Result<MatchReport, AnnotationError> {
        let target = self
            .annotation_target(explicit)
            .ok_or(AnnotationError::NoTarget)?;
        let log = read_log(&target)?;
        let report = match_log(&log, &self.grid.buffer, &self.grid.index);

        info!(
            path = %target.display(),
            lines = report.lines_read,
            matched = report.matched,
            skipped = report.skipped,
            "Loaded annotations"
        );
        self.annotation_highlights = report.highlighted.clone();
        Ok(report)
    }
}
