use std::time::Instant;

use ratatui::crossterm::event::KeyEvent;
use ratatui::layout::Rect;

use super::list_widget::ListWidget;
use super::textarea_host::TextareaHost;
use crate::config::CellSettings;
use crate::suggest::{Source, SuggestionController, ViewportPlacer};

/// Width of the row number gutter: "{:>4} │ "
pub const LABEL_WIDTH: u16 = 7;
pub const MAX_CELL_WIDTH: u16 = 40;
/// Rows in an empty grid
pub const DEFAULT_ROWS: usize = 30;

// The list draws a one-cell border on each side and rows are one cell high
const DROPDOWN_CHROME: f64 = 2.0;
const DROPDOWN_ROW_BORDER: f64 = 0.0;

pub type CellController = SuggestionController<String, TextareaHost, ListWidget>;

/// A single column of editable cells with a suggesting cell editor
pub struct App {
    cells: Vec<String>,
    selected: usize,
    scroll: usize,
    area: Rect,
    editing: bool,
    should_quit: bool,
    notice: Option<String>,
    pub editor: CellController,
}

impl App {
    pub fn new(cells: Vec<String>, source: Option<Source<String>>, settings: CellSettings) -> Self {
        let cells = if cells.is_empty() {
            vec![String::new(); DEFAULT_ROWS]
        } else {
            cells
        };
        let editor = SuggestionController::new(
            TextareaHost::new(),
            ListWidget::default(),
            source,
            settings,
        )
        .with_placer(ViewportPlacer::new(DROPDOWN_CHROME, DROPDOWN_ROW_BORDER));

        Self {
            cells,
            selected: 0,
            scroll: 0,
            area: Rect::default(),
            editing: false,
            should_quit: false,
            notice: None,
            editor,
        }
    }

    /// Message shown in the help line, e.g. a config warning
    pub fn with_notice(mut self, notice: Option<String>) -> Self {
        self.notice = notice;
        self
    }

    pub fn cells(&self) -> &[String] {
        &self.cells
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn scroll(&self) -> usize {
        self.scroll
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// Track the terminal size; placement is recomputed when it changes
    pub fn resize(&mut self, area: Rect) {
        if self.area == area {
            return;
        }
        self.area = area;
        self.ensure_visible();
        self.sync_anchor();
        if self.editing {
            self.editor.refresh_placement();
        }
    }

    /// Area between the title and help lines
    pub fn grid_area(&self) -> Rect {
        Rect {
            x: self.area.x,
            y: self.area.y.saturating_add(1),
            width: self.area.width,
            height: self.area.height.saturating_sub(2),
        }
    }

    /// Screen area of a cell's text, if the row is scrolled into view
    pub fn cell_area(&self, row: usize) -> Option<Rect> {
        let grid = self.grid_area();
        let offset = row.checked_sub(self.scroll)?;
        if offset >= usize::from(grid.height) {
            return None;
        }

        Some(Rect {
            x: grid.x + LABEL_WIDTH.min(grid.width),
            y: grid.y + offset as u16,
            width: grid.width.saturating_sub(LABEL_WIDTH).min(MAX_CELL_WIDTH),
            height: 1,
        })
    }

    pub fn move_selection(&mut self, delta: isize) {
        let last = self.cells.len().saturating_sub(1);
        self.selected = self.selected.saturating_add_signed(delta).min(last);
        self.ensure_visible();
        self.sync_anchor();
    }

    /// Open the editor on the selected cell
    ///
    /// `initial` replaces the cell text, as when editing starts by typing.
    pub fn start_editing(&mut self, initial: Option<&str>, trigger: &KeyEvent) {
        self.sync_anchor();
        let original = self.cells[self.selected].clone();
        self.editor.prepare(&original);
        self.editing = true;
        self.editor.begin_editing(initial, Some(trigger));
    }

    /// Store the highlighted candidate, or the typed text, in the cell
    pub fn commit(&mut self) {
        let chosen = self.editor.widget().selected_value().map(str::to_string);
        let text = self.editor.finish_editing(false);
        let value = chosen.unwrap_or(text);
        log::debug!("Committing {:?} to row {}", value, self.selected);

        self.cells[self.selected] = value;
        self.editing = false;
    }

    /// Leave the editor, keeping the cell's original text
    pub fn cancel(&mut self) {
        self.editor.finish_editing(true);
        self.editing = false;
    }

    pub fn clear_selected(&mut self) {
        self.cells[self.selected].clear();
    }

    /// Run due re-queries and apply provider answers; true if anything changed
    pub fn tick(&mut self, now: Instant) -> bool {
        let fired = self.editor.tick(now);
        let applied = self.editor.poll_responses();
        fired || applied
    }

    fn ensure_visible(&mut self) {
        let height = usize::from(self.grid_area().height).max(1);
        if self.selected < self.scroll {
            self.scroll = self.selected;
        } else if self.selected >= self.scroll + height {
            self.scroll = self.selected + 1 - height;
        }
    }

    fn sync_anchor(&mut self) {
        let anchor = self.cell_area(self.selected).unwrap_or_default();
        let viewport_height = self.area.height;
        self.editor.host_mut().set_anchor(anchor, viewport_height);
    }
}

#[cfg(test)]
#[path = "app_state_tests.rs"]
mod app_state_tests;
