//! Dropdown list state for the terminal grid

use crate::suggest::{CandidateWidget, Highlight};

#[derive(Debug, Default)]
pub struct ListWidget {
    rows: Vec<String>,
    selected: Option<usize>,
    height: u16,
    width: Option<u16>,
    highlight: Highlight,
}

impl ListWidget {
    pub fn rows(&self) -> &[String] {
        &self.rows
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_value(&self) -> Option<&str> {
        self.selected.and_then(|i| self.rows.get(i)).map(String::as_str)
    }

    /// Height in terminal rows, including the border
    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn width(&self) -> Option<u16> {
        self.width
    }

    pub fn highlight(&self) -> &Highlight {
        &self.highlight
    }

    pub fn select_next(&mut self) {
        if self.rows.is_empty() {
            return;
        }
        self.selected = Some(match self.selected {
            Some(i) if i + 1 < self.rows.len() => i + 1,
            Some(i) => i,
            None => 0,
        });
    }

    pub fn select_previous(&mut self) {
        self.selected = match self.selected {
            Some(0) | None => None,
            Some(i) => Some(i - 1),
        };
    }
}

impl CandidateWidget<String> for ListWidget {
    fn load(&mut self, candidates: &[String]) {
        self.rows = candidates.to_vec();
        self.selected = None;
    }

    fn select_row(&mut self, row: usize) {
        if row < self.rows.len() {
            self.selected = Some(row);
        }
    }

    fn deselect(&mut self) {
        self.selected = None;
    }

    fn selected_row(&self) -> Option<usize> {
        self.selected
    }

    fn row_count(&self) -> usize {
        self.rows.len()
    }

    fn set_height(&mut self, height: f64) {
        self.height = height.max(0.0).round() as u16;
    }

    fn set_width(&mut self, width: Option<f64>) {
        self.width = width.map(|w| w.max(0.0).round() as u16);
    }

    fn set_highlight(&mut self, highlight: Highlight) {
        self.highlight = highlight;
    }
}
