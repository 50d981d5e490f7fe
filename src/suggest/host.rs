//! Capabilities the controller needs from its surroundings
//!
//! The editor host owns the text input and the dropdown chrome; the
//! candidate widget displays rows. Both are supplied by the embedding grid.

use ratatui::crossterm::event::KeyEvent;

use super::placement::AnchorGeometry;
use super::ranker::{MatchSpan, find_match};

/// Text input and dropdown chrome of the cell editor
pub trait EditorHost {
    fn value(&self) -> String;
    fn set_value(&mut self, value: &str);
    /// Caret offset in characters
    fn caret(&self) -> usize;
    /// Selection end in characters; equals the caret without a selection
    fn selection_end(&self) -> usize;
    fn set_caret(&mut self, caret: usize, selection_end: Option<usize>);
    fn focus(&mut self);
    fn anchor_geometry(&self) -> AnchorGeometry;
    /// Show the dropdown chrome. `trigger` is the key that started editing.
    fn open(&mut self, trigger: Option<&KeyEvent>);
    fn close(&mut self);
    /// Shift the dropdown vertically; `None` clears the shift
    fn apply_margin(&mut self, margin: Option<f64>);
}

/// Widget displaying the candidate rows
pub trait CandidateWidget<T> {
    fn load(&mut self, candidates: &[T]);
    fn select_row(&mut self, row: usize);
    fn deselect(&mut self);
    fn selected_row(&self) -> Option<usize>;
    fn row_count(&self) -> usize;
    fn set_height(&mut self, height: f64);
    /// `None` lets the widget size itself to its content
    fn set_width(&mut self, width: Option<f64>);
    /// Render hook used to emphasise the matched part of each row
    fn set_highlight(&mut self, highlight: Highlight);
}

/// What to emphasise in each rendered row
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Highlight {
    pub query: String,
    pub case_sensitive: bool,
}

impl Highlight {
    pub fn new(query: impl Into<String>, case_sensitive: bool) -> Self {
        Self {
            query: query.into(),
            case_sensitive,
        }
    }

    /// Split `text` into the parts before, inside and after the match
    pub fn split<'a>(&self, text: &'a str) -> Option<(&'a str, &'a str, &'a str)> {
        if self.query.is_empty() {
            return None;
        }
        let MatchSpan { start, len, .. } = find_match(text, &self.query, self.case_sensitive)?;

        let byte_at = |chars: usize| {
            text.char_indices()
                .nth(chars)
                .map(|(idx, _)| idx)
                .unwrap_or(text.len())
        };
        let (from, to) = (byte_at(start), byte_at(start + len));

        Some((&text[..from], &text[from..to], &text[to..]))
    }
}
