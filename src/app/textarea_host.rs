//! Cell editor backed by a single-line `TextArea`

use ratatui::crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use tui_textarea::{CursorMove, TextArea};

use crate::suggest::{AnchorGeometry, EditorHost};

pub struct TextareaHost {
    textarea: TextArea<'static>,
    anchor: Rect,
    viewport_height: u16,
    dropdown_open: bool,
    focused: bool,
    margin: Option<f64>,
}

impl Default for TextareaHost {
    fn default() -> Self {
        Self::new()
    }
}

impl TextareaHost {
    pub fn new() -> Self {
        let mut textarea = TextArea::default();
        // Remove default underline from cursor line
        textarea.set_cursor_line_style(Style::default());
        textarea.set_selection_style(Style::default().add_modifier(Modifier::REVERSED));

        Self {
            textarea,
            anchor: Rect::default(),
            viewport_height: 0,
            dropdown_open: false,
            focused: false,
            margin: None,
        }
    }

    pub fn textarea(&self) -> &TextArea<'static> {
        &self.textarea
    }

    /// Feed a key to the textarea. Returns true if the text changed.
    pub fn input(&mut self, key: KeyEvent) -> bool {
        // Single line: newlines never reach the cell
        if key.code == KeyCode::Enter {
            return false;
        }
        self.textarea.input(key)
    }

    /// Record where the edited cell is drawn
    pub fn set_anchor(&mut self, anchor: Rect, viewport_height: u16) {
        self.anchor = anchor;
        self.viewport_height = viewport_height;
    }

    pub fn anchor(&self) -> Rect {
        self.anchor
    }

    pub fn is_dropdown_open(&self) -> bool {
        self.dropdown_open
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn margin(&self) -> Option<f64> {
        self.margin
    }

    fn jump_to(&mut self, col: usize) {
        let col = u16::try_from(col).unwrap_or(u16::MAX);
        self.textarea.move_cursor(CursorMove::Jump(0, col));
    }
}

impl EditorHost for TextareaHost {
    fn value(&self) -> String {
        self.textarea.lines().first().cloned().unwrap_or_default()
    }

    fn set_value(&mut self, value: &str) {
        self.textarea.cancel_selection();
        self.textarea.move_cursor(CursorMove::End);
        self.textarea.delete_line_by_head();
        self.textarea.delete_line_by_end();
        self.textarea.insert_str(value);
    }

    fn caret(&self) -> usize {
        match self.textarea.selection_range() {
            Some(((_, start), _)) => start,
            None => self.textarea.cursor().1,
        }
    }

    fn selection_end(&self) -> usize {
        match self.textarea.selection_range() {
            Some((_, (_, end))) => end,
            None => self.textarea.cursor().1,
        }
    }

    fn set_caret(&mut self, caret: usize, selection_end: Option<usize>) {
        self.textarea.cancel_selection();
        self.jump_to(caret);
        if let Some(end) = selection_end.filter(|end| *end != caret) {
            self.textarea.start_selection();
            self.jump_to(end);
        }
    }

    fn focus(&mut self) {
        self.focused = true;
    }

    fn anchor_geometry(&self) -> AnchorGeometry {
        AnchorGeometry {
            top_offset: f64::from(self.anchor.y),
            scroll_position: 0.0,
            height: f64::from(self.anchor.height),
            width: f64::from(self.anchor.width),
            viewport_height: f64::from(self.viewport_height),
        }
    }

    fn open(&mut self, trigger: Option<&KeyEvent>) {
        if let Some(key) = trigger {
            log::trace!("dropdown opened by {:?}", key.code);
        }
        self.dropdown_open = true;
    }

    fn close(&mut self) {
        self.dropdown_open = false;
        self.focused = false;
    }

    fn apply_margin(&mut self, margin: Option<f64>) {
        self.margin = margin;
    }
}
