//! Suggestion controller
//!
//! Owns one editing session of an autocomplete cell: the query, the current
//! candidates and the dropdown placement. Drives the source, the ranker and
//! the placer, and talks to the grid only through [`EditorHost`] and
//! [`CandidateWidget`].
//!
//! Everything runs on the host's event loop. The host feeds keystrokes in,
//! calls [`SuggestionController::tick`] to fire debounced re-queries and
//! [`SuggestionController::poll_responses`] to apply answers from
//! asynchronous providers.

use std::fmt::Display;
use std::sync::mpsc::{self, Receiver, Sender};
use std::time::{Duration, Instant};

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::debounce::{Debouncer, PendingQuery};
use super::host::{CandidateWidget, EditorHost, Highlight};
use super::placement::{Direction, PlacementDecision, ViewportPlacer, decide_placement};
use super::ranker::order_choices;
use super::source::{Resolution, Responder, Source, SourceResponse};
use crate::config::CellSettings;

/// Lifecycle of an editing session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditorState {
    #[default]
    Virgin,
    Editing,
    Open,
    Closed,
}

/// Cached placement together with the row height it was computed for
#[derive(Debug, Clone, Copy)]
struct Placement {
    decision: PlacementDecision,
    row_height: f64,
}

pub struct SuggestionController<T, H, W> {
    host: H,
    widget: W,
    source: Option<Source<T>>,
    settings: CellSettings,
    placer: ViewportPlacer,
    state: EditorState,
    original_value: String,
    query: Option<String>,
    choices: Vec<T>,
    placement: Option<Placement>,
    debouncer: Debouncer,
    /// Whether keystrokes schedule re-queries
    listening: bool,
    /// Latest issued request; responses carrying any other ID are stale
    request_id: u64,
    /// The first resolution of the session still has to open the dropdown
    awaiting_open: bool,
    trigger: Option<KeyEvent>,
    response_tx: Sender<SourceResponse<T>>,
    response_rx: Receiver<SourceResponse<T>>,
}

impl<T, H, W> SuggestionController<T, H, W>
where
    T: Display + Clone,
    H: EditorHost,
    W: CandidateWidget<T>,
{
    pub fn new(host: H, widget: W, source: Option<Source<T>>, settings: CellSettings) -> Self {
        let (response_tx, response_rx) = mpsc::channel();

        Self {
            host,
            widget,
            source,
            settings,
            placer: ViewportPlacer::default(),
            state: EditorState::Virgin,
            original_value: String::new(),
            query: None,
            choices: Vec::new(),
            placement: None,
            debouncer: Debouncer::new(),
            listening: false,
            request_id: 0,
            awaiting_open: false,
            trigger: None,
            response_tx,
            response_rx,
        }
    }

    pub fn with_placer(mut self, placer: ViewportPlacer) -> Self {
        self.placer = placer;
        self
    }

    pub fn state(&self) -> EditorState {
        self.state
    }

    pub fn is_opened(&self) -> bool {
        self.state == EditorState::Open
    }

    /// Whether a session is in progress (editing or open)
    pub fn is_live(&self) -> bool {
        matches!(self.state, EditorState::Editing | EditorState::Open)
    }

    pub fn is_listening(&self) -> bool {
        self.listening
    }

    /// Last query sent to the source
    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    pub fn choices(&self) -> &[T] {
        &self.choices
    }

    pub fn placement(&self) -> Option<&PlacementDecision> {
        self.placement.as_ref().map(|p| &p.decision)
    }

    pub fn settings(&self) -> &CellSettings {
        &self.settings
    }

    pub fn latest_request_id(&self) -> u64 {
        self.request_id
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn widget(&self) -> &W {
        &self.widget
    }

    pub fn widget_mut(&mut self) -> &mut W {
        &mut self.widget
    }

    pub fn set_source(&mut self, source: Option<Source<T>>) {
        self.source = source;
    }

    /// Start a fresh session for a cell holding `original_value`
    pub fn prepare(&mut self, original_value: &str) {
        self.state = EditorState::Virgin;
        self.original_value = original_value.to_string();
        self.listening = true;
        self.query = None;
        self.choices = Vec::new();
        self.placement = None;
        self.debouncer.reset();
        self.awaiting_open = false;
        self.trigger = None;
    }

    /// Begin editing and open the dropdown once candidates are known
    ///
    /// The text starts as `initial_value`, or the cell's original value.
    /// Ignored unless the session is fresh.
    pub fn begin_editing(&mut self, initial_value: Option<&str>, trigger: Option<&KeyEvent>) {
        if self.state != EditorState::Virgin {
            log::debug!("Ignoring begin_editing in state {:?}", self.state);
            return;
        }

        self.state = EditorState::Editing;
        let value = initial_value
            .map(str::to_string)
            .unwrap_or_else(|| self.original_value.clone());
        self.host.set_value(&value);
        self.awaiting_open = true;
        self.trigger = trigger.cloned();

        // Candidate count is needed before placement can be decided
        if let Resolution::Ready(choices) = self.resolve(&value) {
            self.finish_open(choices);
        }
    }

    fn finish_open(&mut self, choices: Vec<T>) {
        self.awaiting_open = false;
        self.choices = choices;

        if self.placement.is_none() {
            self.calculate_limits();
        }
        self.apply_margin();

        let trigger = self.trigger.take();
        self.open(trigger.as_ref());
        self.host.focus();
    }

    /// Show the dropdown and refresh its rows
    ///
    /// The refresh is deferred to the next [`tick`](Self::tick). When a
    /// keystroke query has just produced the current choices, they are
    /// rendered right away instead of being queried again.
    pub fn open(&mut self, trigger: Option<&KeyEvent>) {
        if !self.is_live() {
            return;
        }

        self.host.open(trigger);
        self.state = EditorState::Open;

        let width = self
            .settings
            .trim_dropdown
            .then(|| self.host.anchor_geometry().width);
        let highlight = self.highlight();
        self.widget.set_width(width);
        self.widget.set_highlight(highlight);
        self.host.focus();
        log::debug!("Dropdown opened with {} candidates", self.choices.len());

        if self.debouncer.take_coalesced() {
            let choices = std::mem::take(&mut self.choices);
            self.update_choices_list(choices);
            return;
        }

        self.debouncer
            .schedule(Instant::now(), Duration::ZERO, PendingQuery::Reopen);
    }

    /// Hide the dropdown and end the session
    pub fn close(&mut self) {
        if !self.is_live() {
            return;
        }

        self.host.close();
        self.reset_limits();
        self.debouncer.reset();
        self.awaiting_open = false;
        self.query = None;
        self.choices = Vec::new();
        self.state = EditorState::Closed;
        log::debug!("Editing session closed");
    }

    /// Finish editing and return the final text
    ///
    /// With `restore_original` the cell's original value is put back and the
    /// keystroke listener stays attached; otherwise the listener is detached.
    pub fn finish_editing(&mut self, restore_original: bool) -> String {
        if restore_original {
            let original = self.original_value.clone();
            self.host.set_value(&original);
        } else {
            self.listening = false;
        }

        let value = self.host.value();
        self.close();
        value
    }

    /// Feed a key press; returns whether a re-query was scheduled
    pub fn on_keystroke(&mut self, key: &KeyEvent, now: Instant) -> bool {
        self.debouncer.clear_coalesced();

        if !self.listening || !self.is_live() || !triggers_requery(key) {
            return false;
        }

        let delay = if self.is_opened() {
            Duration::ZERO
        } else {
            Duration::from_millis(self.settings.first_open_delay_ms)
        };
        log::trace!("Re-query for {:?} scheduled in {:?}", key.code, delay);
        self.debouncer.schedule(now, delay, PendingQuery::Keystroke);
        true
    }

    /// Fire a due re-query; returns whether one ran
    pub fn tick(&mut self, now: Instant) -> bool {
        if !self.is_live() {
            return false;
        }
        let Some(kind) = self.debouncer.take_due(now) else {
            return false;
        };

        let value = self.host.value();
        match kind {
            PendingQuery::Keystroke => {
                self.query_choices(&value);
                self.debouncer.mark_coalesced();
            }
            PendingQuery::Reopen if !value.is_empty() => {
                let choices = self.choices.clone();
                self.query_choices_with(&value, choices);
            }
            PendingQuery::Reopen => self.query_choices(&value),
        }
        true
    }

    /// Resolve candidates for `query` and display them
    pub fn query_choices(&mut self, query: &str) {
        if !self.is_live() {
            return;
        }

        if let Resolution::Ready(choices) = self.resolve(query) {
            self.update_choices_list(choices);
        }
    }

    /// Display `choices` for `query` without consulting the source
    pub fn query_choices_with(&mut self, query: &str, choices: Vec<T>) {
        if !self.is_live() {
            return;
        }

        self.query = Some(query.to_string());
        self.update_choices_list(choices);
    }

    /// Apply answers from asynchronous providers
    ///
    /// Only the answer to the latest request of a live session is applied;
    /// everything else is discarded. Returns whether anything was applied.
    pub fn poll_responses(&mut self) -> bool {
        let mut applied = false;

        while let Ok(response) = self.response_rx.try_recv() {
            if response.request_id != self.request_id {
                log::debug!(
                    "Discarding stale response {} (latest {})",
                    response.request_id,
                    self.request_id
                );
                continue;
            }
            if !self.is_live() {
                log::debug!(
                    "Discarding response {} for a finished session",
                    response.request_id
                );
                continue;
            }

            if self.awaiting_open {
                self.finish_open(response.candidates);
            } else {
                self.update_choices_list(response.candidates);
            }
            applied = true;
        }

        applied
    }

    /// Recompute placement from the current anchor geometry
    pub fn refresh_placement(&mut self) {
        if !self.is_live() {
            return;
        }

        self.reset_limits();
        self.update_dropdown_height();
    }

    /// Whether an arrow key should move the selection inside the dropdown
    ///
    /// Otherwise the outer editor handles it.
    pub fn allow_key_event_propagation(&self, code: KeyCode) -> bool {
        let selected = self.widget.selected_row().map_or(-1, |row| row as i64);

        match code {
            KeyCode::Down => selected < self.widget.row_count() as i64 - 1,
            KeyCode::Up => selected > -1,
            _ => false,
        }
    }

    fn resolve(&mut self, query: &str) -> Resolution<T> {
        self.query = Some(query.to_string());
        self.request_id = self.request_id.wrapping_add(1);

        let case_sensitive = self.settings.filtering_case_sensitive;
        let filter = self.settings.filter;
        let responder = Responder::new(self.request_id, self.response_tx.clone());

        match self.source.as_mut() {
            Some(source) => source.resolve(query, case_sensitive, filter, responder),
            None => {
                log::debug!("No candidate source, resolving to an empty list");
                Resolution::Ready(Vec::new())
            }
        }
    }

    fn update_choices_list(&mut self, choices: Vec<T>) {
        let caret = self.host.caret();
        let selection_end = self.host.selection_end();
        let value = self.host.value();

        let (choices, best) = order_choices(
            &value,
            choices,
            self.settings.filtering_case_sensitive,
            self.settings.filter,
        );
        self.choices = choices;

        self.update_dropdown_height();
        let highlight = self.highlight();
        self.widget.set_highlight(highlight);
        self.widget.load(&self.choices);

        if self.settings.strict {
            self.highlight_best_match(best);
        }

        self.host.focus();
        self.host
            .set_caret(caret, (caret != selection_end).then_some(selection_end));
    }

    fn update_dropdown_height(&mut self) {
        if self.placement.is_none() {
            self.calculate_limits();
        }
        self.apply_margin();

        let Some(placement) = &self.placement else {
            return;
        };
        let rows = placement
            .decision
            .effective_max_rows(self.settings.visible_rows);
        let height = self
            .placer
            .dropdown_height(self.choices.len(), rows, placement.row_height);
        self.widget.set_height(height);
    }

    fn calculate_limits(&mut self) {
        let geometry = self.host.anchor_geometry();
        let desired = self.settings.visible_rows;

        match self.placer.constraints(&geometry, desired) {
            Ok(constraints) => {
                let decision = decide_placement(&constraints, desired);
                log::debug!(
                    "Placing dropdown {:?} (max rows {:?})",
                    decision.direction,
                    decision.max_rows
                );
                self.placement = Some(Placement {
                    decision,
                    row_height: constraints.row_height,
                });
            }
            Err(e) => log::debug!("Deferring dropdown placement: {}", e),
        }
    }

    fn apply_margin(&mut self) {
        let Some(placement) = self.placement.as_mut() else {
            return;
        };
        if placement.decision.direction != Direction::Up {
            return;
        }

        let rows = placement
            .decision
            .effective_max_rows(self.settings.visible_rows);
        let margin = self
            .placer
            .margin_offset(self.choices.len(), rows, placement.row_height);
        placement.decision.margin_offset = Some(margin);
        self.host.apply_margin(Some(margin));
    }

    fn reset_limits(&mut self) {
        self.placement = None;
        self.host.apply_margin(None);
    }

    fn highlight_best_match(&mut self, best: Option<usize>) {
        match best {
            Some(row) => self.widget.select_row(row),
            None => self.widget.deselect(),
        }
    }

    fn highlight(&self) -> Highlight {
        Highlight::new(
            self.query.clone().unwrap_or_default(),
            self.settings.filtering_case_sensitive,
        )
    }
}

/// Whether a key edits the text in a way that needs new candidates
///
/// Printable characters, Backspace, Delete and Insert qualify, except the
/// copy shortcut.
pub fn triggers_requery(key: &KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('c') | KeyCode::Char('C')
            if key
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::SUPER) =>
        {
            false
        }
        KeyCode::Char(_) | KeyCode::Backspace | KeyCode::Delete | KeyCode::Insert => true,
        _ => false,
    }
}

#[cfg(test)]
#[path = "controller_tests.rs"]
mod controller_tests;
