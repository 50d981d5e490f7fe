//! Keystroke debouncing
//!
//! Holds at most one pending re-query. Scheduling again replaces the pending
//! one, so a burst of keystrokes inside the delay produces a single query.

use std::time::{Duration, Instant};

/// Kind of re-query waiting on the timer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingQuery {
    /// Text changed by a keystroke
    Keystroke,
    /// Refresh after the dropdown opened, re-using known choices
    Reopen,
}

#[derive(Debug, Default)]
pub struct Debouncer {
    pending: Option<(Instant, PendingQuery)>,
    /// Set after a keystroke query ran; suppresses the next reopen refresh
    coalesced: bool,
}

impl Debouncer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, now: Instant, delay: Duration, kind: PendingQuery) {
        log::trace!("Scheduling {:?} re-query in {:?}", kind, delay);
        self.pending = Some((now + delay, kind));
    }

    /// Take the pending re-query if its deadline has passed
    pub fn take_due(&mut self, now: Instant) -> Option<PendingQuery> {
        match self.pending {
            Some((deadline, kind)) if deadline <= now => {
                self.pending = None;
                Some(kind)
            }
            _ => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn mark_coalesced(&mut self) {
        self.coalesced = true;
    }

    pub fn clear_coalesced(&mut self) {
        self.coalesced = false;
    }

    /// Consume the coalesce flag, returning whether it was set
    pub fn take_coalesced(&mut self) -> bool {
        std::mem::take(&mut self.coalesced)
    }

    /// Drop the pending re-query and the coalesce flag
    pub fn reset(&mut self) {
        self.pending = None;
        self.coalesced = false;
    }
}

#[cfg(test)]
#[path = "debounce_tests.rs"]
mod debounce_tests;
