//! Candidate sources
//!
//! A cell's candidates come either from a static list, filtered here, or from
//! a provider that answers asynchronously through a one-shot [`Responder`].

use std::fmt::{self, Display};
use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::sync::mpsc::Sender;
use std::thread;
use std::time::Duration;

use serde_json::Value;

use super::ranker::find_match;
use crate::error::SuggestError;

/// Candidates delivered by a provider, tagged with the request they answer
#[derive(Debug)]
pub struct SourceResponse<T> {
    pub request_id: u64,
    pub candidates: Vec<T>,
}

/// One-shot handle a provider uses to deliver its candidates
///
/// Consumed by [`Responder::respond`], so a provider can answer a request
/// at most once. It may be moved to another thread.
pub struct Responder<T> {
    request_id: u64,
    tx: Sender<SourceResponse<T>>,
}

impl<T> Responder<T> {
    pub(crate) fn new(request_id: u64, tx: Sender<SourceResponse<T>>) -> Self {
        Self { request_id, tx }
    }

    /// ID of the request this responder answers
    pub fn request_id(&self) -> u64 {
        self.request_id
    }

    /// Deliver the candidates for this request
    pub fn respond(self, candidates: Vec<T>) {
        let request_id = self.request_id;
        if self
            .tx
            .send(SourceResponse {
                request_id,
                candidates,
            })
            .is_err()
        {
            log::debug!("Dropped response {}: controller is gone", request_id);
        }
    }
}

impl<T> fmt::Debug for Responder<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Responder")
            .field("request_id", &self.request_id)
            .finish_non_exhaustive()
    }
}

/// Asynchronous candidate provider
///
/// Receives the query and must eventually call [`Responder::respond`]. No
/// deadline is enforced; a provider that never answers leaves the editor
/// waiting.
pub trait CandidateProvider<T> {
    fn fetch(&mut self, query: &str, responder: Responder<T>);
}

impl<T, F> CandidateProvider<T> for F
where
    F: FnMut(&str, Responder<T>),
{
    fn fetch(&mut self, query: &str, responder: Responder<T>) {
        self(query, responder)
    }
}

/// Where a cell's candidates come from
pub enum Source<T> {
    Static(Vec<T>),
    Dynamic(Box<dyn CandidateProvider<T>>),
}

impl<T> fmt::Debug for Source<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Static(items) => f.debug_tuple("Static").field(&items.len()).finish(),
            Source::Dynamic(_) => f.write_str("Dynamic"),
        }
    }
}

/// Outcome of asking a source for candidates
#[derive(Debug, PartialEq, Eq)]
pub enum Resolution<T> {
    Ready(Vec<T>),
    /// The provider will answer through the responder
    Pending,
}

impl<T: Display + Clone> Source<T> {
    /// Resolve candidates for `query`
    ///
    /// Static sources answer immediately and drop the responder; dynamic
    /// sources hand it to the provider.
    pub fn resolve(
        &mut self,
        query: &str,
        case_sensitive: bool,
        filter_enabled: bool,
        responder: Responder<T>,
    ) -> Resolution<T> {
        match self {
            Source::Static(items) => Resolution::Ready(filter_candidates(
                items,
                query,
                case_sensitive,
                filter_enabled,
            )),
            Source::Dynamic(provider) => {
                log::debug!("Request {} sent to provider", responder.request_id());
                provider.fetch(query, responder);
                Resolution::Pending
            }
        }
    }
}

/// Filter a static list by substring
///
/// Returns a fresh copy of `items` when filtering is off or the query is
/// empty, otherwise the items whose text contains `query`.
pub fn filter_candidates<T: Display + Clone>(
    items: &[T],
    query: &str,
    case_sensitive: bool,
    filter_enabled: bool,
) -> Vec<T> {
    if !filter_enabled || query.is_empty() {
        return items.to_vec();
    }

    items
        .iter()
        .filter(|item| find_match(&item.to_string(), query, case_sensitive).is_some())
        .cloned()
        .collect()
}

/// Text form of a JSON candidate: strings verbatim, null as empty
pub fn stringify_json(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Candidate texts of a JSON document
///
/// Only an array is a usable source. Anything else yields `None`, which the
/// controller treats as an empty candidate list.
pub fn candidates_from_json(value: Value) -> Option<Vec<String>> {
    match value {
        Value::Array(items) => Some(items.iter().map(stringify_json).collect()),
        other => {
            log::debug!("Ignoring non-list candidate source: {}", json_kind(&other));
            None
        }
    }
}

/// Build a static source from a JSON document
pub fn source_from_json(value: Value) -> Option<Source<String>> {
    candidates_from_json(value).map(Source::Static)
}

/// Read candidates from a JSON file
///
/// Unreadable files and malformed JSON are errors; a well-formed document
/// that is not an array gives `Ok(None)`.
pub fn load_candidates(path: &Path) -> Result<Option<Vec<String>>, SuggestError> {
    let contents = fs::read_to_string(path)?;
    let value: Value = serde_json::from_str(&contents)
        .map_err(|e| SuggestError::InvalidSource(format!("{}: {}", path.display(), e)))?;
    Ok(candidates_from_json(value))
}

/// Provider answering from a worker thread after `latency`
///
/// Filters `items` the same way a static source would.
pub fn delayed_source<T>(
    items: Vec<T>,
    latency: Duration,
    case_sensitive: bool,
    filter_enabled: bool,
) -> Source<T>
where
    T: Display + Clone + Send + Sync + 'static,
{
    let items = Arc::new(items);
    Source::Dynamic(Box::new(move |query: &str, responder: Responder<T>| {
        let items = Arc::clone(&items);
        let query = query.to_string();
        thread::spawn(move || {
            thread::sleep(latency);
            let candidates = filter_candidates(&items, &query, case_sensitive, filter_enabled);
            responder.respond(candidates);
        });
    }))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
#[path = "source_tests.rs"]
mod source_tests;
