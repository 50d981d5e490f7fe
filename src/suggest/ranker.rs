//! Relevance ranking
//!
//! Orders candidates by where the typed value first occurs in them: earlier
//! matches first, then matches closer to the end of the candidate. All
//! offsets are in characters, not bytes.

use std::borrow::Cow;
use std::fmt::Display;

use memchr::memmem;

/// Location of the first occurrence of a value inside a candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchSpan {
    /// Character offset of the match start
    pub start: usize,
    /// Length of the match in characters
    pub len: usize,
    /// Characters remaining after the match end
    pub chars_left: usize,
}

/// Sort key for a single candidate. `NoMatch` orders after every match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Relevance {
    Match { start: usize, chars_left: usize },
    NoMatch,
}

/// Find the first occurrence of `value` in `text`
pub fn find_match(text: &str, value: &str, case_sensitive: bool) -> Option<MatchSpan> {
    let (haystack, needle): (Cow<str>, Cow<str>) = if case_sensitive {
        (Cow::Borrowed(text), Cow::Borrowed(value))
    } else {
        (Cow::Owned(text.to_lowercase()), Cow::Owned(value.to_lowercase()))
    };

    // A UTF-8 needle found in a UTF-8 haystack always lands on a char boundary
    let byte_pos = memmem::find(haystack.as_bytes(), needle.as_bytes())?;
    let start = haystack[..byte_pos].chars().count();
    let len = needle.chars().count();
    let total = haystack.chars().count();

    Some(MatchSpan {
        start,
        len,
        chars_left: total - start - len,
    })
}

fn relevance_keys<T: Display>(
    value: &str,
    candidates: &[T],
    case_sensitive: bool,
) -> Vec<(usize, Relevance)> {
    candidates
        .iter()
        .enumerate()
        .map(|(idx, candidate)| {
            let relevance = match find_match(&candidate.to_string(), value, case_sensitive) {
                Some(span) => Relevance::Match {
                    start: span.start,
                    chars_left: span.chars_left,
                },
                None => Relevance::NoMatch,
            };
            (idx, relevance)
        })
        .collect()
}

fn sorted_indices(mut keys: Vec<(usize, Relevance)>) -> Vec<usize> {
    // sort_by_key is stable, equal keys keep their original order
    keys.sort_by_key(|&(_, relevance)| relevance);
    keys.into_iter().map(|(idx, _)| idx).collect()
}

/// Rank `candidates` by relevance to `value`, dropping non-matches
///
/// Returns indices into `candidates`. An empty `value` yields the identity
/// ordering without matching anything.
pub fn rank<T: Display>(value: &str, candidates: &[T], case_sensitive: bool) -> Vec<usize> {
    if value.is_empty() {
        return (0..candidates.len()).collect();
    }

    let keys = relevance_keys(value, candidates, case_sensitive)
        .into_iter()
        .filter(|(_, relevance)| *relevance != Relevance::NoMatch)
        .collect();

    sorted_indices(keys)
}

/// Rank `candidates` by relevance to `value`, keeping non-matches last
pub fn rank_retaining<T: Display>(value: &str, candidates: &[T], case_sensitive: bool) -> Vec<usize> {
    if value.is_empty() {
        return (0..candidates.len()).collect();
    }

    sorted_indices(relevance_keys(value, candidates, case_sensitive))
}

/// Apply a ranking to a freshly resolved candidate list
///
/// With `filter_enabled` the list is rebuilt in ranked order (non-matches
/// dropped) and the best match is the first row. Without it the list keeps
/// its order and the best match is the highest ranked original index.
/// Returns the list to display and the row to highlight, if any.
pub fn order_choices<T: Display>(
    value: &str,
    choices: Vec<T>,
    case_sensitive: bool,
    filter_enabled: bool,
) -> (Vec<T>, Option<usize>) {
    let order = rank(value, &choices, case_sensitive);

    if !filter_enabled {
        return (choices, order.first().copied());
    }

    let mut slots: Vec<Option<T>> = choices.into_iter().map(Some).collect();
    let sorted: Vec<T> = order.iter().filter_map(|&idx| slots[idx].take()).collect();
    let best = if sorted.is_empty() { None } else { Some(0) };

    (sorted, best)
}

#[cfg(test)]
#[path = "ranker_tests.rs"]
mod ranker_tests;
