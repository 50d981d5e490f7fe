//! Autocomplete suggestions for a cell editor
//!
//! Candidate acquisition ([`source`]), relevance ranking ([`ranker`]) and
//! dropdown placement ([`placement`]) are driven by the
//! [`SuggestionController`] through the host capabilities in [`host`].

pub mod controller;
pub mod debounce;
pub mod host;
pub mod placement;
pub mod ranker;
pub mod source;

pub use controller::{EditorState, SuggestionController};
pub use host::{CandidateWidget, EditorHost, Highlight};
pub use placement::{
    AnchorGeometry, Direction, PlacementDecision, ViewportConstraints, ViewportPlacer,
    decide_placement,
};
pub use ranker::{MatchSpan, find_match, order_choices, rank, rank_retaining};
pub use source::{
    CandidateProvider, Resolution, Responder, Source, SourceResponse, candidates_from_json,
    delayed_source, filter_candidates, load_candidates, source_from_json, stringify_json,
};
