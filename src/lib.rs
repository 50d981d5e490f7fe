//! Autocompleting cell editor for terminal grids

pub mod app;
pub mod config;
pub mod error;
pub mod suggest;
pub mod widgets;
