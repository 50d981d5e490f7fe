use thiserror::Error;

/// Custom error types for cellsuggest
#[derive(Debug, Error)]
pub enum SuggestError {
    #[error("Anchor geometry unavailable (height {height}, viewport height {viewport_height})")]
    GeometryUnavailable { height: f64, viewport_height: f64 },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Invalid candidate source: {0}")]
    InvalidSource(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod error_tests;
