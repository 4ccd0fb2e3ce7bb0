//! Error types for map loading and configuration

use thiserror::Error;

/// Problems found while building a [`Grid`](crate::sim::Grid) from map data
#[derive(Debug, Error)]
pub enum MapError {
    #[error("map has no cells")]
    Empty,
    #[error("row {row} has {found} cells, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("outer border is open at cell ({col}, {row})")]
    OpenBorder { col: usize, row: usize },
    #[error("map has no open cell to stand in")]
    NoOpenCell,
    #[error("unrecognized cell {found:?} at row {row}, column {col}")]
    InvalidCell { row: usize, col: usize, found: char },
    #[error("map json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Problems loading or validating [`Settings`](crate::Settings)
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("settings json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid settings: {0}")]
    Invalid(String),
    #[error(transparent)]
    Map(#[from] MapError),
}
