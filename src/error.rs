//! Error types for synpane

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for viewer operations
pub type Result<T> = std::result::Result<T, ViewerError>;

/// Result type alias for theme loading
pub type ThemeResult<T> = std::result::Result<T, ThemeError>;

/// A span that does not fit the text it was produced for.
///
/// This means the lexer and the model disagree about the content; the span
/// is skipped rather than clamped.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StyleError {
    #[error("span {offset}+{length} of category '{category}' exceeds text length {text_len}")]
    SpanOutOfRange {
        category: String,
        offset: usize,
        length: usize,
        text_len: usize,
    },
}

/// Theme loading errors
#[derive(Error, Debug)]
pub enum ThemeError {
    #[error("invalid color: {0}")]
    InvalidColor(String),

    #[error("cannot read theme {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed theme: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Viewer (binary) error types
#[derive(Error, Debug)]
pub enum ViewerError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("theme error: {0}")]
    Theme(#[from] ThemeError),

    #[error("malformed config {path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("cannot read {path}: {source}")]
    FileNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{0}")]
    Usage(String),
}
