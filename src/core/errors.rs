// src/core/errors.rs

//! Defines the error type shared by the traversal engine, the loaders and the session.

use std::sync::Arc;
use thiserror::Error;

/// Every failure the crate can report.
/// Traversal errors abort the whole call; nothing partial is ever returned alongside one.
#[derive(Error, Debug)]
pub enum TraverseError {
    /// A malformed slice expression, a zero slice step or an unusable separator.
    #[error("Validation error: {0}")]
    Validation(String),

    /// A resolver was handed a node of the wrong shape.
    #[error("Wrong node type: {0}")]
    WrongType(String),

    /// A path segment remained but the current value is a scalar or null.
    #[error("Traversal error: {0}")]
    Traversal(String),

    #[error("Invalid key pattern: {0}")]
    InvalidPattern(String),

    #[error("Invalid JSON file path: {0}")]
    InvalidFile(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("IO Error: {0}")]
    Io(Arc<std::io::Error>),

    #[error("Invalid JSON: {0}")]
    Parse(String),

    #[error("HTTP client error: {0}")]
    HttpClientError(String),
}

// `std::io::Error` is not cloneable, so it is shared behind an Arc.
impl Clone for TraverseError {
    fn clone(&self) -> Self {
        match self {
            TraverseError::Validation(s) => TraverseError::Validation(s.clone()),
            TraverseError::WrongType(s) => TraverseError::WrongType(s.clone()),
            TraverseError::Traversal(s) => TraverseError::Traversal(s.clone()),
            TraverseError::InvalidPattern(s) => TraverseError::InvalidPattern(s.clone()),
            TraverseError::InvalidFile(s) => TraverseError::InvalidFile(s.clone()),
            TraverseError::InvalidUrl(s) => TraverseError::InvalidUrl(s.clone()),
            TraverseError::Io(e) => TraverseError::Io(Arc::clone(e)),
            TraverseError::Parse(s) => TraverseError::Parse(s.clone()),
            TraverseError::HttpClientError(s) => TraverseError::HttpClientError(s.clone()),
        }
    }
}

impl PartialEq for TraverseError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (TraverseError::Validation(s1), TraverseError::Validation(s2)) => s1 == s2,
            (TraverseError::WrongType(s1), TraverseError::WrongType(s2)) => s1 == s2,
            (TraverseError::Traversal(s1), TraverseError::Traversal(s2)) => s1 == s2,
            (TraverseError::InvalidPattern(s1), TraverseError::InvalidPattern(s2)) => s1 == s2,
            (TraverseError::InvalidFile(s1), TraverseError::InvalidFile(s2)) => s1 == s2,
            (TraverseError::InvalidUrl(s1), TraverseError::InvalidUrl(s2)) => s1 == s2,
            (TraverseError::Io(e1), TraverseError::Io(e2)) => e1.to_string() == e2.to_string(),
            (TraverseError::Parse(s1), TraverseError::Parse(s2)) => s1 == s2,
            (TraverseError::HttpClientError(s1), TraverseError::HttpClientError(s2)) => s1 == s2,
            _ => false,
        }
    }
}

// --- From trait implementations for easy error conversion ---

impl From<std::io::Error> for TraverseError {
    fn from(e: std::io::Error) -> Self {
        TraverseError::Io(Arc::new(e))
    }
}

impl From<serde_json::Error> for TraverseError {
    fn from(e: serde_json::Error) -> Self {
        // I/O failures raised while reading through serde_json stay I/O failures.
        if e.is_io() {
            return TraverseError::Io(Arc::new(std::io::Error::other(e.to_string())));
        }
        TraverseError::Parse(e.to_string())
    }
}

impl From<reqwest::Error> for TraverseError {
    fn from(e: reqwest::Error) -> Self {
        TraverseError::HttpClientError(e.to_string())
    }
}

impl From<regex::Error> for TraverseError {
    fn from(e: regex::Error) -> Self {
        // Sanitize multi-line regex diagnostics into a single line.
        TraverseError::InvalidPattern(e.to_string().replace('\n', " "))
    }
}

impl From<url::ParseError> for TraverseError {
    fn from(e: url::ParseError) -> Self {
        TraverseError::InvalidUrl(e.to_string())
    }
}
