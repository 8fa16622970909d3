//! Error types for parsing, conversion and rendering

use thiserror::Error;

/// Errors produced by the library
#[derive(Debug, Error)]
pub enum BetterMdError {
    #[error("Symbol `{0}` not found in collection, if using default symbols it may not be supported.")]
    UnknownElement(String),

    #[error("Invalid structure in <{element}>: {reason}")]
    InvalidStructure { element: String, reason: String },

    #[error("Malformed input: {0}")]
    MalformedInput(String),

    #[error("Cannot tell the source format of {0}, expected .html, .htm, .md or .markdown")]
    UnknownFormat(std::path::PathBuf),

    #[error("Conversion task failed: {0}")]
    Task(String),

    #[error("Child index {index} out of range (element has {len} children)")]
    ChildIndex { index: usize, len: usize },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl BetterMdError {
    pub(crate) fn structure(element: &str, reason: impl Into<String>) -> Self {
        BetterMdError::InvalidStructure {
            element: element.to_string(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, BetterMdError>;
