//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent violations inside the transformation core
/// or faults reported by the host document.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("root already set: tree already has a root node")]
    RootAlreadySet,

    #[error("parent not found in tree: {0}")]
    ParentNotFound(String),

    #[error("invalid pattern `{pattern}`: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("range {start}..{end} out of bounds for text of length {len}")]
    OutOfBounds { start: usize, end: usize, len: usize },

    #[error("transform failed: {0}")]
    TransformFailure(String),
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
