//! Defines the custom error type for the `core` module.

use thiserror::Error;

/// The primary error type for query execution.
///
/// An unreadable source directory is deliberately not represented here: it
/// degrades to an empty result set instead of failing the caller.
#[derive(Debug, Error)]
pub enum QueryError {
    /// The requested order field names no attribute of [`FileEntry`](super::FileEntry).
    #[error("order field {0:?} doesn't exist")]
    UnknownOrderField(String),

    /// A registered filter pattern failed to compile. Patterns are accepted
    /// unchecked and only compiled when a query runs, so this surfaces at
    /// evaluation time.
    #[error("invalid filter pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
}
