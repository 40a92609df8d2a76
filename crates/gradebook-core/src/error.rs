//! Input-boundary error types.
//!
//! The grading pipeline itself is infallible. These errors only arise while
//! turning external input (files, CLI flags, environment) into the typed
//! values the pipeline consumes.

use thiserror::Error;

/// Errors raised while reading rosters, settings, or option strings.
#[derive(Debug, Error)]
pub enum InputError {
    /// The roster file extension is not one we know how to read.
    #[error("unsupported roster format: {0} (expected .toml or .json)")]
    UnsupportedFormat(String),

    /// Two students in one roster share the same identifier.
    #[error("duplicate student id: {0}")]
    DuplicateStudent(String),

    /// A sort order string did not match any known order.
    #[error("unknown sort order: {0} (expected name-asc, name-desc, id-asc, score-desc or aggregate-asc)")]
    UnknownSortOrder(String),

    /// A grade code string did not match any band.
    #[error("unknown grade code: {0}")]
    UnknownGrade(String),
}
