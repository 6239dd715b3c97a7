//! Error types for the optimization pipeline
//!
//! Extraction failures abort a run before any trace is produced; per-unit
//! parse failures do not land here at all, they degrade into
//! [`Diagnostic`](crate::types::Diagnostic) values carried alongside the
//! trace.

use thiserror::Error;

/// Errors that can abort an optimization run.
#[derive(Debug, Error)]
pub enum OptimizeError {
    /// No SELECT keyword found anywhere in the input, so there is no query
    /// to optimize.
    #[error("no SELECT statement found in input")]
    QueryMissing,

    /// A SELECT was found but the statement is not a well-formed
    /// SELECT-FROM-WHERE query.
    #[error("malformed query: {0}")]
    MalformedQuery(String),

    /// Schema text that cannot be scanned at all, e.g. an unterminated
    /// relation body.
    #[error("schema parse error: {0}")]
    SchemaParse(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, OptimizeError>;
