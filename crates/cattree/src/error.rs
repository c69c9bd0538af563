//! Error types for cattree operations.
//!
//! Only infrastructure failures (I/O, configuration) reach callers of the
//! CLI. Errors raised while walking a pedigree are caught by the
//! calculator and degrade the result instead of aborting it.

use crate::domain::CatId;
use std::io;
use thiserror::Error;

/// The error type for cattree operations.
#[derive(Debug, Error)]
pub enum Error {
    /// IO error occurred.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON parsing or serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A cat referenced by id is not present in the pedigree.
    #[error("Cat not found: {0}")]
    CatNotFound(CatId),

    /// Too many simple paths between two cats.
    #[error("More than {limit} ancestry paths from {from} to {to}")]
    PathLimitExceeded {
        /// Start of the enumeration
        from: CatId,
        /// Ancestor the paths lead to
        to: CatId,
        /// Configured limit that was exceeded
        limit: usize,
    },
}

/// A specialized Result type for cattree operations.
pub type Result<T> = std::result::Result<T, Error>;
