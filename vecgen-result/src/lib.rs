//! Shared error and result types used across the vecgen workspace.

use std::fmt;

use thiserror::Error;

/// Workspace-wide error type.
///
/// Crates in this workspace return [`Error`] from fallible operations
/// instead of defining their own error enums, so callers only ever deal
/// with one taxonomy.
#[derive(Error, Debug)]
pub enum Error {
    #[error("arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    /// A caller-supplied argument was rejected up front (bad scale
    /// factor, unknown table name, zero split count, ...).
    #[error("invalid argument: {0}")]
    InvalidArgumentError(String),

    /// A name failed to resolve against the schema catalog.
    #[error("catalog error: {0}")]
    CatalogError(String),

    #[error("not found: {0}")]
    NotFound(String),

    /// A protocol violation inside the engine, e.g. pulling from a data
    /// source that has no split bound.
    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    pub fn invalid_argument(msg: impl fmt::Display) -> Self {
        Error::InvalidArgumentError(msg.to_string())
    }

    pub fn catalog(msg: impl fmt::Display) -> Self {
        Error::CatalogError(msg.to_string())
    }

    pub fn not_found(msg: impl fmt::Display) -> Self {
        Error::NotFound(msg.to_string())
    }

    pub fn internal(msg: impl fmt::Display) -> Self {
        Error::Internal(msg.to_string())
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
