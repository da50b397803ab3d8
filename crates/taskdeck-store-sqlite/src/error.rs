//! Error types for SQLite store operations.

use thiserror::Error;

/// Errors that can occur during `SqliteStore` operations.
#[derive(Error, Debug)]
pub enum SqliteStoreError {
    /// SQLite reported a failure.
    #[error("SQLite error: {0}")]
    Sql(#[from] rusqlite::Error),

    /// Creating the database directory failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A timestamp or date could not be rendered as text.
    #[error("Failed to format timestamp: {0}")]
    Format(#[from] time::error::Format),

    /// Raw query text was not a single read-only `SELECT`.
    #[error("Only SELECT statements are allowed")]
    NotSelect,

    /// A table name failed identifier validation.
    #[error("Invalid table name: {0}")]
    InvalidIdentifier(String),

    /// Another user already owns the email address.
    #[error("A user with this email already exists")]
    DuplicateEmail,

    /// Other unclassified error.
    #[error("Other error: {0}")]
    Other(String),
}

impl SqliteStoreError {
    /// True when SQLite rejected a write because of a `UNIQUE` constraint.
    #[must_use]
    pub fn is_unique_violation(&self) -> bool {
        matches!(
            self,
            Self::Sql(rusqlite::Error::SqliteFailure(err, _))
                if err.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
        )
    }
}
