//! # Book Errors
//!
//! Error types for the book store and service.

use thiserror::Error;

/// Result type for book service operations
pub type BookResult<T> = Result<T, BookError>;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Input rejected before it reaches the store
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is absent, empty or zero
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// `readPage` is larger than `pageCount`
    #[error("readPage must not be greater than pageCount")]
    ReadPageExceedsPageCount,
}

/// Failures of the backing store
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// A row with this id already exists
    #[error("Book already exists: {0}")]
    Conflict(String),

    /// The store could not be reached or the driver failed
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(code, _)
                if code.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY =>
            {
                StoreError::Conflict(err.to_string())
            }
            _ => StoreError::Unavailable(err.to_string()),
        }
    }
}

/// Book service errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BookError {
    /// Request body could not be decoded
    #[error("Invalid request body: {0}")]
    InvalidPayload(String),

    /// Book id in the request path could not be decoded
    #[error("Invalid book id: {0}")]
    InvalidId(String),

    /// Input failed validation
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// No book with this id
    #[error("Book not found: {0}")]
    NotFound(String),

    /// Backing store failed
    #[error(transparent)]
    Store(#[from] StoreError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_converts() {
        let err: BookError = ValidationError::MissingField("name").into();
        assert_eq!(err, BookError::Validation(ValidationError::MissingField("name")));
        assert_eq!(err.to_string(), "Missing required field: name");
    }

    #[test]
    fn test_primary_key_violation_is_conflict() {
        let conn = rusqlite::Connection::open_in_memory().unwrap();
        conn.execute("CREATE TABLE t (id TEXT PRIMARY KEY)", []).unwrap();
        conn.execute("INSERT INTO t (id) VALUES ('a')", []).unwrap();
        let err = conn.execute("INSERT INTO t (id) VALUES ('a')", []).unwrap_err();

        assert!(matches!(StoreError::from(err), StoreError::Conflict(_)));
    }

    #[test]
    fn test_other_driver_errors_are_unavailable() {
        let conn = rusqlite::Connection::open_in_memory().unwrap();
        let err = conn.execute("SELECT * FROM missing_table", []).unwrap_err();

        assert!(matches!(StoreError::from(err), StoreError::Unavailable(_)));
    }
}
