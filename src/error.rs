//! Error types for the files manager.

use thiserror::Error;

/// Common error type for the files manager.
#[derive(Error, Debug)]
pub enum FilesError {
    /// Malformed or missing request field, or a broken hierarchy invariant.
    ///
    /// The message is shown to the client verbatim.
    #[error("{0}")]
    Validation(String),

    /// Unknown id, wrong owner, or access denied.
    ///
    /// These cases are deliberately not distinguished from each other.
    #[error("Not found")]
    NotFound,

    /// Operation is not defined for the entity's type.
    #[error("{0}")]
    InvalidOperation(String),

    /// Authentication error.
    #[error("authentication error: {0}")]
    Auth(String),

    /// Database error.
    ///
    /// Database errors from sqlx are automatically converted.
    #[error("database error: {0}")]
    Database(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Job queue error.
    #[error("queue error: {0}")]
    Queue(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

impl FilesError {
    /// Shorthand for a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        FilesError::Validation(message.into())
    }
}

// Conversion from sqlx errors
impl From<sqlx::Error> for FilesError {
    fn from(e: sqlx::Error) -> Self {
        FilesError::Database(e.to_string())
    }
}

/// Result type alias for files manager operations.
pub type Result<T> = std::result::Result<T, FilesError>;
