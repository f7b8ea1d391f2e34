//! Error types for forumlist.

use thiserror::Error;

/// Common error type for forumlist.
#[derive(Error, Debug)]
pub enum ForumError {
    /// Database error.
    ///
    /// Errors from sqlx are converted into this variant.
    #[error("database error: {0}")]
    Database(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Permission denied error.
    #[error("permission denied: {0}")]
    Permission(String),

    /// Validation error for request input.
    #[error("validation error: {0}")]
    Validation(String),

    /// Resource not found.
    #[error("{0} not found")]
    NotFound(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// Requested page does not exist.
    #[error("pagination error: {0}")]
    Page(#[from] crate::threads::PageError),

    /// Internal invariant violated.
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<sqlx::Error> for ForumError {
    fn from(e: sqlx::Error) -> Self {
        ForumError::Database(e.to_string())
    }
}

/// Result type alias for forumlist operations.
pub type Result<T> = std::result::Result<T, ForumError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permission_error_display() {
        let err = ForumError::Permission("cannot browse forum".to_string());
        assert_eq!(err.to_string(), "permission denied: cannot browse forum");
    }

    #[test]
    fn test_validation_error_display() {
        let err = ForumError::Validation("invalid page".to_string());
        assert_eq!(err.to_string(), "validation error: invalid page");
    }

    #[test]
    fn test_not_found_error_display() {
        let err = ForumError::NotFound("forum".to_string());
        assert_eq!(err.to_string(), "forum not found");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: ForumError = io_err.into();
        assert!(matches!(err, ForumError::Io(_)));
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_page_error_conversion() {
        let err: ForumError = crate::threads::PageError::Empty(4).into();
        assert!(matches!(err, ForumError::Page(_)));
        assert_eq!(err.to_string(), "pagination error: page 4 contains no results");
    }

    #[test]
    fn test_sqlx_error_conversion() {
        let err: ForumError = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, ForumError::Database(_)));
    }
}
