// Error types for the security layer

use std::fmt::Display;
use thiserror::Error;

/// Result type alias for security operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the security layer and its collaborators
#[derive(Debug, Error)]
pub enum Error {
    /// A lookup-by-id collaborator could not find the requested id
    #[error("{0}")]
    NotFound(String),

    /// Missing or rejected authentication
    #[error("{0}")]
    Unauthorized(String),

    /// Entity already exists (e.g. duplicate account name)
    #[error("{0}")]
    Conflict(String),

    /// bcrypt failed to hash or verify
    #[error("Password hashing error: {0}")]
    PasswordHash(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl Error {
    /// Create a not-found error for an id
    pub fn not_found(id: impl Display) -> Self {
        Error::NotFound(format!("Could not find id : {}", id))
    }

    /// Create an unauthorized error
    pub fn unauthorized(msg: impl Into<String>) -> Self {
        Error::Unauthorized(msg.into())
    }

    /// Rejected credentials. Unknown user and wrong password share this message.
    pub fn bad_credentials() -> Self {
        Error::Unauthorized("Bad credentials".to_string())
    }

    /// Create a conflict error
    pub fn conflict(msg: impl Into<String>) -> Self {
        Error::Conflict(msg.into())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound(_))
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Error::Unauthorized(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message() {
        let err = Error::not_found(42);
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Could not find id : 42");
    }

    #[test]
    fn test_bad_credentials() {
        let err = Error::bad_credentials();
        assert!(err.is_unauthorized());
        assert_eq!(err.to_string(), "Bad credentials");
    }

    #[test]
    fn test_internal_from_anyhow() {
        let err: Error = anyhow::anyhow!("boom").into();
        assert_eq!(err.to_string(), "Internal error: boom");
    }
}
