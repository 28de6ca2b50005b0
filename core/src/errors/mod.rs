//! Domain-specific error types and error handling.

mod types;


pub use types::TokenError;

use thiserror::Error;

/// Core domain errors
#[derive(Error, Debug)]
pub enum DomainError {
    /// Verification failed. The message is the same whatever the cause so
    /// callers cannot tell an expired token from a forged one.
    #[error("Invalid or expired token")]
    InvalidToken(TokenError),

    #[error("Token encoding failed: {message}")]
    Encoding { message: String },

    #[error("Cannot refresh token")]
    Refresh(#[source] Box<DomainError>),

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Revocation store error: {message}")]
    Storage { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl DomainError {
    /// Internal cause of a token failure, for logging
    ///
    /// Looks through `Refresh` to the verification failure it wraps.
    pub fn token_cause(&self) -> Option<&TokenError> {
        match self {
            DomainError::InvalidToken(cause) => Some(cause),
            DomainError::Refresh(inner) => inner.token_cause(),
            _ => None,
        }
    }

    /// Whether this error means the presented token must be rejected
    pub fn is_invalid_token(&self) -> bool {
        matches!(self, DomainError::InvalidToken(_))
    }
}

impl From<TokenError> for DomainError {
    fn from(cause: TokenError) -> Self {
        DomainError::InvalidToken(cause)
    }
}
