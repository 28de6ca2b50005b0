//! Shared error body returned by the authentication layer

use serde::{Deserialize, Serialize};

/// JSON body of every rejection: `{"error": "<message>"}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// Rejection messages sent to clients
pub mod messages {
    pub const TOKEN_NOT_PROVIDED: &str = "Token not provided";
    pub const TOKEN_REVOKED: &str = "Token revoked";
    pub const TOKEN_INVALID: &str = "Invalid or expired token";
}
