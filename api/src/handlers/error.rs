//! Mapping of authentication failures and domain errors to HTTP responses

use std::fmt;

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use tg_core::errors::{DomainError, TokenError};
use tg_shared::errors::{messages, ErrorBody};

/// Why the authentication middleware turned a request away
///
/// Always rendered as 401 with a single-field JSON body. The three kinds are
/// the only distinctions a client ever sees.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthRejection {
    /// No `Authorization` header, or not of the form `Bearer <token>`
    TokenMissing,
    /// The token is in the revocation registry
    TokenRevoked,
    /// Bad signature, tampering, malformed structure or expiry
    TokenInvalid,
}

impl AuthRejection {
    pub fn message(&self) -> &'static str {
        match self {
            AuthRejection::TokenMissing => messages::TOKEN_NOT_PROVIDED,
            AuthRejection::TokenRevoked => messages::TOKEN_REVOKED,
            AuthRejection::TokenInvalid => messages::TOKEN_INVALID,
        }
    }
}

impl fmt::Display for AuthRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for AuthRejection {}

impl ResponseError for AuthRejection {
    fn status_code(&self) -> StatusCode {
        StatusCode::UNAUTHORIZED
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorBody::new(self.message()))
    }
}

/// Handle domain errors and convert them to appropriate HTTP responses
///
/// Token failures collapse onto the middleware's rejection bodies. Internal
/// failures are logged with their detail and answered generically.
pub fn handle_domain_error(error: &DomainError) -> HttpResponse {
    match error {
        DomainError::InvalidToken(TokenError::Missing) => {
            AuthRejection::TokenMissing.error_response()
        }
        DomainError::InvalidToken(TokenError::Revoked) => {
            AuthRejection::TokenRevoked.error_response()
        }
        DomainError::InvalidToken(cause) => {
            log::debug!("Rejected token: {}", cause);
            AuthRejection::TokenInvalid.error_response()
        }
        DomainError::Refresh(inner) => handle_domain_error(inner),
        DomainError::Validation { message } => {
            HttpResponse::BadRequest().json(ErrorBody::new(message.as_str()))
        }
        DomainError::Storage { message } => {
            log::error!("Revocation store error: {}", message);
            HttpResponse::ServiceUnavailable()
                .json(ErrorBody::new("Revocation store unavailable"))
        }
        DomainError::Encoding { .. } | DomainError::Config { .. } => {
            log::error!("Domain Error: {:?}", error);
            HttpResponse::InternalServerError().json(ErrorBody::new("Internal server error"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    async fn body_of(response: HttpResponse) -> serde_json::Value {
        let bytes = to_bytes(response.into_body()).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[actix_web::test]
    async fn test_rejection_bodies() {
        for (rejection, message) in [
            (AuthRejection::TokenMissing, "Token not provided"),
            (AuthRejection::TokenRevoked, "Token revoked"),
            (AuthRejection::TokenInvalid, "Invalid or expired token"),
        ] {
            let response = rejection.error_response();
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
            assert_eq!(body_of(response).await, serde_json::json!({ "error": message }));
        }
    }

    #[actix_web::test]
    async fn test_refresh_error_uses_inner_cause() {
        let revoked = DomainError::Refresh(Box::new(DomainError::InvalidToken(TokenError::Revoked)));
        let response = handle_domain_error(&revoked);
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_of(response).await["error"], "Token revoked");

        let expired = DomainError::Refresh(Box::new(DomainError::InvalidToken(TokenError::Expired)));
        let response = handle_domain_error(&expired);
        assert_eq!(body_of(response).await["error"], "Invalid or expired token");
    }

    #[test]
    fn test_internal_failures_status() {
        let storage = DomainError::Storage {
            message: "down".to_string(),
        };
        assert_eq!(
            handle_domain_error(&storage).status(),
            StatusCode::SERVICE_UNAVAILABLE
        );

        let validation = DomainError::Validation {
            message: "Identity id must not be empty".to_string(),
        };
        assert_eq!(handle_domain_error(&validation).status(), StatusCode::BAD_REQUEST);

        let encoding = DomainError::Encoding {
            message: "boom".to_string(),
        };
        assert_eq!(
            handle_domain_error(&encoding).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
