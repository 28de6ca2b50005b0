use actix_web::{http::header::AUTHORIZATION, web, HttpRequest, HttpResponse, ResponseError};
use tg_shared::extract_bearer_token;

use crate::dto::auth::TokenResponse;
use crate::handlers::error::{handle_domain_error, AuthRejection};
use crate::middleware::auth::SharedTokenService;

/// Handler for POST /api/v1/auth/refresh
///
/// Exchanges a valid, unrevoked token for a new one with the same identity
/// and a fresh expiry. The presented token is read from the `Authorization`
/// header and remains valid until it expires or is revoked.
///
/// # Headers
///
/// ```text
/// Authorization: Bearer {token}
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "token": "eyJ...",
///     "token_type": "Bearer",
///     "expires_in": 3600
/// }
/// ```
///
/// ## Errors
/// - 401 Unauthorized: Missing, revoked, invalid or expired token
/// - 503 Service Unavailable: Revocation store unreachable
pub async fn refresh_token(req: HttpRequest, tokens: web::Data<SharedTokenService>) -> HttpResponse {
    let authorization = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok());

    let token = match extract_bearer_token(authorization) {
        Some(token) => token,
        None => return AuthRejection::TokenMissing.error_response(),
    };

    match tokens.refresh(token).await {
        Ok(refreshed) => {
            HttpResponse::Ok().json(TokenResponse::bearer(refreshed, tokens.token_lifetime()))
        }
        Err(error) => handle_domain_error(&error),
    }
}
