use actix_web::{web, HttpResponse};
use tg_core::IdentityInput;

use crate::dto::auth::{IssueTokenRequest, TokenResponse};
use crate::handlers::error::handle_domain_error;
use crate::middleware::auth::SharedTokenService;

/// Handler for POST /api/v1/auth/token
///
/// Issues a token for the supplied identity without any credential check.
/// Only mounted outside production; a real deployment issues tokens from its
/// own login flow.
///
/// # Request Body
///
/// ```json
/// {
///     "id": "42",
///     "role": "admin",
///     "email": "user@example.com"
/// }
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
/// - 400 Bad Request: Empty `id`
/// - 500 Internal Server Error: Signing failure
pub async fn issue_token(
    tokens: web::Data<SharedTokenService>,
    request: web::Json<IssueTokenRequest>,
) -> HttpResponse {
    let input: IdentityInput = request.into_inner().into();

    match tokens.issue(&input) {
        Ok(token) => {
            log::info!("Issued token for subject {}", input.id);
            HttpResponse::Ok().json(TokenResponse::bearer(token, tokens.token_lifetime()))
        }
        Err(error) => handle_domain_error(&error),
    }
}
