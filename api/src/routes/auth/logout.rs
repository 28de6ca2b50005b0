use actix_web::{web, HttpResponse};

use crate::dto::auth::LogoutResponse;
use crate::handlers::error::handle_domain_error;
use crate::middleware::auth::{AuthContext, SharedTokenService};

/// Handler for POST /api/v1/auth/logout
///
/// Revokes the token the request was authenticated with. Later requests
/// presenting it are rejected with `Token revoked`. Mounted behind
/// `JwtAuth`.
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
///     "message": "Logged out successfully"
/// }
/// ```
///
/// ## Errors
/// - 401 Unauthorized: Missing, revoked, invalid or expired token
/// - 503 Service Unavailable: Revocation store unreachable
pub async fn logout(tokens: web::Data<SharedTokenService>, auth: AuthContext) -> HttpResponse {
    match tokens.revoke(&auth.token).await {
        Ok(()) => {
            log::info!("Subject {} logged out", auth.subject);
            HttpResponse::Ok().json(LogoutResponse {
                message: "Logged out successfully".to_string(),
            })
        }
        Err(error) => handle_domain_error(&error),
    }
}
