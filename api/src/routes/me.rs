use actix_web::HttpResponse;

use crate::middleware::auth::AuthContext;

/// Handler for GET /api/v1/me
///
/// Returns the identity attached by `JwtAuth`; `role` and `email` are `null`
/// when the token does not carry them.
pub async fn me(auth: AuthContext) -> HttpResponse {
    HttpResponse::Ok().json(auth.identity())
}
