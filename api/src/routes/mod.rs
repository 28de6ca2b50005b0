pub mod auth;
pub mod me;

use actix_web::web;
use tg_shared::config::Environment;

use crate::middleware::auth::JwtAuth;

/// Register the `/api/v1` routes
///
/// The unauthenticated issuing endpoint is left out in production.
pub fn configure(cfg: &mut web::ServiceConfig, environment: Environment) {
    let mut auth_scope = web::scope("/auth")
        .route("/refresh", web::post().to(auth::refresh_token))
        .service(
            web::resource("/logout")
                .wrap(JwtAuth)
                .route(web::post().to(auth::logout)),
        );

    if !environment.is_production() {
        auth_scope = auth_scope.route("/token", web::post().to(auth::issue_token));
    }

    cfg.service(
        web::scope("/api/v1").service(auth_scope).service(
            web::resource("/me")
                .wrap(JwtAuth)
                .route(web::get().to(me::me)),
        ),
    );
}
