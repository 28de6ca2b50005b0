//! Application factory
//!
//! Builds the Actix-web application around a token service. Shared by the
//! binary and the integration tests.

use actix_web::{
    body::BoxBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    web, App, Error, HttpResponse,
};
use tg_shared::config::Environment;

use crate::middleware::auth::SharedTokenService;
use crate::routes;

/// Create and configure the application with its token service
pub fn create_app(
    tokens: SharedTokenService,
    environment: Environment,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<BoxBody>,
        Error = Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(tokens))
        // Health check endpoint
        .route("/health", web::get().to(health_check))
        .configure(|cfg| routes::configure(cfg, environment))
        // Default 404 handler
        .default_service(web::route().to(|| async {
            HttpResponse::NotFound().json(serde_json::json!({
                "error": "Not found"
            }))
        }))
}

/// Reports 503 when the revocation store cannot be reached
async fn health_check(tokens: web::Data<SharedTokenService>) -> HttpResponse {
    let timestamp = chrono::Utc::now().to_rfc3339();

    match tokens.health_check().await {
        Ok(()) => HttpResponse::Ok().json(serde_json::json!({
            "status": "healthy",
            "service": "tokengate",
            "version": env!("CARGO_PKG_VERSION"),
            "timestamp": timestamp,
        })),
        Err(e) => {
            log::warn!("Health check failed: {}", e);
            HttpResponse::ServiceUnavailable().json(serde_json::json!({
                "status": "unhealthy",
                "service": "tokengate",
                "version": env!("CARGO_PKG_VERSION"),
                "timestamp": timestamp,
            }))
        }
    }
}
