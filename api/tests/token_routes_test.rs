//! Integration tests for the token routes mounted by `create_app`

mod common;

use actix_web::{http::StatusCode, test};
use serde_json::json;

use tg_api::create_app;
use tg_core::IdentityInput;
use tg_shared::config::Environment;

use common::{bearer, send, token_service, unreachable_token_service};

#[actix_web::test]
async fn test_health_check() {
    let (_, shared) = token_service();
    let app = test::init_service(create_app(shared, Environment::Development)).await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "healthy");
}

#[actix_web::test]
async fn test_health_check_reports_unreachable_store() {
    let app = test::init_service(create_app(
        unreachable_token_service(),
        Environment::Development,
    ))
    .await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let (status, body) = send(&app, req).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["status"], "unhealthy");
}

#[actix_web::test]
async fn test_issue_then_me() {
    let (_, shared) = token_service();
    let app = test::init_service(create_app(shared, Environment::Development)).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/token")
        .set_json(json!({ "id": "42", "role": "admin" }))
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["token_type"], "Bearer");
    assert_eq!(body["expires_in"], 3600);
    let token = body["token"].as_str().unwrap().to_string();

    let req = test::TestRequest::get()
        .uri("/api/v1/me")
        .insert_header(bearer(&token))
        .to_request();
    let (status, body) = send(&app, req).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "subject": "42", "role": "admin", "email": null }));
}

#[actix_web::test]
async fn test_issue_rejects_empty_id() {
    let (_, shared) = token_service();
    let app = test::init_service(create_app(shared, Environment::Development)).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/token")
        .set_json(json!({ "id": "" }))
        .to_request();
    let (status, _) = send(&app, req).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_issue_route_absent_in_production() {
    let (_, shared) = token_service();
    let app = test::init_service(create_app(shared, Environment::Production)).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/token")
        .set_json(json!({ "id": "42" }))
        .to_request();
    let (status, _) = send(&app, req).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_me_requires_token() {
    let (_, shared) = token_service();
    let app = test::init_service(create_app(shared, Environment::Development)).await;

    let req = test::TestRequest::get().uri("/api/v1/me").to_request();
    let (status, body) = send(&app, req).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, json!({ "error": "Token not provided" }));
}

#[actix_web::test]
async fn test_refresh_returns_new_token() {
    let (service, shared) = token_service();
    let app = test::init_service(create_app(shared, Environment::Development)).await;
    let token = service
        .issue(&IdentityInput::new("42").with_role("user"))
        .unwrap();

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/refresh")
        .insert_header(bearer(&token))
        .to_request();
    let (status, body) = send(&app, req).await;

    assert_eq!(status, StatusCode::OK);
    let refreshed = body["token"].as_str().unwrap();
    assert_ne!(refreshed, token);

    let claims = service.verify(refreshed).unwrap();
    assert_eq!(claims.sub, "42");
    assert_eq!(claims.role.as_deref(), Some("user"));
}

#[actix_web::test]
async fn test_refresh_without_header() {
    let (_, shared) = token_service();
    let app = test::init_service(create_app(shared, Environment::Development)).await;

    let req = test::TestRequest::post().uri("/api/v1/auth/refresh").to_request();
    let (status, body) = send(&app, req).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, json!({ "error": "Token not provided" }));
}

#[actix_web::test]
async fn test_refresh_revoked_token_is_refused() {
    let (service, shared) = token_service();
    let app = test::init_service(create_app(shared, Environment::Development)).await;
    let token = service.issue(&IdentityInput::new("42")).unwrap();
    service.revoke(&token).await.unwrap();

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/refresh")
        .insert_header(bearer(&token))
        .to_request();
    let (status, body) = send(&app, req).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, json!({ "error": "Token revoked" }));
}

#[actix_web::test]
async fn test_logout_revokes_presented_token() {
    let (service, shared) = token_service();
    let app = test::init_service(create_app(shared, Environment::Development)).await;
    let token = service.issue(&IdentityInput::new("42")).unwrap();
    let sibling = service.issue(&IdentityInput::new("42")).unwrap();

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/logout")
        .insert_header(bearer(&token))
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Logged out successfully");
    assert!(service.is_revoked(&token).await.unwrap());

    // The same token no longer gets through
    let req = test::TestRequest::get()
        .uri("/api/v1/me")
        .insert_header(bearer(&token))
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, json!({ "error": "Token revoked" }));

    // Other tokens for the same subject are unaffected
    let req = test::TestRequest::get()
        .uri("/api/v1/me")
        .insert_header(bearer(&sibling))
        .to_request();
    let (status, _) = send(&app, req).await;
    assert_eq!(status, StatusCode::OK);
}

#[actix_web::test]
async fn test_unknown_route() {
    let (_, shared) = token_service();
    let app = test::init_service(create_app(shared, Environment::Development)).await;

    let req = test::TestRequest::get().uri("/nope").to_request();
    let (status, body) = send(&app, req).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Not found");
}
