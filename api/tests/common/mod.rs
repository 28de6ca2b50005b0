//! Shared helpers for API integration tests

#![allow(dead_code)]

use std::sync::Arc;

use actix_web::{
    body::{to_bytes, BoxBody},
    dev::{Service, ServiceResponse},
    http::StatusCode,
};
use actix_http::Request;
use serde_json::Value;

use async_trait::async_trait;
use tg_api::middleware::auth::SharedTokenService;
use tg_core::{
    DomainError, InMemoryRevocationRegistry, RevocationRegistry, TokenService, TokenServiceConfig,
};

pub const TEST_SECRET: &str = "integration_test_secret_key";

pub type MemoryTokenService = TokenService<InMemoryRevocationRegistry>;

/// Token service over a fresh in-memory registry, plus its type-erased handle
pub fn token_service() -> (Arc<MemoryTokenService>, SharedTokenService) {
    let service = Arc::new(
        TokenService::new(
            Arc::new(InMemoryRevocationRegistry::new()),
            TokenServiceConfig::new(TEST_SECRET),
        )
        .expect("Failed to create token service"),
    );
    let shared: SharedTokenService = service.clone();
    (service, shared)
}

/// Registry whose store cannot be reached
pub struct UnreachableRegistry;

fn unreachable_store() -> DomainError {
    DomainError::Storage {
        message: "connection refused".to_string(),
    }
}

#[async_trait]
impl RevocationRegistry for UnreachableRegistry {
    async fn revoke(&self, _token: &str, _expires_at: i64) -> Result<(), DomainError> {
        Err(unreachable_store())
    }

    async fn is_revoked(&self, _token: &str) -> Result<bool, DomainError> {
        Err(unreachable_store())
    }

    async fn purge_expired(&self, _now: i64) -> Result<usize, DomainError> {
        Err(unreachable_store())
    }

    async fn len(&self) -> Result<usize, DomainError> {
        Err(unreachable_store())
    }

    async fn health_check(&self) -> Result<(), DomainError> {
        Err(unreachable_store())
    }
}

/// Token service whose revocation store is down
pub fn unreachable_token_service() -> SharedTokenService {
    Arc::new(
        TokenService::new(Arc::new(UnreachableRegistry), TokenServiceConfig::new(TEST_SECRET))
            .expect("Failed to create token service"),
    )
}

/// Call the app and render its outcome, including errors raised by middleware
pub async fn send<S>(app: &S, req: Request) -> (StatusCode, Value)
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error>,
{
    let response = match app.call(req).await {
        Ok(response) => response.into_parts().1,
        Err(err) => err.error_response(),
    };

    let status = response.status();
    let bytes = to_bytes(response.into_body()).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };

    (status, body)
}

pub fn bearer(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {}", token))
}
