//! Integration tests for the Redis revocation registry
//!
//! These tests require a running Redis instance.
//! Run with: cargo test -p tg_infra --test redis_revocation_integration -- --ignored

use std::sync::Arc;

use chrono::Utc;
use tg_core::repositories::RevocationRegistry;
use tg_core::{IdentityInput, TokenService, TokenServiceConfig};
use tg_infra::cache::{CacheConfig, RedisClient};
use tg_infra::RedisRevocationRegistry;

async fn create_registry(prefix: &str) -> RedisRevocationRegistry {
    let mut config = CacheConfig::new(
        std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://localhost:6379".to_string()),
    );
    config.key_prefix = format!("tokengate:test:{}:{}:", prefix, Utc::now().timestamp_millis());

    let client = RedisClient::new(config)
        .await
        .expect("Failed to create Redis client");
    RedisRevocationRegistry::new(client)
}

#[tokio::test]
#[ignore] // Requires Redis server
async fn test_revoke_and_lookup() {
    let registry = create_registry("lookup").await;
    let expires_at = Utc::now().timestamp() + 60;

    assert!(!registry.is_revoked("a.b.c").await.unwrap());
    registry.revoke("a.b.c", expires_at).await.unwrap();

    assert!(registry.is_revoked("a.b.c").await.unwrap());
    assert!(!registry.is_revoked("a.b.d").await.unwrap());
}

#[tokio::test]
#[ignore] // Requires Redis server
async fn test_revoke_is_idempotent() {
    let registry = create_registry("idempotent").await;
    let expires_at = Utc::now().timestamp() + 60;

    registry.revoke("x.y.z", expires_at).await.unwrap();
    registry.revoke("x.y.z", expires_at).await.unwrap();

    assert_eq!(registry.len().await.unwrap(), 1);
}

#[tokio::test]
#[ignore] // Requires Redis server
async fn test_entry_expires_with_token() {
    let registry = create_registry("expiry").await;

    registry
        .revoke("short.lived.token", Utc::now().timestamp() + 1)
        .await
        .unwrap();
    assert!(registry.is_revoked("short.lived.token").await.unwrap());

    tokio::time::sleep(std::time::Duration::from_millis(2100)).await;

    assert!(!registry.is_revoked("short.lived.token").await.unwrap());
}

#[tokio::test]
#[ignore] // Requires Redis server
async fn test_token_service_over_redis() {
    let registry = Arc::new(create_registry("service").await);
    let service = TokenService::new(registry, TokenServiceConfig::new("integration-secret"))
        .expect("Failed to create token service");

    let token = service.issue(&IdentityInput::new("42")).unwrap();
    service.revoke(&token).await.unwrap();

    assert!(service.is_revoked(&token).await.unwrap());
    assert!(service.refresh(&token).await.is_err());
}

#[tokio::test]
#[ignore] // Requires Redis server
async fn test_registry_commands_are_not_retried() {
    let registry = create_registry("attempts").await;

    assert_eq!(registry.client().command_attempts(), 1);
    assert!(registry.health_check().await.is_ok());
}
