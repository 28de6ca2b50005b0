//! Redis implementation of RevocationRegistry
//!
//! Each revoked token becomes one key whose TTL is the token's remaining
//! lifetime, so Redis evicts entries on its own and every process sharing the
//! instance sees the same revocations.

use async_trait::async_trait;
use chrono::Utc;
use sha2::{Digest, Sha256};
use tracing::debug;

use tg_core::errors::DomainError;
use tg_core::repositories::RevocationRegistry;

use crate::cache::RedisClient;

const REVOKED_NAMESPACE: &str = "revoked:";

/// Revocation registry stored in Redis
///
/// Keys are `{prefix}revoked:{sha256(token)}`. Hashing keeps key length fixed
/// and keeps bearer credentials out of the keyspace.
#[derive(Clone)]
pub struct RedisRevocationRegistry {
    client: RedisClient,
    key_prefix: String,
}

impl RedisRevocationRegistry {
    /// Create a registry using the client's configured key prefix
    ///
    /// Lookups sit on the request path, so each command is tried once and a
    /// failure surfaces immediately.
    pub fn new(client: RedisClient) -> Self {
        let key_prefix = client.config().key_prefix.clone();
        Self {
            client: client.with_command_attempts(1),
            key_prefix,
        }
    }

    /// Underlying Redis client
    pub fn client(&self) -> &RedisClient {
        &self.client
    }

    /// Cache key holding the revocation of `token`
    pub fn key_for(&self, token: &str) -> String {
        revocation_key(&self.key_prefix, token)
    }
}

/// Build the namespaced key for a token
pub(crate) fn revocation_key(prefix: &str, token: &str) -> String {
    let digest = Sha256::digest(token.as_bytes());
    format!("{}{}{}", prefix, REVOKED_NAMESPACE, hex::encode(digest))
}

/// Seconds the entry must live; never less than one so the key is written
pub(crate) fn ttl_seconds(expires_at: i64, now: i64) -> u64 {
    (expires_at - now).max(1) as u64
}

#[async_trait]
impl RevocationRegistry for RedisRevocationRegistry {
    async fn revoke(&self, token: &str, expires_at: i64) -> Result<(), DomainError> {
        let key = self.key_for(token);
        let ttl = ttl_seconds(expires_at, Utc::now().timestamp());

        // NX keeps the first expiry on repeated revocation
        let written = self.client.set_nx_with_expiry(&key, "1", ttl).await?;
        if !written {
            debug!("Token already present in revocation registry");
        }
        Ok(())
    }

    async fn is_revoked(&self, token: &str) -> Result<bool, DomainError> {
        Ok(self.client.exists(&self.key_for(token)).await?)
    }

    async fn purge_expired(&self, _now: i64) -> Result<usize, DomainError> {
        // Redis drops keys when their TTL runs out
        Ok(0)
    }

    async fn len(&self) -> Result<usize, DomainError> {
        let pattern = format!("{}{}*", self.key_prefix, REVOKED_NAMESPACE);
        Ok(self.client.count_matching(&pattern).await?)
    }

    async fn health_check(&self) -> Result<(), DomainError> {
        if self.client.health_check().await? {
            Ok(())
        } else {
            Err(DomainError::Storage {
                message: "Redis did not answer PING".to_string(),
            })
        }
    }
}
