//! Revocation registry trait defining the interface for invalidated tokens.

use async_trait::async_trait;

use crate::errors::DomainError;

/// Registry of tokens invalidated before their natural expiry
///
/// Entries are keyed by the raw token string and carry the token's own
/// `exp`, so a backend may forget them once that instant has passed: an
/// expired token is rejected by verification anyway.
///
/// Implementations must be safe to call concurrently from many request
/// handlers; `revoke` and `is_revoked` may race freely.
#[async_trait]
pub trait RevocationRegistry: Send + Sync {
    /// Mark a token as revoked
    ///
    /// Idempotent: revoking an already-revoked token keeps the existing entry
    /// and does not grow the registry.
    ///
    /// # Arguments
    /// * `token` - The raw token string
    /// * `expires_at` - When the token expires naturally (seconds since epoch)
    ///
    /// # Example
    /// ```no_run
    /// # use tg_core::repositories::RevocationRegistry;
    /// # async fn example(registry: &impl RevocationRegistry) -> Result<(), Box<dyn std::error::Error>> {
    /// registry.revoke("header.payload.signature", 1_700_003_600).await?;
    /// assert!(registry.is_revoked("header.payload.signature").await?);
    /// # Ok(())
    /// # }
    /// ```
    async fn revoke(&self, token: &str, expires_at: i64) -> Result<(), DomainError>;

    /// Exact membership test
    ///
    /// # Returns
    /// * `Ok(true)` - Token was revoked
    /// * `Ok(false)` - Token is unknown to the registry
    /// * `Err(DomainError)` - Backend failure
    async fn is_revoked(&self, token: &str) -> Result<bool, DomainError>;

    /// Remove entries whose token expired at or before `now`
    ///
    /// # Returns
    /// * `Ok(usize)` - Number of entries removed
    async fn purge_expired(&self, now: i64) -> Result<usize, DomainError>;

    /// Number of entries currently held
    async fn len(&self) -> Result<usize, DomainError>;

    /// Whether the registry holds no entries
    async fn is_empty(&self) -> Result<bool, DomainError> {
        Ok(self.len().await? == 0)
    }

    /// Whether the backing store is reachable
    ///
    /// In-process registries are always available.
    async fn health_check(&self) -> Result<(), DomainError> {
        Ok(())
    }
}
