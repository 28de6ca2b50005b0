//! In-process implementation of RevocationRegistry

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::errors::DomainError;

use super::r#trait::RevocationRegistry;

/// Process-local revocation registry
///
/// Cloning yields another handle onto the same set. Contents are lost when
/// the process exits.
#[derive(Clone)]
pub struct InMemoryRevocationRegistry {
    /// Raw token -> natural expiry (seconds since epoch)
    entries: Arc<RwLock<HashMap<String, i64>>>,
}

impl InMemoryRevocationRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for InMemoryRevocationRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RevocationRegistry for InMemoryRevocationRegistry {
    async fn revoke(&self, token: &str, expires_at: i64) -> Result<(), DomainError> {
        let mut entries = self.entries.write().await;
        entries.entry(token.to_string()).or_insert(expires_at);
        Ok(())
    }

    async fn is_revoked(&self, token: &str) -> Result<bool, DomainError> {
        let entries = self.entries.read().await;
        Ok(entries.contains_key(token))
    }

    async fn purge_expired(&self, now: i64) -> Result<usize, DomainError> {
        let mut entries = self.entries.write().await;
        let initial_count = entries.len();

        entries.retain(|_, expires_at| *expires_at > now);

        Ok(initial_count - entries.len())
    }

    async fn len(&self) -> Result<usize, DomainError> {
        Ok(self.entries.read().await.len())
    }
}
