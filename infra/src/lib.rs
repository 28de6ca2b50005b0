//! # Infrastructure Layer
//!
//! Concrete backends for the Tokengate core traits.
//!
//! ## Architecture
//!
//! - **Cache**: Redis client with connection retry and backoff
//! - **Revocation**: `RevocationRegistry` stored in Redis so every instance
//!   behind a load balancer sees the same revoked tokens

use tg_core::errors::DomainError;

/// Cache module - Redis client and operations
pub mod cache;

/// Revocation module - Redis-backed registry
pub mod revocation;

pub use cache::RedisClient;
pub use revocation::RedisRevocationRegistry;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Redis cache error
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<InfrastructureError> for DomainError {
    fn from(err: InfrastructureError) -> Self {
        DomainError::Storage {
            message: err.to_string(),
        }
    }
}
