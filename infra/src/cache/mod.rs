//! Cache module for Redis-based storage
//!
//! Connection handling with retry logic and the handful of key operations the
//! revocation registry needs.

pub mod redis_client;


pub use redis_client::RedisClient;

// Re-export commonly used types
pub use tg_shared::config::CacheConfig;
