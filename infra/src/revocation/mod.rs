//! Revocation registry backends

pub mod redis_registry;


pub use redis_registry::RedisRevocationRegistry;
