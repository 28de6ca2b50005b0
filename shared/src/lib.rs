//! Shared utilities and common types for the Tokengate server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types
//! - The JSON error body returned by rejections
//! - Bearer header parsing

pub mod config;
pub mod errors;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, CacheConfig, ConfigError, Environment, JwtConfig, LoggingConfig,
    RevocationBackend, ServerConfig,
};
pub use errors::ErrorBody;
pub use utils::bearer::extract_bearer_token;
