//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical areas:
//! - `auth` - Token signing and lifetime configuration
//! - `cache` - Revocation backend and Redis configuration
//! - `environment` - Environment detection and logging configuration
//! - `server` - HTTP server configuration

pub mod auth;
pub mod cache;
pub mod environment;
pub mod server;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// Re-export commonly used types
pub use auth::JwtConfig;
pub use cache::{CacheConfig, RevocationBackend};
pub use environment::{Environment, LoggingConfig};
pub use server::ServerConfig;

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Server configuration
    pub server: ServerConfig,

    /// Token configuration
    pub jwt: JwtConfig,

    /// Revocation registry backend
    #[serde(default)]
    pub revocation_backend: RevocationBackend,

    /// Redis configuration (used by the `redis` revocation backend)
    #[serde(default)]
    pub cache: CacheConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        let env = Environment::default();
        Self {
            environment: env,
            server: ServerConfig::default(),
            jwt: JwtConfig::default(),
            revocation_backend: RevocationBackend::default(),
            cache: CacheConfig::default(),
            logging: LoggingConfig::for_environment(env),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// Fails only on a value that cannot be interpreted at all; range checks
    /// are left to [`AppConfig::validate`].
    pub fn from_env() -> Result<Self, ConfigError> {
        let environment = Environment::from_env();
        let mut logging = LoggingConfig::for_environment(environment);
        if let Ok(level) = std::env::var("LOG_LEVEL") {
            logging.level = level;
        }

        Ok(Self {
            environment,
            server: ServerConfig::from_env(),
            jwt: JwtConfig::from_env(),
            revocation_backend: RevocationBackend::from_env()?,
            cache: CacheConfig::from_env(),
            logging,
        })
    }

    /// Validate the configuration
    ///
    /// A production deployment must not run with the built-in secret.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.jwt.validate()?;
        if self.environment.is_production() && self.jwt.is_using_default_secret() {
            return Err(ConfigError::new(
                "JWT_SECRET must be set in production",
            ));
        }
        if self.server.port == 0 {
            return Err(ConfigError::new("SERVER_PORT must be non-zero"));
        }
        Ok(())
    }
}

/// Invalid configuration value
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid configuration: {message}")]
pub struct ConfigError {
    pub message: String,
}

impl ConfigError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.revocation_backend, RevocationBackend::Memory);
    }

    #[test]
    fn test_production_rejects_default_secret() {
        let config = AppConfig {
            environment: Environment::Production,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.message.contains("JWT_SECRET"));
    }

    #[test]
    fn test_production_accepts_custom_secret() {
        let config = AppConfig {
            environment: Environment::Production,
            jwt: JwtConfig::new("a-real-production-secret"),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::new("SERVER_PORT must be non-zero");
        assert_eq!(err.to_string(), "Invalid configuration: SERVER_PORT must be non-zero");
    }

    #[test]
    fn test_zero_port_rejected() {
        let mut config = AppConfig::default();
        config.server.port = 0;
        assert!(config.validate().is_err());
    }
}
