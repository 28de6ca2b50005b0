//! Configuration for the token service

use std::str::FromStr;

use jsonwebtoken::Algorithm;
use tg_shared::config::JwtConfig;

use crate::errors::DomainError;

/// Configuration for the token service
#[derive(Debug, Clone)]
pub struct TokenServiceConfig {
    /// Symmetric signing key
    pub secret: String,
    /// JWT signing algorithm (HMAC family only)
    pub algorithm: Algorithm,
    /// Token lifetime in seconds
    pub token_lifetime_seconds: i64,
}

impl Default for TokenServiceConfig {
    fn default() -> Self {
        Self {
            secret: tg_shared::config::auth::DEFAULT_SECRET.to_string(),
            algorithm: Algorithm::HS256,
            token_lifetime_seconds: 3600,
        }
    }
}

impl TokenServiceConfig {
    /// Creates a configuration with the given secret and default algorithm and lifetime
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Default::default()
        }
    }

    pub fn with_lifetime(mut self, seconds: i64) -> Self {
        self.token_lifetime_seconds = seconds;
        self
    }

    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Builds the service configuration from loaded application settings
    pub fn from_jwt_config(config: &JwtConfig) -> Result<Self, DomainError> {
        let algorithm = Algorithm::from_str(&config.algorithm).map_err(|_| DomainError::Config {
            message: format!("Unsupported signing algorithm: {}", config.algorithm),
        })?;

        Ok(Self {
            secret: config.secret.clone(),
            algorithm,
            token_lifetime_seconds: config.token_lifetime,
        })
    }

    /// Whether the algorithm is one of the symmetric HMAC variants
    pub fn is_symmetric(&self) -> bool {
        matches!(
            self.algorithm,
            Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512
        )
    }
}
