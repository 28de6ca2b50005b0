//! Token signing configuration

use serde::{Deserialize, Serialize};

use super::ConfigError;

/// Secret used when none is configured. Fine for local development only.
pub const DEFAULT_SECRET: &str = "your-super-secret-key";

/// Upper bound on token lifetime (ten years)
pub const MAX_TOKEN_LIFETIME_SECONDS: i64 = 10 * 365 * 24 * 60 * 60;

/// JWT configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// Symmetric key for signing tokens
    pub secret: String,

    /// Algorithm for JWT signing (default: HS256)
    #[serde(default = "default_algorithm")]
    pub algorithm: String,

    /// Token lifetime in seconds
    #[serde(default = "default_token_lifetime")]
    pub token_lifetime: i64,

    /// How often expired revocation entries are purged, in seconds
    #[serde(default = "default_cleanup_interval")]
    pub cleanup_interval: u64,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: String::from(DEFAULT_SECRET),
            algorithm: default_algorithm(),
            token_lifetime: default_token_lifetime(),
            cleanup_interval: default_cleanup_interval(),
        }
    }
}

impl JwtConfig {
    /// Create a new JWT configuration with secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Default::default()
        }
    }

    /// Create from environment variables
    pub fn from_env() -> Self {
        let secret = std::env::var("JWT_SECRET").unwrap_or_else(|_| DEFAULT_SECRET.to_string());
        let algorithm = std::env::var("JWT_ALGORITHM").unwrap_or_else(|_| default_algorithm());
        let token_lifetime = std::env::var("JWT_TOKEN_LIFETIME")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_token_lifetime);
        let cleanup_interval = std::env::var("JWT_CLEANUP_INTERVAL")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_cleanup_interval);

        Self {
            secret,
            algorithm,
            token_lifetime,
            cleanup_interval,
        }
    }

    /// Set token lifetime in seconds
    pub fn with_token_lifetime(mut self, seconds: i64) -> Self {
        self.token_lifetime = seconds;
        self
    }

    /// Set signing algorithm
    pub fn with_algorithm(mut self, algorithm: impl Into<String>) -> Self {
        self.algorithm = algorithm.into();
        self
    }

    /// Check if using default secret (security warning)
    pub fn is_using_default_secret(&self) -> bool {
        self.secret == DEFAULT_SECRET
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.secret.is_empty() {
            return Err(ConfigError::new("JWT secret must not be empty"));
        }
        if self.token_lifetime <= 0 {
            return Err(ConfigError::new("JWT token lifetime must be positive"));
        }
        if self.token_lifetime > MAX_TOKEN_LIFETIME_SECONDS {
            return Err(ConfigError::new(format!(
                "JWT token lifetime must not exceed {} seconds",
                MAX_TOKEN_LIFETIME_SECONDS
            )));
        }
        if self.cleanup_interval == 0 {
            return Err(ConfigError::new("JWT cleanup interval must be positive"));
        }
        Ok(())
    }
}

fn default_algorithm() -> String {
    String::from("HS256")
}

fn default_token_lifetime() -> i64 {
    3600 // 1 hour
}

fn default_cleanup_interval() -> u64 {
    300 // 5 minutes
}
