//! Revocation backend and Redis configuration

use serde::{Deserialize, Serialize};

use super::ConfigError;

/// Where revoked tokens are kept
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RevocationBackend {
    /// Process-local set, lost on restart
    #[default]
    Memory,
    /// Redis keys with a TTL equal to the token's remaining lifetime
    Redis,
}

impl RevocationBackend {
    /// Get backend from the `REVOCATION_BACKEND` variable
    ///
    /// Unset means the in-memory backend; an unrecognised value is an error.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_setting(std::env::var("REVOCATION_BACKEND").ok().as_deref())
    }

    /// Parse an optional setting value, treating blank as unset
    pub fn from_setting(value: Option<&str>) -> Result<Self, ConfigError> {
        match value.map(str::trim) {
            None | Some("") => Ok(Self::default()),
            Some(v) => v
                .parse()
                .map_err(|e: String| ConfigError::new(format!("REVOCATION_BACKEND: {}", e))),
        }
    }
}

impl std::str::FromStr for RevocationBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "memory" | "in-memory" => Ok(RevocationBackend::Memory),
            "redis" => Ok(RevocationBackend::Redis),
            _ => Err(format!("Invalid revocation backend: {}", s)),
        }
    }
}

/// Redis cache configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    /// Redis connection URL
    pub url: String,

    /// Prefix prepended to every key
    #[serde(default = "default_key_prefix")]
    pub key_prefix: String,

    /// Connection timeout in seconds
    #[serde(default = "default_connection_timeout")]
    pub connection_timeout: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            url: String::from("redis://localhost:6379"),
            key_prefix: default_key_prefix(),
            connection_timeout: default_connection_timeout(),
        }
    }
}

impl CacheConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let url = std::env::var("REDIS_URL")
            .unwrap_or_else(|_| "redis://localhost:6379".to_string());
        let key_prefix = std::env::var("REDIS_KEY_PREFIX").unwrap_or_else(|_| default_key_prefix());

        Self {
            url,
            key_prefix,
            ..Default::default()
        }
    }

    /// Create a new cache configuration with URL
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    /// Build a namespaced key
    pub fn key(&self, suffix: &str) -> String {
        format!("{}{}", self.key_prefix, suffix)
    }
}

fn default_key_prefix() -> String {
    String::from("tokengate:")
}

fn default_connection_timeout() -> u64 {
    5
}
