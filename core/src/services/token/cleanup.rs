//! Revocation cleanup service for periodic eviction of expired entries
//!
//! A revoked token only needs to be remembered until it would have expired on
//! its own. This service purges entries past that point so the registry does
//! not grow without bound.

use std::sync::Arc;

use chrono::Utc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::errors::DomainError;
use crate::repositories::RevocationRegistry;

/// Configuration for the revocation cleanup service
#[derive(Debug, Clone)]
pub struct RevocationCleanupConfig {
    /// How often to run cleanup (in seconds)
    pub interval_seconds: u64,
    /// Whether to enable automatic cleanup
    pub enabled: bool,
}

impl Default for RevocationCleanupConfig {
    fn default() -> Self {
        Self {
            interval_seconds: 300, // Run every 5 minutes
            enabled: true,
        }
    }
}

/// Service purging expired entries from a revocation registry
pub struct RevocationCleanupService<R: RevocationRegistry + 'static> {
    registry: Arc<R>,
    config: RevocationCleanupConfig,
}

impl<R: RevocationRegistry + 'static> RevocationCleanupService<R> {
    /// Create a new cleanup service
    pub fn new(registry: Arc<R>, config: RevocationCleanupConfig) -> Self {
        Self { registry, config }
    }

    /// Run a single cleanup cycle
    ///
    /// # Returns
    /// * `Ok(CleanupResult)` - Summary of the cycle; backend failures are
    ///   collected in `errors` rather than aborting
    pub async fn run_cleanup(&self) -> Result<CleanupResult, DomainError> {
        if !self.config.enabled {
            return Ok(CleanupResult::default());
        }

        debug!("Starting revocation cleanup cycle");

        let mut result = CleanupResult::default();
        let now = Utc::now().timestamp();

        match self.registry.purge_expired(now).await {
            Ok(count) => {
                result.purged = count;
                if count > 0 {
                    info!("Purged {} expired revocation entries", count);
                }
            }
            Err(e) => {
                error!("Failed to purge revocation entries: {}", e);
                result.errors.push(format!("Purge error: {}", e));
            }
        }

        Ok(result)
    }

    /// Start the cleanup service as a background task
    ///
    /// Spawns a tokio task that runs cleanup at regular intervals. Returns
    /// `None` without spawning when cleanup is disabled.
    pub fn start_background_task(self: Arc<Self>) -> Option<JoinHandle<()>> {
        if !self.config.enabled {
            warn!("Revocation cleanup service is disabled");
            return None;
        }

        let interval = std::time::Duration::from_secs(self.config.interval_seconds.max(1));

        Some(tokio::spawn(async move {
            info!(
                "Revocation cleanup service started - will run every {} seconds",
                self.config.interval_seconds
            );

            let mut interval_timer = tokio::time::interval(interval);

            loop {
                interval_timer.tick().await;

                match self.run_cleanup().await {
                    Ok(result) => {
                        if !result.errors.is_empty() {
                            warn!("Cleanup completed with errors: {:?}", result.errors);
                        }
                    }
                    Err(e) => {
                        error!("Revocation cleanup cycle failed: {}", e);
                    }
                }
            }
        }))
    }
}

/// Result of a cleanup operation
#[derive(Debug, Default)]
pub struct CleanupResult {
    /// Number of expired revocation entries removed
    pub purged: usize,
    /// Any errors encountered during cleanup
    pub errors: Vec<String>,
}

impl CleanupResult {
    /// Check if the cleanup was successful (no errors)
    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }
}
