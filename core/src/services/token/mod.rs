//! Token service module for JWT management
//!
//! This module handles all token-related operations including:
//! - JWT issuance and verification
//! - Token refresh
//! - Token revocation and background purging of expired revocations

mod cleanup;
mod config;
mod service;


pub use cleanup::{CleanupResult, RevocationCleanupConfig, RevocationCleanupService};
pub use config::TokenServiceConfig;
pub use service::TokenService;
