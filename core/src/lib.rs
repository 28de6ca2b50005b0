//! # Tokengate Core
//!
//! Token lifecycle and revocation logic for the Tokengate authentication layer.
//! This crate contains the claim entities, the token service, the revocation
//! registry interface and the error taxonomy shared by the API and
//! infrastructure crates.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::entities::token::{Claims, IdentityContext, IdentityInput};
pub use errors::{DomainError, TokenError};
pub use repositories::{InMemoryRevocationRegistry, RevocationRegistry};
pub use services::token::{
    CleanupResult, RevocationCleanupConfig, RevocationCleanupService, TokenService,
    TokenServiceConfig,
};
