//! Domain entities representing token payloads and authenticated identities.

pub mod token;

// Re-export commonly used types
pub use token::{Claims, IdentityContext, IdentityInput};
