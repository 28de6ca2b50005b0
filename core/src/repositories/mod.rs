pub mod revocation;

pub use revocation::{InMemoryRevocationRegistry, RevocationRegistry};
