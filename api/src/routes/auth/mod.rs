//! Authentication route handlers
//!
//! - Token issuance (development environments only)
//! - Token refresh
//! - Logout

pub mod issue;
pub mod logout;
pub mod refresh;

pub use issue::issue_token;
pub use logout::logout;
pub use refresh::refresh_token;
