pub mod auth;

pub use auth::{IssueTokenRequest, LogoutResponse, TokenResponse};
