//! Common utility functions

pub mod bearer;

pub use bearer::extract_bearer_token;
