//! Bearer credential parsing

use once_cell::sync::Lazy;
use regex::Regex;

// Scheme, at least one whitespace, then the credential up to the next whitespace
static BEARER_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^Bearer\s+(\S+)").expect("bearer pattern is valid"));

/// Extract the token from an `Authorization` header value
///
/// Returns `None` when the header is absent, uses another scheme, or carries
/// no credential after `Bearer`.
pub fn extract_bearer_token(header: Option<&str>) -> Option<&str> {
    let header = header?.trim_start();
    BEARER_REGEX
        .captures(header)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_token() {
        assert_eq!(extract_bearer_token(Some("Bearer abc.def.ghi")), Some("abc.def.ghi"));
        assert_eq!(extract_bearer_token(Some("  Bearer   abc")), Some("abc"));
        assert_eq!(extract_bearer_token(Some("Bearer abc trailing")), Some("abc"));
    }

    #[test]
    fn test_rejects_malformed_headers() {
        assert_eq!(extract_bearer_token(None), None);
        assert_eq!(extract_bearer_token(Some("")), None);
        assert_eq!(extract_bearer_token(Some("Bearer")), None);
        assert_eq!(extract_bearer_token(Some("Bearer ")), None);
        assert_eq!(extract_bearer_token(Some("Basic dXNlcjpwYXNz")), None);
        assert_eq!(extract_bearer_token(Some("abc.def.ghi")), None);
        assert_eq!(extract_bearer_token(Some("bearer abc")), None);
        assert_eq!(extract_bearer_token(Some("Token Bearer abc")), None);
    }
}
