//! Bearer Credential Extraction
//!
//! Pulls an RFC 6750 bearer token out of the `Authorization` header.

use axum::http::{HeaderMap, header};

const BEARER_SCHEME: &str = "Bearer";

/// Extract the bearer token from request headers
///
/// The scheme is matched case-insensitively; surrounding whitespace around
/// the token is ignored. Returns `None` for a missing header, a different
/// scheme, or an empty token.
pub fn extract_bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.trim().split_once(' ')?;

    if !scheme.eq_ignore_ascii_case(BEARER_SCHEME) {
        return None;
    }

    let token = token.trim();
    if token.is_empty() {
        return None;
    }

    Some(token.to_string())
}
