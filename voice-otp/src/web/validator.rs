//! Okta hook request validation.
//!
//! Okta can be configured to send a fixed `Authorization` header with each
//! inline hook call. This is a shared-secret check, not a signature scheme:
//! when either side is missing the request is let through.

use axum::http::{header::AUTHORIZATION, HeaderMap};
use tracing::warn;

/// Validate an inbound hook against the configured shared secret.
///
/// Returns `false` only when a secret is configured, an `Authorization`
/// header is present, and the header is not exactly `Bearer <secret>`.
pub fn validate_okta_request(headers: &HeaderMap, okta_secret: Option<&str>) -> bool {
    let secret = okta_secret.filter(|s| !s.is_empty());
    let auth_header = headers.get(AUTHORIZATION);

    match (auth_header, secret) {
        (Some(provided), Some(secret)) => {
            let expected = format!("Bearer {}", secret);
            let valid = provided
                .to_str()
                .map(|v| constant_time_compare(v, &expected))
                .unwrap_or(false);

            if !valid {
                warn!("okta_auth_header_mismatch");
            }
            valid
        }
        (None, Some(_)) => {
            warn!("okta_auth_header_missing");
            true
        }
        (_, None) => true,
    }
}

/// Constant-time string comparison.
///
/// The header carries the shared secret itself, so the comparison must not
/// stop at the first differing byte and reveal how much of a guess matched.
fn constant_time_compare(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut result = 0u8;
    for (x, y) in a.bytes().zip(b.bytes()) {
        result |= x ^ y;
    }
    result == 0
}
