//! Access-token claim decoding.
//!
//! The client never verifies token signatures - it only reads the claims the
//! backend embedded in the access token (identity and expiry), the same way a
//! browser client runs `jwtDecode`. Verification is the backend's job; every
//! protected endpoint rejects a bad signature anyway.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::error::{Result, SessionError};
use crate::state::{Identity, Role, UserId};

/// Claims embedded in the access token payload.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Claims {
    /// Backend user id.
    pub user_id: i64,

    /// Display name.
    pub username: String,

    /// Team role.
    pub role: Role,

    /// Expiry, seconds since the Unix epoch.
    pub exp: i64,
}

impl Claims {
    /// The identity these claims describe.
    #[must_use]
    pub fn identity(&self) -> Identity {
        Identity {
            user_id: UserId(self.user_id),
            username: self.username.clone(),
            role: self.role,
        }
    }
}

/// Decode the claims of a JWT-shaped token without verifying its signature.
///
/// # Errors
///
/// Returns [`SessionError::TokenInvalid`] when the token is not dot-separated,
/// the payload is not base64url, or the claims are missing/malformed.
pub fn decode_claims(token: &str) -> Result<Claims> {
    let payload = token
        .split('.')
        .nth(1)
        .ok_or_else(|| SessionError::TokenInvalid {
            reason: "not a dot-separated token".to_string(),
        })?;

    let bytes = URL_SAFE_NO_PAD
        .decode(payload)
        .map_err(|e| SessionError::TokenInvalid {
            reason: format!("payload is not base64url: {e}"),
        })?;

    serde_json::from_slice(&bytes).map_err(|e| SessionError::TokenInvalid {
        reason: format!("malformed claims: {e}"),
    })
}

/// Pure expiry check against the given instant.
///
/// A token whose `exp` claim is at or before `now` is expired. A token that
/// cannot be decoded is treated as expired (fail-safe).
#[must_use]
pub fn is_expired(token: &str, now: DateTime<Utc>) -> bool {
    match decode_claims(token) {
        Ok(claims) => claims.exp <= now.timestamp(),
        Err(_) => true,
    }
}
