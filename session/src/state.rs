//! Session state types.
//!
//! All types are `Clone` to support the functional architecture pattern.

use serde::{Deserialize, Serialize};

// ═══════════════════════════════════════════════════════════════════════
// ID and role types
// ═══════════════════════════════════════════════════════════════════════

/// Unique identifier for a user, assigned by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UserId(pub i64);

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Role of a team member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Creates and administers tasks.
    Manager,
    /// Implements tasks.
    Developer,
    /// Verifies tasks.
    Tester,
}

impl Role {
    /// Get the role name as the backend spells it.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Manager => "manager",
            Self::Developer => "developer",
            Self::Tester => "tester",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Core state types
// ═══════════════════════════════════════════════════════════════════════

/// The authenticated identity, decoded from the access token's claims.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Backend user id.
    pub user_id: UserId,

    /// Display name (e.g. "Jane Developer").
    pub username: String,

    /// Role embedded in the token.
    pub role: Role,
}

/// The access/refresh token pair proving an authenticated session.
///
/// Both tokens are opaque to the client except for the claims embedded in
/// `access` (see [`crate::token`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    /// Short-lived access token with an embedded `exp` claim.
    pub access: String,

    /// Long-lived refresh token, exchanged on 401 by the remote client.
    pub refresh: String,
}

/// Root session state.
///
/// # Invariant
///
/// `identity` is `Some` iff `credential` holds a non-expired token pair. The
/// reducer sets and clears both together; the background expiry check tears
/// both down when the access token lapses.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    /// The authenticated identity, if logged in.
    pub identity: Option<Identity>,

    /// The held credential, if logged in.
    pub credential: Option<TokenPair>,

    /// Last user-visible error (invalid credentials, expired session, ...).
    pub last_error: Option<String>,

    /// Last user-visible notice (e.g. signup confirmation).
    pub last_notice: Option<String>,
}

impl SessionState {
    /// Whether a user is currently authenticated.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.identity.is_some()
    }
}
