//! Error types for session operations.

use thiserror::Error;

/// Result type alias for session operations.
pub type Result<T> = std::result::Result<T, SessionError>;

/// Error taxonomy for authentication and session handling.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// Invalid credentials provided.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// The access token could not be decoded.
    #[error("Token could not be decoded: {reason}")]
    TokenInvalid {
        /// Reason for failure
        reason: String,
    },

    /// Session has expired.
    #[error("Session has expired")]
    SessionExpired,

    /// A request to the backend did not complete.
    #[error("Network error: {0}")]
    Network(String),

    /// The credential store failed to read or write.
    #[error("Credential storage error: {0}")]
    Storage(String),

    /// The backend rejected the request.
    #[error("Request rejected ({status}): {detail}")]
    Rejected {
        /// HTTP status code
        status: u16,
        /// Error detail from the backend
        detail: String,
    },
}

impl SessionError {
    /// Returns `true` if this error is due to invalid user input.
    #[must_use]
    pub const fn is_user_error(&self) -> bool {
        matches!(self, Self::InvalidCredentials | Self::Rejected { .. })
    }

    /// Returns `true` if this error means the held credential is unusable and
    /// the session must be torn down.
    #[must_use]
    pub const fn is_auth_failure(&self) -> bool {
        matches!(
            self,
            Self::InvalidCredentials | Self::SessionExpired | Self::TokenInvalid { .. }
        )
    }
}
