//! Error types for domain store operations.

use thiserror::Error;

use crate::types::TaskId;

/// Result type alias for domain operations.
pub type Result<T> = std::result::Result<T, DomainError>;

/// Error taxonomy for the domain store.
///
/// None of these are fatal: every failure becomes a user-visible transient
/// notice and the store stays usable.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A referenced task is absent from the in-memory store.
    #[error("Task {0} not found")]
    TaskNotFound(TaskId),

    /// Required input is missing or malformed; nothing was sent.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// A request to the backend did not complete.
    #[error("Network error: {0}")]
    Network(String),

    /// The request hit the client timeout.
    #[error("Request timed out")]
    Timeout,

    /// The backend rejected the credential.
    #[error("Not authorized")]
    Unauthorized,

    /// The backend rejected the request.
    #[error("Request rejected ({status}): {detail}")]
    Rejected {
        /// HTTP status code
        status: u16,
        /// Error detail from the backend
        detail: String,
    },
}

impl DomainError {
    /// Returns `true` when the failure never left the client (validation or
    /// local lookup), i.e. no request was made.
    #[must_use]
    pub const fn is_local(&self) -> bool {
        matches!(self, Self::TaskNotFound(_) | Self::Validation(_))
    }
}
