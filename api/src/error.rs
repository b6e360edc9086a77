//! Error types for the remote client.

use thiserror::Error;

use taskhive_domain::DomainError;
use taskhive_session::SessionError;

/// Errors that can occur when talking to the backend.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The client could not be constructed.
    #[error("Invalid client configuration: {0}")]
    Configuration(String),

    /// The request did not complete.
    #[error("Request failed: {0}")]
    Network(String),

    /// The request hit the fixed client timeout.
    #[error("Request timed out")]
    Timeout,

    /// The credential was rejected, including after one refresh attempt.
    #[error("Unauthorized")]
    Unauthorized,

    /// The response body could not be decoded.
    #[error("Response decoding failed: {0}")]
    Decode(String),

    /// The backend rejected the request.
    #[error("API error (status {status}): {detail}")]
    Api {
        /// HTTP status code
        status: u16,
        /// The backend's `detail` body, or the raw body when not JSON
        detail: String,
    },

    /// The credential store failed to read or write.
    #[error("Credential storage error: {0}")]
    Credentials(String),
}

impl ApiError {
    /// Classify a transport-level failure.
    #[must_use]
    pub fn from_reqwest(error: &reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::Timeout
        } else {
            Self::Network(error.to_string())
        }
    }
}

impl From<ApiError> for SessionError {
    fn from(error: ApiError) -> Self {
        match error {
            ApiError::Unauthorized => Self::InvalidCredentials,
            ApiError::Api { status: 401, .. } => Self::InvalidCredentials,
            ApiError::Timeout => Self::Network("request timed out".to_string()),
            ApiError::Network(detail) => Self::Network(detail),
            ApiError::Api { status, detail } => Self::Rejected { status, detail },
            ApiError::Decode(detail) | ApiError::Configuration(detail) => Self::Network(detail),
            ApiError::Credentials(detail) => Self::Storage(detail),
        }
    }
}

impl From<ApiError> for DomainError {
    fn from(error: ApiError) -> Self {
        match error {
            ApiError::Unauthorized | ApiError::Api { status: 401, .. } => Self::Unauthorized,
            ApiError::Timeout => Self::Timeout,
            ApiError::Network(detail) => Self::Network(detail),
            ApiError::Api { status, detail } => Self::Rejected { status, detail },
            ApiError::Decode(detail)
            | ApiError::Configuration(detail)
            | ApiError::Credentials(detail) => Self::Network(detail),
        }
    }
}
