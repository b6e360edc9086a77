//! Authentication API trait.

use crate::error::Result;
use crate::state::TokenPair;

/// Registration payload sent to the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignupRequest {
    /// Desired username.
    pub username: String,
    /// Contact email.
    pub email: String,
    /// Password.
    pub password: String,
    /// Password confirmation.
    pub password_confirm: String,
}

/// Backend authentication endpoints.
///
/// Implemented by the remote client; mocked for reducer and store tests.
pub trait AuthApi: Send + Sync {
    /// Exchange credentials for a token pair.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - Credentials are rejected → `SessionError::InvalidCredentials`
    /// - The request does not complete → `SessionError::Network`
    fn login(
        &self,
        username: &str,
        password: &str,
    ) -> impl std::future::Future<Output = Result<TokenPair>> + Send;

    /// Register a new account.
    ///
    /// Returns the backend's confirmation message. Signup does not log the
    /// user in.
    ///
    /// # Errors
    ///
    /// Returns error if the backend rejects the registration or the request
    /// does not complete.
    fn signup(
        &self,
        request: SignupRequest,
    ) -> impl std::future::Future<Output = Result<String>> + Send;
}
