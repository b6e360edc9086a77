//! Credential store trait.

use crate::error::Result;
use crate::state::TokenPair;

/// Durable storage for the one credential object.
///
/// The browser-localStorage analogue: a single token pair under a fixed key.
/// Absence or a parse failure reads as "logged out".
///
/// The remote client re-reads this store before every request, so a session
/// state transition is visible to the very next request once the store write
/// completes.
pub trait CredentialStore: Send + Sync {
    /// Load the persisted credential, if any.
    ///
    /// # Errors
    ///
    /// Returns error only for I/O failures; a missing or unparseable
    /// credential is `Ok(None)`.
    fn load(&self) -> impl std::future::Future<Output = Result<Option<TokenPair>>> + Send;

    /// Persist the credential, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns error if the credential cannot be written.
    fn save(&self, credential: &TokenPair) -> impl std::future::Future<Output = Result<()>> + Send;

    /// Remove the persisted credential.
    ///
    /// # Errors
    ///
    /// Returns error if removal fails for reasons other than absence.
    fn clear(&self) -> impl std::future::Future<Output = Result<()>> + Send;
}
