//! Session environment.
//!
//! Dependency injection for the session reducer.

use std::sync::Arc;

use taskhive_core::environment::Clock;

use crate::providers::{AuthApi, CredentialStore};

/// Session environment.
///
/// Contains all external dependencies needed by the session reducer.
///
/// # Type Parameters
///
/// - `A`: authentication API (the remote client in production)
/// - `C`: credential store (filesystem in production)
#[derive(Clone)]
pub struct SessionEnvironment<A, C>
where
    A: AuthApi + Clone,
    C: CredentialStore + Clone,
{
    /// Backend authentication endpoints.
    pub api: A,

    /// Durable credential storage.
    pub credentials: C,

    /// Clock for expiry checks.
    pub clock: Arc<dyn Clock>,
}

impl<A, C> SessionEnvironment<A, C>
where
    A: AuthApi + Clone,
    C: CredentialStore + Clone,
{
    /// Create a new session environment.
    #[must_use]
    pub fn new(api: A, credentials: C, clock: Arc<dyn Clock>) -> Self {
        Self {
            api,
            credentials,
            clock,
        }
    }
}
