//! Mock credential store for testing.

use std::future::Future;
use std::sync::{Arc, Mutex};

use crate::error::{Result, SessionError};
use crate::providers::CredentialStore;
use crate::state::TokenPair;

/// Mock credential store.
///
/// Uses in-memory storage; can be configured to fail writes.
#[derive(Debug, Clone, Default)]
pub struct MockCredentialStore {
    stored: Arc<Mutex<Option<TokenPair>>>,
    fail_writes: Arc<Mutex<bool>>,
}

impl MockCredentialStore {
    /// Create a new empty mock store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock store pre-loaded with a credential.
    #[must_use]
    pub fn with_credential(credential: TokenPair) -> Self {
        let store = Self::default();
        *store.lock(&store.stored) = Some(credential);
        store
    }

    /// Make subsequent `save`/`clear` calls fail.
    pub fn fail_writes(&self) {
        *self.lock(&self.fail_writes) = true;
    }

    /// The currently stored credential (for assertions).
    #[must_use]
    pub fn stored(&self) -> Option<TokenPair> {
        self.lock(&self.stored).clone()
    }

    fn lock<'a, T>(&self, mutex: &'a Mutex<T>) -> std::sync::MutexGuard<'a, T> {
        mutex.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl CredentialStore for MockCredentialStore {
    fn load(&self) -> impl Future<Output = Result<Option<TokenPair>>> + Send {
        let stored = Arc::clone(&self.stored);

        async move {
            Ok(stored
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner)
                .clone())
        }
    }

    fn save(&self, credential: &TokenPair) -> impl Future<Output = Result<()>> + Send {
        let stored = Arc::clone(&self.stored);
        let fail = Arc::clone(&self.fail_writes);
        let credential = credential.clone();

        async move {
            if *fail.lock().unwrap_or_else(std::sync::PoisonError::into_inner) {
                return Err(SessionError::Storage("write disabled".to_string()));
            }

            *stored
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner) = Some(credential);
            Ok(())
        }
    }

    fn clear(&self) -> impl Future<Output = Result<()>> + Send {
        let stored = Arc::clone(&self.stored);
        let fail = Arc::clone(&self.fail_writes);

        async move {
            if *fail.lock().unwrap_or_else(std::sync::PoisonError::into_inner) {
                return Err(SessionError::Storage("write disabled".to_string()));
            }

            *stored
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner) = None;
            Ok(())
        }
    }
}
