//! Mock authentication API for testing.

use std::collections::VecDeque;
use std::future::Future;
use std::sync::{Arc, Mutex};

use crate::error::{Result, SessionError};
use crate::providers::{AuthApi, SignupRequest};
use crate::state::TokenPair;

/// Mock authentication API.
///
/// Results are queued per endpoint; an empty queue answers
/// [`SessionError::InvalidCredentials`] for login and a generic rejection for
/// signup. Recorded calls can be inspected by tests.
#[derive(Debug, Clone, Default)]
pub struct MockAuthApi {
    login_results: Arc<Mutex<VecDeque<Result<TokenPair>>>>,
    signup_results: Arc<Mutex<VecDeque<Result<String>>>>,
    login_calls: Arc<Mutex<Vec<(String, String)>>>,
}

impl MockAuthApi {
    /// Create a new mock with empty queues.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the next login result.
    pub fn queue_login(&self, result: Result<TokenPair>) {
        self.lock_poison_free(&self.login_results).push_back(result);
    }

    /// Queue the next signup result.
    pub fn queue_signup(&self, result: Result<String>) {
        self.lock_poison_free(&self.signup_results).push_back(result);
    }

    /// Usernames and passwords seen by `login`, in call order.
    #[must_use]
    pub fn login_calls(&self) -> Vec<(String, String)> {
        self.lock_poison_free(&self.login_calls).clone()
    }

    fn lock_poison_free<'a, T>(&self, mutex: &'a Mutex<T>) -> std::sync::MutexGuard<'a, T> {
        mutex.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl AuthApi for MockAuthApi {
    fn login(
        &self,
        username: &str,
        password: &str,
    ) -> impl Future<Output = Result<TokenPair>> + Send {
        let results = Arc::clone(&self.login_results);
        let calls = Arc::clone(&self.login_calls);
        let username = username.to_string();
        let password = password.to_string();

        async move {
            calls
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner)
                .push((username, password));

            results
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner)
                .pop_front()
                .unwrap_or(Err(SessionError::InvalidCredentials))
        }
    }

    fn signup(&self, _request: SignupRequest) -> impl Future<Output = Result<String>> + Send {
        let results = Arc::clone(&self.signup_results);

        async move {
            results
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner)
                .pop_front()
                .unwrap_or(Err(SessionError::Rejected {
                    status: 400,
                    detail: "no signup result queued".to_string(),
                }))
        }
    }
}
