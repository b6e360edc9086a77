//! Domain environment.
//!
//! Dependency injection for the domain reducer.

use std::sync::Arc;

use taskhive_core::environment::Clock;

use crate::providers::TaskApi;

/// Domain environment.
///
/// # Type Parameters
///
/// - `T`: task API (the remote client in production)
#[derive(Clone)]
pub struct DomainEnvironment<T>
where
    T: TaskApi + Clone,
{
    /// Backend task endpoints.
    pub api: T,

    /// Clock for notification timestamps.
    pub clock: Arc<dyn Clock>,
}

impl<T> DomainEnvironment<T>
where
    T: TaskApi + Clone,
{
    /// Create a new domain environment.
    #[must_use]
    pub fn new(api: T, clock: Arc<dyn Clock>) -> Self {
        Self { api, clock }
    }
}
