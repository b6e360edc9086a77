//! Testing utilities for TaskHive stores.
//!
//! Provides the [`ReducerTest`] Given-When-Then harness, effect assertions and
//! a tracing initializer for integration tests.


pub use reducer_test::{ReducerTest, assertions};

use std::sync::Once;

static INIT: Once = Once::new();

/// Initialize tracing for tests.
///
/// Respects `RUST_LOG`; defaults to `warn`. Safe to call from every test -
/// only the first call installs the subscriber.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    });
}
