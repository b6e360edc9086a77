//! Background expiry check.
//!
//! The session store re-validates the held access token on an interval
//! (10 minutes by default). The watcher only *sends* - the reducer decides
//! whether anything is expired and tears the session down if so.

use std::future::Future;
use std::time::Duration;

use tokio::sync::watch;

/// Default period between expiry checks.
pub const DEFAULT_CHECK_PERIOD: Duration = Duration::from_secs(600);

/// Handle for the periodic expiry check task.
///
/// The task stops when [`ExpiryWatcher::stop`] is called and is aborted when
/// the handle is dropped, so a torn-down session store never leaks its timer.
#[derive(Debug)]
pub struct ExpiryWatcher {
    handle: tokio::task::JoinHandle<()>,
    stop: watch::Sender<bool>,
}

impl ExpiryWatcher {
    /// Spawn a watcher invoking `tick` every `period`.
    ///
    /// `tick` is expected to send [`crate::SessionAction::CheckExpiry`] into
    /// the session store:
    ///
    /// ```ignore
    /// let store_for_watcher = store.clone();
    /// let watcher = ExpiryWatcher::spawn(DEFAULT_CHECK_PERIOD, move || {
    ///     let store = store_for_watcher.clone();
    ///     async move {
    ///         let _ = store.send(SessionAction::CheckExpiry).await;
    ///     }
    /// });
    /// ```
    pub fn spawn<F, Fut>(period: Duration, tick: F) -> Self
    where
        F: Fn() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send,
    {
        let (stop, mut stopped) = watch::channel(false);

        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
            // The first tick of a tokio interval fires immediately; consume it
            // so the first check happens one full period after spawn.
            interval.tick().await;

            loop {
                tokio::select! {
                    _ = interval.tick() => {
                        tracing::debug!("Running periodic expiry check");
                        tick().await;
                    },
                    changed = stopped.changed() => {
                        if changed.is_err() || *stopped.borrow() {
                            tracing::debug!("Expiry watcher stopped");
                            break;
                        }
                    },
                }
            }
        });

        Self { handle, stop }
    }

    /// Spawn a watcher with the default 10-minute period.
    pub fn with_default_period<F, Fut>(tick: F) -> Self
    where
        F: Fn() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send,
    {
        Self::spawn(DEFAULT_CHECK_PERIOD, tick)
    }

    /// Stop the watcher. The task exits before its next tick.
    pub fn stop(&self) {
        let _ = self.stop.send(true);
    }
}

impl Drop for ExpiryWatcher {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
