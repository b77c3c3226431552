//! Forced full-page navigation, scheduled after session expiry.
//!
//! DESIGN
//! ======
//! The HTTP client does not navigate inline: it schedules a task that sleeps
//! for [`SESSION_EXPIRED_REDIRECT_DELAY`] and then hands the entry path to the
//! [`Navigator`]. The delay gives the "session expired" notification time to
//! be seen. Each schedule produces one [`ScheduledRedirect`] that can be
//! cancelled or awaited; tests drive the timer with tokio's paused clock.

#[cfg(test)]
#[path = "navigate_test.rs"]
mod navigate_test;

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;

pub const SESSION_EXPIRED_REDIRECT_DELAY: Duration = Duration::from_millis(1000);

/// Performs a full navigation, the equivalent of assigning the browser
/// location. Not guarded; the target is always the public entry route.
pub trait Navigator: Send + Sync {
    fn navigate(&self, path: &str);
}

/// Logs the navigation instead of performing it. Used by the CLI.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNavigator;

impl Navigator for LogNavigator {
    fn navigate(&self, path: &str) {
        tracing::info!(path, "forced navigation");
    }
}

/// Schedules delayed navigations to a fixed target.
#[derive(Clone)]
pub struct RedirectScheduler {
    navigator: Arc<dyn Navigator>,
    target: String,
    delay: Duration,
}

impl RedirectScheduler {
    #[must_use]
    pub fn new(navigator: Arc<dyn Navigator>, target: impl Into<String>) -> Self {
        Self { navigator, target: target.into(), delay: SESSION_EXPIRED_REDIRECT_DELAY }
    }

    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    #[must_use]
    pub fn target(&self) -> &str {
        &self.target
    }

    #[must_use]
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Spawn one delayed navigation. Must be called inside a tokio runtime.
    #[must_use = "dropping the handle detaches the redirect; keep it to cancel or await"]
    pub fn schedule(&self) -> ScheduledRedirect {
        let navigator = Arc::clone(&self.navigator);
        let target = self.target.clone();
        let delay = self.delay;
        tracing::info!(path = %target, delay_ms = delay.as_millis(), "redirect scheduled");
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            navigator.navigate(&target);
        });
        ScheduledRedirect { handle }
    }
}

/// Handle to one pending redirect.
#[derive(Debug)]
pub struct ScheduledRedirect {
    handle: JoinHandle<()>,
}

impl ScheduledRedirect {
    /// Abort the redirect if it has not fired yet.
    pub fn cancel(&self) {
        self.handle.abort();
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Wait until the redirect has fired or been cancelled.
    pub async fn wait(self) {
        if let Err(err) = self.handle.await {
            if !err.is_cancelled() {
                tracing::warn!(error = %err, "redirect task failed");
            }
        }
    }
}
