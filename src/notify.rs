//! User-facing notification sink.
//!
//! The HTTP client reports every failed call here in addition to returning
//! the error, so a caller that ignores the error still leaves a visible trace.

/// How loudly a notification should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Warning,
    Error,
}

impl Severity {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

/// Fire-and-forget message sink. No acknowledgment, no failure mode.
pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str, severity: Severity);
}

/// Renders notifications as log events. Used when no UI is attached.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, message: &str, severity: Severity) {
        match severity {
            Severity::Info | Severity::Success => {
                tracing::info!(severity = severity.as_str(), "{message}");
            }
            Severity::Warning => tracing::warn!(severity = severity.as_str(), "{message}"),
            Severity::Error => tracing::error!(severity = severity.as_str(), "{message}"),
        }
    }
}
