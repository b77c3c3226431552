//! Errors returned to callers of the HTTP client.

use super::classify::Classification;

/// Failure taxonomy. Decides what is displayed and whether the session is
/// torn down; never changes the fact that the call failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Status 401.
    AuthExpired,
    /// Status 404.
    NotFound,
    /// Any other non-2xx status, timeout, network or payload failure.
    RequestFailed,
}

impl ErrorKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::AuthExpired => "auth_expired",
            Self::NotFound => "not_found",
            Self::RequestFailed => "request_failed",
        }
    }
}

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum HttpError {
    #[error("authentication expired")]
    AuthExpired,

    #[error("not found: {message}")]
    NotFound { message: String },

    /// `status` is `None` when no response was received.
    #[error("request failed: {message}")]
    RequestFailed { status: Option<u16>, message: String },
}

impl HttpError {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::AuthExpired => ErrorKind::AuthExpired,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::RequestFailed { .. } => ErrorKind::RequestFailed,
        }
    }

    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::AuthExpired => Some(401),
            Self::NotFound { .. } => Some(404),
            Self::RequestFailed { status, .. } => *status,
        }
    }

    pub(crate) fn from_classification(classification: Classification, status: Option<u16>) -> Self {
        match classification.kind {
            ErrorKind::AuthExpired => Self::AuthExpired,
            ErrorKind::NotFound => Self::NotFound { message: classification.message },
            ErrorKind::RequestFailed => Self::RequestFailed { status, message: classification.reason },
        }
    }
}
