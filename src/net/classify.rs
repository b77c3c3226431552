//! Classification stage: failed call → error kind + display message.
//!
//! DESIGN
//! ======
//! Pure over its input. Precedence is fixed: 401 first, then 404, then
//! everything else. The server's `detail` is used opportunistically; a body
//! without one (or without JSON at all) degrades to the generic messages.
//!
//! 401 always shows the session-expired message, whatever the server said.

#[cfg(test)]
#[path = "classify_test.rs"]
mod classify_test;

use super::error::ErrorKind;
use super::transport::TransportError;
use super::types::detail_message;

pub const SESSION_EXPIRED_MESSAGE: &str = "Session expired, please log in again";
pub const NOT_FOUND_MESSAGE: &str = "Resource not found";
pub const REQUEST_FAILED_MESSAGE: &str = "Request failed";

/// Everything that can make a call fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Failure {
    /// A response arrived with a non-2xx status.
    Status { status: u16, body: Vec<u8> },
    /// No response: timeout, connection failure, unreadable body.
    Transport(TransportError),
    /// The request body could not be encoded, or a 2xx payload could not be
    /// decoded into the caller's type.
    Payload { status: Option<u16>, reason: String },
}

impl Failure {
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport(_) => None,
            Self::Payload { status, .. } => *status,
        }
    }

    /// What the transport layer itself reports, when it has something more
    /// specific than the generic message.
    #[must_use]
    pub fn transport_message(&self) -> Option<String> {
        match self {
            Self::Status { status, .. } => Some(format!("Request failed with status code {status}")),
            Self::Transport(_) => None,
            Self::Payload { reason, .. } => Some(reason.clone()),
        }
    }

    fn detail(&self) -> Option<String> {
        match self {
            Self::Status { body, .. } => detail_message(body),
            Self::Transport(_) | Self::Payload { .. } => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub kind: ErrorKind,
    /// Shown to the user.
    pub message: String,
    /// Handed to the caller and the log; keeps the transport cause that the
    /// user-facing message may hide.
    pub reason: String,
}

#[must_use]
pub fn classify(failure: &Failure) -> Classification {
    let (kind, message) = match failure.status() {
        Some(401) => (ErrorKind::AuthExpired, SESSION_EXPIRED_MESSAGE.to_owned()),
        Some(404) => (ErrorKind::NotFound, failure.detail().unwrap_or_else(|| NOT_FOUND_MESSAGE.to_owned())),
        _ => {
            let message = failure
                .detail()
                .or_else(|| failure.transport_message())
                .unwrap_or_else(|| REQUEST_FAILED_MESSAGE.to_owned());
            (ErrorKind::RequestFailed, message)
        }
    };
    let reason = match failure {
        Failure::Transport(err) => err.to_string(),
        Failure::Status { .. } | Failure::Payload { .. } => message.clone(),
    };
    Classification { kind, message, reason }
}
