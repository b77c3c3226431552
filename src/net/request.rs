//! Augmentation stage: attach the session's bearer token.

#[cfg(test)]
#[path = "request_test.rs"]
mod request_test;

use reqwest::header::{AUTHORIZATION, HeaderValue};

use super::types::RequestEnvelope;
use crate::session::{SessionStore, active_token};

/// Set `Authorization: Bearer <token>` when the session holds a token,
/// replacing any caller-supplied value. Without a token the headers are left
/// exactly as given.
///
/// A token that is not a valid header value is treated as no token; it can
/// never authenticate anyway.
#[must_use]
pub fn authorize(mut request: RequestEnvelope, session: &dyn SessionStore) -> RequestEnvelope {
    let Some(token) = active_token(session) else {
        return request;
    };
    match HeaderValue::from_str(&format!("Bearer {token}")) {
        Ok(mut value) => {
            value.set_sensitive(true);
            request.headers.insert(AUTHORIZATION, value);
        }
        Err(err) => tracing::warn!(error = %err, "session token is not a valid header value"),
    }
    request
}
