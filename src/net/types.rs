//! Request/response envelopes and the backend's error payload shape.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use reqwest::Method;
use reqwest::header::HeaderMap;
use serde::Deserialize;
use serde_json::Value;

/// Outbound call as seen by the pipeline stages.
#[derive(Debug, Clone)]
pub struct RequestEnvelope {
    pub method: Method,
    /// Path relative to the configured base URL, always starting with `/`.
    pub path: String,
    pub headers: HeaderMap,
    pub body: Option<Value>,
}

impl RequestEnvelope {
    #[must_use]
    pub fn new(method: Method, path: &str) -> Self {
        let path = if path.starts_with('/') { path.to_owned() } else { format!("/{path}") };
        Self { method, path, headers: HeaderMap::new(), body: None }
    }

    #[must_use]
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    #[must_use]
    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.headers.extend(headers);
        self
    }
}

/// Transport envelope around a response. Never handed to application code
/// on success; the client unwraps it to the payload.
#[derive(Debug, Clone)]
pub struct ResponseEnvelope {
    pub status: u16,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl ResponseEnvelope {
    #[must_use]
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self { status, headers: HeaderMap::new(), body: body.into() }
    }

    #[must_use]
    pub fn json(status: u16, value: &Value) -> Self {
        Self::new(status, value.to_string())
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Payload as JSON. An empty (or all-whitespace) body is `null`.
    ///
    /// # Errors
    ///
    /// Returns the parse error when the body is not valid JSON.
    pub fn payload(&self) -> Result<Value, serde_json::Error> {
        if self.body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Value::Null);
        }
        serde_json::from_slice(&self.body)
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: Option<Detail>,
}

/// FastAPI sends `detail` as a string, or as a list of validation errors.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Detail {
    Message(String),
    Validation(Vec<ValidationItem>),
    Other(Value),
}

#[derive(Debug, Deserialize)]
struct ValidationItem {
    msg: Option<String>,
}

/// Human-readable `detail` from an error body, if there is a usable one.
///
/// Any shape other than a non-empty string or a list of `{ "msg": ... }`
/// entries yields `None`.
#[must_use]
pub fn detail_message(body: &[u8]) -> Option<String> {
    let parsed: ErrorBody = match serde_json::from_slice(body) {
        Ok(parsed) => parsed,
        Err(_) => return None,
    };
    match parsed.detail? {
        Detail::Message(message) if !message.trim().is_empty() => Some(message),
        Detail::Validation(items) => {
            let joined = items
                .into_iter()
                .filter_map(|item| item.msg)
                .filter(|msg| !msg.trim().is_empty())
                .collect::<Vec<_>>()
                .join("; ");
            (!joined.is_empty()).then_some(joined)
        }
        Detail::Message(_) | Detail::Other(_) => None,
    }
}
