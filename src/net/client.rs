//! Session-aware HTTP client.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every backend call in the application goes through [`HttpClient::request`]
//! (or one of the method shorthands). Callers get the decoded payload or an
//! [`HttpError`]; they never see status codes or transport headers on success.
//!
//! DESIGN
//! ======
//! One call, one attempt:
//!
//! 1. `authorize` attaches the bearer token (pure over request + session).
//! 2. The transport sends the request.
//! 3. 2xx: the body is decoded into the caller's type.
//!    Otherwise: `classify` picks the kind and message (pure over the failure).
//!
//! ERROR HANDLING
//! ==============
//! Failures travel on two independent channels: the returned `Err` and a
//! notification. A 401 additionally clears the session and schedules one
//! forced navigation to the entry route. That redirect is a side effect; the
//! call still fails.

#[cfg(test)]
#[path = "client_test.rs"]
mod client_test;

use std::sync::{Arc, Mutex, PoisonError};

use reqwest::Method;
use reqwest::header::HeaderMap;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::Instrument;
use uuid::Uuid;

use super::classify::{Failure, classify};
use super::error::{ErrorKind, HttpError};
use super::request::authorize;
use super::transport::{ReqwestTransport, Transport};
use super::types::RequestEnvelope;
use crate::config::{ClientConfig, ConfigError};
use crate::navigate::{Navigator, RedirectScheduler, ScheduledRedirect};
use crate::notify::{Notifier, Severity};
use crate::session::SessionStore;

/// Where a forced navigation lands after session expiry.
pub const ENTRY_PATH: &str = "/";

pub struct HttpClient {
    transport: Arc<dyn Transport>,
    session: Arc<dyn SessionStore>,
    notifier: Arc<dyn Notifier>,
    redirects: RedirectScheduler,
    pending: Mutex<Vec<ScheduledRedirect>>,
}

impl HttpClient {
    /// Client over the real `reqwest` transport.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when the base URL cannot be resolved or the
    /// HTTP client cannot be built.
    pub fn new(
        config: &ClientConfig,
        session: Arc<dyn SessionStore>,
        notifier: Arc<dyn Notifier>,
        navigator: Arc<dyn Navigator>,
    ) -> Result<Self, ConfigError> {
        let transport = ReqwestTransport::new(config)?;
        tracing::info!(base_url = transport.base_url(), timeout_secs = config.timeouts.request_secs, "http client ready");
        Ok(Self::with_transport(Arc::new(transport), session, notifier, navigator))
    }

    #[must_use]
    pub fn with_transport(
        transport: Arc<dyn Transport>,
        session: Arc<dyn SessionStore>,
        notifier: Arc<dyn Notifier>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            transport,
            session,
            notifier,
            redirects: RedirectScheduler::new(navigator, ENTRY_PATH),
            pending: Mutex::new(Vec::new()),
        }
    }

    /// Replace the expiry redirect (target path or delay).
    #[must_use]
    pub fn with_redirects(mut self, redirects: RedirectScheduler) -> Self {
        self.redirects = redirects;
        self
    }

    /// Single entry point: send one request and decode the payload.
    ///
    /// An empty success body decodes as JSON `null`, so `()` and `Option<_>`
    /// work for bodiless responses.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::AuthExpired`] for 401, [`HttpError::NotFound`] for
    /// 404 and [`HttpError::RequestFailed`] for everything else, after the
    /// failure has been notified.
    pub async fn request<T>(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
        headers: Option<HeaderMap>,
    ) -> Result<T, HttpError>
    where
        T: DeserializeOwned,
    {
        let request_id = Uuid::new_v4();
        let span = tracing::info_span!("http_request", %request_id, %method, path);
        self.execute(method, path, body, headers).instrument(span).await
    }

    /// # Errors
    ///
    /// See [`HttpClient::request`].
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, HttpError> {
        self.request(Method::GET, path, None, None).await
    }

    /// # Errors
    ///
    /// See [`HttpClient::request`]; an unserializable body fails as
    /// [`HttpError::RequestFailed`] without being sent.
    pub async fn post<T, B>(&self, path: &str, body: &B) -> Result<T, HttpError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let body = self.encode(body)?;
        self.request(Method::POST, path, Some(body), None).await
    }

    /// # Errors
    ///
    /// See [`HttpClient::post`].
    pub async fn put<T, B>(&self, path: &str, body: &B) -> Result<T, HttpError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let body = self.encode(body)?;
        self.request(Method::PUT, path, Some(body), None).await
    }

    /// # Errors
    ///
    /// See [`HttpClient::request`].
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, HttpError> {
        self.request(Method::DELETE, path, None, None).await
    }

    /// Abort every expiry redirect that has not fired yet.
    pub fn cancel_pending_redirects(&self) {
        let pending = std::mem::take(&mut *self.pending.lock().unwrap_or_else(PoisonError::into_inner));
        for redirect in &pending {
            redirect.cancel();
        }
    }

    /// Wait for every scheduled expiry redirect to fire.
    pub async fn settle_redirects(&self) {
        let pending = std::mem::take(&mut *self.pending.lock().unwrap_or_else(PoisonError::into_inner));
        for redirect in pending {
            redirect.wait().await;
        }
    }

    async fn execute<T>(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
        headers: Option<HeaderMap>,
    ) -> Result<T, HttpError>
    where
        T: DeserializeOwned,
    {
        let mut envelope = RequestEnvelope::new(method, path);
        if let Some(headers) = headers {
            envelope = envelope.with_headers(headers);
        }
        if let Some(body) = body {
            envelope = envelope.with_body(body);
        }
        let envelope = authorize(envelope, self.session.as_ref());

        let response = match self.transport.send(envelope).await {
            Ok(response) => response,
            Err(err) => return Err(self.fail(Failure::Transport(err))),
        };
        if !response.is_success() {
            return Err(self.fail(Failure::Status { status: response.status, body: response.body }));
        }

        let status = response.status;
        tracing::debug!(status, bytes = response.body.len(), "request succeeded");
        response
            .payload()
            .and_then(serde_json::from_value)
            .map_err(|e| {
                self.fail(Failure::Payload { status: Some(status), reason: format!("malformed response: {e}") })
            })
    }

    fn encode<B: Serialize + ?Sized>(&self, body: &B) -> Result<Value, HttpError> {
        serde_json::to_value(body)
            .map_err(|e| self.fail(Failure::Payload { status: None, reason: format!("invalid request body: {e}") }))
    }

    fn fail(&self, failure: Failure) -> HttpError {
        let status = failure.status();
        let classification = classify(&failure);
        tracing::warn!(
            kind = classification.kind.as_str(),
            status = ?status,
            reason = %classification.reason,
            "request failed"
        );
        self.notifier.notify(&classification.message, Severity::Error);
        if classification.kind == ErrorKind::AuthExpired {
            self.expire_session();
        }
        HttpError::from_classification(classification, status)
    }

    fn expire_session(&self) {
        self.session.logout();
        let redirect = self.redirects.schedule();
        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        pending.retain(|r| !r.is_finished());
        pending.push(redirect);
    }
}
