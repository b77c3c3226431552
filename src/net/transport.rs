//! Wire transport for the HTTP client.
//!
//! ERROR HANDLING
//! ==============
//! Only failures with no response end up as [`TransportError`]: timeouts,
//! connection failures, unreadable bodies. Any received status, including
//! 4xx/5xx, comes back as a [`ResponseEnvelope`] for the client to classify.

use async_trait::async_trait;

use super::types::{RequestEnvelope, ResponseEnvelope};
use crate::config::{ClientConfig, ConfigError};

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum TransportError {
    #[error("request timed out: {0}")]
    Timeout(String),
    #[error("connection failed: {0}")]
    Connect(String),
    #[error("transport error: {0}")]
    Other(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(err.to_string())
        } else if err.is_connect() {
            Self::Connect(err.to_string())
        } else {
            Self::Other(err.to_string())
        }
    }
}

#[async_trait]
pub trait Transport: Send + Sync {
    /// Transmit one request. A single attempt; no retry.
    async fn send(&self, request: RequestEnvelope) -> Result<ResponseEnvelope, TransportError>;
}

/// `reqwest`-backed transport rooted at an absolute base URL.
pub struct ReqwestTransport {
    http: reqwest::Client,
    base_url: String,
}

impl ReqwestTransport {
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when the base URL cannot be resolved or the
    /// HTTP client cannot be built.
    pub fn new(config: &ClientConfig) -> Result<Self, ConfigError> {
        let base_url = config.endpoint()?;
        let http = reqwest::Client::builder()
            .timeout(config.timeouts.request())
            .connect_timeout(config.timeouts.connect())
            .build()
            .map_err(|e| ConfigError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, base_url })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: RequestEnvelope) -> Result<ResponseEnvelope, TransportError> {
        let url = format!("{}{}", self.base_url, request.path);
        let mut builder = self.http.request(request.method, url).headers(request.headers);
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let headers = response.headers().clone();
        let body = response.bytes().await?.to_vec();
        Ok(ResponseEnvelope { status, headers, body })
    }
}
