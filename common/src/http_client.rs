//! Outbound HTTP client.
//!
//! One `OutboundClient` is built at startup and shared by every handler. It
//! wraps a pooled `reqwest::Client`, so clones are cheap and share connections.
//! Responses are returned as plain data (`UpstreamResponse`) and callers decide
//! how to interpret the status code and decode the body.

use std::time::Duration;

use axum::http::{
    header::{self, HeaderMap, HeaderValue},
    StatusCode,
};
use bytes::Bytes;
use reqwest::{redirect, IntoUrl};
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Connect timeout for outbound calls.
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
/// Total timeout for a single outbound call, body included.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

const USER_AGENT: &str = "github-weather-gateway/1.0";
const ACCEPT: &str = "application/vnd.github+json";
const MAX_REDIRECTS: usize = 10;

/// Transport-level failure: no HTTP response was obtained.
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("request timed out: {0}")]
    Timeout(#[source] reqwest::Error),

    #[error("connection failed: {0}")]
    Connect(#[source] reqwest::Error),

    #[error("{0}")]
    Other(#[source] reqwest::Error),
}

impl From<reqwest::Error> for NetworkError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            NetworkError::Timeout(err)
        } else if err.is_connect() {
            NetworkError::Connect(err)
        } else {
            NetworkError::Other(err)
        }
    }
}

/// An upstream HTTP response described as plain data.
#[derive(Debug, Clone)]
pub struct UpstreamResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl UpstreamResponse {
    /// True for 4xx and 5xx statuses.
    pub fn is_error(&self) -> bool {
        self.status.is_client_error() || self.status.is_server_error()
    }

    /// Returns a header value if present and valid ASCII.
    pub fn header_str(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Decodes the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }
}

/// Shared, connection-reusing client for all upstream calls.
#[derive(Debug, Clone)]
pub struct OutboundClient {
    inner: reqwest::Client,
}

impl OutboundClient {
    /// Builds the client with the production timeouts.
    pub fn new() -> reqwest::Result<Self> {
        Self::with_timeouts(CONNECT_TIMEOUT, REQUEST_TIMEOUT)
    }

    /// Builds the client with explicit timeouts.
    pub fn with_timeouts(connect: Duration, total: Duration) -> reqwest::Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(header::USER_AGENT, HeaderValue::from_static(USER_AGENT));
        headers.insert(header::ACCEPT, HeaderValue::from_static(ACCEPT));

        let inner = reqwest::Client::builder()
            .connect_timeout(connect)
            .timeout(total)
            .default_headers(headers)
            .redirect(redirect::Policy::limited(MAX_REDIRECTS))
            .build()?;

        Ok(Self { inner })
    }

    /// Issues a GET and reads the full body.
    ///
    /// `headers` are added on top of the defaults. Any HTTP status counts as a
    /// response; only transport failures are errors.
    pub async fn get<U: IntoUrl>(
        &self,
        url: U,
        headers: HeaderMap,
        query: &[(&str, String)],
    ) -> Result<UpstreamResponse, NetworkError> {
        let response = self
            .inner
            .get(url)
            .headers(headers)
            .query(query)
            .send()
            .await?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await?;

        tracing::debug!(status = %status, bytes = body.len(), "upstream responded");
        Ok(UpstreamResponse {
            status,
            headers,
            body,
        })
    }

    /// Releases this handle. The pool closes once the last clone is dropped.
    pub fn close(self) {
        drop(self.inner);
        tracing::debug!("outbound client released");
    }
}

/// Builds a header map with a single bearer credential.
pub fn bearer_auth(token: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    if let Ok(value) = HeaderValue::from_str(&format!("Bearer {token}")) {
        headers.insert(header::AUTHORIZATION, value);
    }
    headers
}
