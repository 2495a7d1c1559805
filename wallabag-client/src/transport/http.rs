//! HTTP transport with a cookie jar and optional HTTP Basic auth.
//!
//! This module provides the production [`Transport`] that adds:
//! - An in-memory cookie jar holding the form-login session
//! - HTTP Basic auth on every request when configured
//! - Request/response tracing

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, instrument};

use super::{Method, Request, Response, Transport};
use crate::error::HttpError;

/// Default request timeout.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// User agent string for the client.
const USER_AGENT: &str = concat!("wallabag-client/", env!("CARGO_PKG_VERSION"));

// ============================================================================
// HTTP Transport
// ============================================================================

/// `reqwest`-backed transport.
///
/// Cloning is cheap and clones share the cookie jar, so all clones act on
/// the same session.
#[derive(Clone)]
pub struct HttpTransport {
    inner: Client,
    timeout: Duration,
    basic_auth: Option<(String, Option<String>)>,
}

impl HttpTransport {
    /// Creates a transport with default settings and no HTTP auth.
    pub fn new() -> Result<Self, HttpError> {
        Self::builder().build()
    }

    /// Creates a builder for customizing the transport.
    pub fn builder() -> HttpTransportBuilder {
        HttpTransportBuilder::new()
    }

    /// Returns true if HTTP Basic auth is sent with every request.
    pub fn uses_basic_auth(&self) -> bool {
        self.basic_auth.is_some()
    }

    /// Returns the per-request timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl std::fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTransport")
            .field("timeout", &self.timeout)
            .field("basic_auth", &self.basic_auth.as_ref().map(|(user, _)| user))
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl Transport for HttpTransport {
    #[instrument(skip(self, request), fields(method = %request.method(), url = %request.url()))]
    async fn execute(&self, request: &Request) -> Result<Response, HttpError> {
        let mut builder = match request.method() {
            Method::Get => self.inner.get(request.url().clone()),
            Method::Post => self.inner.post(request.url().clone()).form(request.form()),
        };

        if let Some((user, password)) = &self.basic_auth {
            builder = builder.basic_auth(user, password.as_deref());
        }

        debug!("Sending request");
        let response = builder.send().await.map_err(map_reqwest_error)?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(map_reqwest_error)?;
        debug!(status, len = body.len(), "Response received");

        Ok(Response { status, body })
    }
}

fn map_reqwest_error(err: reqwest::Error) -> HttpError {
    if err.is_timeout() {
        HttpError::Timeout
    } else {
        HttpError::Request(err)
    }
}

// ============================================================================
// Builder
// ============================================================================

/// Builder for [`HttpTransport`].
#[derive(Debug, Clone)]
pub struct HttpTransportBuilder {
    timeout: Duration,
    http_auth_username: Option<String>,
    http_auth_password: Option<String>,
}

impl HttpTransportBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            http_auth_username: None,
            http_auth_password: None,
        }
    }

    /// Sets the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets HTTP Basic auth credentials.
    ///
    /// An empty or missing username disables Basic auth.
    pub fn http_auth(mut self, username: Option<String>, password: Option<String>) -> Self {
        self.http_auth_username = username;
        self.http_auth_password = password;
        self
    }

    /// Builds the transport.
    pub fn build(self) -> Result<HttpTransport, HttpError> {
        let inner = Client::builder()
            .timeout(self.timeout)
            .user_agent(USER_AGENT)
            .cookie_store(true)
            .build()
            .map_err(|e| HttpError::Build(e.to_string()))?;

        let basic_auth = self
            .http_auth_username
            .filter(|u| !u.is_empty())
            .map(|u| (u, self.http_auth_password));

        Ok(HttpTransport {
            inner,
            timeout: self.timeout,
            basic_auth,
        })
    }
}

impl Default for HttpTransportBuilder {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================
