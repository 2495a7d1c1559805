//! Transport abstraction.
//!
//! The session logic never talks to `reqwest` directly. It builds a
//! [`Request`], hands it to a [`Transport`] and inspects the [`Response`].
//! The session itself lives in the transport's cookie jar.
//!
//! - [`http`] - `reqwest`-backed transport with cookie jar and HTTP Basic auth

pub mod http;
#[cfg(test)]
pub(crate) mod scripted;

use async_trait::async_trait;
use std::fmt;
use url::Url;

use crate::error::{ClientError, HttpError};

pub use http::{HttpTransport, HttpTransportBuilder};

// ============================================================================
// Request
// ============================================================================

/// HTTP method of a [`Request`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// GET request.
    Get,
    /// POST request with a url-encoded form body.
    Post,
}

impl Method {
    /// Returns the method name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A prepared, re-executable request.
#[derive(Clone, PartialEq, Eq)]
pub struct Request {
    method: Method,
    url: Url,
    form: Vec<(String, String)>,
}

impl Request {
    /// Creates a GET request.
    pub fn get(url: Url) -> Self {
        Self {
            method: Method::Get,
            url,
            form: Vec::new(),
        }
    }

    /// Creates a POST request with a url-encoded form body.
    ///
    /// Field order is kept as given.
    pub fn post_form<K, V>(url: Url, fields: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            method: Method::Post,
            url,
            form: fields
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Returns the method.
    pub fn method(&self) -> Method {
        self.method
    }

    /// Returns the target URL.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Returns the form fields (empty for GET).
    pub fn form(&self) -> &[(String, String)] {
        &self.form
    }

    /// Returns the value of a form field.
    pub fn form_value(&self, name: &str) -> Option<&str> {
        self.form
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

// Form values carry passwords and tokens.
impl fmt::Debug for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields: Vec<&str> = self.form.iter().map(|(k, _)| k.as_str()).collect();
        f.debug_struct("Request")
            .field("method", &self.method)
            .field("url", &self.url.as_str())
            .field("form_fields", &fields)
            .finish()
    }
}

// ============================================================================
// Response
// ============================================================================

/// A response with its body already read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// HTTP status code.
    pub status: u16,
    /// Response body as text.
    pub body: String,
}

impl Response {
    /// Creates a response.
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Creates a `200 OK` response.
    pub fn ok(body: impl Into<String>) -> Self {
        Self::new(200, body)
    }

    /// Returns true for 2xx status codes.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

// ============================================================================
// Transport Trait
// ============================================================================

/// Capability interface over the HTTP stack.
///
/// Implementations own the cookie jar and inject HTTP Basic auth when it is
/// configured. Session state is shared between concurrent calls through that
/// jar, nothing else is shared.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Executes a request and reads the whole body.
    async fn execute(&self, request: &Request) -> Result<Response, HttpError>;

    /// Fails with [`ClientError::UnsuccessfulResponse`] for non-2xx statuses.
    fn check_response(&self, response: &Response) -> Result<(), ClientError> {
        if response.is_success() {
            Ok(())
        } else {
            Err(ClientError::UnsuccessfulResponse {
                status: response.status,
            })
        }
    }
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for std::sync::Arc<T> {
    async fn execute(&self, request: &Request) -> Result<Response, HttpError> {
        (**self).execute(request).await
    }

    fn check_response(&self, response: &Response) -> Result<(), ClientError> {
        (**self).check_response(response)
    }
}

// ============================================================================
// Tests
// ============================================================================
