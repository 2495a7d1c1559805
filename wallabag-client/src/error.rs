//! Client error types.

use thiserror::Error;

// ============================================================================
// Client Error
// ============================================================================

/// Error type for client operations.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The configured endpoint cannot be turned into a request URL.
    #[error("Incorrect configuration: {0}")]
    IncorrectConfiguration(String),

    /// The server wants a login and re-login was not allowed.
    #[error("Not authorized")]
    NotAuthorized,

    /// The server answered with an unacceptable status code.
    #[error("Unsuccessful response: HTTP {status}")]
    UnsuccessfulResponse {
        /// HTTP status code.
        status: u16,
    },

    /// The login form was shown again after submitting credentials.
    #[error("{0}")]
    IncorrectCredentials(String),

    /// A login page was expected but the server returned something else.
    #[error("Got no login page when expected it")]
    LoginPageExpected,

    /// The login page carries no CSRF token.
    #[error("CSRF token was not found on login page")]
    CsrfTokenNotFound,

    /// The session was lost right after a successful login.
    #[error("Unstable login session")]
    UnstableSession,

    /// Transport failure.
    #[error("HTTP error: {0}")]
    Http(#[from] HttpError),
}

impl ClientError {
    /// Returns true for an unsuccessful response with status 404.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::UnsuccessfulResponse { status: 404 })
    }

    /// Returns the HTTP status code, if the error carries one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::UnsuccessfulResponse { status } => Some(*status),
            _ => None,
        }
    }

    /// Returns true if the server deviated from the expected login protocol.
    pub fn is_unexpected_server_behavior(&self) -> bool {
        matches!(
            self,
            Self::LoginPageExpected | Self::CsrfTokenNotFound | Self::UnstableSession
        )
    }
}

// ============================================================================
// HTTP Error
// ============================================================================

/// HTTP transport error type.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Request error.
    #[error("Request error: {0}")]
    Request(#[from] reqwest::Error),

    /// The HTTP client could not be built.
    #[error("Failed to build HTTP client: {0}")]
    Build(String),

    /// Timeout.
    #[error("Request timed out")]
    Timeout,
}

// ============================================================================
// Tests
// ============================================================================
