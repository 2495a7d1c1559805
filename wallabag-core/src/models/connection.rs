//! Connection diagnostic outcomes.
//!
//! This module contains the types produced by the connection tester:
//! - [`ConnectionTestResult`] - One outcome per probe
//! - [`ConnectionReport`] - Outcome plus the probed URL and a timestamp

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Connection Test Result
// ============================================================================

/// Outcome of a connection test.
///
/// Variants are listed in the order the probe checks them. Exactly one is
/// produced per probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[allow(clippy::upper_case_acronyms)]
pub enum ConnectionTestResult {
    /// Logged in, authenticated pages are reachable.
    OK,
    /// The base URL cannot be parsed.
    IncorrectURL,
    /// The server asks for HTTP Basic authentication.
    HTTPAuth,
    /// The server hosts an incompatible wallabag version.
    IncorrectServerVersion,
    /// The URL does not look like a wallabag installation.
    WallabagNotFound,
    /// The login form carries no CSRF token.
    NoCSRF,
    /// Login was rejected.
    IncorrectCredentials,
    /// Login succeeded but the session was lost on the next request.
    AuthProblem,
    /// After login the server answered with an unexpected page.
    UnknownPageAfterLogin,
}

impl ConnectionTestResult {
    /// Returns all results in probe order.
    pub fn all() -> &'static [ConnectionTestResult] {
        &[
            Self::OK,
            Self::IncorrectURL,
            Self::HTTPAuth,
            Self::IncorrectServerVersion,
            Self::WallabagNotFound,
            Self::NoCSRF,
            Self::IncorrectCredentials,
            Self::AuthProblem,
            Self::UnknownPageAfterLogin,
        ]
    }

    /// Returns true for [`ConnectionTestResult::OK`].
    pub fn is_ok(&self) -> bool {
        *self == Self::OK
    }

    /// Returns the stable identifier used in machine-readable output.
    pub fn code(&self) -> &'static str {
        match self {
            Self::OK => "ok",
            Self::IncorrectURL => "incorrect_url",
            Self::HTTPAuth => "http_auth",
            Self::IncorrectServerVersion => "incorrect_server_version",
            Self::WallabagNotFound => "wallabag_not_found",
            Self::NoCSRF => "no_csrf",
            Self::IncorrectCredentials => "incorrect_credentials",
            Self::AuthProblem => "auth_problem",
            Self::UnknownPageAfterLogin => "unknown_page_after_login",
        }
    }

    /// Returns a user-facing explanation of the outcome.
    pub fn description(&self) -> &'static str {
        match self {
            Self::OK => "Connection works and the login was accepted.",
            Self::IncorrectURL => "The URL is not valid. Check the address of your wallabag.",
            Self::HTTPAuth => {
                "The server requires HTTP authentication. Set the HTTP auth username and password."
            }
            Self::IncorrectServerVersion => {
                "The server runs a wallabag version this client does not support."
            }
            Self::WallabagNotFound => {
                "No wallabag found at this URL. Check the address, including the subdirectory."
            }
            Self::NoCSRF => "The login page has no CSRF token.",
            Self::IncorrectCredentials => "Wrong username or password.",
            Self::AuthProblem => {
                "Login worked but the session was lost. This is usually caused by a redirect, \
                 e.g. from http to https or to another host name. Try the final URL."
            }
            Self::UnknownPageAfterLogin => "The server returned an unexpected page after login.",
        }
    }
}

impl fmt::Display for ConnectionTestResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

// ============================================================================
// Connection Report
// ============================================================================

/// A connection test outcome with context.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionReport {
    /// The probed base URL.
    pub url: String,
    /// The outcome.
    pub result: ConnectionTestResult,
    /// When the probe finished.
    pub checked_at: DateTime<Utc>,
}

impl ConnectionReport {
    /// Creates a report stamped with the current time.
    pub fn new(url: impl Into<String>, result: ConnectionTestResult) -> Self {
        Self {
            url: url.into(),
            result,
            checked_at: Utc::now(),
        }
    }

    /// Returns true if the connection works.
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

// ============================================================================
// Tests
// ============================================================================
