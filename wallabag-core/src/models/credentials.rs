//! Login credentials and scraped feeds credentials.

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Credentials
// ============================================================================

/// Credentials for one client instance.
///
/// `username`/`password` are submitted through the login form. The
/// `http_auth_*` pair is used by the transport for HTTP Basic auth.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    /// Form login username.
    #[serde(default)]
    pub username: Option<String>,
    /// Form login password.
    #[serde(default)]
    pub password: Option<String>,
    /// HTTP Basic auth username.
    #[serde(default)]
    pub http_auth_username: Option<String>,
    /// HTTP Basic auth password.
    #[serde(default)]
    pub http_auth_password: Option<String>,
}

impl Credentials {
    /// Creates form login credentials without HTTP auth.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: Some(username.into()),
            password: Some(password.into()),
            http_auth_username: None,
            http_auth_password: None,
        }
    }

    /// Adds HTTP Basic auth credentials.
    pub fn with_http_auth(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.http_auth_username = Some(username.into());
        self.http_auth_password = Some(password.into());
        self
    }

    /// Returns true if an HTTP auth username is configured.
    pub fn has_http_auth(&self) -> bool {
        self.http_auth_username
            .as_deref()
            .is_some_and(|u| !u.is_empty())
    }

    /// The username the feeds user id is expected to end with.
    ///
    /// The form username wins when it is non-empty, otherwise the HTTP auth
    /// username is used.
    pub fn presumed_username(&self) -> Option<&str> {
        match self.username.as_deref() {
            Some(u) if !u.is_empty() => Some(u),
            _ => self.http_auth_username.as_deref(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .field("http_auth_username", &self.http_auth_username)
            .field("http_auth_password", &self.http_auth_password.as_ref().map(|_| "***"))
            .finish()
    }
}

// ============================================================================
// Feeds Credentials
// ============================================================================

/// How far a scraped feeds user id could be checked against the username.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdentifierCheck {
    /// Same length as the known username, accepted as-is.
    Matched,
    /// Longer than the known username, the installation prefix was cut off.
    Trimmed,
    /// Shorter than the username, or no username known. Kept as-is.
    Unverified,
}

impl IdentifierCheck {
    /// Returns true if the user id could not be verified.
    pub fn is_uncertain(&self) -> bool {
        *self == Self::Unverified
    }
}

/// Feed access credentials scraped from the config page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedsCredentials {
    /// User-scoped path segment of the feed URLs.
    pub user_id: String,
    /// Feed access token.
    pub token: String,
    /// Result of the user id length check.
    pub check: IdentifierCheck,
}

impl FeedsCredentials {
    /// Creates unverified feeds credentials.
    pub fn new(user_id: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            token: token.into(),
            check: IdentifierCheck::Unverified,
        }
    }

    /// Builds the URL of the unread feed below `base_url`.
    pub fn unread_feed_url(&self, base_url: &str) -> String {
        format!(
            "{}/{}/{}/unread.xml",
            base_url.trim_end_matches('/'),
            self.user_id,
            self.token
        )
    }
}

// ============================================================================
// Tests
// ============================================================================
