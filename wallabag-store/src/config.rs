//! Server configuration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::time::Duration;
use tracing::info;
use wallabag_core::{Credentials, FeedsCredentials};

use crate::error::StoreError;
use crate::persistence::{load_json_or_missing, save_json};

/// Shown in place of a stored password.
const MASK: &str = "********";

/// Keys accepted by [`ServerConfig::set_value`].
pub const CONFIG_KEYS: &[&str] = &[
    "url",
    "username",
    "password",
    "http_auth_username",
    "http_auth_password",
    "feeds_user_id",
    "feeds_token",
    "timeout_secs",
];

// ============================================================================
// Server Config
// ============================================================================

/// Connection settings for one wallabag server.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServerConfig {
    /// Base URL of the wallabag installation.
    #[serde(default)]
    pub url: Option<String>,
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
    /// Feeds user id, as discovered from the config page.
    #[serde(default)]
    pub feeds_user_id: Option<String>,
    /// Feeds token, as discovered from the config page.
    #[serde(default)]
    pub feeds_token: Option<String>,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            url: None,
            username: None,
            password: None,
            http_auth_username: None,
            http_auth_password: None,
            feeds_user_id: None,
            feeds_token: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let masked = self.masked();
        f.debug_struct("ServerConfig")
            .field("url", &masked.url)
            .field("username", &masked.username)
            .field("password", &masked.password)
            .field("http_auth_username", &masked.http_auth_username)
            .field("http_auth_password", &masked.http_auth_password)
            .field("feeds_user_id", &masked.feeds_user_id)
            .field("feeds_token", &masked.feeds_token)
            .field("timeout_secs", &masked.timeout_secs)
            .finish()
    }
}

impl ServerConfig {
    /// Loads the configuration; a missing file yields the defaults.
    pub async fn load_from(path: &Path) -> Result<Self, StoreError> {
        let config: Self = load_json_or_missing(path).await?;
        info!(path = %path.display(), configured = config.is_configured(), "Loaded configuration");
        Ok(config)
    }

    /// Saves the configuration to a specific path.
    pub async fn save_to(&self, path: &Path) -> Result<(), StoreError> {
        save_json(path, self).await?;
        info!(path = %path.display(), "Saved configuration");
        Ok(())
    }

    /// Returns true if a server URL is set.
    pub fn is_configured(&self) -> bool {
        self.url.as_deref().is_some_and(|u| !u.trim().is_empty())
    }

    /// Returns the server URL or [`StoreError::NotConfigured`].
    pub fn require_url(&self) -> Result<&str, StoreError> {
        self.url
            .as_deref()
            .filter(|u| !u.trim().is_empty())
            .ok_or(StoreError::NotConfigured)
    }

    /// Returns the login credentials.
    pub fn credentials(&self) -> Credentials {
        Credentials {
            username: self.username.clone(),
            password: self.password.clone(),
            http_auth_username: self.http_auth_username.clone(),
            http_auth_password: self.http_auth_password.clone(),
        }
    }

    /// Returns the request timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Stores discovered feeds credentials.
    pub fn set_feeds_credentials(&mut self, feeds: &FeedsCredentials) {
        self.feeds_user_id = Some(feeds.user_id.clone());
        self.feeds_token = Some(feeds.token.clone());
    }

    /// Sets a value by key. An empty value clears optional keys.
    pub fn set_value(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let value_opt = (!value.is_empty()).then(|| value.to_string());
        match key {
            "url" => self.url = value_opt.map(|u| u.trim_end_matches('/').to_string()),
            "username" => self.username = value_opt,
            "password" => self.password = value_opt,
            "http_auth_username" => self.http_auth_username = value_opt,
            "http_auth_password" => self.http_auth_password = value_opt,
            "feeds_user_id" => self.feeds_user_id = value_opt,
            "feeds_token" => self.feeds_token = value_opt,
            "timeout_secs" => {
                let secs: u64 = value
                    .parse()
                    .map_err(|_| StoreError::Config(format!("invalid timeout: {value:?}")))?;
                if secs == 0 {
                    return Err(StoreError::Config("timeout must be positive".to_string()));
                }
                self.timeout_secs = secs;
            }
            _ => {
                return Err(StoreError::Config(format!(
                    "unknown key {key:?}, expected one of: {}",
                    CONFIG_KEYS.join(", ")
                )));
            }
        }
        Ok(())
    }

    /// Returns a copy with passwords and the feeds token masked.
    pub fn masked(&self) -> Self {
        let mask = |v: &Option<String>| v.as_ref().map(|_| MASK.to_string());
        Self {
            password: mask(&self.password),
            http_auth_password: mask(&self.http_auth_password),
            feeds_token: mask(&self.feeds_token),
            ..self.clone()
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::default();
        assert!(!config.is_configured());
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert!(matches!(config.require_url(), Err(StoreError::NotConfigured)));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: ServerConfig =
            serde_json::from_str(r#"{"url": "https://bag.example.com"}"#).unwrap();
        assert!(config.is_configured());
        assert_eq!(config.timeout_secs, 30);
        assert!(config.username.is_none());
    }

    #[test]
    fn test_credentials() {
        let mut config = ServerConfig::default();
        config.set_value("username", "alice").unwrap();
        config.set_value("password", "pw").unwrap();
        config.set_value("http_auth_username", "gate").unwrap();

        let creds = config.credentials();
        assert_eq!(creds.username.as_deref(), Some("alice"));
        assert_eq!(creds.password.as_deref(), Some("pw"));
        assert!(creds.has_http_auth());
    }

    #[test]
    fn test_set_value() {
        let mut config = ServerConfig::default();
        config.set_value("url", "https://bag.example.com/").unwrap();
        assert_eq!(config.url.as_deref(), Some("https://bag.example.com"));

        config.set_value("url", "").unwrap();
        assert!(config.url.is_none());

        config.set_value("timeout_secs", "5").unwrap();
        assert_eq!(config.timeout_secs, 5);

        assert!(matches!(
            config.set_value("timeout_secs", "0"),
            Err(StoreError::Config(_))
        ));
        assert!(matches!(
            config.set_value("timeout_secs", "soon"),
            Err(StoreError::Config(_))
        ));
        assert!(matches!(
            config.set_value("colour", "blue"),
            Err(StoreError::Config(_))
        ));
    }

    #[test]
    fn test_masked() {
        let mut config = ServerConfig::default();
        config.set_value("username", "alice").unwrap();
        config.set_value("password", "hunter2").unwrap();

        let masked = config.masked();
        assert_eq!(masked.username.as_deref(), Some("alice"));
        assert_eq!(masked.password.as_deref(), Some(MASK));
        assert!(masked.http_auth_password.is_none());
        assert!(!format!("{config:?}").contains("hunter2"));
    }

    #[test]
    fn test_set_feeds_credentials() {
        let mut config = ServerConfig::default();
        config.set_feeds_credentials(&FeedsCredentials::new("alice", "T0k"));
        assert_eq!(config.feeds_user_id.as_deref(), Some("alice"));
        assert_eq!(config.feeds_token.as_deref(), Some("T0k"));
    }
}
