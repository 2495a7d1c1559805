//! The wallabag service endpoint.
//!
//! [`ServiceEndpoint`] ties together the base URL, the credentials and a
//! [`Transport`]. The session protocol is split over several modules that
//! all add methods to it:
//!
//! - [`crate::login`] - login request and re-login
//! - [`crate::executor`] - authenticated request execution
//! - [`crate::probe`] - connection diagnostics
//!
//! This module holds URL resolution and the article actions, which only
//! build a URL and delegate to the executor.

use std::time::Duration;
use tracing::{debug, info, instrument};
use url::Url;
use wallabag_core::{Credentials, ExportFormat, FeedsCredentials};

use crate::error::ClientError;
use crate::executor::ExecuteOptions;
use crate::identifier;
use crate::transport::{HttpTransport, Request, Transport};

/// Path of the user configuration page.
const CONFIG_PATH: &str = "/config";

// ============================================================================
// Service Endpoint
// ============================================================================

/// Client for one wallabag installation and one set of credentials.
#[derive(Debug)]
pub struct ServiceEndpoint<T: Transport = HttpTransport> {
    pub(crate) base_url: String,
    pub(crate) credentials: Credentials,
    pub(crate) transport: T,
}

impl ServiceEndpoint<HttpTransport> {
    /// Creates an endpoint with an HTTP transport built from the credentials.
    ///
    /// HTTP Basic auth is enabled when an HTTP auth username is set.
    pub fn connect(
        base_url: impl Into<String>,
        credentials: Credentials,
        timeout: Duration,
    ) -> Result<Self, ClientError> {
        let transport = HttpTransport::builder()
            .timeout(timeout)
            .http_auth(
                credentials.http_auth_username.clone(),
                credentials.http_auth_password.clone(),
            )
            .build()?;
        Ok(Self::new(base_url, credentials, transport))
    }
}

impl<T: Transport> ServiceEndpoint<T> {
    /// Creates an endpoint over the given transport.
    ///
    /// Trailing slashes of `base_url` are dropped.
    pub fn new(base_url: impl Into<String>, credentials: Credentials, transport: T) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            credentials,
            transport,
        }
    }

    /// Returns the base URL without trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the credentials.
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Returns the transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Resolves `path` against the base URL.
    ///
    /// Only absolute `http`/`https` URLs with a host are accepted.
    pub fn resolve(&self, path: &str) -> Result<Url, ClientError> {
        parse_http_url(&format!("{}{}", self.base_url, path)).ok_or_else(|| {
            ClientError::IncorrectConfiguration(format!(
                "invalid wallabag URL: {:?}",
                self.base_url
            ))
        })
    }

    /// Builds a GET request for `path`.
    pub fn get_request(&self, path: &str) -> Result<Request, ClientError> {
        Ok(Request::get(self.resolve(path)?))
    }

    // ========================================================================
    // Article Actions
    // ========================================================================

    /// Saves a link.
    #[instrument(skip(self))]
    pub async fn add_link(&self, link: &str) -> Result<bool, ClientError> {
        let mut url = self.resolve("/bookmarklet")?;
        url.query_pairs_mut().append_pair("url", link);
        self.execute_request(&Request::get(url)).await
    }

    /// Toggles the archived flag of an article.
    #[instrument(skip(self))]
    pub async fn toggle_archive(&self, article_id: u64) -> Result<bool, ClientError> {
        let request = self.get_request(&format!("/archive/{article_id}"))?;
        self.execute_request_ignoring_not_found(&request).await
    }

    /// Toggles the starred flag of an article.
    #[instrument(skip(self))]
    pub async fn toggle_favorite(&self, article_id: u64) -> Result<bool, ClientError> {
        let request = self.get_request(&format!("/star/{article_id}"))?;
        self.execute_request_ignoring_not_found(&request).await
    }

    /// Deletes an article.
    #[instrument(skip(self))]
    pub async fn delete_article(&self, article_id: u64) -> Result<bool, ClientError> {
        let request = self.get_request(&format!("/delete/{article_id}"))?;
        self.execute_request_ignoring_not_found(&request).await
    }

    /// Returns the download URL of an article export. No request is made.
    pub fn export_url(&self, article_id: u64, format: ExportFormat) -> String {
        let url = format!("{}/export/{}.{}", self.base_url, article_id, format.extension());
        debug!(url = %url, "Export URL");
        url
    }

    /// Asks the server to generate a new feeds token.
    #[instrument(skip(self))]
    pub async fn generate_feeds_token(&self) -> Result<bool, ClientError> {
        let request = self.get_request("/generate-token")?;
        self.execute_request(&request).await
    }

    // ========================================================================
    // Feeds Credentials
    // ========================================================================

    /// Scrapes the feeds user id and token from the config page.
    ///
    /// Returns `None` if the page has no feed link. The user id is checked
    /// against the known username, see [`identifier::reconcile_user_id`].
    #[instrument(skip(self))]
    pub async fn get_feeds_credentials(&self) -> Result<Option<FeedsCredentials>, ClientError> {
        let request = self.get_request(CONFIG_PATH)?;
        let body = self
            .execute_request_for_result(&request, ExecuteOptions::default())
            .await?;

        let Some(feeds) = identifier::extract_feeds_credentials(&body) else {
            info!("No feeds credentials found on config page");
            return Ok(None);
        };

        Ok(Some(identifier::reconcile_user_id(
            feeds,
            self.credentials.presumed_username(),
        )))
    }
}

/// Parses an absolute `http`/`https` URL with a host.
pub(crate) fn parse_http_url(s: &str) -> Option<Url> {
    let url = Url::parse(s).ok()?;
    let is_http = matches!(url.scheme(), "http" | "https");
    (is_http && url.host_str().is_some_and(|h| !h.is_empty())).then_some(url)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::Response;
    use crate::transport::scripted::{ScriptedTransport, pages};
    use wallabag_core::IdentifierCheck;

    const BASE: &str = "https://bag.example.com";

    fn endpoint(responses: Vec<Response>) -> ServiceEndpoint<ScriptedTransport> {
        ServiceEndpoint::new(
            BASE,
            Credentials::new("alice", "secret"),
            ScriptedTransport::new(responses),
        )
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let ep = ServiceEndpoint::new(
            "https://bag.example.com/sub//",
            Credentials::default(),
            ScriptedTransport::default(),
        );
        assert_eq!(ep.base_url(), "https://bag.example.com/sub");
        assert_eq!(
            ep.resolve("/config").unwrap().as_str(),
            "https://bag.example.com/sub/config"
        );
    }

    #[test]
    fn test_connect_configures_transport() {
        let mut credentials = Credentials::new("alice", "secret");
        credentials.http_auth_username = Some("proxy".to_string());
        credentials.http_auth_password = Some("pw".to_string());

        let ep = ServiceEndpoint::connect(
            "https://bag.example.com/",
            credentials,
            Duration::from_secs(7),
        )
        .unwrap();

        assert_eq!(ep.base_url(), BASE);
        assert_eq!(ep.transport().timeout(), Duration::from_secs(7));
        assert!(ep.transport().uses_basic_auth());
    }

    #[test]
    fn test_resolve_rejects_bad_urls() {
        for base in ["", "bag.example.com", "ftp://bag.example.com", "https://"] {
            let ep = ServiceEndpoint::new(base, Credentials::default(), ScriptedTransport::default());
            let err = ep.resolve("/").unwrap_err();
            assert!(
                matches!(err, ClientError::IncorrectConfiguration(_)),
                "base {base:?}"
            );
        }
    }

    #[test]
    fn test_export_url() {
        let ep = endpoint(vec![]);
        assert_eq!(
            ep.export_url(42, ExportFormat::Epub),
            "https://bag.example.com/export/42.epub"
        );
        assert_eq!(ep.transport().calls(), 0);
    }

    #[tokio::test]
    async fn test_add_link_encodes_url() {
        let ep = endpoint(vec![Response::ok(pages::regular_page())]);
        assert!(ep.add_link("https://news.example.org/a?b=c&d").await.unwrap());

        let requests = ep.transport().requests();
        let url = requests[0].url();
        assert_eq!(url.path(), "/bookmarklet");
        let (key, value) = url.query_pairs().next().unwrap();
        assert_eq!(key, "url");
        assert_eq!(value, "https://news.example.org/a?b=c&d");
    }

    #[tokio::test]
    async fn test_toggle_paths() {
        let ep = endpoint(vec![
            Response::ok(pages::regular_page()),
            Response::ok(pages::regular_page()),
            Response::ok(pages::regular_page()),
        ]);
        assert!(ep.toggle_archive(7).await.unwrap());
        assert!(ep.toggle_favorite(7).await.unwrap());
        assert!(ep.delete_article(7).await.unwrap());

        assert_eq!(
            ep.transport().trail(),
            vec!["GET /archive/7", "GET /star/7", "GET /delete/7"]
        );
    }

    #[tokio::test]
    async fn test_delete_already_gone_is_success() {
        let ep = endpoint(vec![Response::new(404, "not found")]);
        assert!(ep.delete_article(99).await.unwrap());
    }

    #[tokio::test]
    async fn test_add_link_404_is_error() {
        let ep = endpoint(vec![Response::new(404, "not found")]);
        let err = ep.add_link("https://example.org").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_generate_feeds_token() {
        let ep = endpoint(vec![Response::ok(pages::regular_page())]);
        assert!(ep.generate_feeds_token().await.unwrap());
        assert_eq!(ep.transport().trail(), vec!["GET /generate-token"]);
    }

    #[tokio::test]
    async fn test_get_feeds_credentials_trims_subdirectory() {
        let ep = endpoint(vec![Response::ok(pages::config_page(
            "/wallabag/alice/AbC123/unread.xml",
        ))]);

        let feeds = ep.get_feeds_credentials().await.unwrap().unwrap();
        assert_eq!(feeds.user_id, "alice");
        assert_eq!(feeds.token, "AbC123");
        assert_eq!(feeds.check, IdentifierCheck::Trimmed);
        assert_eq!(ep.transport().trail(), vec!["GET /config"]);
    }

    #[tokio::test]
    async fn test_get_feeds_credentials_http_auth_username() {
        let ep = ServiceEndpoint::new(
            BASE,
            Credentials::default().with_http_auth("bob", "pw"),
            ScriptedTransport::new([Response::ok(pages::config_page("/x/bob/T0k/unread.xml"))]),
        );

        let feeds = ep.get_feeds_credentials().await.unwrap().unwrap();
        assert_eq!(feeds.user_id, "bob");
    }

    #[tokio::test]
    async fn test_get_feeds_credentials_missing() {
        let ep = endpoint(vec![Response::ok(pages::regular_page())]);
        assert!(ep.get_feeds_credentials().await.unwrap().is_none());
    }
}
