//! Connection diagnostics.
//!
//! Runs the whole login sequence once against the base URL and reports the
//! first step that went wrong as a [`ConnectionTestResult`]. Only transport
//! failures are errors; everything the server says is a result.

use tracing::{debug, info, instrument};
use wallabag_core::{ConnectionReport, ConnectionTestResult, PageSignal};

use crate::csrf;
use crate::endpoint::{ServiceEndpoint, parse_http_url};
use crate::error::ClientError;
use crate::page;
use crate::transport::{Request, Transport};

/// Status code of a server asking for HTTP Basic auth.
const HTTP_UNAUTHORIZED: u16 = 401;

impl<T: Transport> ServiceEndpoint<T> {
    /// Checks that the endpoint hosts wallabag and the credentials work.
    ///
    /// Stateless: every call re-runs the full sequence. Response codes other
    /// than 401 are not checked, only the page content decides.
    #[instrument(skip(self), fields(base_url = %self.base_url))]
    pub async fn test_connection(&self) -> Result<ConnectionTestResult, ClientError> {
        let Some(url) = parse_http_url(&format!("{}/", self.base_url)) else {
            info!("Base URL is not a valid HTTP URL");
            return Ok(ConnectionTestResult::IncorrectURL);
        };
        let test_request = Request::get(url);

        let response = self.transport.execute(&test_request).await?;
        if response.status == HTTP_UNAUTHORIZED {
            info!("Server requires HTTP authentication");
            return Ok(ConnectionTestResult::HTTPAuth);
        }

        let body = response.body;
        match page::classify(&body) {
            PageSignal::RegularPage => {
                debug!("Already logged in");
                return Ok(ConnectionTestResult::OK);
            }
            PageSignal::LoginPageOtherVersion => {
                info!("Found login page of an unsupported wallabag version");
                return Ok(ConnectionTestResult::IncorrectServerVersion);
            }
            PageSignal::Unrecognized => {
                info!("No wallabag login page at base URL");
                return Ok(ConnectionTestResult::WallabagNotFound);
            }
            PageSignal::LoginPage => {}
        }

        let Some(token) = csrf::extract_csrf_token(&body) else {
            info!("Login page has no CSRF token");
            return Ok(ConnectionTestResult::NoCSRF);
        };

        let login_response = self.transport.execute(&self.login_request(token)?).await?;
        if page::is_login_page(&login_response.body) {
            info!("Login page shown again after login");
            return Ok(ConnectionTestResult::IncorrectCredentials);
        }

        let body = self.transport.execute(&test_request).await?.body;
        if page::is_login_page(&body) {
            info!("Session lost right after login");
            return Ok(ConnectionTestResult::AuthProblem);
        }
        if !page::is_regular_page(&body) {
            info!(signal = %page::classify(&body), "Unexpected page after login");
            return Ok(ConnectionTestResult::UnknownPageAfterLogin);
        }

        debug!("Connection test passed");
        Ok(ConnectionTestResult::OK)
    }

    /// Runs [`Self::test_connection`] and stamps the result.
    pub async fn test_connection_report(&self) -> Result<ConnectionReport, ClientError> {
        let result = self.test_connection().await?;
        Ok(ConnectionReport::new(self.base_url.clone(), result))
    }
}

// ============================================================================
// Tests
// ============================================================================
