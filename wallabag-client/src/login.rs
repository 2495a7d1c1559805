//! Form login.
//!
//! A login is a POST of the login form to `/login_check` carrying the
//! username, the password and the CSRF token of a freshly fetched login page.

use tracing::{debug, instrument, warn};

use crate::csrf;
use crate::endpoint::ServiceEndpoint;
use crate::error::ClientError;
use crate::page;
use crate::transport::{Request, Transport};

/// Path the login form posts to.
pub const LOGIN_CHECK_PATH: &str = "/login_check";

/// Message carried by [`ClientError::IncorrectCredentials`].
pub const WRONG_CREDENTIALS_MESSAGE: &str = "Wrong username or password";

/// Form field names.
pub mod fields {
    /// Username field.
    pub const USERNAME: &str = "_username";
    /// Password field.
    pub const PASSWORD: &str = "_password";
    /// CSRF token field.
    pub const CSRF_TOKEN: &str = "_csrf_token";
    /// Remember-me checkbox.
    pub const REMEMBER_ME: &str = "_remember_me";
}

impl<T: Transport> ServiceEndpoint<T> {
    /// Builds the login form submission.
    ///
    /// Unset credentials are sent as empty strings; no field is ever omitted.
    pub fn login_request(&self, csrf_token: &str) -> Result<Request, ClientError> {
        let url = self.resolve(LOGIN_CHECK_PATH)?;
        let username = self.credentials.username.as_deref().unwrap_or_default();
        let password = self.credentials.password.as_deref().unwrap_or_default();

        Ok(Request::post_form(
            url,
            [
                (fields::USERNAME, username),
                (fields::PASSWORD, password),
                (fields::CSRF_TOKEN, csrf_token),
                (fields::REMEMBER_ME, "on"),
            ],
        ))
    }

    /// Builds a plain GET of the base URL.
    ///
    /// Used to get a login page whose form carries no pending redirect to the
    /// originally requested resource.
    pub fn clean_login_page_request(&self) -> Result<Request, ClientError> {
        self.get_request("/")
    }

    /// Fetches a fresh login page and submits the credentials.
    ///
    /// Makes exactly two requests. Fails if the fresh page is not a login
    /// page, has no CSRF token, or the login form comes back again.
    #[instrument(skip(self))]
    pub(crate) async fn relogin(&self, check_response: bool) -> Result<(), ClientError> {
        let response = self
            .transport
            .execute(&self.clean_login_page_request()?)
            .await?;
        if !page::is_login_page(&response.body) {
            warn!(status = response.status, "Got no login page after requesting endpoint");
            return Err(ClientError::LoginPageExpected);
        }

        let Some(token) = csrf::extract_csrf_token(&response.body) else {
            warn!("Found no CSRF token in login page");
            return Err(ClientError::CsrfTokenNotFound);
        };

        let login_response = self.transport.execute(&self.login_request(token)?).await?;
        if check_response {
            self.transport.check_response(&login_response)?;
        }
        if page::is_login_page(&login_response.body) {
            warn!("Still on login page after login, incorrect credentials");
            return Err(ClientError::IncorrectCredentials(
                WRONG_CREDENTIALS_MESSAGE.to_string(),
            ));
        }

        debug!("Re-login succeeded");
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
