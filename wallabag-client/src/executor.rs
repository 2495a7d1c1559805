//! Authenticated request execution.
//!
//! The server never says "session expired". An expired session shows up as
//! the login page in place of the requested content. The executor detects
//! that, logs in again once and re-sends the original request once:
//!
//! ```text
//! Unauthenticated --login page--> LoginAttempted --login page--> Retried (fail)
//!        |                              |
//!        +--other page--> body          +--other page--> body
//! ```
//!
//! There is no edge out of `Retried`, so a call makes at most one login and
//! one re-execution.

use tracing::{debug, info, instrument, warn};

use crate::endpoint::ServiceEndpoint;
use crate::error::ClientError;
use crate::page;
use crate::transport::{Request, Transport};

// ============================================================================
// Execute Options
// ============================================================================

/// Options for [`ServiceEndpoint::execute_request_for_result`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecuteOptions {
    /// Fail on non-2xx responses.
    pub check_response: bool,
    /// Log in again when the login page comes back.
    pub auto_relogin: bool,
}

impl ExecuteOptions {
    /// Options with re-login disabled.
    pub fn without_relogin() -> Self {
        Self {
            auto_relogin: false,
            ..Self::default()
        }
    }

    /// Sets whether response codes are checked.
    pub fn with_check_response(mut self, check: bool) -> Self {
        self.check_response = check;
        self
    }
}

impl Default for ExecuteOptions {
    fn default() -> Self {
        Self {
            check_response: true,
            auto_relogin: true,
        }
    }
}

// ============================================================================
// Relogin State
// ============================================================================

/// Position of one call in the re-login protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReloginState {
    /// First execution of the request.
    Unauthenticated,
    /// Logged in again, the request is executed a second time.
    LoginAttempted,
    /// The second execution also returned the login page.
    Retried,
}

// ============================================================================
// Executor
// ============================================================================

impl<T: Transport> ServiceEndpoint<T> {
    /// Executes `request` and returns the body of an authenticated page.
    ///
    /// With `auto_relogin` the call survives one session expiry: it fetches
    /// a clean login page, logs in and executes `request` once more.
    #[instrument(skip(self, request), fields(url = %request.url()))]
    pub async fn execute_request_for_result(
        &self,
        request: &Request,
        options: ExecuteOptions,
    ) -> Result<String, ClientError> {
        debug!(?options, "Executing request");

        let mut state = ReloginState::Unauthenticated;
        loop {
            state = match state {
                ReloginState::Unauthenticated => {
                    let body = self.execute_once(request, options.check_response).await?;
                    if !page::is_login_page(&body) {
                        debug!("Already logged in, returning body");
                        return Ok(body);
                    }
                    if !options.auto_relogin {
                        debug!("Response is login page and re-login is disabled");
                        return Err(ClientError::NotAuthorized);
                    }

                    debug!("Response is login page, trying to re-login");
                    self.relogin(options.check_response).await?;
                    ReloginState::LoginAttempted
                }
                ReloginState::LoginAttempted => {
                    debug!("Re-executing request after login");
                    let body = self.execute_once(request, options.check_response).await?;
                    if !page::is_login_page(&body) {
                        debug!("Request succeeded after re-login");
                        return Ok(body);
                    }
                    ReloginState::Retried
                }
                ReloginState::Retried => {
                    warn!("Login page again after re-login");
                    return Err(ClientError::UnstableSession);
                }
            };
        }
    }

    /// Executes `request` with status checking and auto re-login.
    pub async fn execute_request(&self, request: &Request) -> Result<bool, ClientError> {
        self.execute_request_for_result(request, ExecuteOptions::default())
            .await?;
        Ok(true)
    }

    /// Like [`Self::execute_request`] but treats HTTP 404 as success.
    ///
    /// For idempotent actions where "already gone" is an acceptable outcome.
    pub async fn execute_request_ignoring_not_found(
        &self,
        request: &Request,
    ) -> Result<bool, ClientError> {
        match self.execute_request(request).await {
            Err(err) if err.is_not_found() => {
                info!(url = %request.url(), "Ignoring HTTP 404");
                Ok(true)
            }
            other => other,
        }
    }

    async fn execute_once(
        &self,
        request: &Request,
        check_response: bool,
    ) -> Result<String, ClientError> {
        let response = self.transport.execute(request).await?;
        if check_response {
            self.transport.check_response(&response)?;
        }
        Ok(response.body)
    }
}

// ============================================================================
// Tests
// ============================================================================
