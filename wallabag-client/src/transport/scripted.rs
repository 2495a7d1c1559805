//! Scripted transport for tests.
//!
//! Returns queued responses in order and records every request it saw.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

use super::{Method, Request, Response, Transport};
use crate::error::HttpError;

/// Transport double that replays a fixed response sequence.
#[derive(Debug, Default)]
pub(crate) struct ScriptedTransport {
    responses: Mutex<VecDeque<Response>>,
    requests: Mutex<Vec<Request>>,
}

impl ScriptedTransport {
    pub(crate) fn new(responses: impl IntoIterator<Item = Response>) -> Self {
        Self {
            responses: Mutex::new(responses.into_iter().collect()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Number of requests executed so far.
    pub(crate) fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// All requests executed so far.
    pub(crate) fn requests(&self) -> Vec<Request> {
        self.requests.lock().unwrap().clone()
    }

    /// `METHOD path` of every executed request.
    pub(crate) fn trail(&self) -> Vec<String> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .map(|r| format!("{} {}", r.method(), r.url().path()))
            .collect()
    }

    /// Number of queued responses not consumed yet.
    pub(crate) fn remaining(&self) -> usize {
        self.responses.lock().unwrap().len()
    }

    pub(crate) fn posts(&self) -> usize {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.method() == Method::Post)
            .count()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn execute(&self, request: &Request) -> Result<Response, HttpError> {
        self.requests.lock().unwrap().push(request.clone());
        let next = self.responses.lock().unwrap().pop_front();
        Ok(next.unwrap_or_else(|| panic!("no scripted response left for {request:?}")))
    }
}

// ============================================================================
// HTML fixtures
// ============================================================================

pub(crate) mod pages {
    pub(crate) const TOKEN: &str = "5tXq-token_0123";

    pub(crate) fn login_page() -> String {
        login_page_with_token(TOKEN)
    }

    pub(crate) fn login_page_with_token(token: &str) -> String {
        format!(
            r#"<html><body>
<img src="/img/logo.svg" alt="wallabag logo" />
<form action="/login_check" method="post" name="loginform">
<input type="text" name="_username" />
<input type="password" name="_password" />
<input type="hidden" name="_csrf_token" value="{token}" />
</form></body></html>"#
        )
    }

    pub(crate) fn login_page_without_token() -> String {
        r#"<html><body>
<img src="/img/logo.svg" alt="wallabag logo" />
<form action="/login_check" method="post" name="loginform">
<input type="text" name="_username" />
</form></body></html>"#
            .to_string()
    }

    pub(crate) fn regular_page() -> String {
        r#"<html><body>
<img src="/img/logo.svg" alt="wallabag logo" />
<ul><li><a href="/unread/list">Unread</a></li><li><a href="/logout">Logout</a></li></ul>
</body></html>"#
            .to_string()
    }

    pub(crate) fn v1_login_page() -> String {
        r#"<html><body>
<form method="post" action="?login" name="loginform">
<input type="text" name="login" />
</form></body></html>"#
            .to_string()
    }

    pub(crate) fn unrelated_page() -> String {
        "<html><body><h1>It works!</h1></body></html>".to_string()
    }

    pub(crate) fn config_page(feed_path: &str) -> String {
        format!(
            r#"<html><body>
<img src="/img/logo.svg" alt="wallabag logo" />
<a href="/logout">Logout</a>
<a href="{feed_path}">Unread feed</a>
</body></html>"#
        )
    }
}
