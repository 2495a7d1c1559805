// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # Wallabag Client
//!
//! Session-authenticated HTTP client for wallabag's HTML form login.
//!
//! wallabag's web UI has no token API for the operations used here. The
//! client logs in through the login form, keeps the session cookie in the
//! transport and recognizes an expired session by the login page coming back
//! in place of the requested content.
//!
//! ## Page Analysis
//!
//! - [`page`] - Classifies response bodies by marker substrings
//! - [`csrf`] - Extracts the login form's CSRF token
//! - [`identifier`] - Scrapes and corrects the feeds user id
//!
//! ## Session Protocol
//!
//! - [`login`] - Login form submission
//! - [`executor`] - Authenticated execution with one re-login and one retry
//! - [`probe`] - Step-by-step connection diagnostics
//!
//! ## Transport
//!
//! - [`transport::Transport`] - Trait for request execution
//! - [`transport::HttpTransport`] - `reqwest` implementation with cookie jar
//!
//! ## Example
//!
//! ```ignore
//! use std::time::Duration;
//! use wallabag_client::ServiceEndpoint;
//! use wallabag_core::Credentials;
//!
//! let endpoint = ServiceEndpoint::connect(
//!     "https://bag.example.com",
//!     Credentials::new("alice", "secret"),
//!     Duration::from_secs(30),
//! )?;
//!
//! let result = endpoint.test_connection().await?;
//! endpoint.toggle_archive(42).await?;
//! ```

// Core modules
pub mod csrf;
pub mod endpoint;
pub mod error;
pub mod executor;
pub mod identifier;
pub mod login;
pub mod page;
pub mod probe;
pub mod transport;

// Errors
pub use error::{ClientError, HttpError};

// Endpoint & execution
pub use endpoint::ServiceEndpoint;
pub use executor::{ExecuteOptions, ReloginState};

// Page analysis
pub use csrf::extract_csrf_token;
pub use identifier::{extract_feeds_credentials, reconcile_user_id};
pub use page::{classify, is_login_page, is_login_page_of_other_version, is_regular_page};

// Transport
pub use transport::{HttpTransport, HttpTransportBuilder, Method, Request, Response, Transport};
