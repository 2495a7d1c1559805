// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # Wallabag Core
//!
//! Core types and models shared by the wallabag session client crates.
//!
//! This crate holds the plain data model only. Anything that talks to the
//! network lives in `wallabag-client`, anything that touches the disk lives
//! in `wallabag-store`.
//!
//! ## Key Types
//!
//! ### Page & Connection
//! - [`PageSignal`] - What a server response body looks like
//! - [`ConnectionTestResult`] - Outcome of the connection diagnostic
//! - [`ConnectionReport`] - A timestamped connection outcome
//!
//! ### Credentials
//! - [`Credentials`] - Form login and HTTP-auth credentials
//! - [`FeedsCredentials`] - Feed user id and token scraped from the config page
//! - [`IdentifierCheck`] - How far the feeds user id could be verified
//!
//! ### Articles
//! - [`ExportFormat`] - Export file types offered by the server

pub mod error;
pub mod models;

// Re-export error types
pub use error::CoreError;

// Re-export all model types
pub use models::{
    // Page & connection
    ConnectionReport,
    ConnectionTestResult,
    PageSignal,
    // Credentials
    Credentials,
    FeedsCredentials,
    IdentifierCheck,
    // Articles
    ExportFormat,
};
