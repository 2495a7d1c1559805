//! Domain models for the wallabag client.
//!
//! ## Submodules
//!
//! - [`page`] - Classification of response bodies
//! - [`connection`] - Connection diagnostic outcomes
//! - [`credentials`] - Login credentials and scraped feeds credentials
//! - [`export`] - Article export formats

mod connection;
mod credentials;
mod export;
mod page;

// Re-export everything at the models level
pub use connection::{ConnectionReport, ConnectionTestResult};
pub use credentials::{Credentials, FeedsCredentials, IdentifierCheck};
pub use export::ExportFormat;
pub use page::PageSignal;
