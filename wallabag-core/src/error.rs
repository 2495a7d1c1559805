//! Core error types.

use thiserror::Error;

/// Core error type for the wallabag model layer.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Export format name not known to the server.
    #[error("Unknown export format: {0}")]
    UnknownExportFormat(String),
}
