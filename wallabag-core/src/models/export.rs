//! Article export formats.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

/// File formats the server can export an article to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// EPUB e-book.
    Epub,
    /// Mobipocket e-book.
    Mobi,
    /// PDF document.
    Pdf,
    /// Comma-separated values.
    Csv,
    /// JSON document.
    Json,
    /// Plain text.
    Txt,
    /// XML document.
    Xml,
}

impl ExportFormat {
    /// Returns all formats.
    pub fn all() -> &'static [ExportFormat] {
        &[
            Self::Epub,
            Self::Mobi,
            Self::Pdf,
            Self::Csv,
            Self::Json,
            Self::Txt,
            Self::Xml,
        ]
    }

    /// File extension used in the export URL.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Epub => "epub",
            Self::Mobi => "mobi",
            Self::Pdf => "pdf",
            Self::Csv => "csv",
            Self::Json => "json",
            Self::Txt => "txt",
            Self::Xml => "xml",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().trim_start_matches('.').to_lowercase();
        Self::all()
            .iter()
            .copied()
            .find(|format| format.extension() == wanted)
            .ok_or_else(|| CoreError::UnknownExportFormat(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("EPUB".parse::<ExportFormat>().unwrap(), ExportFormat::Epub);
        assert_eq!(".pdf".parse::<ExportFormat>().unwrap(), ExportFormat::Pdf);
    }

    #[test]
    fn test_parse_unknown() {
        let err = "docx".parse::<ExportFormat>().unwrap_err();
        assert!(matches!(err, CoreError::UnknownExportFormat(ref s) if s == "docx"));
    }
}
