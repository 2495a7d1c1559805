//! JSON output formatting.

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};
use wallabag_core::{ConnectionReport, FeedsCredentials, IdentifierCheck};

// ============================================================================
// Output Types
// ============================================================================

/// Connection test output.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionOutput {
    pub url: String,
    pub result: String,
    pub ok: bool,
    pub description: String,
    #[serde(serialize_with = "serialize_datetime")]
    pub checked_at: DateTime<Utc>,
}

/// Feeds credentials output.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedsOutput {
    pub user_id: String,
    pub token: String,
    pub check: IdentifierCheck,
    pub unread_feed_url: String,
    pub saved: bool,
}

/// Article action output.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionOutput {
    pub action: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub article_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub success: bool,
}

/// Fetched page output.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageOutput {
    pub url: String,
    pub body: String,
}

// ============================================================================
// Serialization helpers
// ============================================================================

fn serialize_datetime<S>(dt: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    s.serialize_str(&dt.to_rfc3339())
}

// ============================================================================
// JSON Formatter
// ============================================================================

/// JSON formatter.
pub struct JsonFormatter {
    pretty: bool,
}

impl JsonFormatter {
    /// Creates a new JSON formatter.
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    /// Formats any serializable value.
    pub fn format<T: Serialize>(&self, data: &T) -> Result<String> {
        let json = if self.pretty {
            serde_json::to_string_pretty(data)?
        } else {
            serde_json::to_string(data)?
        };
        Ok(json)
    }

    /// Formats a connection test outcome.
    pub fn format_connection(&self, report: &ConnectionReport) -> Result<String> {
        self.format(&connection_to_output(report))
    }

    /// Formats discovered feeds credentials.
    pub fn format_feeds(
        &self,
        feeds: &FeedsCredentials,
        base_url: &str,
        saved: bool,
    ) -> Result<String> {
        self.format(&FeedsOutput {
            user_id: feeds.user_id.clone(),
            token: feeds.token.clone(),
            check: feeds.check,
            unread_feed_url: feeds.unread_feed_url(base_url),
            saved,
        })
    }
}

/// Converts a connection report to output.
pub fn connection_to_output(report: &ConnectionReport) -> ConnectionOutput {
    ConnectionOutput {
        url: report.url.clone(),
        result: report.result.code().to_string(),
        ok: report.is_ok(),
        description: report.result.description().to_string(),
        checked_at: report.checked_at,
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_pretty() {
        let formatter = JsonFormatter::new(true);
        let data = serde_json::json!({"key": "value"});
        let output = formatter.format(&data).unwrap();
        assert!(output.contains('\n'));
    }

    #[test]
    fn test_format_compact() {
        let formatter = JsonFormatter::new(false);
        let data = serde_json::json!({"key": "value"});
        let output = formatter.format(&data).unwrap();
        assert!(!output.contains('\n'));
    }

    #[test]
    fn test_action_output_skips_missing_fields() {
        let formatter = JsonFormatter::new(false);
        let output = formatter
            .format(&ActionOutput {
                action: "archive".to_string(),
                article_id: Some(4),
                url: None,
                success: true,
            })
            .unwrap();
        assert_eq!(output, r#"{"action":"archive","articleId":4,"success":true}"#);
    }
}
