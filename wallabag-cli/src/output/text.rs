//! Text output formatting with colors.

use chrono::Local;
use wallabag_core::{ConnectionReport, FeedsCredentials, IdentifierCheck};
use wallabag_store::ServerConfig;

// ============================================================================
// ANSI Colors
// ============================================================================

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const RED: &str = "\x1b[31m";
const CYAN: &str = "\x1b[36m";

const CHECK: &str = "✓";
const CROSS: &str = "✗";

/// Text formatter with optional colors.
pub struct TextFormatter {
    use_colors: bool,
}

impl TextFormatter {
    /// Creates a new text formatter.
    pub fn new(use_colors: bool) -> Self {
        Self { use_colors }
    }

    /// Formats a connection test outcome.
    pub fn format_connection(&self, report: &ConnectionReport) -> String {
        let mut lines = Vec::new();

        let status = if report.is_ok() {
            self.green(&format!("{CHECK} {}", report.result.code()))
        } else {
            self.red(&format!("{CROSS} {}", report.result.code()))
        };
        lines.push(format!("{} {}", self.bold(&report.url), status));
        lines.push(format!("  {}", report.result.description()));
        lines.push(self.dim(&format!(
            "  Checked at {}",
            report.checked_at.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S")
        )));

        lines.join("\n")
    }

    /// Formats discovered feeds credentials.
    pub fn format_feeds(&self, feeds: &FeedsCredentials, base_url: &str) -> String {
        let check = match feeds.check {
            IdentifierCheck::Matched => self.green("verified"),
            IdentifierCheck::Trimmed => self.yellow("installation path removed"),
            IdentifierCheck::Unverified => self.red("not verified"),
        };

        let mut lines = vec![
            format!("User id:     {} ({check})", self.cyan(&feeds.user_id)),
            format!("Token:       {}", feeds.token),
            format!("Unread feed: {}", feeds.unread_feed_url(base_url)),
        ];
        if feeds.check.is_uncertain() {
            lines.push(self.yellow(
                "If the feeds do not work, check the user id in the feed URL on the config page.",
            ));
        }

        lines.join("\n")
    }

    /// Formats the outcome of an article action.
    pub fn format_action(&self, message: &str, success: bool) -> String {
        if success {
            format!("{} {message}", self.green(CHECK))
        } else {
            format!("{} {message}", self.red(CROSS))
        }
    }

    /// Formats the stored configuration. Secrets must already be masked.
    pub fn format_config(&self, config: &ServerConfig) -> String {
        let value = |v: &Option<String>| match v {
            Some(v) => v.clone(),
            None => self.dim("(not set)"),
        };

        let lines = [
            self.bold("wallabag Configuration"),
            "─".repeat(40),
            format!("URL:                {}", value(&config.url)),
            format!("Username:           {}", value(&config.username)),
            format!("Password:           {}", value(&config.password)),
            format!("HTTP auth username: {}", value(&config.http_auth_username)),
            format!("HTTP auth password: {}", value(&config.http_auth_password)),
            format!("Feeds user id:      {}", value(&config.feeds_user_id)),
            format!("Feeds token:        {}", value(&config.feeds_token)),
            format!("Timeout:            {}s", config.timeout_secs),
        ];

        lines.join("\n")
    }

    // ========================================================================
    // Color Helpers
    // ========================================================================

    fn paint(&self, color: &str, text: &str) -> String {
        if self.use_colors {
            format!("{color}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    fn bold(&self, text: &str) -> String {
        self.paint(BOLD, text)
    }

    fn dim(&self, text: &str) -> String {
        self.paint(DIM, text)
    }

    fn green(&self, text: &str) -> String {
        self.paint(GREEN, text)
    }

    fn yellow(&self, text: &str) -> String {
        self.paint(YELLOW, text)
    }

    fn red(&self, text: &str) -> String {
        self.paint(RED, text)
    }

    fn cyan(&self, text: &str) -> String {
        self.paint(CYAN, text)
    }
}

// ============================================================================
// Tests
// ============================================================================
