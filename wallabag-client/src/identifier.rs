//! Feeds credentials extraction from the config page.
//!
//! The config page links the user's feeds as
//! `"/<user id>/<token>/unread.xml"`. If wallabag is installed in a
//! subdirectory the captured user id also contains that directory, e.g.
//! `https://example.com/wallabag/complex/user/name/token/unread.xml` yields
//! `wallabag/complex/user/name` instead of `complex/user/name`. The length of
//! the known username is used to cut that prefix off. This is a heuristic and
//! can be wrong.

use regex::Regex;
use std::sync::LazyLock;
use tracing::{debug, info, warn};
use wallabag_core::{FeedsCredentials, IdentifierCheck};

/// Feed link pattern: user id and token.
pub const FEEDS_CREDENTIALS_PATTERN: &str = r#""/(\S+)/([a-zA-Z0-9]+)/unread\.xml""#;

static FEEDS_CREDENTIALS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(FEEDS_CREDENTIALS_PATTERN).expect("Invalid regex"));

/// Finds the first match of `pattern` and returns its first two groups.
pub fn extract_pair(body: &str, pattern: &Regex) -> Option<(String, String)> {
    let captures = pattern.captures(body)?;
    let first = captures.get(1)?.as_str().to_string();
    let second = captures.get(2)?.as_str().to_string();
    Some((first, second))
}

/// Extracts the raw feeds credentials from a config page body.
///
/// The returned credentials are [`IdentifierCheck::Unverified`]; pass them
/// through [`reconcile_user_id`] to apply the username check.
pub fn extract_feeds_credentials(body: &str) -> Option<FeedsCredentials> {
    let (user_id, token) = extract_pair(body, &FEEDS_CREDENTIALS_RE)?;
    debug!(user_id = %user_id, "Found feeds credentials");
    Some(FeedsCredentials::new(user_id, token))
}

/// Checks the user id against the presumed username's length.
///
/// - equal length: accepted
/// - longer: only the trailing username-length suffix is kept
/// - shorter, or no username: kept as-is and flagged as unverified
///
/// Never fails. Unverified ids are reported with a warning because they may
/// still work against the feed endpoint.
pub fn reconcile_user_id(
    mut feeds: FeedsCredentials,
    presumed_username: Option<&str>,
) -> FeedsCredentials {
    let expected_len = presumed_username.map_or(0, |u| u.chars().count());
    let actual_len = feeds.user_id.chars().count();

    feeds.check = if expected_len == 0 {
        info!("No presumed username, can't check feeds user id");
        IdentifierCheck::Unverified
    } else if actual_len == expected_len {
        IdentifierCheck::Matched
    } else if actual_len > expected_len {
        debug!(actual_len, expected_len, "Feeds user id is longer than presumed username");
        feeds.user_id = feeds.user_id.chars().skip(actual_len - expected_len).collect();
        IdentifierCheck::Trimmed
    } else {
        info!(actual_len, expected_len, "Feeds user id is shorter than presumed username");
        IdentifierCheck::Unverified
    };

    if feeds.check.is_uncertain() {
        warn!(
            user_id = %feeds.user_id,
            "Feeds user id could not be verified; if feeds do not work, check the feeds user id"
        );
    }

    feeds
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::scripted::pages;
    use std::io;
    use std::sync::{Arc, Mutex};

    fn feeds(user_id: &str) -> FeedsCredentials {
        FeedsCredentials::new(user_id, "Tok3n")
    }

    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl io::Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    /// Runs `f` and returns the WARN and above log lines it emitted.
    fn warnings_during(f: impl FnOnce()) -> String {
        let buffer = Arc::new(Mutex::new(Vec::new()));
        let writer = {
            let buffer = Arc::clone(&buffer);
            move || SharedBuffer(Arc::clone(&buffer))
        };
        let subscriber = tracing_subscriber::fmt()
            .with_writer(writer)
            .with_max_level(tracing::Level::WARN)
            .with_ansi(false)
            .finish();

        tracing::subscriber::with_default(subscriber, f);
        let bytes = buffer.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn test_extract_from_config_page() {
        let body = pages::config_page("/alice/AbC123xyz/unread.xml");
        let extracted = extract_feeds_credentials(&body).unwrap();
        assert_eq!(extracted.user_id, "alice");
        assert_eq!(extracted.token, "AbC123xyz");
        assert_eq!(extracted.check, IdentifierCheck::Unverified);
    }

    #[test]
    fn test_extract_with_subdirectory() {
        let body = pages::config_page("/wallabag/alice/AbC123/unread.xml");
        let extracted = extract_feeds_credentials(&body).unwrap();
        assert_eq!(extracted.user_id, "wallabag/alice");
        assert_eq!(extracted.token, "AbC123");
    }

    #[test]
    fn test_extract_missing() {
        assert!(extract_feeds_credentials(&pages::regular_page()).is_none());
        assert!(extract_feeds_credentials("").is_none());
        // Token must be alphanumeric.
        assert!(extract_feeds_credentials(r#""/alice/tok-en/unread.xml""#).is_none());
    }

    #[test]
    fn test_extract_pair_generic() {
        let pattern = Regex::new(r"(\w+)=(\d+)").unwrap();
        assert_eq!(
            extract_pair("a b=12 c=3", &pattern),
            Some(("b".to_string(), "12".to_string()))
        );
        assert_eq!(extract_pair("nothing", &pattern), None);
    }

    #[test]
    fn test_equal_length_accepted() {
        let result = reconcile_user_id(feeds("alice"), Some("alice"));
        assert_eq!(result.user_id, "alice");
        assert_eq!(result.check, IdentifierCheck::Matched);
    }

    #[test]
    fn test_longer_is_trimmed_to_suffix() {
        let result = reconcile_user_id(feeds("sub/alice"), Some("alice"));
        assert_eq!(result.user_id, "alice");
        assert_eq!(result.check, IdentifierCheck::Trimmed);

        let result = reconcile_user_id(
            feeds("wallabag/complex/user/name"),
            Some("complex/user/name"),
        );
        assert_eq!(result.user_id, "complex/user/name");
    }

    #[test]
    fn test_shorter_is_kept_and_flagged() {
        let result = reconcile_user_id(feeds("bob"), Some("alice"));
        assert_eq!(result.user_id, "bob");
        assert!(result.check.is_uncertain());
    }

    #[test]
    fn test_no_username_is_flagged() {
        let result = reconcile_user_id(feeds("sub/alice"), None);
        assert_eq!(result.user_id, "sub/alice");
        assert!(result.check.is_uncertain());

        let result = reconcile_user_id(feeds("sub/alice"), Some(""));
        assert!(result.check.is_uncertain());
    }

    #[test]
    fn test_unverified_id_logs_warning() {
        let logs = warnings_during(|| {
            reconcile_user_id(feeds("bob"), Some("alice"));
        });
        assert!(logs.contains("WARN"));
        assert!(logs.contains("check the feeds user id"));
        assert!(logs.contains("user_id=bob"));

        let logs = warnings_during(|| {
            reconcile_user_id(feeds("sub/alice"), None);
        });
        assert!(logs.contains("check the feeds user id"));
    }

    #[test]
    fn test_verified_id_logs_no_warning() {
        let logs = warnings_during(|| {
            reconcile_user_id(feeds("alice"), Some("alice"));
            reconcile_user_id(feeds("sub/alice"), Some("alice"));
        });
        assert!(logs.is_empty(), "unexpected warnings: {logs}");
    }

    #[test]
    fn test_multibyte_username() {
        let result = reconcile_user_id(feeds("dir/jürgen"), Some("jürgen"));
        assert_eq!(result.user_id, "jürgen");
        assert_eq!(result.check, IdentifierCheck::Trimmed);
    }
}
