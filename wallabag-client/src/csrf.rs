//! CSRF token extraction from the login form.

use tracing::debug;

/// Text right before the token value.
pub const CSRF_TOKEN_START: &str = "name=\"_csrf_token\" value=\"";

/// Text right after the token value.
pub const CSRF_TOKEN_END: &str = "\" />";

/// Extracts the CSRF token from a login page body.
///
/// Returns `None` if either delimiter is missing; a half-present field is
/// treated exactly like a missing one.
pub fn extract_csrf_token(body: &str) -> Option<&str> {
    let Some(start) = body.find(CSRF_TOKEN_START) else {
        debug!("CSRF token start not found");
        return None;
    };
    let start = start + CSRF_TOKEN_START.len();

    let Some(len) = body[start..].find(CSRF_TOKEN_END) else {
        debug!("CSRF token end not found");
        return None;
    };

    debug!(len, "CSRF token found");
    Some(&body[start..start + len])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wrap(prefix: &str, token: &str, suffix: &str) -> String {
        format!("{prefix}{CSRF_TOKEN_START}{token}{CSRF_TOKEN_END}{suffix}")
    }

    #[test]
    fn test_extracts_token_between_delimiters() {
        for token in ["abc", "Zx9-_.~", "a b c", "ü🔑", ""] {
            let body = wrap("<form>\n<input type=\"hidden\" ", token, "\n</form>");
            assert_eq!(extract_csrf_token(&body), Some(token), "token {token:?}");
        }
    }

    #[test]
    fn test_full_hidden_input() {
        let body = r#"<input type="hidden" name="_csrf_token" value="T0k3n" />"#;
        assert_eq!(extract_csrf_token(body), Some("T0k3n"));
    }

    #[test]
    fn test_missing_start() {
        assert_eq!(extract_csrf_token(r#"<input name="other" value="x" />"#), None);
        assert_eq!(extract_csrf_token(""), None);
    }

    #[test]
    fn test_missing_end_is_absent_not_truncated() {
        let body = format!("{CSRF_TOKEN_START}half-a-token\">");
        assert_eq!(extract_csrf_token(&body), None);
    }

    #[test]
    fn test_end_before_start_is_ignored() {
        // A closing delimiter earlier in the page must not be used.
        let body = format!("<img {CSRF_TOKEN_END}{CSRF_TOKEN_START}late");
        assert_eq!(extract_csrf_token(&body), None);
    }

    #[test]
    fn test_first_field_wins() {
        let body = format!("{}{}", wrap("", "first", ""), wrap("", "second", ""));
        assert_eq!(extract_csrf_token(&body), Some("first"));
    }
}
