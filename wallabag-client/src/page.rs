//! Response body classification.
//!
//! wallabag has no API for "am I logged in?". Every response body is instead
//! checked for fixed marker substrings of the server's HTML. Matching is plain
//! substring containment so unrelated markup changes do not matter.
//!
//! A body is tested against one classifier at a time; the same body may be
//! fed to several of them.

use wallabag_core::PageSignal;

// ============================================================================
// Markers
// ============================================================================

/// Action fragment of the login form.
pub const LOGIN_FORM_MARKER: &str = "/login_check\" method=\"post\" name=\"loginform\">";

/// Logout link fragment, only present on authenticated pages.
pub const LOGOUT_LINK_MARKER: &str = "/logout\">";

/// `alt` attribute fragment of the logo image.
pub const LOGO_MARKER: &str = "alt=\"wallabag logo\" />";

/// Login form of the incompatible 1.x server line.
pub const LEGACY_LOGIN_FORM_MARKER: &str =
    "<form method=\"post\" action=\"?login\" name=\"loginform\">";

// ============================================================================
// Classifiers
// ============================================================================

/// Returns true if the body is the login form.
///
/// Both the form and the logo marker must be present.
pub fn is_login_page(body: &str) -> bool {
    body.contains(LOGIN_FORM_MARKER) && body.contains(LOGO_MARKER)
}

/// Returns true if the body is an authenticated page.
///
/// Both the logout link and the logo marker must be present.
pub fn is_regular_page(body: &str) -> bool {
    body.contains(LOGOUT_LINK_MARKER) && body.contains(LOGO_MARKER)
}

/// Returns true if the body is the login form of an older server version.
pub fn is_login_page_of_other_version(body: &str) -> bool {
    body.contains(LEGACY_LOGIN_FORM_MARKER) && !body.contains(LOGIN_FORM_MARKER)
}

/// Classifies a body, checking regular page, login page and other-version
/// login page in that order.
pub fn classify(body: &str) -> PageSignal {
    if is_regular_page(body) {
        PageSignal::RegularPage
    } else if is_login_page(body) {
        PageSignal::LoginPage
    } else if is_login_page_of_other_version(body) {
        PageSignal::LoginPageOtherVersion
    } else {
        PageSignal::Unrecognized
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::scripted::pages;

    #[test]
    fn test_login_page_needs_both_markers() {
        let both = format!("<p>{LOGIN_FORM_MARKER}</p><img {LOGO_MARKER}");
        assert!(is_login_page(&both));

        assert!(!is_login_page(&format!("<p>{LOGIN_FORM_MARKER}</p>")));
        assert!(!is_login_page(&format!("<img {LOGO_MARKER}")));
    }

    #[test]
    fn test_mentioning_login_is_not_enough() {
        let body = format!(r#"<img {LOGO_MARKER}<a href="/login">Please login</a>"#);
        assert!(!is_login_page(&body));
    }

    #[test]
    fn test_regular_page_needs_both_markers() {
        let both = format!(r#"<a href="/logout">x</a><img {LOGO_MARKER}"#);
        assert!(is_regular_page(&both));

        assert!(!is_regular_page(r#"<a href="/logout">x</a>"#));
        assert!(!is_regular_page(&format!("<img {LOGO_MARKER}")));
    }

    #[test]
    fn test_other_version_login_page() {
        assert!(is_login_page_of_other_version(&pages::v1_login_page()));
        assert!(!is_login_page_of_other_version(&pages::login_page()));

        let mixed = format!("{LEGACY_LOGIN_FORM_MARKER}{LOGIN_FORM_MARKER}");
        assert!(!is_login_page_of_other_version(&mixed));
    }

    #[test]
    fn test_empty_body_matches_nothing() {
        assert!(!is_login_page(""));
        assert!(!is_regular_page(""));
        assert!(!is_login_page_of_other_version(""));
        assert_eq!(classify(""), PageSignal::Unrecognized);
    }

    #[test]
    fn test_classify_fixtures() {
        assert_eq!(classify(&pages::login_page()), PageSignal::LoginPage);
        assert_eq!(classify(&pages::regular_page()), PageSignal::RegularPage);
        assert_eq!(classify(&pages::v1_login_page()), PageSignal::LoginPageOtherVersion);
        assert_eq!(classify(&pages::unrelated_page()), PageSignal::Unrecognized);
    }

    #[test]
    fn test_non_ascii_body() {
        let body = format!("ünïcödé {LOGO_MARKER} 日本語 {LOGIN_FORM_MARKER}");
        assert!(is_login_page(&body));
    }
}
