//! Page classification results.

use serde::{Deserialize, Serialize};
use std::fmt;

/// What a response body was recognized as.
///
/// The classification is derived purely from marker substrings in the HTML,
/// see `wallabag_client::page` for the classifiers themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageSignal {
    /// An authenticated page (it offers a logout link).
    RegularPage,
    /// The login form of the supported server version.
    LoginPage,
    /// The login form of an older, incompatible server version.
    LoginPageOtherVersion,
    /// Neither of the above.
    Unrecognized,
}

impl PageSignal {
    /// Returns a human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::RegularPage => "Regular page",
            Self::LoginPage => "Login page",
            Self::LoginPageOtherVersion => "Login page (other server version)",
            Self::Unrecognized => "Unrecognized page",
        }
    }
}

impl fmt::Display for PageSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
