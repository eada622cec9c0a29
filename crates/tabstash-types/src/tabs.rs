//! Tab references as handed over by the tab-directory collaborator.
//!
//! The browser side of tab enumeration lives outside this workspace; callers
//! hand us plain title/URL pairs.

use serde::{Deserialize, Serialize};
use url::Url;

/// A reference to an open tab.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabRef {
    pub title: String,
    pub url: String,
}

impl TabRef {
    /// Create a tab reference, unwrapping suspended-tab wrapper URLs.
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        let url = url.into();
        Self {
            title: title.into(),
            url: unwrap_suspended_url(&url),
        }
    }
}

/// Recover the original URL from a tab-suspender parking page.
///
/// Suspender extensions replace a tab's URL with
/// `chrome-extension://<id>/park.html?url=<percent-encoded original>`. If the
/// URL does not match that shape, or carries no wrapped value, the input is
/// returned unchanged.
pub fn unwrap_suspended_url(url: &str) -> String {
    if !url.starts_with("chrome-extension://") || !url.contains("/park.html") {
        return url.to_string();
    }

    let Ok(parsed) = Url::parse(url) else {
        return url.to_string();
    };
    let Some(query) = parsed.query() else {
        return url.to_string();
    };

    // The wrapped value is percent-encoded (encodeURIComponent), not
    // form-encoded: a literal `+` in the original URL must survive, so the
    // raw value is taken from the query and percent-decoded only.
    for pair in query.split('&') {
        if let Some(encoded) = pair.strip_prefix("url=") {
            return match urlencoding::decode(encoded) {
                Ok(decoded) if !decoded.is_empty() => decoded.into_owned(),
                _ => url.to_string(),
            };
        }
    }

    url.to_string()
}
