//! Page navigation.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::error::Result;

use super::PageActions;

// ============================================================================
// Constants
// ============================================================================

/// Prefixes of strings that are already navigable as-is.
const PAGE_URL_PREFIXES: &[&str] = &[
    "http:",
    "https:",
    "://",
    "about:",
    "blob:",
    "chrome:",
    "data:",
    "edge:",
    "file:",
    "view-source:",
];

/// An http(s) URL with a dotted domain, `localhost` or an IPv4 host.
static WEB_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^https?://(?:(?:[A-Z0-9](?:[A-Z0-9-]{0,61}[A-Z0-9])?\.)+(?:[A-Z]{2,6}\.?|[A-Z0-9-]{2,}\.?)|localhost|\d{1,3}\.\d{1,3}\.\d{1,3}\.\d{1,3})(?::\d+)?(?:/?|[/?]\S+)$",
    )
    .expect("web url pattern is valid")
});

// ============================================================================
// PageActions - Navigation
// ============================================================================

impl PageActions {
    /// Opens a URL.
    ///
    /// Surrounding whitespace is trimmed. A bare host such as
    /// `"example.com/path"` is opened over `https://`.
    ///
    /// # Errors
    ///
    /// Returns the driver error if navigation fails.
    pub async fn open_url(&self, url: &str) -> Result<()> {
        if let Some(cdp) = self.cdp_swap().await {
            return cdp.open(url).await;
        }
        let url = normalize_url(url);
        debug!(url = %url, "Opening URL");
        self.reconnect_if_disconnected().await;
        self.driver.get(&url).await
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Returns `true` if the string already names something a browser can open.
fn looks_like_a_page_url(url: &str) -> bool {
    PAGE_URL_PREFIXES.iter().any(|prefix| url.starts_with(prefix))
}

fn is_valid_url(url: &str) -> bool {
    WEB_URL.is_match(url)
}

fn normalize_url(url: &str) -> String {
    let url = url.trim();
    if !looks_like_a_page_url(url) {
        let https = format!("https://{url}");
        if is_valid_url(&https) {
            return https;
        }
    }
    url.to_string()
}

// ============================================================================
// Tests
// ============================================================================
