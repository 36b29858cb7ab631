//! Low-level browser protocol (CDP) path.
//!
//! A UC-mode session may drop its WebDriver connection to stay undetected.
//! While it is down, actions that have a protocol-level equivalent are
//! routed through [`CdpDriver`] instead. The CDP side does its own waiting
//! and raises its own errors; selectors are passed as already normalized.

use async_trait::async_trait;

use crate::error::Result;

use super::element::ElementRef;

/// Protocol-level commands used while the WebDriver link is down.
#[async_trait]
pub trait CdpDriver: Send + Sync {
    // ========================================================================
    // Navigation
    // ========================================================================

    /// Opens a URL.
    async fn open(&self, url: &str) -> Result<()>;

    /// Gets the serialized DOM of the current page.
    async fn page_source(&self) -> Result<String>;

    // ========================================================================
    // Interaction
    // ========================================================================

    /// Clicks the element.
    async fn click(&self, selector: &str) -> Result<()>;

    /// Clicks the link with the given text.
    async fn click_link(&self, link_text: &str) -> Result<()>;

    /// Clicks the element if it is visible, otherwise does nothing.
    async fn click_if_visible(&self, selector: &str) -> Result<()>;

    /// Clicks the focused element.
    async fn click_active_element(&self) -> Result<()>;

    /// Sends keys to the element.
    async fn send_keys(&self, selector: &str, text: &str) -> Result<()>;

    /// Sends keys one at a time, as separate key events.
    async fn press_keys(&self, selector: &str, text: &str) -> Result<()>;

    /// Clears the element, then types the text.
    async fn type_text(&self, selector: &str, text: &str) -> Result<()>;

    // ========================================================================
    // Queries
    // ========================================================================

    /// Waits for the element and returns it.
    async fn select(&self, selector: &str) -> Result<ElementRef>;

    /// Finds the element.
    async fn find_element(&self, selector: &str) -> Result<ElementRef>;

    /// Checks presence without waiting.
    async fn is_element_present(&self, selector: &str) -> Result<bool>;

    /// Checks visibility without waiting.
    async fn is_element_visible(&self, selector: &str) -> Result<bool>;

    /// Gets the element text.
    async fn get_text(&self, selector: &str) -> Result<String>;

    // ========================================================================
    // Assertions
    // ========================================================================

    /// Asserts the element is visible.
    async fn assert_element(&self, selector: &str) -> Result<()>;

    /// Asserts the element is present.
    async fn assert_element_present(&self, selector: &str) -> Result<()>;

    /// Asserts the element contains the text.
    async fn assert_text(&self, text: &str, selector: &str) -> Result<()>;

    /// Asserts the element text equals the text, ignoring surrounding
    /// whitespace.
    async fn assert_exact_text(&self, text: &str, selector: &str) -> Result<()>;
}
