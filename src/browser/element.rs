//! DOM element seam.
//!
//! A [`WebElement`] is a driver-owned reference to one node in the live DOM.
//! Implementations are expected to report a detached node as
//! [`Error::StaleElement`](crate::Error::StaleElement); wait loops treat any
//! error as "not yet".
//!
//! # Example
//!
//! ```ignore
//! let element = actions.wait_for_element_visible("#submit", None).await?;
//!
//! // Get properties
//! let text = element.text().await?;
//! let href = element.attribute("href").await?;
//!
//! // Interact
//! element.click().await?;
//! element.send_keys("Hello, World!").await?;
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::Result;

// ============================================================================
// Types
// ============================================================================

/// Shared handle to a driver element.
pub type ElementRef = Arc<dyn WebElement>;

/// A DOM element reference owned by the driver.
#[async_trait]
pub trait WebElement: Send + Sync {
    // ========================================================================
    // State
    // ========================================================================

    /// Checks if the element is rendered and visible.
    async fn is_displayed(&self) -> Result<bool>;

    /// Checks if the element is enabled.
    async fn is_enabled(&self) -> Result<bool>;

    /// Gets the rendered text of the element.
    async fn text(&self) -> Result<String>;

    /// Gets the lowercase tag name.
    async fn tag_name(&self) -> Result<String>;

    /// Gets an attribute value, `None` if the attribute is absent.
    async fn attribute(&self, name: &str) -> Result<Option<String>>;

    /// Gets a DOM property as a string, `None` if unset.
    async fn property(&self, name: &str) -> Result<Option<String>>;

    // ========================================================================
    // Interaction
    // ========================================================================

    /// Clicks the element.
    async fn click(&self) -> Result<()>;

    /// Clears a text input.
    async fn clear(&self) -> Result<()>;

    /// Types keys into the element. Special keys use [`Key`](super::Key)
    /// code points.
    async fn send_keys(&self, keys: &str) -> Result<()>;

    /// Submits the form the element belongs to.
    async fn submit(&self) -> Result<()>;

    /// Captures a PNG screenshot of this element.
    ///
    /// Returns base64-encoded image data.
    async fn screenshot(&self) -> Result<String>;
}

impl fmt::Debug for dyn WebElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("WebElement")
    }
}

// ============================================================================
// Text Helpers
// ============================================================================

/// Reads the text a user sees in the element.
///
/// Form fields report their current `value`. Safari's driver reads both
/// values through attributes (`value` and `innerText`).
pub async fn read_text(element: &dyn WebElement, safari: bool) -> Result<String> {
    let tag = element.tag_name().await?.to_ascii_lowercase();
    let form_field = tag == "input" || tag == "textarea";
    let text = match (safari, form_field) {
        (true, true) => element.attribute("value").await?,
        (true, false) => element.attribute("innerText").await?,
        (false, true) => element.property("value").await?,
        (false, false) => Some(element.text().await?),
    };
    Ok(text.unwrap_or_default())
}
