//! Browser seam module.
//!
//! This module defines what the wait layer needs from a browser driver,
//! and how selectors are written:
//!
//! | Type | Description |
//! |------|-------------|
//! | [`WebDriver`] | Browser session (lookups, navigation, switching) |
//! | [`WebElement`] | DOM element reference |
//! | [`Alert`] | Open JavaScript dialog |
//! | [`CdpDriver`] | Low-level protocol path for disconnected UC sessions |
//! | [`By`] / [`Locator`] | Locator strategies and normalization |
//!
//! # Example
//!
//! ```ignore
//! use webdriver_waits::{By, Locator, WebDriver};
//!
//! async fn heading(driver: &dyn WebDriver) -> webdriver_waits::Result<String> {
//!     let locator = Locator::from("h1:contains(Welcome)");
//!     let element = driver.find_element(locator.by()).await?;
//!     element.text().await
//! }
//! ```

// ============================================================================
// Submodules
// ============================================================================

/// JavaScript dialogs.
pub mod alert;

/// Low-level protocol path.
pub mod cdp;

/// CSS to XPath conversion for `:contains()` selectors.
pub mod css_xpath;

/// Session-level driver seam.
pub mod driver;

/// DOM element seam.
pub mod element;

/// Special keys for `send_keys`.
pub mod keyboard;

/// Locator strategies.
pub mod selector;

// ============================================================================
// Re-exports
// ============================================================================

pub use alert::Alert;
pub use cdp::CdpDriver;
pub use css_xpath::css_to_xpath;
pub use driver::{FrameRef, ScriptArg, WebDriver, WindowRef};
pub use element::{ElementRef, WebElement, read_text};
pub use keyboard::Key;
pub use selector::{By, Locator, is_valid_by, is_xpath_selector};
