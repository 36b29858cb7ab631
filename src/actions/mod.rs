//! Polling waits, assertions and actions.
//!
//! [`PageActions`] wraps a [`WebDriver`](crate::WebDriver) session and the
//! [`Settings`](crate::Settings) its waits run with. Methods are grouped by
//! concern across submodules:
//!
//! | Module | Methods |
//! |--------|---------|
//! | `predicates` | `is_element_present`, `is_text_visible`, ... (no waiting) |
//! | `elements` | presence, visibility and clickability waits |
//! | `text` | text waits and `get_text` |
//! | `attributes` | attribute waits |
//! | `switching` | alerts, frames and windows |
//! | `interaction` | hover, click and keyboard actions |
//! | `assertions` | `assert_*` and short-named waits |
//! | `artifacts` | screenshots and page source files |
//! | `navigation` | `open_url` |
//!
//! # Example
//!
//! ```ignore
//! use std::time::Duration;
//! use webdriver_waits::PageActions;
//!
//! let actions = PageActions::with_defaults(driver);
//! actions.open_url("example.com").await?;
//! actions.wait_for_text_visible("Example", "h1", None).await?;
//! actions.click("a:contains(More)", Some(Duration::from_secs(3))).await?;
//! ```

// ============================================================================
// Submodules
// ============================================================================

mod artifacts;
mod assertions;
mod attributes;
mod core;
mod elements;
mod interaction;
mod navigation;
mod predicates;
mod switching;
mod text;

// ============================================================================
// Re-exports
// ============================================================================

pub use self::core::PageActions;
