//! WebDriver waits - Polling waits and assertions for browser automation.
//!
//! This library layers retrying waits, assertions and actions over any
//! WebDriver-style browser session, with an alternate low-level protocol
//! path for undetected (UC) sessions whose WebDriver link is down.
//!
//! # Architecture
//!
//! The crate does not talk to a browser itself. It drives an injected
//! session through two seams:
//!
//! - **[`WebDriver`]**: element lookups, navigation, scripts, switching
//! - **[`CdpDriver`]**: protocol-level commands used while a UC session is
//!   disconnected
//!
//! Key design principles:
//!
//! - Every wait polls at a fixed interval until a deadline, with at least
//!   one attempt even for a zero timeout
//! - Timeout errors say how far the match got: not present, not visible,
//!   not clickable, wrong text, missing attribute
//! - An optional whole-test [`TimeLimit`] is checked before every attempt
//! - Selectors are normalized once, into a [`Locator`]
//!
//! # Quick Start
//!
//! ```ignore
//! use std::sync::Arc;
//! use webdriver_waits::{PageActions, Result, Settings};
//!
//! async fn login(driver: Arc<dyn webdriver_waits::WebDriver>) -> Result<()> {
//!     let settings = Settings::builder()
//!         .small_timeout(std::time::Duration::from_secs(5))
//!         .build()?;
//!     let actions = PageActions::new(driver, settings);
//!
//!     actions.open_url("example.com/login").await?;
//!     actions.update_text("#username", "demo", None).await?;
//!     actions.update_text("#password", "secret\n", None).await?;
//!     actions.assert_text("Welcome", "h1", None).await?;
//!     Ok(())
//! }
//! ```
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`actions`] | [`PageActions`]: waits, assertions and actions |
//! | [`browser`] | Driver seams and locators |
//! | [`error`] | Error types and [`Result`] alias |
//! | [`settings`] | Timeout and polling configuration |
//! | [`wait`] | Poll loop and test time limit |

// ============================================================================
// Modules
// ============================================================================

/// Polling waits, assertions and actions.
///
/// Everything hangs off [`PageActions`].
pub mod actions;

/// Driver seams and locators.
///
/// This module contains the traits a browser session implements:
///
/// - [`WebDriver`] - Session-level commands
/// - [`WebElement`] - DOM element reference
/// - [`CdpDriver`] - Low-level protocol path
pub mod browser;

/// Error types and result aliases.
///
/// All fallible operations return [`Result<T>`] which uses [`Error`].
pub mod error;

/// Timeout and polling configuration.
///
/// Use [`Settings::builder()`] for validated custom settings.
pub mod settings;

/// Poll loop and test time limit.
pub mod wait;

// ============================================================================
// Re-exports
// ============================================================================

// Actions
pub use actions::PageActions;

// Browser types
pub use browser::{
    Alert, By, CdpDriver, ElementRef, FrameRef, Key, Locator, ScriptArg, WebDriver, WebElement,
    WindowRef, css_to_xpath, is_valid_by, is_xpath_selector, read_text,
};

// Error types
pub use error::{Error, FailureKind, Result};

// Settings types
pub use settings::{Settings, SettingsBuilder, TimeoutTier};

// Wait types
pub use wait::{Poll, TimeLimit};
