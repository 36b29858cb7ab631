//! Error types for WebDriver waits.
//!
//! This module defines all error types used throughout the crate.
//!
//! # Usage
//!
//! All fallible operations return [`Result<T>`] which uses [`Error`]:
//!
//! ```ignore
//! use webdriver_waits::{Error, Result};
//!
//! async fn example(actions: &PageActions) -> Result<()> {
//!     match actions.wait_for_element_visible("#submit", None).await {
//!         Ok(element) => element.click().await,
//!         Err(e) if e.is_not_present() => Ok(()),
//!         Err(e) => Err(e),
//!     }
//! }
//! ```
//!
//! # Error Categories
//!
//! | Category | Variants |
//! |----------|----------|
//! | Configuration | [`Error::Config`], [`Error::InvalidArgument`], [`Error::InvalidSelector`] |
//! | Driver | [`Error::NoSuchElement`], [`Error::StaleElement`], [`Error::NoAlertPresent`], [`Error::NoSuchWindow`], [`Error::NoSuchFrame`], [`Error::Script`], [`Error::Driver`], [`Error::Connection`] |
//! | Presence | [`Error::ElementNotPresent`], [`Error::NoneOfElementsPresent`] |
//! | Visibility | [`Error::ElementNotVisible`], [`Error::NoneOfElementsVisible`], [`Error::LinkTextNotFound`] |
//! | Interactability | [`Error::ElementNotClickable`], [`Error::LinkTextNotClickable`] |
//! | Text | [`Error::TextNotVisible`], [`Error::ExactTextNotVisible`], [`Error::NoVisibleText`] |
//! | Attribute | [`Error::AttributeNotPresent`], [`Error::AttributeValueMismatch`] |
//! | Negative waits | [`Error::ElementStillPresent`], [`Error::ElementStillVisible`], [`Error::TextStillVisible`], [`Error::ExactTextStillVisible`], [`Error::AttributeStillPresent`] |
//! | Context | [`Error::AlertNotPresent`], [`Error::FrameNotAvailable`], [`Error::WindowNotPresent`] |
//! | Test clock | [`Error::TimeLimitExceeded`] |
//! | External | [`Error::Io`], [`Error::Json`] |

// ============================================================================
// Imports
// ============================================================================

use std::io::Error as IoError;
use std::result::Result as StdResult;
use std::time::Duration;

use thiserror::Error;

use crate::wait::message::{actual_exact_text, actual_substring, after, after_plural, selector_list};

// ============================================================================
// Result Alias
// ============================================================================

/// Result type alias using crate [`enum@Error`].
///
/// All fallible operations in this crate return this type.
pub type Result<T> = StdResult<T, Error>;

// ============================================================================
// Failure Kind
// ============================================================================

/// Classification of a wait failure by how far the match got.
///
/// Mirrors the exception families WebDriver users expect, so callers can
/// branch on the kind without matching every variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// Nothing matched the locator.
    NoSuchElement,
    /// The element exists but is hidden.
    ElementNotVisible,
    /// The element is visible but disabled.
    ElementNotInteractable,
    /// No visible link with the given text.
    LinkTextNotFound,
    /// The element is visible but the text does not match.
    TextNotVisible,
    /// The attribute is missing or holds another value.
    NoSuchAttribute,
    /// A negative or context wait ran out of time.
    Timeout,
    /// The whole-test time limit was exceeded.
    TimeLimitExceeded,
}

// ============================================================================
// Error Enum
// ============================================================================

/// Main error type for the crate.
///
/// Wait failures carry the selector and the timeout that elapsed, and render
/// the same diagnostic sentence the test log shows.
#[derive(Error, Debug)]
pub enum Error {
    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// Configuration error.
    ///
    /// Returned when [`Settings`](crate::Settings) validation fails.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration error.
        message: String,
    },

    /// Invalid argument passed to an operation.
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Description of the invalid argument.
        message: String,
    },

    /// Selector could not be parsed or converted.
    #[error("Invalid selector {selector:?}: {message}")]
    InvalidSelector {
        /// The offending selector.
        selector: String,
        /// What went wrong.
        message: String,
    },

    // ========================================================================
    // Driver Errors
    // ========================================================================
    /// The driver found no element for a single lookup.
    #[error("No such element: {strategy}={selector}")]
    NoSuchElement {
        /// Locator strategy used.
        strategy: String,
        /// Selector value used.
        selector: String,
    },

    /// Element reference is no longer attached to the DOM.
    #[error("Stale element reference: {message}")]
    StaleElement {
        /// Driver-provided detail.
        message: String,
    },

    /// No alert is open.
    #[error("No alert present")]
    NoAlertPresent,

    /// Window handle does not exist.
    #[error("No such window: {handle}")]
    NoSuchWindow {
        /// The missing handle.
        handle: String,
    },

    /// Frame could not be switched to.
    #[error("No such frame: {frame}")]
    NoSuchFrame {
        /// Description of the frame reference.
        frame: String,
    },

    /// JavaScript execution error.
    #[error("Script error: {message}")]
    Script {
        /// Error message from script execution.
        message: String,
    },

    /// Any other driver failure.
    #[error("Driver error: {message}")]
    Driver {
        /// Driver-provided detail.
        message: String,
    },

    /// The driver lost its connection to the browser.
    #[error("Connection error: {message}")]
    Connection {
        /// Description of the connection error.
        message: String,
    },

    // ========================================================================
    // Presence / Visibility / Interactability
    // ========================================================================
    /// The element never appeared in the DOM.
    #[error("Element {{{}}} was not present after {}!", .selector, after(.timeout))]
    ElementNotPresent {
        /// Selector as the user wrote it.
        selector: String,
        /// Time waited.
        timeout: Duration,
    },

    /// The element exists but never became visible.
    #[error("Element {{{}}} was not visible after {}!", .selector, after(.timeout))]
    ElementNotVisible {
        /// Selector as the user wrote it.
        selector: String,
        /// Time waited.
        timeout: Duration,
    },

    /// The element is visible but never became enabled.
    #[error("Element {{{}}} was not clickable after {}!", .selector, after(.timeout))]
    ElementNotClickable {
        /// Selector as the user wrote it.
        selector: String,
        /// Time waited.
        timeout: Duration,
    },

    /// No visible link with the given text.
    #[error("Link text {{{}}} was not found after {}!", .link_text, after(.timeout))]
    LinkTextNotFound {
        /// The link text.
        link_text: String,
        /// Time waited.
        timeout: Duration,
    },

    /// The link is visible but never became enabled.
    #[error("Link text {{{}}} was not clickable after {}!", .link_text, after(.timeout))]
    LinkTextNotClickable {
        /// The link text.
        link_text: String,
        /// Time waited.
        timeout: Duration,
    },

    /// None of the candidate selectors matched.
    #[error("None of the elements {} were present after {}!", selector_list(.selectors), after(.timeout))]
    NoneOfElementsPresent {
        /// Candidate selectors.
        selectors: Vec<String>,
        /// Time waited.
        timeout: Duration,
    },

    /// Some candidate matched but none became visible.
    #[error("None of the elements {} were visible after {}!", selector_list(.selectors), after(.timeout))]
    NoneOfElementsVisible {
        /// Candidate selectors.
        selectors: Vec<String>,
        /// Time waited.
        timeout: Duration,
    },

    // ========================================================================
    // Text
    // ========================================================================
    /// The element never contained the expected substring.
    #[error(
        "Expected text substring {{{}}} for {{{}}} was not visible after {}!{}",
        .text, .selector, after(.timeout), actual_substring(.actual.as_deref())
    )]
    TextNotVisible {
        /// Expected substring.
        text: String,
        /// Selector as the user wrote it.
        selector: String,
        /// Time waited.
        timeout: Duration,
        /// Text seen on the last attempt while visible.
        actual: Option<String>,
    },

    /// The element text never equalled the expected text.
    #[error(
        "Expected exact text {{{}}} for {{{}}} was not visible after {}!{}",
        .text, .selector, after(.timeout), actual_exact_text(.actual.as_deref())
    )]
    ExactTextNotVisible {
        /// Expected text.
        text: String,
        /// Selector as the user wrote it.
        selector: String,
        /// Time waited.
        timeout: Duration,
        /// Text seen on the last attempt while visible.
        actual: Option<String>,
    },

    /// The element is visible but its text stayed blank.
    #[error("Element {{{}}} has no visible text after {}!", .selector, after(.timeout))]
    NoVisibleText {
        /// Selector as the user wrote it.
        selector: String,
        /// Time waited.
        timeout: Duration,
    },

    // ========================================================================
    // Attribute
    // ========================================================================
    /// The element never carried the attribute.
    #[error(
        "Expected attribute {{{}}} of element {{{}}} was not present after {}!",
        .attribute, .selector, after(.timeout)
    )]
    AttributeNotPresent {
        /// Attribute name.
        attribute: String,
        /// Selector as the user wrote it.
        selector: String,
        /// Time waited.
        timeout: Duration,
    },

    /// The attribute exists but never held the expected value.
    #[error(
        "Expected value {{{}}} for attribute {{{}}} of element {{{}}} was not present after {}! (The actual value was {{{}}})",
        .expected, .attribute, .selector, after(.timeout), .actual
    )]
    AttributeValueMismatch {
        /// Expected value.
        expected: String,
        /// Attribute name.
        attribute: String,
        /// Selector as the user wrote it.
        selector: String,
        /// Time waited.
        timeout: Duration,
        /// Value seen on the last attempt.
        actual: String,
    },

    // ========================================================================
    // Negative Waits
    // ========================================================================
    /// The element stayed in the DOM.
    #[error("Element {{{}}} was still present after {}!", .selector, after(.timeout))]
    ElementStillPresent {
        /// Selector as the user wrote it.
        selector: String,
        /// Time waited.
        timeout: Duration,
    },

    /// The element stayed visible.
    #[error("Element {{{}}} was still visible after {}!", .selector, after(.timeout))]
    ElementStillVisible {
        /// Selector as the user wrote it.
        selector: String,
        /// Time waited.
        timeout: Duration,
    },

    /// The substring stayed visible.
    #[error("Text {{{}}} in {{{}}} was still visible after {}!", .text, .selector, after(.timeout))]
    TextStillVisible {
        /// The substring.
        text: String,
        /// Selector as the user wrote it.
        selector: String,
        /// Time waited.
        timeout: Duration,
    },

    /// The exact text stayed visible.
    #[error("Exact text {{{}}} for {{{}}} was still visible after {}!", .text, .selector, after(.timeout))]
    ExactTextStillVisible {
        /// The exact text.
        text: String,
        /// Selector as the user wrote it.
        selector: String,
        /// Time waited.
        timeout: Duration,
    },

    /// The attribute (or attribute value) stayed on the element.
    #[error("{}", attribute_still_present(.attribute, .value.as_deref(), .selector, .timeout))]
    AttributeStillPresent {
        /// Attribute name.
        attribute: String,
        /// Attribute value, if a specific one was awaited.
        value: Option<String>,
        /// Selector as the user wrote it.
        selector: String,
        /// Time waited.
        timeout: Duration,
    },

    // ========================================================================
    // Context Switching
    // ========================================================================
    /// No alert opened in time.
    #[error("Alert was not present after {}!", after_plural(.timeout))]
    AlertNotPresent {
        /// Time waited.
        timeout: Duration,
    },

    /// The frame could not be switched to in time.
    #[error("Frame {{{}}} was not {} after {}!", .frame, .presence, after(.timeout))]
    FrameNotAvailable {
        /// Description of the frame reference.
        frame: String,
        /// `"visible"` or `"present"`.
        presence: &'static str,
        /// Time waited.
        timeout: Duration,
    },

    /// The window never appeared.
    #[error("Window {{{}}} was not present after {}!", .window, after(.timeout))]
    WindowNotPresent {
        /// Window index or handle.
        window: String,
        /// Time waited.
        timeout: Duration,
    },

    // ========================================================================
    // Test Clock
    // ========================================================================
    /// The whole-test time limit elapsed while waiting.
    #[error("This test has exceeded the time limit of {}!", after(.limit))]
    TimeLimitExceeded {
        /// Configured limit.
        limit: Duration,
    },

    // ========================================================================
    // External Errors
    // ========================================================================
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] IoError),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

fn attribute_still_present(
    attribute: &str,
    value: Option<&str>,
    selector: &str,
    timeout: &Duration,
) -> String {
    match value {
        Some(value) if !value.is_empty() => format!(
            "Value {{{value}}} for attribute {{{attribute}}} of element {{{selector}}} was still present after {}!",
            after(timeout)
        ),
        _ => format!(
            "Attribute {{{attribute}}} of element {{{selector}}} was still present after {}!",
            after(timeout)
        ),
    }
}

// ============================================================================
// Error Constructors
// ============================================================================

impl Error {
    /// Creates a configuration error.
    #[inline]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Creates an invalid argument error.
    #[inline]
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Creates an invalid selector error.
    #[inline]
    pub fn invalid_selector(selector: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidSelector {
            selector: selector.into(),
            message: message.into(),
        }
    }

    /// Creates a driver-level no such element error.
    #[inline]
    pub fn no_such_element(strategy: impl Into<String>, selector: impl Into<String>) -> Self {
        Self::NoSuchElement {
            strategy: strategy.into(),
            selector: selector.into(),
        }
    }

    /// Creates a stale element error.
    #[inline]
    pub fn stale_element(message: impl Into<String>) -> Self {
        Self::StaleElement {
            message: message.into(),
        }
    }

    /// Creates a no such window error.
    #[inline]
    pub fn no_such_window(handle: impl Into<String>) -> Self {
        Self::NoSuchWindow {
            handle: handle.into(),
        }
    }

    /// Creates a no such frame error.
    #[inline]
    pub fn no_such_frame(frame: impl Into<String>) -> Self {
        Self::NoSuchFrame {
            frame: frame.into(),
        }
    }

    /// Creates a script error.
    #[inline]
    pub fn script(message: impl Into<String>) -> Self {
        Self::Script {
            message: message.into(),
        }
    }

    /// Creates a generic driver error.
    #[inline]
    pub fn driver(message: impl Into<String>) -> Self {
        Self::Driver {
            message: message.into(),
        }
    }

    /// Creates a connection error.
    #[inline]
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }
}

// ============================================================================
// Error Predicates
// ============================================================================

impl Error {
    /// Classifies a wait failure.
    ///
    /// Returns `None` for configuration, driver and external errors.
    #[must_use]
    pub fn failure(&self) -> Option<FailureKind> {
        let kind = match self {
            Self::ElementNotPresent { .. } | Self::NoneOfElementsPresent { .. } => {
                FailureKind::NoSuchElement
            }
            Self::ElementNotVisible { .. } | Self::NoneOfElementsVisible { .. } => {
                FailureKind::ElementNotVisible
            }
            Self::ElementNotClickable { .. } | Self::LinkTextNotClickable { .. } => {
                FailureKind::ElementNotInteractable
            }
            Self::LinkTextNotFound { .. } => FailureKind::LinkTextNotFound,
            Self::TextNotVisible { .. }
            | Self::ExactTextNotVisible { .. }
            | Self::NoVisibleText { .. } => FailureKind::TextNotVisible,
            Self::AttributeNotPresent { .. } | Self::AttributeValueMismatch { .. } => {
                FailureKind::NoSuchAttribute
            }
            Self::ElementStillPresent { .. }
            | Self::ElementStillVisible { .. }
            | Self::TextStillVisible { .. }
            | Self::ExactTextStillVisible { .. }
            | Self::AttributeStillPresent { .. }
            | Self::AlertNotPresent { .. }
            | Self::FrameNotAvailable { .. }
            | Self::WindowNotPresent { .. } => FailureKind::Timeout,
            Self::TimeLimitExceeded { .. } => FailureKind::TimeLimitExceeded,
            _ => return None,
        };
        Some(kind)
    }

    /// Returns `true` if a wait ran out of time.
    ///
    /// The whole-test time limit is not counted as a wait timeout.
    #[inline]
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self.failure(), Some(kind) if kind != FailureKind::TimeLimitExceeded)
    }

    /// Returns `true` if nothing matched the locator in time.
    #[inline]
    #[must_use]
    pub fn is_not_present(&self) -> bool {
        self.failure() == Some(FailureKind::NoSuchElement)
    }

    /// Returns `true` if the element existed but stayed hidden.
    #[inline]
    #[must_use]
    pub fn is_not_visible(&self) -> bool {
        matches!(
            self.failure(),
            Some(FailureKind::ElementNotVisible | FailureKind::LinkTextNotFound)
        )
    }

    /// Returns `true` for errors reported by the driver itself.
    #[inline]
    #[must_use]
    pub fn is_driver_error(&self) -> bool {
        matches!(
            self,
            Self::NoSuchElement { .. }
                | Self::StaleElement { .. }
                | Self::NoAlertPresent
                | Self::NoSuchWindow { .. }
                | Self::NoSuchFrame { .. }
                | Self::Script { .. }
                | Self::Driver { .. }
                | Self::Connection { .. }
        )
    }
}

// ============================================================================
// Tests
// ============================================================================
