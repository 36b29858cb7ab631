//! Browser driver seam.
//!
//! [`WebDriver`] is the session-level API the wait layer drives: lookups,
//! navigation, scripts, screenshots and context switching. Concrete
//! protocol clients live outside this crate.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use webdriver_waits::{PageActions, Settings, WebDriver};
//!
//! let driver: Arc<dyn WebDriver> = Arc::new(MyClient::connect(url).await?);
//! let actions = PageActions::new(driver, Settings::default());
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::fmt;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;

use super::alert::Alert;
use super::cdp::CdpDriver;
use super::element::ElementRef;
use super::selector::By;

// ============================================================================
// Script Arguments
// ============================================================================

/// An argument passed to [`WebDriver::execute_script`] as `arguments[i]`.
#[derive(Clone)]
pub enum ScriptArg {
    /// An element reference.
    Element(ElementRef),
    /// A JSON value.
    Value(Value),
}

impl fmt::Debug for ScriptArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Element(_) => f.write_str("Element(..)"),
            Self::Value(v) => f.debug_tuple("Value").field(v).finish(),
        }
    }
}

impl From<ElementRef> for ScriptArg {
    fn from(element: ElementRef) -> Self {
        Self::Element(element)
    }
}

impl From<Value> for ScriptArg {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

// ============================================================================
// Frame and Window References
// ============================================================================

/// Identifies an iframe to switch into.
#[derive(Clone)]
pub enum FrameRef {
    /// Frame index within the current document.
    Index(usize),
    /// Frame name or id, or a css/xpath selector for the iframe.
    Name(String),
    /// The iframe element itself.
    Element(ElementRef),
}

impl FrameRef {
    /// Returns the text used for the frame in error messages.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::Index(i) => i.to_string(),
            Self::Name(name) => name.clone(),
            Self::Element(_) => "<element>".to_string(),
        }
    }
}

impl fmt::Debug for FrameRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index(i) => f.debug_tuple("Index").field(i).finish(),
            Self::Name(n) => f.debug_tuple("Name").field(n).finish(),
            Self::Element(_) => f.write_str("Element(..)"),
        }
    }
}

impl From<usize> for FrameRef {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

impl From<&str> for FrameRef {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}

impl From<String> for FrameRef {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

impl From<ElementRef> for FrameRef {
    fn from(element: ElementRef) -> Self {
        Self::Element(element)
    }
}

/// Identifies a window to switch to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WindowRef {
    /// Position in the window handle list; `-1` is the last window.
    Index(isize),
    /// A window handle.
    Handle(String),
}

impl WindowRef {
    /// The most recently opened window.
    pub const LAST: Self = Self::Index(-1);
}

impl fmt::Display for WindowRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index(i) => write!(f, "{i}"),
            Self::Handle(h) => f.write_str(h),
        }
    }
}

impl From<isize> for WindowRef {
    fn from(index: isize) -> Self {
        Self::Index(index)
    }
}

impl From<&str> for WindowRef {
    fn from(handle: &str) -> Self {
        Self::Handle(handle.to_string())
    }
}

impl From<String> for WindowRef {
    fn from(handle: String) -> Self {
        Self::Handle(handle)
    }
}

// ============================================================================
// WebDriver Trait
// ============================================================================

/// A WebDriver-style browser session.
///
/// Lookups report a missing element as
/// [`Error::NoSuchElement`](crate::Error::NoSuchElement). Switching calls
/// report [`Error::NoAlertPresent`](crate::Error::NoAlertPresent),
/// [`Error::NoSuchWindow`](crate::Error::NoSuchWindow) or
/// [`Error::NoSuchFrame`](crate::Error::NoSuchFrame).
#[async_trait]
pub trait WebDriver: Send + Sync {
    // ========================================================================
    // Element Search
    // ========================================================================

    /// Finds the first element matching the locator.
    async fn find_element(&self, by: &By) -> Result<ElementRef>;

    /// Finds all elements matching the locator, possibly none.
    async fn find_elements(&self, by: &By) -> Result<Vec<ElementRef>>;

    // ========================================================================
    // Navigation & Page
    // ========================================================================

    /// Navigates to a URL.
    async fn get(&self, url: &str) -> Result<()>;

    /// Gets the current URL.
    async fn current_url(&self) -> Result<String>;

    /// Gets the serialized DOM of the current page.
    async fn page_source(&self) -> Result<String>;

    /// Captures a PNG screenshot of the viewport as base64.
    async fn screenshot(&self) -> Result<String>;

    /// Executes synchronous JavaScript with `arguments[i]` bound to `args`.
    async fn execute_script(&self, script: &str, args: Vec<ScriptArg>) -> Result<Value>;

    // ========================================================================
    // Pointer Actions
    // ========================================================================

    /// Moves the pointer over the element.
    async fn hover(&self, element: &ElementRef) -> Result<()>;

    /// Moves the pointer to the element and double-clicks it.
    async fn double_click(&self, element: &ElementRef) -> Result<()>;

    // ========================================================================
    // Context Switching
    // ========================================================================

    /// Switches to the open alert.
    async fn switch_to_alert(&self) -> Result<Box<dyn Alert>>;

    /// Switches into an iframe.
    async fn switch_to_frame(&self, frame: &FrameRef) -> Result<()>;

    /// Lists window handles in the order the driver reports them.
    async fn window_handles(&self) -> Result<Vec<String>>;

    /// Switches to a window by handle.
    async fn switch_to_window(&self, handle: &str) -> Result<()>;

    // ========================================================================
    // Session Info
    // ========================================================================

    /// Lowercase browser name, e.g. `"chrome"`, `"firefox"`, `"safari"`.
    fn browser_name(&self) -> &str;

    /// Returns `true` if the session runs on Safari.
    fn is_safari(&self) -> bool {
        self.browser_name().eq_ignore_ascii_case("safari")
    }

    // ========================================================================
    // Undetected Mode
    // ========================================================================

    /// Returns `true` when the session runs in undetected (UC) mode, where
    /// the WebDriver connection may be dropped between commands.
    fn is_using_uc(&self) -> bool {
        false
    }

    /// Returns `false` while a UC-mode session has its WebDriver link down.
    async fn is_connected(&self) -> bool {
        true
    }

    /// Re-establishes the WebDriver link of a UC-mode session.
    async fn connect(&self) -> Result<()> {
        Ok(())
    }

    // ========================================================================
    // CDP Path
    // ========================================================================

    /// Returns the low-level protocol path, if the session has one.
    fn cdp(&self) -> Option<&dyn CdpDriver> {
        None
    }

    /// Returns `true` when commands must go through [`cdp`](Self::cdp):
    /// a CDP path exists and the WebDriver link is down.
    async fn is_cdp_swap_needed(&self) -> bool {
        self.cdp().is_some() && !self.is_connected().await
    }
}
