//! Element locator strategies.
//!
//! Provides Selenium-like `By` selectors and the [`Locator`] normalization
//! every wait runs its selector through.
//!
//! # Example
//!
//! ```ignore
//! use webdriver_waits::{By, Locator};
//!
//! // CSS selector (default)
//! let submit = Locator::from("#submit");
//!
//! // Prefix shorthands
//! let home = Locator::from("link=Home");             // link text
//! let email = Locator::from("name=email");           // [name="email"]
//! let title = Locator::from("//h1");                 // xpath
//!
//! // :contains() becomes xpath, messages keep the css
//! let save = Locator::from("button:contains(Save)");
//! assert_eq!(save.describe(), "button:contains(Save)");
//!
//! // Explicit strategy, argument order forgiven
//! let field = Locator::new("id", "username")?;
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};

use super::css_xpath::css_to_xpath;

// ============================================================================
// Constants
// ============================================================================

/// Prefixes that mark a selector as link text.
const LINK_TEXT_PREFIXES: &[&str] = &["link=", "link_text=", "text="];

/// Prefixes that mark a selector as partial link text.
const PARTIAL_LINK_TEXT_PREFIXES: &[&str] = &[
    "partial_link=",
    "partial_link_text=",
    "partial_text=",
    "p_link=",
    "p_link_text=",
    "p_text=",
];

/// Prefixes that mark a selector as a `name` attribute.
const NAME_PREFIXES: &[&str] = &["name=", "&"];

// ============================================================================
// By Enum
// ============================================================================

/// Element locator strategy (like Selenium's `By`).
///
/// Serializes to the W3C find-element body:
/// `{"using": "css selector", "value": "#login"}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "using", content = "value")]
pub enum By {
    /// CSS selector (most common).
    #[serde(rename = "css selector")]
    Css(String),

    /// XPath expression.
    #[serde(rename = "xpath")]
    XPath(String),

    /// Element ID.
    #[serde(rename = "id")]
    Id(String),

    /// Name attribute.
    #[serde(rename = "name")]
    Name(String),

    /// Class name (single class).
    #[serde(rename = "class name")]
    Class(String),

    /// Tag name.
    #[serde(rename = "tag name")]
    Tag(String),

    /// Exact link text (for `<a>` elements).
    #[serde(rename = "link text")]
    LinkText(String),

    /// Partial link text (for `<a>` elements).
    #[serde(rename = "partial link text")]
    PartialLinkText(String),
}

impl By {
    /// Creates a CSS selector.
    #[inline]
    pub fn css(selector: impl Into<String>) -> Self {
        Self::Css(selector.into())
    }

    /// Creates an XPath selector.
    #[inline]
    pub fn xpath(expr: impl Into<String>) -> Self {
        Self::XPath(expr.into())
    }

    /// Creates an ID selector.
    #[inline]
    pub fn id(id: impl Into<String>) -> Self {
        Self::Id(id.into())
    }

    /// Creates a name attribute selector.
    #[inline]
    pub fn name(name: impl Into<String>) -> Self {
        Self::Name(name.into())
    }

    /// Creates a class name selector.
    #[inline]
    pub fn class(class: impl Into<String>) -> Self {
        Self::Class(class.into())
    }

    /// Creates a tag name selector.
    #[inline]
    pub fn tag(tag: impl Into<String>) -> Self {
        Self::Tag(tag.into())
    }

    /// Creates a link text selector.
    #[inline]
    pub fn link_text(text: impl Into<String>) -> Self {
        Self::LinkText(text.into())
    }

    /// Creates a partial link text selector.
    #[inline]
    pub fn partial_link_text(text: impl Into<String>) -> Self {
        Self::PartialLinkText(text.into())
    }

    /// Builds a locator from a strategy name and a value.
    ///
    /// Returns `None` when `strategy` is not one of [`STRATEGIES`].
    #[must_use]
    pub fn from_strategy(strategy: &str, value: impl Into<String>) -> Option<Self> {
        let value = value.into();
        let by = match strategy {
            "css selector" => Self::Css(value),
            "xpath" => Self::XPath(value),
            "id" => Self::Id(value),
            "name" => Self::Name(value),
            "class name" => Self::Class(value),
            "tag name" => Self::Tag(value),
            "link text" => Self::LinkText(value),
            "partial link text" => Self::PartialLinkText(value),
            _ => return None,
        };
        Some(by)
    }

    /// Builds a locator from a selector and a strategy name, in either order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if neither argument is a strategy.
    pub fn from_parts(selector: &str, by: &str) -> Result<Self> {
        let (selector, by) = swap_if_reversed(selector, by);
        Self::from_strategy(by, selector).ok_or_else(|| {
            Error::invalid_argument(format!(
                "unknown locator strategy {by:?}; expected one of {STRATEGIES:?}"
            ))
        })
    }

    /// Returns the strategy name as WebDriver spells it.
    #[must_use]
    pub fn strategy(&self) -> &'static str {
        match self {
            Self::Css(_) => "css selector",
            Self::XPath(_) => "xpath",
            Self::Id(_) => "id",
            Self::Name(_) => "name",
            Self::Class(_) => "class name",
            Self::Tag(_) => "tag name",
            Self::LinkText(_) => "link text",
            Self::PartialLinkText(_) => "partial link text",
        }
    }

    /// Returns the selector value.
    #[must_use]
    pub fn value(&self) -> &str {
        match self {
            Self::Css(v)
            | Self::XPath(v)
            | Self::Id(v)
            | Self::Name(v)
            | Self::Class(v)
            | Self::Tag(v)
            | Self::LinkText(v)
            | Self::PartialLinkText(v) => v,
        }
    }

    /// Returns `true` for the link text strategy.
    #[inline]
    #[must_use]
    pub fn is_link_text(&self) -> bool {
        matches!(self, Self::LinkText(_))
    }

    /// Rewrites `id`, `name` and `class name` as CSS.
    ///
    /// W3C WebDriver only accepts css, xpath, tag name and the link text
    /// strategies; drivers speaking the standard protocol call this first.
    #[must_use]
    pub fn to_w3c(&self) -> Self {
        match self {
            Self::Id(id) => Self::Css(format!("[id=\"{}\"]", css_escape_quotes(id))),
            Self::Name(name) => Self::Css(format!("[name=\"{}\"]", css_escape_quotes(name))),
            Self::Class(class) => Self::Css(format!(".{class}")),
            other => other.clone(),
        }
    }
}

impl fmt::Display for By {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.strategy(), self.value())
    }
}

/// Every strategy name accepted by [`By::from_strategy`].
pub const STRATEGIES: &[&str] = &[
    "css selector",
    "class name",
    "id",
    "name",
    "link text",
    "xpath",
    "tag name",
    "partial link text",
];

// ============================================================================
// Selector Predicates
// ============================================================================

/// Returns `true` if `by` names a locator strategy.
#[inline]
#[must_use]
pub fn is_valid_by(by: &str) -> bool {
    STRATEGIES.contains(&by)
}

/// Returns `true` if the selector reads as XPath.
#[inline]
#[must_use]
pub fn is_xpath_selector(selector: &str) -> bool {
    selector.starts_with('/') || selector.starts_with("./") || selector.starts_with('(')
}

/// Swaps `(selector, by)` when the caller passed them the wrong way round.
#[must_use]
pub fn swap_if_reversed<'a>(selector: &'a str, by: &'a str) -> (&'a str, &'a str) {
    if !is_valid_by(by) && is_valid_by(selector) {
        (by, selector)
    } else {
        (selector, by)
    }
}

fn strip_any_prefix<'a>(selector: &'a str, prefixes: &[&str]) -> Option<&'a str> {
    prefixes.iter().find_map(|p| selector.strip_prefix(p))
}

fn css_escape_quotes(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

// ============================================================================
// Locator
// ============================================================================

/// A normalized locator plus the selector text shown in messages.
///
/// Normalization applies shorthand prefixes, detects XPath, and converts
/// CSS `:contains()` selectors to XPath. When such a conversion happened,
/// [`describe`](Self::describe) keeps reporting the CSS the user wrote.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Locator {
    by: By,
    original: Option<String>,
}

impl Locator {
    /// Builds a locator from a selector and a strategy name.
    ///
    /// The arguments may be given in either order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if neither argument is a strategy.
    pub fn new(selector: &str, by: &str) -> Result<Self> {
        By::from_parts(selector, by).map(Self::from)
    }

    /// Builds a locator from a CSS selector (or a shorthand).
    #[inline]
    pub fn css(selector: impl Into<String>) -> Self {
        Self::from(By::Css(selector.into()))
    }

    /// Returns the effective strategy sent to the driver.
    #[inline]
    #[must_use]
    pub fn by(&self) -> &By {
        &self.by
    }

    /// Returns the effective selector value.
    #[inline]
    #[must_use]
    pub fn value(&self) -> &str {
        self.by.value()
    }

    /// Returns the selector as the user wrote it.
    #[must_use]
    pub fn describe(&self) -> &str {
        self.original.as_deref().unwrap_or_else(|| self.by.value())
    }

    /// Returns `true` for link text locators.
    #[inline]
    #[must_use]
    pub fn is_link_text(&self) -> bool {
        self.by.is_link_text()
    }

    fn normalize(by: By) -> Self {
        let By::Css(selector) = by else {
            return Self { by, original: None };
        };

        if is_xpath_selector(&selector) {
            return Self {
                by: By::XPath(selector),
                original: None,
            };
        }
        if let Some(text) = strip_any_prefix(&selector, PARTIAL_LINK_TEXT_PREFIXES) {
            return Self {
                by: By::PartialLinkText(text.to_string()),
                original: None,
            };
        }
        if let Some(text) = strip_any_prefix(&selector, LINK_TEXT_PREFIXES) {
            return Self {
                by: By::LinkText(text.to_string()),
                original: None,
            };
        }
        if let Some(name) = strip_any_prefix(&selector, NAME_PREFIXES) {
            return Self {
                by: By::Css(format!("[name=\"{}\"]", css_escape_quotes(name))),
                original: None,
            };
        }
        if selector.contains(":contains(") {
            match css_to_xpath(&selector) {
                Ok(xpath) => {
                    return Self {
                        by: By::XPath(xpath),
                        original: Some(selector),
                    };
                }
                Err(e) => {
                    debug!(selector = %selector, error = %e, "Keeping :contains() selector as css");
                }
            }
        }

        Self {
            by: By::Css(selector),
            original: None,
        }
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

// ============================================================================
// From implementations for ergonomics
// ============================================================================

impl From<By> for Locator {
    fn from(by: By) -> Self {
        Self::normalize(by)
    }
}

impl From<&By> for Locator {
    fn from(by: &By) -> Self {
        Self::normalize(by.clone())
    }
}

impl From<&str> for Locator {
    /// Converts a string to a CSS locator (default), honoring shorthands.
    fn from(s: &str) -> Self {
        Self::css(s)
    }
}

impl From<String> for Locator {
    /// Converts a string to a CSS locator (default), honoring shorthands.
    fn from(s: String) -> Self {
        Self::css(s)
    }
}

impl From<&String> for Locator {
    fn from(s: &String) -> Self {
        Self::css(s.as_str())
    }
}

impl From<&Locator> for Locator {
    fn from(locator: &Locator) -> Self {
        locator.clone()
    }
}

impl From<&str> for By {
    /// Converts a string to CSS selector (default).
    fn from(s: &str) -> Self {
        Self::Css(s.to_string())
    }
}

impl From<String> for By {
    /// Converts a string to CSS selector (default).
    fn from(s: String) -> Self {
        Self::Css(s)
    }
}

// ============================================================================
// Tests
// ============================================================================
