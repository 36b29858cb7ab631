//! Text waits.

use std::time::Duration;

use tracing::debug;

use crate::browser::{By, ElementRef, Locator};
use crate::error::{Error, Result};
use crate::settings::TimeoutTier;

use super::PageActions;
use super::core::millis;

// ============================================================================
// Miss Stages
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord)]
enum TextMiss {
    #[default]
    Absent,
    /// Found; `actual` is the trimmed text when it was displayed.
    Present { actual: Option<String> },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
enum NonEmptyMiss {
    #[default]
    Absent,
    Hidden,
    Blank,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TextMatch {
    Substring,
    Exact,
}

impl TextMatch {
    fn matches(self, actual: &str, expected: &str) -> bool {
        match self {
            Self::Substring => actual.contains(expected),
            Self::Exact => actual.trim() == expected.trim(),
        }
    }
}

// ============================================================================
// PageActions - Text Waits
// ============================================================================

impl PageActions {
    /// Waits for the element to be displayed with `text` in its text.
    ///
    /// # Errors
    ///
    /// - [`Error::ElementNotPresent`] if the element never appears
    /// - [`Error::TextNotVisible`] otherwise, with the last text seen
    /// - [`Error::TimeLimitExceeded`] if the test time limit passes
    pub async fn wait_for_text_visible(
        &self,
        text: &str,
        selector: impl Into<Locator>,
        timeout: Option<Duration>,
    ) -> Result<ElementRef> {
        let locator = selector.into();
        let timeout = self.timeout(timeout, TimeoutTier::Large);
        debug!(
            selector = %locator,
            text,
            timeout_ms = millis(timeout),
            "Waiting for text visible"
        );
        self.reconnect_if_disconnected().await;

        let outcome = self
            .poll_until(timeout, || {
                self.probe_text(locator.by(), text, TextMatch::Substring)
            })
            .await?;

        outcome.map_err(|misses| match (misses.furthest, misses.last) {
            (TextMiss::Absent, _) => Error::ElementNotPresent {
                selector: locator.describe().to_string(),
                timeout,
            },
            (_, last) => Error::TextNotVisible {
                text: text.to_string(),
                selector: locator.describe().to_string(),
                timeout,
                actual: last_actual(last),
            },
        })
    }

    /// Waits for the element to be displayed with text equal to `text`,
    /// ignoring surrounding whitespace.
    ///
    /// # Errors
    ///
    /// - [`Error::ElementNotPresent`] if the element never appears
    /// - [`Error::ExactTextNotVisible`] otherwise, with the last text seen
    /// - [`Error::TimeLimitExceeded`] if the test time limit passes
    pub async fn wait_for_exact_text_visible(
        &self,
        text: &str,
        selector: impl Into<Locator>,
        timeout: Option<Duration>,
    ) -> Result<ElementRef> {
        let locator = selector.into();
        let timeout = self.timeout(timeout, TimeoutTier::Large);
        debug!(
            selector = %locator,
            text,
            timeout_ms = millis(timeout),
            "Waiting for exact text visible"
        );
        self.reconnect_if_disconnected().await;

        let outcome = self
            .poll_until(timeout, || self.probe_text(locator.by(), text, TextMatch::Exact))
            .await?;

        outcome.map_err(|misses| match (misses.furthest, misses.last) {
            (TextMiss::Absent, _) => Error::ElementNotPresent {
                selector: locator.describe().to_string(),
                timeout,
            },
            (_, last) => Error::ExactTextNotVisible {
                text: text.to_string(),
                selector: locator.describe().to_string(),
                timeout,
                actual: last_actual(last),
            },
        })
    }

    /// Waits for the element to be displayed with non-blank text.
    ///
    /// The error reflects the final attempt only.
    ///
    /// # Errors
    ///
    /// - [`Error::ElementNotPresent`] if the element was missing
    /// - [`Error::ElementNotVisible`] if it was hidden
    /// - [`Error::NoVisibleText`] if its text was blank
    /// - [`Error::TimeLimitExceeded`] if the test time limit passes
    pub async fn wait_for_non_empty_text_visible(
        &self,
        selector: impl Into<Locator>,
        timeout: Option<Duration>,
    ) -> Result<ElementRef> {
        let locator = selector.into();
        let timeout = self.timeout(timeout, TimeoutTier::Large);
        debug!(
            selector = %locator,
            timeout_ms = millis(timeout),
            "Waiting for non-empty text visible"
        );
        self.reconnect_if_disconnected().await;

        let outcome = self
            .poll_until(timeout, || self.probe_non_empty(locator.by()))
            .await?;

        outcome.map_err(|misses| {
            let selector = locator.describe().to_string();
            match misses.last {
                NonEmptyMiss::Absent => Error::ElementNotPresent { selector, timeout },
                NonEmptyMiss::Hidden => Error::ElementNotVisible { selector, timeout },
                NonEmptyMiss::Blank => Error::NoVisibleText { selector, timeout },
            }
        })
    }
}

// ============================================================================
// PageActions - Negative Text Waits
// ============================================================================

impl PageActions {
    /// Waits until the element no longer shows `text`. A missing or hidden
    /// element counts as not showing it.
    ///
    /// # Errors
    ///
    /// - [`Error::TextStillVisible`] if the text is still shown at the timeout
    /// - [`Error::TimeLimitExceeded`] if the test time limit passes
    pub async fn wait_for_text_not_visible(
        &self,
        text: &str,
        selector: impl Into<Locator>,
        timeout: Option<Duration>,
    ) -> Result<()> {
        let locator = selector.into();
        let timeout = self.timeout(timeout, TimeoutTier::Large);
        debug!(
            selector = %locator,
            text,
            timeout_ms = millis(timeout),
            "Waiting for text not visible"
        );
        self.reconnect_if_disconnected().await;

        let outcome = self
            .poll_until(timeout, || self.text_gone(&locator, text, TextMatch::Substring))
            .await?;

        outcome.map_err(|_| Error::TextStillVisible {
            text: text.to_string(),
            selector: locator.describe().to_string(),
            timeout,
        })
    }

    /// Waits until the element text no longer equals `text`.
    ///
    /// # Errors
    ///
    /// - [`Error::ExactTextStillVisible`] if the text still matches at the
    ///   timeout
    /// - [`Error::TimeLimitExceeded`] if the test time limit passes
    pub async fn wait_for_exact_text_not_visible(
        &self,
        text: &str,
        selector: impl Into<Locator>,
        timeout: Option<Duration>,
    ) -> Result<()> {
        let locator = selector.into();
        let timeout = self.timeout(timeout, TimeoutTier::Large);
        debug!(
            selector = %locator,
            text,
            timeout_ms = millis(timeout),
            "Waiting for exact text not visible"
        );
        self.reconnect_if_disconnected().await;

        let outcome = self
            .poll_until(timeout, || self.text_gone(&locator, text, TextMatch::Exact))
            .await?;

        outcome.map_err(|_| Error::ExactTextStillVisible {
            text: text.to_string(),
            selector: locator.describe().to_string(),
            timeout,
        })
    }
}

// ============================================================================
// PageActions - Text Reads
// ============================================================================

impl PageActions {
    /// Waits for the element to be visible and returns its text.
    ///
    /// # Errors
    ///
    /// Same as [`wait_for_element_visible`](Self::wait_for_element_visible),
    /// or the CDP path's error while the WebDriver link is down.
    pub async fn get_text(
        &self,
        selector: impl Into<Locator>,
        timeout: Option<Duration>,
    ) -> Result<String> {
        let locator = selector.into();
        if let Some(cdp) = self.cdp_swap().await {
            return cdp.get_text(locator.value()).await;
        }
        let element = self.wait_for_element_visible(&locator, timeout).await?;
        self.text_of(&element).await
    }
}

// ============================================================================
// PageActions - Internal
// ============================================================================

impl PageActions {
    async fn probe_text(
        &self,
        by: &By,
        text: &str,
        mode: TextMatch,
    ) -> std::result::Result<ElementRef, TextMiss> {
        let element = self
            .driver
            .find_element(by)
            .await
            .map_err(|_| TextMiss::Absent)?;
        match self.text_if_displayed(&element).await {
            Ok(Some(actual)) if mode.matches(&actual, text) => Ok(element),
            Ok(Some(actual)) => Err(TextMiss::Present {
                actual: Some(actual.trim().to_string()),
            }),
            _ => Err(TextMiss::Present { actual: None }),
        }
    }

    async fn probe_non_empty(&self, by: &By) -> std::result::Result<ElementRef, NonEmptyMiss> {
        let element = self
            .driver
            .find_element(by)
            .await
            .map_err(|_| NonEmptyMiss::Absent)?;
        match self.text_if_displayed(&element).await {
            Ok(Some(actual)) if !actual.trim().is_empty() => Ok(element),
            Ok(Some(_)) => Err(NonEmptyMiss::Blank),
            Ok(None) => Err(NonEmptyMiss::Hidden),
            Err(_) => Err(NonEmptyMiss::Absent),
        }
    }

    /// Succeeds when the element does not show matching text.
    async fn text_gone(
        &self,
        locator: &Locator,
        text: &str,
        mode: TextMatch,
    ) -> std::result::Result<(), ()> {
        match self.displayed_text(locator).await {
            Ok(Some(actual)) if mode.matches(&actual, text) => Err(()),
            _ => Ok(()),
        }
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

fn last_actual(last: TextMiss) -> Option<String> {
    match last {
        TextMiss::Present { actual } => actual,
        TextMiss::Absent => None,
    }
}
