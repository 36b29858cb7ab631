//! Assertions and short-named waits.
//!
//! Assertions default to the small timeout and discard the element; the
//! short-named waits default to the large timeout and return it. Both go
//! through the CDP path while a UC-mode session is disconnected.

use std::time::Duration;

use crate::browser::{ElementRef, Locator};
use crate::error::Result;
use crate::settings::TimeoutTier;

use super::PageActions;

// ============================================================================
// PageActions - Assertions
// ============================================================================

impl PageActions {
    /// Asserts the element becomes visible.
    ///
    /// # Errors
    ///
    /// Same as [`wait_for_element_visible`](Self::wait_for_element_visible).
    pub async fn assert_element_visible(
        &self,
        selector: impl Into<Locator>,
        timeout: Option<Duration>,
    ) -> Result<()> {
        let locator = selector.into();
        if let Some(cdp) = self.cdp_swap().await {
            return cdp.assert_element(locator.value()).await;
        }
        let timeout = self.timeout(timeout, TimeoutTier::Small);
        self.wait_for_element_visible(locator, Some(timeout)).await?;
        Ok(())
    }

    /// Asserts the element appears in the DOM.
    ///
    /// # Errors
    ///
    /// Same as [`wait_for_element_present`](Self::wait_for_element_present).
    pub async fn assert_element_present(
        &self,
        selector: impl Into<Locator>,
        timeout: Option<Duration>,
    ) -> Result<()> {
        let locator = selector.into();
        if let Some(cdp) = self.cdp_swap().await {
            return cdp.assert_element_present(locator.value()).await;
        }
        let timeout = self.timeout(timeout, TimeoutTier::Small);
        self.wait_for_element_present(locator, Some(timeout)).await?;
        Ok(())
    }

    /// Asserts the element becomes hidden or leaves the DOM.
    ///
    /// # Errors
    ///
    /// Same as [`wait_for_element_not_visible`](Self::wait_for_element_not_visible).
    pub async fn assert_element_not_visible(
        &self,
        selector: impl Into<Locator>,
        timeout: Option<Duration>,
    ) -> Result<()> {
        let timeout = self.timeout(timeout, TimeoutTier::Small);
        self.wait_for_element_not_visible(selector, Some(timeout)).await
    }

    /// Asserts the element shows `text`, ignoring whitespace around it.
    ///
    /// # Errors
    ///
    /// Same as [`wait_for_text_visible`](Self::wait_for_text_visible).
    pub async fn assert_text(
        &self,
        text: &str,
        selector: impl Into<Locator>,
        timeout: Option<Duration>,
    ) -> Result<()> {
        let locator = selector.into();
        if let Some(cdp) = self.cdp_swap().await {
            return cdp.assert_text(text, locator.value()).await;
        }
        let timeout = self.timeout(timeout, TimeoutTier::Small);
        self.wait_for_text_visible(text.trim(), locator, Some(timeout))
            .await?;
        Ok(())
    }

    /// Asserts the element text equals `text`.
    ///
    /// # Errors
    ///
    /// Same as [`wait_for_exact_text_visible`](Self::wait_for_exact_text_visible).
    pub async fn assert_exact_text(
        &self,
        text: &str,
        selector: impl Into<Locator>,
        timeout: Option<Duration>,
    ) -> Result<()> {
        let locator = selector.into();
        if let Some(cdp) = self.cdp_swap().await {
            return cdp.assert_exact_text(text, locator.value()).await;
        }
        let timeout = self.timeout(timeout, TimeoutTier::Small);
        self.wait_for_exact_text_visible(text.trim(), locator, Some(timeout))
            .await?;
        Ok(())
    }

    /// Asserts the element shows some non-blank text.
    ///
    /// # Errors
    ///
    /// Same as
    /// [`wait_for_non_empty_text_visible`](Self::wait_for_non_empty_text_visible).
    pub async fn assert_non_empty_text(
        &self,
        selector: impl Into<Locator>,
        timeout: Option<Duration>,
    ) -> Result<()> {
        let timeout = self.timeout(timeout, TimeoutTier::Small);
        self.wait_for_non_empty_text_visible(selector, Some(timeout))
            .await?;
        Ok(())
    }

    /// Asserts the element stops showing `text`.
    ///
    /// # Errors
    ///
    /// Same as [`wait_for_text_not_visible`](Self::wait_for_text_not_visible).
    pub async fn assert_text_not_visible(
        &self,
        text: &str,
        selector: impl Into<Locator>,
        timeout: Option<Duration>,
    ) -> Result<()> {
        let timeout = self.timeout(timeout, TimeoutTier::Small);
        self.wait_for_text_not_visible(text.trim(), selector, Some(timeout))
            .await
    }
}

// ============================================================================
// PageActions - Short Waits
// ============================================================================

impl PageActions {
    /// Waits for a visible element.
    ///
    /// # Errors
    ///
    /// Same as [`wait_for_element_visible`](Self::wait_for_element_visible).
    pub async fn wait_for_element(
        &self,
        selector: impl Into<Locator>,
        timeout: Option<Duration>,
    ) -> Result<ElementRef> {
        let locator = selector.into();
        if let Some(cdp) = self.cdp_swap().await {
            return cdp.select(locator.value()).await;
        }
        self.wait_for_element_visible(locator, timeout).await
    }

    /// Waits for an element in the DOM, visible or not.
    ///
    /// # Errors
    ///
    /// Same as [`wait_for_element_present`](Self::wait_for_element_present).
    pub async fn wait_for_selector(
        &self,
        selector: impl Into<Locator>,
        timeout: Option<Duration>,
    ) -> Result<ElementRef> {
        let locator = selector.into();
        if let Some(cdp) = self.cdp_swap().await {
            return cdp.select(locator.value()).await;
        }
        self.wait_for_element_present(locator, timeout).await
    }

    /// Waits for the element to show `text`.
    ///
    /// # Errors
    ///
    /// Same as [`wait_for_text_visible`](Self::wait_for_text_visible).
    pub async fn wait_for_text(
        &self,
        text: &str,
        selector: impl Into<Locator>,
        timeout: Option<Duration>,
    ) -> Result<ElementRef> {
        let locator = selector.into();
        if let Some(cdp) = self.cdp_swap().await {
            cdp.assert_text(text, locator.value()).await?;
            return cdp.find_element(locator.value()).await;
        }
        self.wait_for_text_visible(text, locator, timeout).await
    }

    /// Waits for the element text to equal `text`.
    ///
    /// # Errors
    ///
    /// Same as [`wait_for_exact_text_visible`](Self::wait_for_exact_text_visible).
    pub async fn wait_for_exact_text(
        &self,
        text: &str,
        selector: impl Into<Locator>,
        timeout: Option<Duration>,
    ) -> Result<ElementRef> {
        self.wait_for_exact_text_visible(text, selector, timeout)
            .await
    }

    /// Waits for the element to show non-blank text.
    ///
    /// # Errors
    ///
    /// Same as
    /// [`wait_for_non_empty_text_visible`](Self::wait_for_non_empty_text_visible).
    pub async fn wait_for_non_empty_text(
        &self,
        selector: impl Into<Locator>,
        timeout: Option<Duration>,
    ) -> Result<ElementRef> {
        self.wait_for_non_empty_text_visible(selector, timeout).await
    }
}
