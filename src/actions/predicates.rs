//! Immediate checks. Nothing here waits, and any driver failure reads as
//! `false`.

use tracing::trace;

use crate::browser::{ElementRef, Locator};
use crate::error::Result;

use super::PageActions;

// ============================================================================
// PageActions - Element State
// ============================================================================

impl PageActions {
    /// Checks if the element is in the DOM.
    pub async fn is_element_present(&self, selector: impl Into<Locator>) -> bool {
        let locator = selector.into();
        if let Some(cdp) = self.cdp_swap().await {
            return cdp.is_element_present(locator.value()).await.unwrap_or(false);
        }
        self.reconnect_if_disconnected().await;
        self.driver.find_element(locator.by()).await.is_ok()
    }

    /// Checks if the element is in the DOM and displayed.
    pub async fn is_element_visible(&self, selector: impl Into<Locator>) -> bool {
        let locator = selector.into();
        if let Some(cdp) = self.cdp_swap().await {
            return cdp.is_element_visible(locator.value()).await.unwrap_or(false);
        }
        self.reconnect_if_disconnected().await;
        match self.driver.find_element(locator.by()).await {
            Ok(element) => element.is_displayed().await.unwrap_or(false),
            Err(_) => false,
        }
    }

    /// Checks if the element is displayed and enabled.
    pub async fn is_element_clickable(&self, selector: impl Into<Locator>) -> bool {
        let locator = selector.into();
        self.reconnect_if_disconnected().await;
        let Ok(element) = self.driver.find_element(locator.by()).await else {
            return false;
        };
        matches!(element.is_displayed().await, Ok(true))
            && matches!(element.is_enabled().await, Ok(true))
    }

    /// Checks if the element is enabled.
    pub async fn is_element_enabled(&self, selector: impl Into<Locator>) -> bool {
        let locator = selector.into();
        self.reconnect_if_disconnected().await;
        match self.driver.find_element(locator.by()).await {
            Ok(element) => element.is_enabled().await.unwrap_or(false),
            Err(_) => false,
        }
    }
}

// ============================================================================
// PageActions - Text & Attributes
// ============================================================================

impl PageActions {
    /// Checks if the element is displayed and its text contains `text`.
    pub async fn is_text_visible(&self, text: &str, selector: impl Into<Locator>) -> bool {
        let locator = selector.into();
        self.reconnect_if_disconnected().await;
        match self.displayed_text(&locator).await {
            Ok(Some(actual)) => actual.contains(text),
            _ => false,
        }
    }

    /// Checks if the element is displayed and its text equals `text`,
    /// ignoring surrounding whitespace.
    pub async fn is_exact_text_visible(&self, text: &str, selector: impl Into<Locator>) -> bool {
        let locator = selector.into();
        self.reconnect_if_disconnected().await;
        match self.displayed_text(&locator).await {
            Ok(Some(actual)) => actual.trim() == text.trim(),
            _ => false,
        }
    }

    /// Checks if the element is displayed with non-blank text.
    pub async fn is_non_empty_text_visible(&self, selector: impl Into<Locator>) -> bool {
        let locator = selector.into();
        self.reconnect_if_disconnected().await;
        match self.displayed_text(&locator).await {
            Ok(Some(actual)) => !actual.trim().is_empty(),
            _ => false,
        }
    }

    /// Checks if the element carries `attribute`, and when `value` is given,
    /// that the attribute equals it.
    pub async fn is_attribute_present(
        &self,
        selector: impl Into<Locator>,
        attribute: &str,
        value: Option<&str>,
    ) -> bool {
        let locator = selector.into();
        self.reconnect_if_disconnected().await;
        let Ok(element) = self.driver.find_element(locator.by()).await else {
            return false;
        };
        match element.attribute(attribute).await {
            Ok(Some(found)) => value.is_none_or(|expected| found == expected),
            _ => false,
        }
    }

    /// Same as [`is_attribute_present`](Self::is_attribute_present).
    pub async fn has_attribute(
        &self,
        selector: impl Into<Locator>,
        attribute: &str,
        value: Option<&str>,
    ) -> bool {
        self.is_attribute_present(selector, attribute, value).await
    }
}

// ============================================================================
// PageActions - Internal
// ============================================================================

impl PageActions {
    /// Finds the element and reads its text, `None` if it is not displayed.
    pub(crate) async fn displayed_text(&self, locator: &Locator) -> Result<Option<String>> {
        let element = self.driver.find_element(locator.by()).await?;
        self.text_if_displayed(&element).await
    }

    /// Reads the element's text, `None` if it is not displayed.
    pub(crate) async fn text_if_displayed(&self, element: &ElementRef) -> Result<Option<String>> {
        let text = self.text_of(element).await?;
        if !element.is_displayed().await? {
            trace!("Element not displayed");
            return Ok(None);
        }
        Ok(Some(text))
    }
}
