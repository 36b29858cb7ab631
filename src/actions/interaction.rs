//! Hovering, clicking and typing.

use std::time::Duration;

use tokio::time::sleep;
use tracing::{debug, trace};

use crate::browser::{By, ElementRef, Key, Locator, ScriptArg};
use crate::error::{Error, Result};
use crate::settings::TimeoutTier;

use super::PageActions;
use super::core::millis;

// ============================================================================
// Constants
// ============================================================================

/// Dispatches a synthetic, bubbling `click` on `arguments[0]`.
const SIMULATE_CLICK_SCRIPT: &str = r#"var simulateClick = function (elem) {
    var evt = new MouseEvent('click', {
        bubbles: true,
        cancelable: true,
        view: window
    });
    var canceled = !elem.dispatchEvent(evt);
};
var someLink = arguments[0];
simulateClick(someLink);"#;

const CLICK_ACTIVE_ELEMENT_SCRIPT: &str = "document.activeElement.click();";

const JS_CLICK_SCRIPT: &str = "arguments[0].click();";

/// Extra pause before re-checking an element that was not yet clickable.
const JS_CLICK_SETTLE: Duration = Duration::from_millis(200);

/// Timeout for the follow-up lookups of clicks that already waited once.
const FOLLOW_UP_TIMEOUT: Duration = Duration::from_secs(1);

// ============================================================================
// PageActions - Hover
// ============================================================================

impl PageActions {
    /// Finds the element (without waiting) and moves the pointer over it.
    ///
    /// # Errors
    ///
    /// Returns the driver error if the element is missing or hovering fails.
    pub async fn hover_on_element(&self, selector: impl Into<Locator>) -> Result<ElementRef> {
        let locator = selector.into();
        debug!(selector = %locator, "Hovering on element");
        self.reconnect_if_disconnected().await;
        let element = self.driver.find_element(locator.by()).await?;
        self.driver.hover(&element).await?;
        Ok(element)
    }

    /// Moves the pointer over an element already found.
    ///
    /// # Errors
    ///
    /// Returns the driver error if hovering fails.
    pub async fn hover_element(&self, element: &ElementRef) -> Result<()> {
        self.reconnect_if_disconnected().await;
        self.driver.hover(element).await
    }

    /// Hovers over one element, then clicks another that the hover reveals,
    /// as with dropdown menus. Hover and click are retried together until
    /// the click lands.
    ///
    /// # Errors
    ///
    /// - the driver error if the hover element is missing
    /// - [`Error::ElementNotPresent`] for the click selector on timeout
    /// - [`Error::TimeLimitExceeded`] if the test time limit passes
    pub async fn hover_and_click(
        &self,
        hover_selector: impl Into<Locator>,
        click_selector: impl Into<Locator>,
        timeout: Option<Duration>,
        js_click: bool,
    ) -> Result<ElementRef> {
        let hover = hover_selector.into();
        self.reconnect_if_disconnected().await;
        let hover_element = self.driver.find_element(hover.by()).await?;
        self.hover_then(&hover_element, click_selector.into(), timeout, |target| async move {
            if js_click {
                self.driver
                    .execute_script(JS_CLICK_SCRIPT, vec![ScriptArg::Element(target)])
                    .await
                    .map(|_| ())
            } else {
                target.click().await
            }
        })
        .await
    }

    /// Like [`hover_and_click`](Self::hover_and_click), starting from an
    /// element already found.
    ///
    /// # Errors
    ///
    /// Same as [`hover_and_click`](Self::hover_and_click).
    pub async fn hover_element_and_click(
        &self,
        element: &ElementRef,
        click_selector: impl Into<Locator>,
        timeout: Option<Duration>,
    ) -> Result<ElementRef> {
        self.reconnect_if_disconnected().await;
        self.hover_then(element, click_selector.into(), timeout, |target| async move {
            target.click().await
        })
        .await
    }

    /// Like [`hover_element_and_click`](Self::hover_element_and_click), with
    /// a double-click.
    ///
    /// # Errors
    ///
    /// Same as [`hover_and_click`](Self::hover_and_click).
    pub async fn hover_element_and_double_click(
        &self,
        element: &ElementRef,
        click_selector: impl Into<Locator>,
        timeout: Option<Duration>,
    ) -> Result<ElementRef> {
        self.reconnect_if_disconnected().await;
        self.hover_then(element, click_selector.into(), timeout, |target| async move {
            self.driver.double_click(&target).await
        })
        .await
    }

    /// Retries hover, lookup of the target, then `action` on it.
    async fn hover_then<A, Fut>(
        &self,
        hover_element: &ElementRef,
        target: Locator,
        timeout: Option<Duration>,
        action: A,
    ) -> Result<ElementRef>
    where
        A: Fn(ElementRef) -> Fut,
        Fut: Future<Output = Result<()>>,
    {
        let timeout = self.timeout(timeout, TimeoutTier::Small);
        debug!(selector = %target, timeout_ms = millis(timeout), "Hovering then clicking");

        let target_ref = &target;
        let action = &action;
        let outcome = self
            .poll_until(timeout, || async move {
                let attempt = async {
                    self.driver.hover(hover_element).await?;
                    let element = self.driver.find_element(target_ref.by()).await?;
                    action(element.clone()).await?;
                    Ok::<_, Error>(element)
                };
                attempt.await.map_err(|e| trace!(error = %e, "Hover click attempt failed"))
            })
            .await?;

        outcome.map_err(|_| Error::ElementNotPresent {
            selector: target.describe().to_string(),
            timeout,
        })
    }
}

// ============================================================================
// PageActions - Click
// ============================================================================

impl PageActions {
    /// Waits for the element to be clickable and clicks it.
    ///
    /// # Errors
    ///
    /// Same as [`wait_for_element_clickable`](Self::wait_for_element_clickable),
    /// plus the driver error from clicking.
    pub async fn click(&self, selector: impl Into<Locator>, timeout: Option<Duration>) -> Result<()> {
        let locator = selector.into();
        if let Some(cdp) = self.cdp_swap().await {
            return cdp.click(locator.value()).await;
        }
        let timeout = self.timeout(timeout, TimeoutTier::Small);
        let element = self.wait_for_element_clickable(&locator, Some(timeout)).await?;
        element.click().await
    }

    /// Waits for the link with this exact text to be clickable and clicks it.
    ///
    /// # Errors
    ///
    /// - [`Error::LinkTextNotFound`] or [`Error::LinkTextNotClickable`]
    /// - the driver error from clicking
    pub async fn click_link(&self, link_text: &str, timeout: Option<Duration>) -> Result<()> {
        if let Some(cdp) = self.cdp_swap().await {
            return cdp.click_link(link_text).await;
        }
        let timeout = self.timeout(timeout, TimeoutTier::Small);
        let locator = Locator::from(By::link_text(link_text));
        let element = self.wait_for_element_clickable(locator, Some(timeout)).await?;
        element.click().await
    }

    /// Clicks the element if it is visible, waiting up to `timeout` for it
    /// first (no waiting by default). Does nothing if it stays hidden.
    ///
    /// # Errors
    ///
    /// Returns an error only if a visible element cannot be clicked.
    pub async fn click_if_visible(
        &self,
        selector: impl Into<Locator>,
        timeout: Option<Duration>,
    ) -> Result<()> {
        let locator = selector.into();
        if let Some(cdp) = self.cdp_swap().await {
            return cdp.click_if_visible(locator.value()).await;
        }
        if self.is_element_visible(&locator).await {
            return self.click(&locator, Some(FOLLOW_UP_TIMEOUT)).await;
        }
        let timeout = timeout.unwrap_or(Duration::ZERO);
        if timeout.is_zero() {
            return Ok(());
        }
        if let Err(e) = self.wait_for_element_visible(&locator, Some(timeout)).await {
            trace!(error = %e, "Element stayed hidden");
        }
        if self.is_element_visible(&locator).await {
            return self.click(&locator, Some(FOLLOW_UP_TIMEOUT)).await;
        }
        Ok(())
    }

    /// Clicks whichever element has focus.
    ///
    /// # Errors
    ///
    /// Returns the script error if the click fails.
    pub async fn click_active_element(&self) -> Result<()> {
        if let Some(cdp) = self.cdp_swap().await {
            return cdp.click_active_element().await;
        }
        self.reconnect_if_disconnected().await;
        self.driver
            .execute_script(CLICK_ACTIVE_ELEMENT_SCRIPT, Vec::new())
            .await?;
        Ok(())
    }

    /// Clicks the element by dispatching a synthetic `MouseEvent`.
    ///
    /// Works on elements that are present but covered or hidden. If the
    /// element is not yet clickable, waits a moment and looks it up again.
    ///
    /// # Errors
    ///
    /// - [`Error::ElementNotPresent`] if the element never appears
    /// - the script error if dispatching fails
    pub async fn js_click(&self, selector: impl Into<Locator>, timeout: Option<Duration>) -> Result<()> {
        let locator = selector.into();
        if let Some(cdp) = self.cdp_swap().await {
            return cdp.click(locator.value()).await;
        }
        let timeout = self.timeout(timeout, TimeoutTier::Small);
        let mut element = self.wait_for_element_present(&locator, Some(timeout)).await?;
        let clickable = matches!(element.is_displayed().await, Ok(true))
            && matches!(element.is_enabled().await, Ok(true));
        if !clickable {
            sleep(JS_CLICK_SETTLE).await;
            element = self
                .wait_for_element_present(&locator, Some(FOLLOW_UP_TIMEOUT))
                .await?;
        }
        self.driver
            .execute_script(SIMULATE_CLICK_SCRIPT, vec![ScriptArg::Element(element)])
            .await?;
        Ok(())
    }
}

// ============================================================================
// PageActions - Keyboard
// ============================================================================

impl PageActions {
    /// Waits for the element to be present and types `text` into it.
    /// A trailing `"\n"` submits the form instead of being typed.
    ///
    /// # Errors
    ///
    /// Same as [`wait_for_element_present`](Self::wait_for_element_present),
    /// plus the driver error from typing.
    pub async fn send_keys(
        &self,
        selector: impl Into<Locator>,
        text: &str,
        timeout: Option<Duration>,
    ) -> Result<()> {
        let locator = selector.into();
        if let Some(cdp) = self.cdp_swap().await {
            return cdp.send_keys(locator.value(), text).await;
        }
        let timeout = self.timeout(timeout, TimeoutTier::Large);
        let element = self.wait_for_element_present(&locator, Some(timeout)).await?;
        type_then_submit(&element, text).await
    }

    /// Like [`send_keys`](Self::send_keys), one key event per character.
    /// A trailing `"\n"` is sent as the Return key.
    ///
    /// # Errors
    ///
    /// Same as [`send_keys`](Self::send_keys).
    pub async fn press_keys(
        &self,
        selector: impl Into<Locator>,
        text: &str,
        timeout: Option<Duration>,
    ) -> Result<()> {
        let locator = selector.into();
        if let Some(cdp) = self.cdp_swap().await {
            return cdp.press_keys(locator.value(), text).await;
        }
        let timeout = self.timeout(timeout, TimeoutTier::Large);
        let element = self.wait_for_element_present(&locator, Some(timeout)).await?;

        let (body, submit) = split_submit(text);
        let mut buf = [0u8; 4];
        for c in body.chars() {
            element.send_keys(c.encode_utf8(&mut buf)).await?;
        }
        if submit {
            element.send_keys(Key::Return.as_str()).await?;
        }
        Ok(())
    }

    /// Waits for the element to be clickable, clears it, and types `text`.
    /// A trailing `"\n"` submits the form.
    ///
    /// # Errors
    ///
    /// Same as [`wait_for_element_clickable`](Self::wait_for_element_clickable),
    /// plus the driver error from typing.
    pub async fn update_text(
        &self,
        selector: impl Into<Locator>,
        text: &str,
        timeout: Option<Duration>,
    ) -> Result<()> {
        let locator = selector.into();
        if let Some(cdp) = self.cdp_swap().await {
            return cdp.type_text(locator.value(), text).await;
        }
        let timeout = self.timeout(timeout, TimeoutTier::Large);
        let element = self.wait_for_element_clickable(&locator, Some(timeout)).await?;
        element.clear().await?;
        type_then_submit(&element, text).await
    }

    /// Waits for the element to be clickable and submits its form.
    ///
    /// # Errors
    ///
    /// Same as [`wait_for_element_clickable`](Self::wait_for_element_clickable),
    /// plus the driver error from submitting.
    pub async fn submit(&self, selector: impl Into<Locator>) -> Result<()> {
        let locator = selector.into();
        if let Some(cdp) = self.cdp_swap().await {
            return cdp.send_keys(locator.value(), "\r\n").await;
        }
        let timeout = self.timeout(None, TimeoutTier::Small);
        let element = self.wait_for_element_clickable(&locator, Some(timeout)).await?;
        element.submit().await
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Splits off a trailing newline, which means "submit".
fn split_submit(text: &str) -> (&str, bool) {
    match text.strip_suffix('\n') {
        Some(body) => (body, true),
        None => (text, false),
    }
}

async fn type_then_submit(element: &ElementRef, text: &str) -> Result<()> {
    let (body, submit) = split_submit(text);
    element.send_keys(body).await?;
    if submit {
        element.submit().await?;
    }
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_submit() {
        assert_eq!(split_submit("hello\n"), ("hello", true));
        assert_eq!(split_submit("hello"), ("hello", false));
        assert_eq!(split_submit("\n"), ("", true));
        assert_eq!(split_submit("a\nb"), ("a\nb", false));
    }
}
