//! Element presence, visibility and clickability waits.

use std::time::Duration;

use futures_util::future::join_all;
use tokio::time::sleep;
use tracing::{debug, warn};

use crate::browser::{By, ElementRef, Locator, is_xpath_selector};
use crate::error::{Error, Result};
use crate::settings::TimeoutTier;

use super::PageActions;
use super::core::{Stage, millis};

// ============================================================================
// PageActions - Positive Waits
// ============================================================================

impl PageActions {
    /// Waits for the element to exist in the DOM. It may be hidden.
    ///
    /// # Errors
    ///
    /// - [`Error::ElementNotPresent`] if it never appears
    /// - [`Error::TimeLimitExceeded`] if the test time limit passes
    pub async fn wait_for_element_present(
        &self,
        selector: impl Into<Locator>,
        timeout: Option<Duration>,
    ) -> Result<ElementRef> {
        let locator = selector.into();
        let timeout = self.timeout(timeout, TimeoutTier::Large);
        debug!(
            selector = %locator,
            strategy = locator.by().strategy(),
            timeout_ms = millis(timeout),
            "Waiting for element present"
        );
        self.reconnect_if_disconnected().await;

        let outcome = self
            .poll_until(timeout, || self.probe(locator.by(), Stage::Absent))
            .await?;

        outcome.map_err(|_| Error::ElementNotPresent {
            selector: locator.describe().to_string(),
            timeout,
        })
    }

    /// Waits for the element to exist and be displayed.
    ///
    /// # Errors
    ///
    /// - [`Error::ElementNotPresent`] if it never appears
    /// - [`Error::ElementNotVisible`] if it appears but stays hidden
    /// - [`Error::LinkTextNotFound`] instead of both, for link text locators
    /// - [`Error::TimeLimitExceeded`] if the test time limit passes
    pub async fn wait_for_element_visible(
        &self,
        selector: impl Into<Locator>,
        timeout: Option<Duration>,
    ) -> Result<ElementRef> {
        let locator = selector.into();
        let timeout = self.timeout(timeout, TimeoutTier::Large);
        debug!(
            selector = %locator,
            strategy = locator.by().strategy(),
            timeout_ms = millis(timeout),
            "Waiting for element visible"
        );
        self.reconnect_if_disconnected().await;

        let outcome = self
            .poll_until(timeout, || self.probe(locator.by(), Stage::Hidden))
            .await?;

        outcome.map_err(|misses| {
            let selector = locator.describe().to_string();
            if locator.is_link_text() {
                Error::LinkTextNotFound {
                    link_text: selector,
                    timeout,
                }
            } else if misses.furthest == Stage::Absent {
                Error::ElementNotPresent { selector, timeout }
            } else {
                Error::ElementNotVisible { selector, timeout }
            }
        })
    }

    /// Waits for the element to be displayed and enabled.
    ///
    /// # Errors
    ///
    /// - [`Error::ElementNotPresent`], [`Error::ElementNotVisible`] or
    ///   [`Error::ElementNotClickable`] by how far it got
    /// - [`Error::LinkTextNotFound`] or [`Error::LinkTextNotClickable`] for
    ///   link text locators
    /// - [`Error::TimeLimitExceeded`] if the test time limit passes
    pub async fn wait_for_element_clickable(
        &self,
        selector: impl Into<Locator>,
        timeout: Option<Duration>,
    ) -> Result<ElementRef> {
        let locator = selector.into();
        let timeout = self.timeout(timeout, TimeoutTier::Large);
        debug!(
            selector = %locator,
            strategy = locator.by().strategy(),
            timeout_ms = millis(timeout),
            "Waiting for element clickable"
        );
        self.reconnect_if_disconnected().await;

        let outcome = self
            .poll_until(timeout, || self.probe(locator.by(), Stage::Disabled))
            .await?;

        outcome.map_err(|misses| {
            let selector = locator.describe().to_string();
            match (locator.is_link_text(), misses.furthest) {
                (true, Stage::Disabled) => Error::LinkTextNotClickable {
                    link_text: selector,
                    timeout,
                },
                (true, _) => Error::LinkTextNotFound {
                    link_text: selector,
                    timeout,
                },
                (false, Stage::Absent) => Error::ElementNotPresent { selector, timeout },
                (false, Stage::Hidden) => Error::ElementNotVisible { selector, timeout },
                (false, Stage::Disabled) => Error::ElementNotClickable { selector, timeout },
            }
        })
    }

    /// Waits until any of the selectors matches a displayed element, and
    /// returns the first one found. Each selector is xpath if it looks like
    /// one, css otherwise.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidArgument`] if `selectors` is empty
    /// - [`Error::NoneOfElementsPresent`] if none ever appears
    /// - [`Error::NoneOfElementsVisible`] if some appear but all stay hidden
    /// - [`Error::TimeLimitExceeded`] if the test time limit passes
    pub async fn wait_for_any_of_elements_visible<S: AsRef<str>>(
        &self,
        selectors: &[S],
        timeout: Option<Duration>,
    ) -> Result<ElementRef> {
        let candidates = candidate_locators(selectors)?;
        let timeout = self.timeout(timeout, TimeoutTier::Large);
        debug!(count = candidates.len(), timeout_ms = millis(timeout), "Waiting for any element visible");
        self.reconnect_if_disconnected().await;

        let outcome = self
            .poll_until(timeout, || self.probe_any(&candidates, Stage::Hidden))
            .await?;

        outcome.map_err(|misses| {
            let selectors = selector_strings(selectors);
            if misses.furthest == Stage::Absent {
                Error::NoneOfElementsPresent { selectors, timeout }
            } else {
                Error::NoneOfElementsVisible { selectors, timeout }
            }
        })
    }

    /// Waits until any of the selectors matches an element in the DOM, and
    /// returns the first one found.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidArgument`] if `selectors` is empty
    /// - [`Error::NoneOfElementsPresent`] if none ever appears
    /// - [`Error::TimeLimitExceeded`] if the test time limit passes
    pub async fn wait_for_any_of_elements_present<S: AsRef<str>>(
        &self,
        selectors: &[S],
        timeout: Option<Duration>,
    ) -> Result<ElementRef> {
        let candidates = candidate_locators(selectors)?;
        let timeout = self.timeout(timeout, TimeoutTier::Large);
        debug!(count = candidates.len(), timeout_ms = millis(timeout), "Waiting for any element present");
        self.reconnect_if_disconnected().await;

        let outcome = self
            .poll_until(timeout, || self.probe_any(&candidates, Stage::Absent))
            .await?;

        outcome.map_err(|_| Error::NoneOfElementsPresent {
            selectors: selector_strings(selectors),
            timeout,
        })
    }
}

// ============================================================================
// PageActions - Negative Waits
// ============================================================================

impl PageActions {
    /// Waits for the element to leave the DOM.
    ///
    /// # Errors
    ///
    /// - [`Error::ElementStillPresent`] if it is still there at the timeout
    /// - [`Error::TimeLimitExceeded`] if the test time limit passes
    pub async fn wait_for_element_absent(
        &self,
        selector: impl Into<Locator>,
        timeout: Option<Duration>,
    ) -> Result<()> {
        let locator = selector.into();
        let timeout = self.timeout(timeout, TimeoutTier::Large);
        debug!(
            selector = %locator,
            strategy = locator.by().strategy(),
            timeout_ms = millis(timeout),
            "Waiting for element absent"
        );
        self.reconnect_if_disconnected().await;

        let by = locator.by();
        let outcome = self
            .poll_until(timeout, || async move {
                match self.driver.find_element(by).await {
                    Ok(_) => Err(()),
                    Err(_) => Ok(()),
                }
            })
            .await?;

        outcome.map_err(|_| Error::ElementStillPresent {
            selector: locator.describe().to_string(),
            timeout,
        })
    }

    /// Waits for the element to be hidden. A missing element counts as
    /// hidden.
    ///
    /// # Errors
    ///
    /// - [`Error::ElementStillVisible`] if it is still displayed at the timeout
    /// - [`Error::TimeLimitExceeded`] if the test time limit passes
    pub async fn wait_for_element_not_visible(
        &self,
        selector: impl Into<Locator>,
        timeout: Option<Duration>,
    ) -> Result<()> {
        let locator = selector.into();
        let timeout = self.timeout(timeout, TimeoutTier::Large);
        debug!(
            selector = %locator,
            strategy = locator.by().strategy(),
            timeout_ms = millis(timeout),
            "Waiting for element not visible"
        );
        self.reconnect_if_disconnected().await;

        let by = locator.by();
        let outcome = self
            .poll_until(timeout, || async move {
                let Ok(element) = self.driver.find_element(by).await else {
                    return Ok(());
                };
                match element.is_displayed().await {
                    Ok(true) => Err(()),
                    _ => Ok(()),
                }
            })
            .await?;

        outcome.map_err(|_| Error::ElementStillVisible {
            selector: locator.describe().to_string(),
            timeout,
        })
    }
}

// ============================================================================
// PageActions - Element Lists
// ============================================================================

impl PageActions {
    /// Finds every displayed element matching the selector.
    ///
    /// With `limit > 0`, at most `limit` elements are returned. If a
    /// reference goes stale mid-check, the lookup is retried once after a
    /// short pause, filling up to `limit` from the remaining matches.
    ///
    /// # Errors
    ///
    /// Returns the driver error if the lookup itself fails.
    pub async fn find_visible_elements(
        &self,
        selector: impl Into<Locator>,
        limit: usize,
    ) -> Result<Vec<ElementRef>> {
        let locator = selector.into();
        debug!(selector = %locator, limit, "Finding visible elements");
        self.reconnect_if_disconnected().await;

        let mut elements = self.driver.find_elements(locator.by()).await?;
        if limit > 0 {
            elements.truncate(limit);
        }
        match displayed_only(&elements).await {
            Ok(visible) => return Ok(visible),
            Err(e) => warn!(error = %e, "Visibility check failed, retrying lookup"),
        }

        sleep(Duration::from_millis(100)).await;
        let elements = self.driver.find_elements(locator.by()).await?;
        let mut visible = Vec::new();
        for element in elements {
            if limit > 0 && visible.len() >= limit {
                break;
            }
            if element.is_displayed().await? {
                visible.push(element);
            }
        }
        Ok(visible)
    }
}

// ============================================================================
// PageActions - Internal
// ============================================================================

impl PageActions {
    /// One lookup attempt, succeeding once the element gets past `stage`:
    /// `Absent` needs presence, `Hidden` needs display, `Disabled` needs
    /// display and enabled.
    pub(crate) async fn probe(
        &self,
        by: &By,
        stage: Stage,
    ) -> std::result::Result<ElementRef, Stage> {
        let element = self
            .driver
            .find_element(by)
            .await
            .map_err(|_| Stage::Absent)?;
        if stage == Stage::Absent {
            return Ok(element);
        }
        if !matches!(element.is_displayed().await, Ok(true)) {
            return Err(Stage::Hidden);
        }
        if stage == Stage::Hidden {
            return Ok(element);
        }
        if !matches!(element.is_enabled().await, Ok(true)) {
            return Err(Stage::Disabled);
        }
        Ok(element)
    }

    async fn probe_any(
        &self,
        candidates: &[By],
        stage: Stage,
    ) -> std::result::Result<ElementRef, Stage> {
        let mut furthest = Stage::Absent;
        for by in candidates {
            match self.probe(by, stage).await {
                Ok(element) => return Ok(element),
                Err(miss) => furthest = furthest.max(miss),
            }
        }
        Err(furthest)
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

fn candidate_locators<S: AsRef<str>>(selectors: &[S]) -> Result<Vec<By>> {
    if selectors.is_empty() {
        return Err(Error::invalid_argument("`selectors` cannot be an empty list!"));
    }
    Ok(selectors
        .iter()
        .map(|s| {
            let s = s.as_ref();
            if is_xpath_selector(s) {
                By::xpath(s)
            } else {
                By::css(s)
            }
        })
        .collect())
}

fn selector_strings<S: AsRef<str>>(selectors: &[S]) -> Vec<String> {
    selectors.iter().map(|s| s.as_ref().to_string()).collect()
}

async fn displayed_only(elements: &[ElementRef]) -> Result<Vec<ElementRef>> {
    let checks = join_all(elements.iter().map(|e| e.is_displayed())).await;
    let mut visible = Vec::new();
    for (element, displayed) in elements.iter().zip(checks) {
        if displayed? {
            visible.push(element.clone());
        }
    }
    Ok(visible)
}
