//! Attribute waits.

use std::time::Duration;

use tracing::debug;

use crate::browser::{By, ElementRef, Locator};
use crate::error::{Error, Result};
use crate::settings::TimeoutTier;

use super::PageActions;
use super::core::millis;

#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord)]
enum AttributeMiss {
    #[default]
    Absent,
    Missing,
    Mismatch(String),
}

// ============================================================================
// PageActions - Attribute Waits
// ============================================================================

impl PageActions {
    /// Waits for the element to carry `attribute`, equal to `value` when
    /// one is given.
    ///
    /// # Errors
    ///
    /// - [`Error::ElementNotPresent`] if the element never appears
    /// - [`Error::AttributeNotPresent`] if it lacks the attribute
    /// - [`Error::AttributeValueMismatch`] if the value differs, with the
    ///   last value seen
    /// - [`Error::TimeLimitExceeded`] if the test time limit passes
    pub async fn wait_for_attribute(
        &self,
        selector: impl Into<Locator>,
        attribute: &str,
        value: Option<&str>,
        timeout: Option<Duration>,
    ) -> Result<ElementRef> {
        let locator = selector.into();
        let timeout = self.timeout(timeout, TimeoutTier::Large);
        debug!(
            selector = %locator,
            attribute,
            value,
            timeout_ms = millis(timeout),
            "Waiting for attribute"
        );
        self.reconnect_if_disconnected().await;

        let outcome = self
            .poll_until(timeout, || self.probe_attribute(locator.by(), attribute, value))
            .await?;

        outcome.map_err(|misses| {
            let selector = locator.describe().to_string();
            // A vanished element keeps the last state it was seen in.
            let seen = match misses.last {
                AttributeMiss::Absent => misses.furthest,
                last => last,
            };
            match seen {
                AttributeMiss::Absent => Error::ElementNotPresent { selector, timeout },
                AttributeMiss::Missing => Error::AttributeNotPresent {
                    attribute: attribute.to_string(),
                    selector,
                    timeout,
                },
                AttributeMiss::Mismatch(actual) => Error::AttributeValueMismatch {
                    expected: value.unwrap_or_default().to_string(),
                    attribute: attribute.to_string(),
                    selector,
                    timeout,
                    actual,
                },
            }
        })
    }

    /// Waits for the element to drop `attribute` (or stop having `value`).
    /// A missing element counts as success.
    ///
    /// # Errors
    ///
    /// - [`Error::AttributeStillPresent`] if it is still there at the timeout
    /// - [`Error::TimeLimitExceeded`] if the test time limit passes
    pub async fn wait_for_attribute_not_present(
        &self,
        selector: impl Into<Locator>,
        attribute: &str,
        value: Option<&str>,
        timeout: Option<Duration>,
    ) -> Result<()> {
        let locator = selector.into();
        let timeout = self.timeout(timeout, TimeoutTier::Large);
        debug!(
            selector = %locator,
            attribute,
            value,
            timeout_ms = millis(timeout),
            "Waiting for attribute not present"
        );

        let outcome = self
            .poll_until(timeout, || self.attribute_gone(&locator, attribute, value))
            .await?;

        outcome.map_err(|_| Error::AttributeStillPresent {
            attribute: attribute.to_string(),
            value: value.map(str::to_string),
            selector: locator.describe().to_string(),
            timeout,
        })
    }
}

// ============================================================================
// PageActions - Internal
// ============================================================================

impl PageActions {
    async fn probe_attribute(
        &self,
        by: &By,
        attribute: &str,
        value: Option<&str>,
    ) -> std::result::Result<ElementRef, AttributeMiss> {
        let element = self
            .driver
            .find_element(by)
            .await
            .map_err(|_| AttributeMiss::Absent)?;
        let found = match element.attribute(attribute).await {
            Ok(Some(found)) => found,
            _ => return Err(AttributeMiss::Missing),
        };
        match value {
            Some(expected) if found != expected => Err(AttributeMiss::Mismatch(found)),
            _ => Ok(element),
        }
    }

    async fn attribute_gone(
        &self,
        locator: &Locator,
        attribute: &str,
        value: Option<&str>,
    ) -> std::result::Result<(), ()> {
        if self.is_attribute_present(locator, attribute, value).await {
            Err(())
        } else {
            Ok(())
        }
    }
}
