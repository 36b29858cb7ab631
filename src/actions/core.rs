//! Core PageActions struct and the shared poll driver.

use std::cmp::max;
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tracing::warn;

use crate::browser::{CdpDriver, ElementRef, WebDriver, read_text};
use crate::error::Result;
use crate::settings::{Settings, TimeoutTier};
use crate::wait::{Poll, TimeLimit};

// ============================================================================
// Miss Stages
// ============================================================================

/// How far an element lookup got on a failed attempt.
///
/// Ordered so that the furthest stage over a whole wait is the maximum.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) enum Stage {
    /// Not in the DOM.
    #[default]
    Absent,
    /// In the DOM but not displayed.
    Hidden,
    /// Displayed but not enabled.
    Disabled,
}

/// The misses recorded by [`PageActions::poll_until`].
#[derive(Debug, Clone, Default)]
pub(crate) struct Misses<S> {
    /// Miss from the final attempt.
    pub last: S,
    /// Furthest miss over all attempts.
    pub furthest: S,
}

impl<S: Ord + Clone> Misses<S> {
    fn record(&mut self, miss: S) {
        self.furthest = max(self.furthest.clone(), miss.clone());
        self.last = miss;
    }
}

/// Duration as whole milliseconds for log fields.
#[inline]
pub(crate) fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

// ============================================================================
// PageActions
// ============================================================================

/// Polling waits, assertions and actions over a [`WebDriver`] session.
///
/// Cheap to clone; clones share the driver and the test clock.
#[derive(Clone)]
pub struct PageActions {
    pub(crate) driver: Arc<dyn WebDriver>,
    pub(crate) settings: Settings,
    pub(crate) time_limit: Option<TimeLimit>,
}

impl fmt::Debug for PageActions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PageActions")
            .field("browser", &self.driver.browser_name())
            .field("settings", &self.settings)
            .field("time_limit", &self.time_limit)
            .finish_non_exhaustive()
    }
}

impl PageActions {
    /// Creates page actions over a driver.
    ///
    /// If the settings carry a time limit, the test clock starts now.
    #[must_use]
    pub fn new(driver: Arc<dyn WebDriver>, settings: Settings) -> Self {
        let time_limit = settings.time_limit().map(TimeLimit::starting_now);
        Self {
            driver,
            settings,
            time_limit,
        }
    }

    /// Creates page actions with default settings.
    #[inline]
    #[must_use]
    pub fn with_defaults(driver: Arc<dyn WebDriver>) -> Self {
        Self::new(driver, Settings::default())
    }

    /// Returns a copy whose waits ignore the whole-test time limit.
    ///
    /// Used for teardown steps that must run even after the limit passed.
    #[must_use]
    pub fn without_time_limit(&self) -> Self {
        Self {
            time_limit: None,
            ..self.clone()
        }
    }
}

// ============================================================================
// PageActions - Accessors
// ============================================================================

impl PageActions {
    /// Returns the driver.
    #[inline]
    #[must_use]
    pub fn driver(&self) -> &Arc<dyn WebDriver> {
        &self.driver
    }

    /// Returns the settings.
    #[inline]
    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Returns the running test clock, if a time limit is set.
    #[inline]
    #[must_use]
    pub fn time_limit(&self) -> Option<&TimeLimit> {
        self.time_limit.as_ref()
    }
}

// ============================================================================
// PageActions - Internal
// ============================================================================

impl PageActions {
    /// Resolves a method's timeout against its default tier.
    #[inline]
    pub(crate) fn timeout(&self, timeout: Option<Duration>, tier: TimeoutTier) -> Duration {
        self.settings.resolve(timeout, tier)
    }

    /// Starts a poll loop for one wait.
    pub(crate) fn poll(&self, timeout: Duration) -> Poll {
        Poll::new(timeout, self.settings.poll_interval(), self.time_limit)
    }

    /// Runs `attempt` until it matches or the wait times out.
    ///
    /// Returns `Ok(Err(misses))` on timeout so the caller can pick the error
    /// from how far the attempts got. Fails early only on the time limit.
    pub(crate) async fn poll_until<T, S, F, Fut>(
        &self,
        timeout: Duration,
        mut attempt: F,
    ) -> Result<std::result::Result<T, Misses<S>>>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = std::result::Result<T, S>>,
        S: Ord + Clone + Default,
    {
        let mut poll = self.poll(timeout);
        let mut misses = Misses::default();
        while poll.next_attempt()? {
            match attempt().await {
                Ok(found) => return Ok(Ok(found)),
                Err(miss) => misses.record(miss),
            }
            if !poll.backoff().await {
                break;
            }
        }
        Ok(Err(misses))
    }

    /// Reconnects a UC-mode driver whose WebDriver link is down.
    ///
    /// Failures are logged and swallowed; the next command reports them.
    pub(crate) async fn reconnect_if_disconnected(&self) {
        if !self.driver.is_using_uc() || self.driver.is_connected().await {
            return;
        }
        if let Err(e) = self.driver.connect().await {
            warn!(error = %e, "Reconnect failed");
        }
    }

    /// Returns the CDP path when the WebDriver link is down and one exists.
    pub(crate) async fn cdp_swap(&self) -> Option<&dyn CdpDriver> {
        if self.driver.is_cdp_swap_needed().await {
            self.driver.cdp()
        } else {
            None
        }
    }

    /// Reads the visible text of an element for this browser.
    pub(crate) async fn text_of(&self, element: &ElementRef) -> Result<String> {
        read_text(element.as_ref(), self.driver.is_safari()).await
    }
}

// ============================================================================
// Tests
// ============================================================================
