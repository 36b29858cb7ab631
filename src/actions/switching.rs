//! Alert, frame and window switching.

use std::sync::LazyLock;
use std::time::Duration;

use tokio::sync::Mutex;
use tracing::{debug, trace};

use crate::browser::{Alert, By, FrameRef, WindowRef, is_xpath_selector};
use crate::error::{Error, Result};
use crate::settings::TimeoutTier;

use super::PageActions;
use super::core::{Stage, millis};

// ============================================================================
// Constants
// ============================================================================

/// Serializes window switching for UC-mode sessions in this process.
static UC_SWITCH_LOCK: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));

// ============================================================================
// PageActions - Alerts
// ============================================================================

impl PageActions {
    /// Waits for an alert to open and switches to it.
    ///
    /// # Errors
    ///
    /// - [`Error::AlertNotPresent`] if none opens in time
    /// - any other driver error from switching, immediately
    /// - [`Error::TimeLimitExceeded`] if the test time limit passes
    pub async fn wait_for_and_switch_to_alert(
        &self,
        timeout: Option<Duration>,
    ) -> Result<Box<dyn Alert>> {
        let timeout = self.timeout(timeout, TimeoutTier::Large);
        debug!(timeout_ms = millis(timeout), "Waiting for alert");
        self.reconnect_if_disconnected().await;

        let outcome = self
            .poll_until(timeout, || async move {
                let alert = match self.driver.switch_to_alert().await {
                    Ok(alert) => alert,
                    Err(Error::NoAlertPresent) => return Err(()),
                    Err(e) => return Ok(Err(e)),
                };
                // Reading the text proves the dialog is still open.
                match alert.text().await {
                    Ok(_) => Ok(Ok(alert)),
                    Err(Error::NoAlertPresent) => Err(()),
                    Err(e) => Ok(Err(e)),
                }
            })
            .await?;

        match outcome {
            Ok(result) => result,
            Err(_) => Err(Error::AlertNotPresent { timeout }),
        }
    }

    /// Waits for an alert, accepts it, and returns its text.
    ///
    /// # Errors
    ///
    /// Same as [`wait_for_and_switch_to_alert`](Self::wait_for_and_switch_to_alert).
    pub async fn wait_for_and_accept_alert(&self, timeout: Option<Duration>) -> Result<String> {
        let alert = self.wait_for_and_switch_to_alert(timeout).await?;
        let text = alert.text().await?;
        alert.accept().await?;
        Ok(text)
    }

    /// Waits for an alert, dismisses it, and returns its text.
    ///
    /// # Errors
    ///
    /// Same as [`wait_for_and_switch_to_alert`](Self::wait_for_and_switch_to_alert).
    pub async fn wait_for_and_dismiss_alert(&self, timeout: Option<Duration>) -> Result<String> {
        let alert = self.wait_for_and_switch_to_alert(timeout).await?;
        let text = alert.text().await?;
        alert.dismiss().await?;
        Ok(text)
    }
}

// ============================================================================
// PageActions - Frames
// ============================================================================

impl PageActions {
    /// Waits for an iframe and switches into it.
    ///
    /// A [`FrameRef::Name`] that the driver cannot switch to by name or id is
    /// also tried as a css or xpath selector for the iframe element, once
    /// that element is visible (or just present, with `invisible`).
    ///
    /// # Errors
    ///
    /// - [`Error::FrameNotAvailable`] if switching never succeeds
    /// - [`Error::TimeLimitExceeded`] if the test time limit passes
    pub async fn switch_to_frame(
        &self,
        frame: impl Into<FrameRef>,
        timeout: Option<Duration>,
        invisible: bool,
    ) -> Result<()> {
        let frame = frame.into();
        let timeout = self.timeout(timeout, TimeoutTier::Small);
        debug!(
            frame = %frame.describe(),
            invisible,
            timeout_ms = millis(timeout),
            "Switching to frame"
        );
        self.reconnect_if_disconnected().await;

        let frame_ref = &frame;
        let outcome = self
            .poll_until(timeout, || async move {
                match self.driver.switch_to_frame(frame_ref).await {
                    Ok(()) => Ok(()),
                    Err(e) => {
                        trace!(error = %e, "Frame switch failed");
                        self.switch_to_frame_element(frame_ref, invisible).await
                    }
                }
            })
            .await?;

        outcome.map_err(|_| Error::FrameNotAvailable {
            frame: frame.describe(),
            presence: if invisible { "present" } else { "visible" },
            timeout,
        })
    }

    async fn switch_to_frame_element(
        &self,
        frame: &FrameRef,
        invisible: bool,
    ) -> std::result::Result<(), ()> {
        let FrameRef::Name(selector) = frame else {
            return Err(());
        };
        let by = if is_xpath_selector(selector) {
            By::xpath(selector.as_str())
        } else {
            By::css(selector.as_str())
        };
        let stage = if invisible { Stage::Absent } else { Stage::Hidden };
        let element = self.probe(&by, stage).await.map_err(|_| ())?;
        self.driver
            .switch_to_frame(&FrameRef::Element(element))
            .await
            .map_err(|_| ())
    }
}

// ============================================================================
// PageActions - Windows
// ============================================================================

impl PageActions {
    /// Waits for a window and switches to it.
    ///
    /// Index `-1` is the last window. Safari lists handles newest first, so
    /// indices are mirrored there. With `uc_lock`, UC-mode sessions switch
    /// one at a time across the process.
    ///
    /// # Errors
    ///
    /// - [`Error::WindowNotPresent`] if the window never appears
    /// - any other driver error from switching, immediately
    /// - [`Error::TimeLimitExceeded`] if the test time limit passes
    pub async fn switch_to_window(
        &self,
        window: impl Into<WindowRef>,
        timeout: Option<Duration>,
        uc_lock: bool,
    ) -> Result<()> {
        let window = window.into();
        let timeout = self.timeout(timeout, TimeoutTier::Small);
        debug!(window = %window, uc_lock, timeout_ms = millis(timeout), "Switching to window");
        self.reconnect_if_disconnected().await;

        match window {
            WindowRef::Index(index) => self.switch_to_window_index(index, timeout, uc_lock).await,
            WindowRef::Handle(handle) => {
                let handle_ref = handle.as_str();
                let outcome = self
                    .poll_until(timeout, || async move {
                        match self.switch_window_handle(handle_ref, uc_lock).await {
                            Ok(()) => Ok(Ok(())),
                            Err(Error::NoSuchWindow { .. }) => Err(()),
                            Err(e) => Ok(Err(e)),
                        }
                    })
                    .await?;
                match outcome {
                    Ok(result) => result,
                    Err(_) => Err(Error::WindowNotPresent {
                        window: handle,
                        timeout,
                    }),
                }
            }
        }
    }

    async fn switch_to_window_index(
        &self,
        index: isize,
        timeout: Duration,
        uc_lock: bool,
    ) -> Result<()> {
        let mut index = index;
        if index == -1 || self.driver.is_safari() {
            let count = isize::try_from(self.driver.window_handles().await?.len())
                .unwrap_or(isize::MAX);
            if index == -1 {
                index = count - 1;
            }
            if self.driver.is_safari() {
                index = (count - 1 - index).max(0);
            }
        }

        let outcome = self
            .poll_until(timeout, || async move {
                let Ok(handles) = self.driver.window_handles().await else {
                    return Err(());
                };
                let Some(handle) = usize::try_from(index).ok().and_then(|i| handles.get(i)) else {
                    return Err(());
                };
                Ok(self.switch_window_handle(handle, uc_lock).await)
            })
            .await?;

        match outcome {
            Ok(result) => result,
            Err(_) => Err(Error::WindowNotPresent {
                window: index.to_string(),
                timeout,
            }),
        }
    }

    async fn switch_window_handle(&self, handle: &str, uc_lock: bool) -> Result<()> {
        if uc_lock && self.driver.is_using_uc() {
            let _guard = UC_SWITCH_LOCK.lock().await;
            self.driver.switch_to_window(handle).await
        } else {
            self.driver.switch_to_window(handle).await
        }
    }
}
