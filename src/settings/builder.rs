//! Builder pattern for settings.
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//! use webdriver_waits::Settings;
//!
//! # fn example() -> webdriver_waits::Result<()> {
//! let settings = Settings::builder()
//!     .small_timeout(Duration::from_secs(3))
//!     .poll_interval(Duration::from_millis(250))
//!     .time_limit(Duration::from_secs(120))
//!     .build()?;
//! # Ok(())
//! # }
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::time::Duration;

use crate::error::{Error, Result};

use super::core::Settings;

// ============================================================================
// SettingsBuilder
// ============================================================================

/// Builder for configuring [`Settings`].
///
/// Use [`Settings::builder()`] to create a new builder.
#[derive(Debug, Clone)]
pub struct SettingsBuilder {
    settings: Settings,
}

impl Default for SettingsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// SettingsBuilder Implementation
// ============================================================================

impl SettingsBuilder {
    /// Creates a builder starting from the default settings.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            settings: Settings::default(),
        }
    }

    /// Sets the default timeout for actions and assertions.
    #[inline]
    #[must_use]
    pub fn small_timeout(mut self, timeout: Duration) -> Self {
        self.settings.small_timeout = timeout;
        self
    }

    /// Sets the default timeout for explicit waits.
    #[inline]
    #[must_use]
    pub fn large_timeout(mut self, timeout: Duration) -> Self {
        self.settings.large_timeout = timeout;
        self
    }

    /// Sets the sleep between poll attempts.
    #[inline]
    #[must_use]
    pub fn poll_interval(mut self, interval: Duration) -> Self {
        self.settings.poll_interval = interval;
        self
    }

    /// Scales default timeouts. Explicit timeouts are left alone.
    #[inline]
    #[must_use]
    pub fn timeout_multiplier(mut self, multiplier: f64) -> Self {
        self.settings.timeout_multiplier = Some(multiplier);
        self
    }

    /// Sets the whole-test time limit.
    #[inline]
    #[must_use]
    pub fn time_limit(mut self, limit: Duration) -> Self {
        self.settings.time_limit = Some(limit);
        self
    }

    /// Builds the settings with validation.
    ///
    /// # Errors
    ///
    /// - [`Error::Config`] if the poll interval is zero
    /// - [`Error::Config`] if the multiplier is not a positive finite number
    /// - [`Error::Config`] if the time limit is zero
    pub fn build(self) -> Result<Settings> {
        self.validate_interval()?;
        self.validate_multiplier()?;
        self.validate_time_limit()?;
        Ok(self.settings)
    }
}

// ============================================================================
// Validation
// ============================================================================

impl SettingsBuilder {
    fn validate_interval(&self) -> Result<()> {
        if self.settings.poll_interval.is_zero() {
            return Err(Error::config(
                "Poll interval must be greater than zero.\n\
                 Example: Settings::builder().poll_interval(Duration::from_millis(100))",
            ));
        }
        Ok(())
    }

    fn validate_multiplier(&self) -> Result<()> {
        if let Some(m) = self.settings.timeout_multiplier
            && !(m.is_finite() && m > 0.0)
        {
            return Err(Error::config(format!(
                "Timeout multiplier must be a positive number, got {m}"
            )));
        }
        Ok(())
    }

    fn validate_time_limit(&self) -> Result<()> {
        if self.settings.time_limit.is_some_and(|limit| limit.is_zero()) {
            return Err(Error::config("Time limit must be greater than zero."));
        }
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
