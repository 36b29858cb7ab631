//! Settings values and timeout resolution.

// ============================================================================
// Imports
// ============================================================================

use std::time::Duration;

use crate::error::{Error, Result};

use super::builder::SettingsBuilder;

// ============================================================================
// Constants
// ============================================================================

/// Default timeout for actions and assertions.
pub const SMALL_TIMEOUT: Duration = Duration::from_secs(7);

/// Default timeout for explicit waits.
pub const LARGE_TIMEOUT: Duration = Duration::from_secs(10);

/// Default sleep between poll attempts.
pub const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Environment variable names read by [`Settings::from_env`].
pub mod env {
    /// Small timeout in seconds.
    pub const SMALL_TIMEOUT: &str = "WEBDRIVER_WAITS_SMALL_TIMEOUT";
    /// Large timeout in seconds.
    pub const LARGE_TIMEOUT: &str = "WEBDRIVER_WAITS_LARGE_TIMEOUT";
    /// Poll interval in milliseconds.
    pub const POLL_INTERVAL_MS: &str = "WEBDRIVER_WAITS_POLL_INTERVAL_MS";
    /// Multiplier for default timeouts.
    pub const TIMEOUT_MULTIPLIER: &str = "WEBDRIVER_WAITS_TIMEOUT_MULTIPLIER";
    /// Whole-test time limit in seconds.
    pub const TIME_LIMIT: &str = "WEBDRIVER_WAITS_TIME_LIMIT";
}

// ============================================================================
// TimeoutTier
// ============================================================================

/// Which default timeout a method uses when none is given.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeoutTier {
    /// [`Settings::small_timeout`], for actions and assertions.
    Small,
    /// [`Settings::large_timeout`], for explicit waits.
    Large,
}

// ============================================================================
// Settings
// ============================================================================

/// Timing configuration shared by every wait.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub(super) small_timeout: Duration,
    pub(super) large_timeout: Duration,
    pub(super) poll_interval: Duration,
    pub(super) timeout_multiplier: Option<f64>,
    pub(super) time_limit: Option<Duration>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            small_timeout: SMALL_TIMEOUT,
            large_timeout: LARGE_TIMEOUT,
            poll_interval: POLL_INTERVAL,
            timeout_multiplier: None,
            time_limit: None,
        }
    }
}

impl Settings {
    /// Creates a settings builder starting from the defaults.
    #[inline]
    #[must_use]
    pub fn builder() -> SettingsBuilder {
        SettingsBuilder::new()
    }

    /// Reads settings from `WEBDRIVER_WAITS_*` environment variables.
    ///
    /// Unset variables keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if a variable is set but cannot be parsed,
    /// or the resulting settings fail validation.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads settings through `lookup`, as [`from_env`](Self::from_env)
    /// does with the process environment.
    ///
    /// # Errors
    ///
    /// Same as [`from_env`](Self::from_env).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut builder = SettingsBuilder::new();

        if let Some(raw) = lookup(env::SMALL_TIMEOUT) {
            builder = builder.small_timeout(parse_seconds(env::SMALL_TIMEOUT, &raw)?);
        }
        if let Some(raw) = lookup(env::LARGE_TIMEOUT) {
            builder = builder.large_timeout(parse_seconds(env::LARGE_TIMEOUT, &raw)?);
        }
        if let Some(raw) = lookup(env::POLL_INTERVAL_MS) {
            let millis: u64 = raw.trim().parse().map_err(|_| {
                Error::config(format!(
                    "{} must be a whole number of milliseconds, got {raw:?}",
                    env::POLL_INTERVAL_MS
                ))
            })?;
            builder = builder.poll_interval(Duration::from_millis(millis));
        }
        if let Some(raw) = lookup(env::TIMEOUT_MULTIPLIER) {
            builder = builder.timeout_multiplier(parse_float(env::TIMEOUT_MULTIPLIER, &raw)?);
        }
        if let Some(raw) = lookup(env::TIME_LIMIT) {
            builder = builder.time_limit(parse_seconds(env::TIME_LIMIT, &raw)?);
        }

        builder.build()
    }
}

// ============================================================================
// Accessors
// ============================================================================

impl Settings {
    /// Default timeout for actions and assertions.
    #[inline]
    #[must_use]
    pub fn small_timeout(&self) -> Duration {
        self.small_timeout
    }

    /// Default timeout for explicit waits.
    #[inline]
    #[must_use]
    pub fn large_timeout(&self) -> Duration {
        self.large_timeout
    }

    /// Sleep between poll attempts.
    #[inline]
    #[must_use]
    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    /// Multiplier applied to default timeouts.
    #[inline]
    #[must_use]
    pub fn timeout_multiplier(&self) -> Option<f64> {
        self.timeout_multiplier
    }

    /// Whole-test time limit.
    #[inline]
    #[must_use]
    pub fn time_limit(&self) -> Option<Duration> {
        self.time_limit
    }

    /// Resolves a method's timeout.
    ///
    /// An explicit timeout is used as given. Otherwise the tier's default is
    /// scaled by the multiplier.
    #[must_use]
    pub fn resolve(&self, timeout: Option<Duration>, tier: TimeoutTier) -> Duration {
        if let Some(timeout) = timeout {
            return timeout;
        }
        let default = match tier {
            TimeoutTier::Small => self.small_timeout,
            TimeoutTier::Large => self.large_timeout,
        };
        match self.timeout_multiplier {
            Some(m) => {
                Duration::try_from_secs_f64(default.as_secs_f64() * m).unwrap_or(Duration::MAX)
            }
            None => default,
        }
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

fn parse_float(name: &str, raw: &str) -> Result<f64> {
    raw.trim()
        .parse::<f64>()
        .map_err(|_| Error::config(format!("{name} must be a number, got {raw:?}")))
}

fn parse_seconds(name: &str, raw: &str) -> Result<Duration> {
    let secs = parse_float(name, raw)?;
    Duration::try_from_secs_f64(secs)
        .map_err(|_| Error::config(format!("{name} must be a non-negative number of seconds, got {raw:?}")))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.small_timeout(), Duration::from_secs(7));
        assert_eq!(settings.large_timeout(), Duration::from_secs(10));
        assert_eq!(settings.poll_interval(), Duration::from_millis(100));
        assert!(settings.timeout_multiplier().is_none());
        assert!(settings.time_limit().is_none());
    }

    #[test]
    fn test_resolve_explicit_timeout_is_not_scaled() {
        let settings = Settings::builder().timeout_multiplier(2.0).build().unwrap();
        assert_eq!(
            settings.resolve(Some(Duration::from_secs(3)), TimeoutTier::Large),
            Duration::from_secs(3)
        );
        assert_eq!(
            settings.resolve(None, TimeoutTier::Small),
            Duration::from_secs(14)
        );
        assert_eq!(
            settings.resolve(None, TimeoutTier::Large),
            Duration::from_secs(20)
        );
    }

    #[test]
    fn test_from_lookup_overlays_values() {
        let settings = Settings::from_lookup(lookup(&[
            (env::SMALL_TIMEOUT, "2.5"),
            (env::POLL_INTERVAL_MS, "50"),
            (env::TIME_LIMIT, "90"),
        ]))
        .unwrap();

        assert_eq!(settings.small_timeout(), Duration::from_millis(2500));
        assert_eq!(settings.large_timeout(), LARGE_TIMEOUT);
        assert_eq!(settings.poll_interval(), Duration::from_millis(50));
        assert_eq!(settings.time_limit(), Some(Duration::from_secs(90)));
    }

    #[test]
    fn test_from_lookup_rejects_garbage() {
        let err = Settings::from_lookup(lookup(&[(env::LARGE_TIMEOUT, "soon")])).unwrap_err();
        assert!(matches!(err, Error::Config { .. }));

        let err = Settings::from_lookup(lookup(&[(env::POLL_INTERVAL_MS, "0.5")])).unwrap_err();
        assert!(matches!(err, Error::Config { .. }));

        let err = Settings::from_lookup(lookup(&[(env::TIME_LIMIT, "-1")])).unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }

    #[test]
    fn test_from_lookup_empty_is_default() {
        let settings = Settings::from_lookup(|_| None).unwrap();
        assert_eq!(settings, Settings::default());
    }
}
