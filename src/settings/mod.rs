//! Wait timing configuration.
//!
//! # Components
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Settings`] | Default timeouts, poll interval, test time limit |
//! | [`SettingsBuilder`] | Fluent configuration builder |
//! | [`TimeoutTier`] | Which default a method falls back to |
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//! use webdriver_waits::Settings;
//!
//! # fn example() -> webdriver_waits::Result<()> {
//! let settings = Settings::builder()
//!     .large_timeout(Duration::from_secs(20))
//!     .timeout_multiplier(1.5)
//!     .build()?;
//!
//! // Or overlay WEBDRIVER_WAITS_* environment variables on the defaults
//! let from_env = Settings::from_env()?;
//! # Ok(())
//! # }
//! ```

// ============================================================================
// Submodules
// ============================================================================

/// Fluent builder pattern for settings.
pub mod builder;

/// Settings values and timeout resolution.
pub mod core;

// ============================================================================
// Re-exports
// ============================================================================

pub use builder::SettingsBuilder;
pub use self::core::{Settings, TimeoutTier};
