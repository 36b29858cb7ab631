//! Diagnostic message fragments shared by wait errors.

use std::fmt;
use std::time::Duration;

// ============================================================================
// Constants
// ============================================================================

/// Longest actual text (newlines removed) quoted in a substring failure.
const MAX_ACTUAL_SUBSTRING_CHARS: usize = 320;

/// Longest actual text quoted in an exact-text failure.
const MAX_ACTUAL_EXACT_CHARS: usize = 120;

// ============================================================================
// After
// ============================================================================

/// Renders a timeout as `"7 seconds"` or `"1 second"`.
#[derive(Debug, Clone, Copy)]
pub(crate) struct After {
    timeout: Duration,
    always_plural: bool,
}

impl fmt::Display for After {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let plural = if !self.always_plural && self.timeout == Duration::from_secs(1) {
            ""
        } else {
            "s"
        };
        write!(f, "{} second{}", format_seconds(self.timeout), plural)
    }
}

/// Phrase for a timeout, singular for exactly one second.
#[inline]
pub(crate) fn after(timeout: &Duration) -> After {
    After {
        timeout: *timeout,
        always_plural: false,
    }
}

/// Phrase for a timeout that always reads plural.
#[inline]
pub(crate) fn after_plural(timeout: &Duration) -> After {
    After {
        timeout: *timeout,
        always_plural: true,
    }
}

/// Formats a duration as seconds, without decimals when whole.
pub(crate) fn format_seconds(duration: Duration) -> String {
    if duration.subsec_nanos() == 0 {
        duration.as_secs().to_string()
    } else {
        format!("{}", duration.as_secs_f64())
    }
}

// ============================================================================
// Actual Text Excerpts
// ============================================================================

/// Suffix quoting the text seen by a substring wait.
///
/// Empty when nothing visible was seen or the text is too long to be useful.
pub(crate) fn actual_substring(actual: Option<&str>) -> String {
    let Some(actual) = actual.filter(|a| !a.is_empty()) else {
        return String::new();
    };
    if actual.replace('\n', "").chars().count() > MAX_ACTUAL_SUBSTRING_CHARS {
        return String::new();
    }
    format!(
        "\n (Actual string found was {{{}}})",
        actual.replace('\n', "\\n ")
    )
}

/// Suffix quoting the text seen by an exact-text wait.
pub(crate) fn actual_exact_text(actual: Option<&str>) -> String {
    let Some(actual) = actual.filter(|a| !a.is_empty()) else {
        return String::new();
    };
    if actual.chars().count() > MAX_ACTUAL_EXACT_CHARS {
        return String::new();
    }
    format!("\n (Actual text was {{{}}})", actual.replace('\n', "\\n"))
}

/// Renders selectors as a bracketed, quoted list: `['#a', '.b']`.
pub(crate) fn selector_list(selectors: &[String]) -> String {
    let quoted: Vec<String> = selectors.iter().map(|s| format!("'{s}'")).collect();
    format!("[{}]", quoted.join(", "))
}

// ============================================================================
// Tests
// ============================================================================
