//! Fixed-interval poll loop with a deadline and attempt budget.

use std::time::Duration;

use tokio::time::{Instant, sleep};
use tracing::trace;

use crate::error::{Error, Result};

// ============================================================================
// Constants
// ============================================================================

/// Smallest interval the loop will sleep between attempts.
const MIN_INTERVAL: Duration = Duration::from_millis(1);

// ============================================================================
// TimeLimit
// ============================================================================

/// Whole-test time limit, checked before every poll attempt.
///
/// Independent of any single wait's timeout: a test that has run past its
/// limit fails on the next attempt of whatever it is waiting for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeLimit {
    started: Instant,
    limit: Duration,
}

impl TimeLimit {
    /// Starts the test clock now.
    #[inline]
    #[must_use]
    pub fn starting_now(limit: Duration) -> Self {
        Self {
            started: Instant::now(),
            limit,
        }
    }

    /// Returns the configured limit.
    #[inline]
    #[must_use]
    pub fn limit(&self) -> Duration {
        self.limit
    }

    /// Returns the time left before the limit, zero once exceeded.
    #[must_use]
    pub fn remaining(&self) -> Duration {
        self.limit.saturating_sub(self.started.elapsed())
    }

    /// Fails with [`Error::TimeLimitExceeded`] once the limit has passed.
    pub fn check(&self) -> Result<()> {
        if self.started.elapsed() > self.limit {
            return Err(Error::TimeLimitExceeded { limit: self.limit });
        }
        Ok(())
    }
}

// ============================================================================
// Poll
// ============================================================================

/// Drives one wait's retry loop.
///
/// ```ignore
/// let mut poll = Poll::new(timeout, interval, time_limit);
/// while poll.next_attempt()? {
///     if let Some(found) = probe().await {
///         return Ok(found);
///     }
///     if !poll.backoff().await {
///         break;
///     }
/// }
/// // decide which error to raise
/// ```
#[derive(Debug)]
pub struct Poll {
    interval: Duration,
    stop: Instant,
    remaining: u64,
    attempt: u64,
    time_limit: Option<TimeLimit>,
}

impl Poll {
    /// Starts a poll loop that ends at `now + timeout`.
    ///
    /// The attempt budget is `timeout / interval`, with at least one attempt
    /// so a zero timeout still probes once.
    #[must_use]
    pub fn new(timeout: Duration, interval: Duration, time_limit: Option<TimeLimit>) -> Self {
        let interval = interval.max(MIN_INTERVAL);
        let budget = (timeout.as_nanos() / interval.as_nanos()).max(1);
        Self {
            interval,
            stop: Instant::now() + timeout,
            remaining: u64::try_from(budget).unwrap_or(u64::MAX),
            attempt: 0,
            time_limit,
        }
    }

    /// Begins the next attempt.
    ///
    /// Returns `Ok(false)` once the attempt budget is spent, and fails if the
    /// whole-test time limit has been exceeded.
    pub fn next_attempt(&mut self) -> Result<bool> {
        if self.remaining == 0 {
            return Ok(false);
        }
        if let Some(limit) = &self.time_limit {
            limit.check()?;
        }
        self.remaining -= 1;
        self.attempt += 1;
        trace!(attempt = self.attempt, "Poll attempt");
        Ok(true)
    }

    /// Ends a failed attempt.
    ///
    /// Returns `false` when the deadline has passed, otherwise sleeps one
    /// interval and returns `true`.
    pub async fn backoff(&mut self) -> bool {
        if Instant::now() >= self.stop {
            return false;
        }
        sleep(self.interval).await;
        true
    }

    /// Number of attempts started so far.
    #[inline]
    #[must_use]
    pub fn attempts(&self) -> u64 {
        self.attempt
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const INTERVAL: Duration = Duration::from_millis(100);

    #[tokio::test(start_paused = true)]
    async fn test_budget_matches_timeout_over_interval() {
        let mut poll = Poll::new(Duration::from_secs(1), INTERVAL, None);
        let mut count = 0;
        while poll.next_attempt().unwrap() {
            count += 1;
            if !poll.backoff().await {
                break;
            }
        }
        assert_eq!(count, 10);
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_timeout_probes_once() {
        let mut poll = Poll::new(Duration::ZERO, INTERVAL, None);
        assert!(poll.next_attempt().unwrap());
        assert!(!poll.backoff().await);
        assert_eq!(poll.attempts(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_deadline_stops_before_budget() {
        let mut poll = Poll::new(Duration::from_millis(250), INTERVAL, None);
        let start = Instant::now();
        while poll.next_attempt().unwrap() {
            tokio::time::sleep(Duration::from_millis(200)).await;
            if !poll.backoff().await {
                break;
            }
        }
        assert!(poll.attempts() < 3);
        assert!(start.elapsed() < Duration::from_secs(1));
    }

    #[tokio::test(start_paused = true)]
    async fn test_time_limit_fails_attempt() {
        let limit = TimeLimit::starting_now(Duration::from_millis(150));
        let mut poll = Poll::new(Duration::from_secs(5), INTERVAL, Some(limit));

        let err = loop {
            match poll.next_attempt() {
                Ok(true) => {
                    poll.backoff().await;
                }
                Ok(false) => panic!("budget ran out before the limit"),
                Err(e) => break e,
            }
        };
        assert!(matches!(err, Error::TimeLimitExceeded { .. }));
    }

    #[tokio::test(start_paused = true)]
    async fn test_time_limit_remaining() {
        let limit = TimeLimit::starting_now(Duration::from_secs(2));
        tokio::time::sleep(Duration::from_millis(500)).await;
        assert_eq!(limit.remaining(), Duration::from_millis(1500));
        assert!(limit.check().is_ok());
    }
}
