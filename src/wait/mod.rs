//! Polling state machine and timeout diagnostics.
//!
//! Every wait in [`PageActions`](crate::PageActions) runs the same loop:
//!
//! 1. compute `stop = now + timeout` and an attempt budget of
//!    `timeout / interval` (at least one attempt),
//! 2. before each attempt, check the whole-test [`TimeLimit`],
//! 3. probe the driver; a match returns immediately,
//! 4. on a miss, give up once `now >= stop`, otherwise sleep one interval.
//!
//! Which error is raised afterwards depends on how far the last attempts
//! got, tracked by the caller while probing.
//!
//! # Module Structure
//!
//! | Module | Description |
//! |--------|-------------|
//! | `poll` | [`Poll`] loop driver and [`TimeLimit`] |
//! | `message` | Timeout phrasing and actual-text excerpts |

// ============================================================================
// Submodules
// ============================================================================

pub(crate) mod message;
mod poll;

// ============================================================================
// Re-exports
// ============================================================================

pub use poll::{Poll, TimeLimit};
