//! Retry policy for ledger operations.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default total number of attempts (including the first).
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Default delay between attempts, in milliseconds.
pub const DEFAULT_BASE_DELAY_MS: u64 = 2000;

/// Bounded fixed-delay retry configuration.
///
/// `max_attempts` bounds total tries including the first, so a policy waits
/// at most `(max_attempts - 1) * base_delay` across an operation. The delay
/// is constant between attempts, not exponential.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryPolicy {
    max_attempts: u32,
    base_delay_ms: u64,
}

impl RetryPolicy {
    /// Creates a policy with the given bounds.
    ///
    /// `max_attempts` is clamped to at least 1: every operation gets its
    /// first try.
    pub fn new(max_attempts: u32, base_delay_ms: u64) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay_ms,
        }
    }

    /// Total attempts allowed, including the first.
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Fixed delay between attempts.
    pub fn base_delay(&self) -> Duration {
        Duration::from_millis(self.base_delay_ms)
    }

    /// Fixed delay between attempts, in milliseconds.
    pub fn base_delay_ms(&self) -> u64 {
        self.base_delay_ms
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            base_delay_ms: DEFAULT_BASE_DELAY_MS,
        }
    }
}
