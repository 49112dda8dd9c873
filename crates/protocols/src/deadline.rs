//! Deadline validation.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use thiserror::Error;

/// Raised when an operation is submitted after its deadline.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("transaction too old: deadline {deadline}, now {now}")]
pub struct DeadlineError {
    /// Caller supplied deadline, unix seconds.
    pub deadline: u64,
    /// Time of the check, unix seconds.
    pub now: u64,
}

/// Checks caller deadlines against a clock.
pub trait DeadlineValidator: Send + Sync {
    /// Current time, unix seconds.
    fn now(&self) -> u64;

    /// Fails once `now` is past `deadline`.
    fn check_not_expired(&self, deadline: u64) -> Result<(), DeadlineError> {
        let now = self.now();
        if now > deadline {
            return Err(DeadlineError { deadline, now });
        }
        Ok(())
    }
}

/// Wall clock in UTC.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl DeadlineValidator for SystemClock {
    fn now(&self) -> u64 {
        u64::try_from(chrono::Utc::now().timestamp()).unwrap_or(0)
    }
}

/// Manually driven clock. Clones share the same time.
#[derive(Debug, Clone, Default)]
pub struct FixedClock {
    now: Arc<AtomicU64>,
}

impl FixedClock {
    /// Creates a clock frozen at `now`.
    #[must_use]
    pub fn new(now: u64) -> Self {
        Self {
            now: Arc::new(AtomicU64::new(now)),
        }
    }

    /// Moves the clock to `now`.
    pub fn set(&self, now: u64) {
        self.now.store(now, Ordering::SeqCst);
    }

    /// Advances the clock by `seconds`.
    pub fn advance(&self, seconds: u64) {
        self.now.fetch_add(seconds, Ordering::SeqCst);
    }
}

impl DeadlineValidator for FixedClock {
    fn now(&self) -> u64 {
        self.now.load(Ordering::SeqCst)
    }
}
