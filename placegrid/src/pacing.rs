//! Pacing between paginated API requests.
//!
//! The places API hands out continuation tokens that are not immediately
//! valid, so a delay is required before each follow-up page request. The
//! [`Pacer`] trait keeps that delay injectable so tests can run without
//! real wall-clock waiting.

use std::thread;
use std::time::Duration;

/// Delay applied before a continuation-token request becomes usable.
pub const PAGE_TOKEN_DELAY: Duration = Duration::from_secs(2);

/// Trait for pacing consecutive requests to the same endpoint.
pub trait Pacer {
    /// Blocks until the next request may be issued.
    fn pause(&self);
}

/// Pacer that sleeps for a fixed duration.
#[derive(Debug, Clone)]
pub struct FixedDelayPacer {
    delay: Duration,
}

impl FixedDelayPacer {
    /// Creates a pacer with a custom delay.
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Default for FixedDelayPacer {
    fn default() -> Self {
        Self {
            delay: PAGE_TOKEN_DELAY,
        }
    }
}

impl Pacer for FixedDelayPacer {
    fn pause(&self) {
        thread::sleep(self.delay);
    }
}

/// Pacer that does not wait at all.
///
/// Useful in tests and for providers that do not rate-limit pagination.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopPacer;

impl Pacer for NoopPacer {
    fn pause(&self) {}
}
