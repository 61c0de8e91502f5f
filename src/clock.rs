//! Clock abstraction for the sweep update gate
//!
//! The peak ring only advances when time has not moved backward since the
//! previous render pass. Injecting the clock keeps that guard testable: the
//! production clock is monotonic, while `ManualClock` can be driven in any
//! direction from a test or an embedding host.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

/// Source of millisecond timestamps for render-pass gating
pub trait Clock: Send + Sync {
    fn now_ms(&self) -> u64;
}

/// Monotonic wall clock measured from construction
#[derive(Debug)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        self.origin.elapsed().as_millis() as u64
    }
}

/// Hand-driven clock with a shared setter handle
///
/// Cloning yields a handle over the same underlying time, so one copy can be
/// handed to the view while the other advances (or rewinds) it.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Arc<AtomicU64>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_ms(&self, ms: u64) {
        self.now.store(ms, Ordering::Release);
    }

    pub fn advance_ms(&self, ms: u64) {
        self.now.fetch_add(ms, Ordering::AcqRel);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_shares_time_across_clones() {
        let clock = ManualClock::new();
        let handle = clock.clone();
        handle.set_ms(500);
        assert_eq!(clock.now_ms(), 500);
        handle.advance_ms(250);
        assert_eq!(clock.now_ms(), 750);
    }

    #[test]
    fn test_system_clock_does_not_rewind() {
        let clock = SystemClock::new();
        let a = clock.now_ms();
        let b = clock.now_ms();
        assert!(b >= a);
    }
}
