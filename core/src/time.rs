//! Time sources used to charge work against a frame budget.

use std::cell::Cell;
use std::time::Instant;

/// A monotonic source of nanosecond timestamps.
pub trait Clock {
    fn now_nanos(&self) -> u64;
}

/// Wall-clock time measured from the moment the clock was created.
#[derive(Debug, Clone, Copy)]
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
    fn now_nanos(&self) -> u64 {
        self.origin.elapsed().as_nanos() as u64
    }
}

/// A deterministic clock that moves forward by a fixed step on every read.
///
/// Every budget check performed by the controller or the search reads the
/// clock once, so a `SteppingClock` turns a time budget into an exact number
/// of checks. Useful for tests and for replaying a frame schedule.
#[derive(Debug, Clone)]
pub struct SteppingClock {
    now: Cell<u64>,
    step: u64,
}

impl SteppingClock {
    pub fn new(step: u64) -> Self {
        Self {
            now: Cell::new(0),
            step,
        }
    }

    /// Number of reads served so far.
    pub fn reads(&self) -> u64 {
        if self.step == 0 {
            0
        } else {
            self.now.get() / self.step
        }
    }
}

impl Clock for SteppingClock {
    fn now_nanos(&self) -> u64 {
        let now = self.now.get();
        self.now.set(now + self.step);
        now
    }
}

/// Nanoseconds elapsed between two readings of the same clock.
pub(crate) fn elapsed_nanos(last_time: u64, current_time: u64) -> i64 {
    current_time.saturating_sub(last_time).min(i64::MAX as u64) as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stepping_clock_advances_per_read() {
        let clock = SteppingClock::new(25);
        assert_eq!(clock.now_nanos(), 0);
        assert_eq!(clock.now_nanos(), 25);
        assert_eq!(clock.now_nanos(), 50);
        assert_eq!(clock.reads(), 3);
    }

    #[test]
    fn elapsed_never_goes_negative() {
        assert_eq!(elapsed_nanos(100, 40), 0);
        assert_eq!(elapsed_nanos(40, 100), 60);
    }
}
