//! Wall-clock budget tracking, shaped after the teacher's `TimeManager`:
//! a start instant, an allotted duration, and an externally-flippable
//! cancel flag, polled from every search loop.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

#[derive(Clone)]
pub struct TimeBudget {
    start: Instant,
    allotted: Duration,
    cancel: Arc<AtomicBool>,
}

impl TimeBudget {
    pub fn new(allotted: Duration, cancel: Arc<AtomicBool>) -> Self {
        TimeBudget {
            start: Instant::now(),
            allotted,
            cancel,
        }
    }

    #[inline]
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    #[inline]
    pub fn remaining(&self) -> Duration {
        self.allotted.saturating_sub(self.elapsed())
    }

    #[inline]
    pub fn deadline(&self) -> Instant {
        self.start + self.allotted
    }

    #[inline]
    pub fn expired(&self) -> bool {
        self.cancel.load(Ordering::Relaxed) || self.elapsed() >= self.allotted
    }
}
