//! Time sources and the single-deadline task used by timer-driven state.
//!
//! All time in the core is a `Duration` measured from an arbitrary origin
//! chosen by the front end (egui's input time, `performance.now()`, an
//! `Instant` captured at startup). Nothing in the core reads a wall clock
//! on its own, so tests drive everything through [`ManualClock`].

use std::cell::Cell;
use std::time::Duration;

/// Source of the current time.
pub trait Clock {
    fn now(&self) -> Duration;
}

/// A clock that only moves when told to.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<Duration>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, by: Duration) -> Duration {
        let next = self.now.get() + by;
        self.now.set(next);
        next
    }

    pub fn advance_ms(&self, ms: u64) -> Duration {
        self.advance(Duration::from_millis(ms))
    }

    pub fn set(&self, now: Duration) {
        self.now.set(now);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }
}

/// Monotonic clock anchored at construction time.
///
/// Not available on `wasm32-unknown-unknown`, where `Instant::now` panics;
/// web front ends pass host timestamps instead.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: std::time::Instant,
}

#[cfg(not(target_arch = "wasm32"))]
impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: std::time::Instant::now(),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// One cancellable pending deadline.
///
/// Scheduling replaces whatever was pending, so an owner can never have
/// two outstanding steps. Firing is pull-based: the owner asks
/// [`ScheduledTask::take_due`] whether the deadline has passed, which also
/// clears it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScheduledTask {
    due: Option<Duration>,
}

impl ScheduledTask {
    pub const fn idle() -> Self {
        Self { due: None }
    }

    pub fn schedule_at(&mut self, due: Duration) {
        self.due = Some(due);
    }

    pub fn schedule_after(&mut self, from: Duration, delay: Duration) {
        self.schedule_at(from + delay);
    }

    /// Drop the pending deadline. Returns whether one was pending.
    pub fn cancel(&mut self) -> bool {
        self.due.take().is_some()
    }

    pub fn due(&self) -> Option<Duration> {
        self.due
    }

    /// If the deadline is at or before `now`, clear it and return it.
    pub fn take_due(&mut self, now: Duration) -> Option<Duration> {
        match self.due {
            Some(due) if due <= now => self.due.take(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn task_fires_once_at_deadline() {
        let mut task = ScheduledTask::idle();
        task.schedule_after(Duration::from_millis(100), Duration::from_millis(50));

        assert_eq!(task.take_due(Duration::from_millis(149)), None);
        assert_eq!(
            task.take_due(Duration::from_millis(150)),
            Some(Duration::from_millis(150))
        );
        assert_eq!(task.take_due(Duration::from_millis(500)), None);
        assert_eq!(task.due(), None);
    }

    #[test]
    fn rescheduling_replaces_pending_deadline() {
        let mut task = ScheduledTask::idle();
        task.schedule_at(Duration::from_millis(10));
        task.schedule_at(Duration::from_millis(30));
        assert_eq!(task.take_due(Duration::from_millis(20)), None);
        assert_eq!(task.due(), Some(Duration::from_millis(30)));
    }

    #[test]
    fn cancel_reports_pending() {
        let mut task = ScheduledTask::idle();
        assert!(!task.cancel());
        task.schedule_at(Duration::ZERO);
        assert!(task.cancel());
        assert_eq!(task.take_due(Duration::MAX), None);
    }

    #[test]
    fn manual_clock_advances() {
        let clock = ManualClock::new();
        clock.advance_ms(250);
        clock.advance(Duration::from_millis(750));
        assert_eq!(clock.now(), Duration::from_secs(1));
    }
}
