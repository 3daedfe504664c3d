//! Two-stage typewriter: reveals a primary string one character at a time,
//! pauses, then reveals a secondary string at its own pace.
//!
//! The sequencer is a state machine driven by a single [`ScheduledTask`].
//! Callers feed it time through [`Typewriter::advance`]; every deadline
//! that has passed fires in order, and each follow-up step is scheduled
//! from the previous deadline rather than from `now`, so the reveal is the
//! same whether the host polls every frame or once a second.

use std::time::Duration;

use crate::clock::ScheduledTask;
use crate::config::TypingConfig;

/// A string being revealed from the front, one char at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypingSequence {
    source: String,
    /// Number of chars currently revealed.
    revealed: usize,
    /// Total number of chars in `source`.
    len: usize,
    interval: Duration,
}

impl TypingSequence {
    pub fn new(source: impl Into<String>, interval: Duration) -> Self {
        let source = source.into();
        let len = source.chars().count();
        Self {
            source,
            revealed: 0,
            len,
            interval,
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Length in chars.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn revealed_len(&self) -> usize {
        self.revealed
    }

    pub fn is_complete(&self) -> bool {
        self.revealed >= self.len
    }

    /// The visible prefix. Always ends on a char boundary.
    pub fn revealed_text(&self) -> &str {
        let end = self
            .source
            .char_indices()
            .nth(self.revealed)
            .map_or(self.source.len(), |(i, _)| i);
        &self.source[..end]
    }

    /// Reveal one more char. Returns `false` if already complete.
    fn step(&mut self) -> bool {
        if self.is_complete() {
            return false;
        }
        self.revealed += 1;
        true
    }

    fn reset(&mut self) {
        self.revealed = 0;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Not mounted; nothing is scheduled.
    Unmounted,
    /// Mounted, waiting out the start delay.
    Idle,
    RevealingPrimary,
    /// Primary complete, waiting before the secondary starts.
    Pausing,
    RevealingSecondary,
    Done,
}

/// Which string currently carries the caret.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaretTarget {
    Primary,
    Secondary,
}

#[derive(Debug, Clone)]
pub struct Typewriter {
    primary: TypingSequence,
    secondary: TypingSequence,
    start_delay: Duration,
    pause: Duration,
    phase: Phase,
    task: ScheduledTask,
}

impl Typewriter {
    pub fn new(primary: impl Into<String>, secondary: impl Into<String>, timing: &TypingConfig) -> Self {
        Self {
            primary: TypingSequence::new(primary, timing.title_interval()),
            secondary: TypingSequence::new(secondary, timing.subtitle_interval()),
            start_delay: timing.start_delay(),
            pause: timing.pause(),
            phase: Phase::Unmounted,
            task: ScheduledTask::idle(),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn primary(&self) -> &TypingSequence {
        &self.primary
    }

    pub fn secondary(&self) -> &TypingSequence {
        &self.secondary
    }

    pub fn primary_text(&self) -> &str {
        self.primary.revealed_text()
    }

    pub fn secondary_text(&self) -> &str {
        self.secondary.revealed_text()
    }

    pub fn is_done(&self) -> bool {
        self.phase == Phase::Done
    }

    /// When the next reveal step is due, if any.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.task.due()
    }

    /// Start (or restart) the sequence from zero. The first primary char
    /// appears after the start delay.
    pub fn mount(&mut self, now: Duration) {
        self.primary.reset();
        self.secondary.reset();
        self.phase = Phase::Idle;
        self.task.schedule_after(now, self.start_delay);
        tracing::debug!(due = ?self.task.due(), "typewriter mounted");
    }

    /// Cancel any pending step and reset both sequences.
    pub fn unmount(&mut self) {
        let cancelled = self.task.cancel();
        self.primary.reset();
        self.secondary.reset();
        self.phase = Phase::Unmounted;
        tracing::debug!(cancelled, "typewriter unmounted");
    }

    /// Replace the source strings. Restarts the sequence if they differ
    /// from the current ones and the typewriter is mounted. Returns
    /// whether anything changed.
    pub fn set_sources(&mut self, primary: &str, secondary: &str, now: Duration) -> bool {
        if self.primary.source() == primary && self.secondary.source() == secondary {
            return false;
        }
        self.primary = TypingSequence::new(primary, self.primary.interval());
        self.secondary = TypingSequence::new(secondary, self.secondary.interval());
        if self.phase != Phase::Unmounted {
            self.mount(now);
        }
        true
    }

    /// Run every step due at or before `now`. Returns whether visible state
    /// changed.
    pub fn advance(&mut self, now: Duration) -> bool {
        let mut changed = false;
        while let Some(due) = self.task.take_due(now) {
            changed |= self.fire(due);
        }
        changed
    }

    /// The string showing a caret right now, if any.
    ///
    /// The primary carries it while mounted and incomplete, including during
    /// the start delay. The secondary carries it once its first char is
    /// visible and until it completes.
    pub fn caret(&self) -> Option<CaretTarget> {
        if self.phase == Phase::Unmounted {
            return None;
        }
        if !self.primary.is_complete() {
            return Some(CaretTarget::Primary);
        }
        if self.secondary.revealed_len() > 0 && !self.secondary.is_complete() {
            return Some(CaretTarget::Secondary);
        }
        None
    }

    fn fire(&mut self, due: Duration) -> bool {
        match self.phase {
            Phase::Idle => {
                self.transition(Phase::RevealingPrimary);
                if self.primary.is_empty() {
                    self.transition(Phase::Pausing);
                    self.task.schedule_after(due, self.pause);
                    true
                } else {
                    self.reveal_primary(due)
                }
            }
            Phase::RevealingPrimary => self.reveal_primary(due),
            Phase::Pausing => {
                if self.secondary.is_empty() {
                    self.transition(Phase::Done);
                } else {
                    self.transition(Phase::RevealingSecondary);
                    self.reveal_secondary(due);
                }
                true
            }
            Phase::RevealingSecondary => self.reveal_secondary(due),
            Phase::Done | Phase::Unmounted => false,
        }
    }

    fn reveal_primary(&mut self, due: Duration) -> bool {
        let stepped = self.primary.step();
        tracing::trace!(revealed = self.primary.revealed_len(), "primary step");
        let interval = self.primary.interval();
        if self.primary.is_complete() {
            // One more tick elapses before the pause starts.
            self.transition(Phase::Pausing);
            self.task.schedule_after(due, interval + self.pause);
        } else {
            self.task.schedule_after(due, interval);
        }
        stepped
    }

    fn reveal_secondary(&mut self, due: Duration) -> bool {
        let stepped = self.secondary.step();
        tracing::trace!(revealed = self.secondary.revealed_len(), "secondary step");
        if self.secondary.is_complete() {
            self.transition(Phase::Done);
        } else {
            self.task.schedule_after(due, self.secondary.interval());
        }
        stepped
    }

    fn transition(&mut self, to: Phase) {
        tracing::debug!(from = ?self.phase, ?to, "typewriter phase");
        self.phase = to;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::{Clock, ManualClock};

    fn timing() -> TypingConfig {
        TypingConfig::default()
    }

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn nothing_before_start_delay() {
        let mut tw = Typewriter::new("Hi", "there", &timing());
        tw.mount(Duration::ZERO);
        assert!(!tw.advance(ms(799)));
        assert_eq!(tw.primary_text(), "");
        assert_eq!(tw.phase(), Phase::Idle);
        assert_eq!(tw.caret(), Some(CaretTarget::Primary));
    }

    #[test]
    fn reveals_primary_then_secondary_on_schedule() {
        let mut tw = Typewriter::new("abc", "xy", &timing());
        tw.mount(Duration::ZERO);

        tw.advance(ms(800));
        assert_eq!(tw.primary_text(), "a");
        tw.advance(ms(900));
        assert_eq!(tw.primary_text(), "ab");
        tw.advance(ms(1000));
        assert_eq!(tw.primary_text(), "abc");
        assert_eq!(tw.phase(), Phase::Pausing);
        assert_eq!(tw.caret(), None);

        // Last primary tick (1000) + interval (100) + pause (500).
        tw.advance(ms(1599));
        assert_eq!(tw.secondary_text(), "");
        tw.advance(ms(1600));
        assert_eq!(tw.secondary_text(), "x");
        assert_eq!(tw.caret(), Some(CaretTarget::Secondary));
        tw.advance(ms(1650));
        assert_eq!(tw.secondary_text(), "xy");
        assert!(tw.is_done());
        assert_eq!(tw.caret(), None);
        assert_eq!(tw.next_deadline(), None);
    }

    #[test]
    fn large_time_jump_catches_up_in_order() {
        let mut tw = Typewriter::new("abc", "xy", &timing());
        tw.mount(ms(100));
        assert!(tw.advance(ms(60_000)));
        assert_eq!(tw.primary_text(), "abc");
        assert_eq!(tw.secondary_text(), "xy");
        assert!(tw.is_done());
    }

    #[test]
    fn empty_secondary_never_starts() {
        let mut tw = Typewriter::new("ab", "", &timing());
        tw.mount(Duration::ZERO);
        tw.advance(ms(10_000));
        assert!(tw.is_done());
        assert_eq!(tw.secondary_text(), "");
        assert_eq!(tw.caret(), None);
    }

    #[test]
    fn empty_primary_goes_straight_to_pause() {
        let mut tw = Typewriter::new("", "go", &timing());
        tw.mount(Duration::ZERO);
        tw.advance(ms(800));
        assert_eq!(tw.phase(), Phase::Pausing);
        tw.advance(ms(1300));
        assert_eq!(tw.secondary_text(), "g");
    }

    #[test]
    fn multibyte_prefixes_stay_on_char_boundaries() {
        let mut tw = Typewriter::new("3D✦模型", "", &timing());
        tw.mount(Duration::ZERO);
        let expected = ["3", "3D", "3D✦", "3D✦模", "3D✦模型"];
        for (i, want) in expected.iter().enumerate() {
            tw.advance(ms(800 + 100 * i as u64));
            assert_eq!(tw.primary_text(), *want);
        }
    }

    #[test]
    fn unmount_cancels_pending_steps() {
        let mut tw = Typewriter::new("hello", "world", &timing());
        tw.mount(Duration::ZERO);
        tw.advance(ms(1000));
        assert_eq!(tw.primary_text(), "hel");

        tw.unmount();
        assert_eq!(tw.primary_text(), "");
        assert_eq!(tw.next_deadline(), None);
        assert!(!tw.advance(ms(1_000_000)));
        assert_eq!(tw.primary_text(), "");
        assert_eq!(tw.secondary_text(), "");
        assert_eq!(tw.phase(), Phase::Unmounted);
    }

    #[test]
    fn changing_sources_restarts() {
        let mut tw = Typewriter::new("one", "two", &timing());
        tw.mount(Duration::ZERO);
        tw.advance(ms(900));
        assert_eq!(tw.primary_text(), "on");

        assert!(!tw.set_sources("one", "two", ms(900)));
        assert!(tw.set_sources("uno", "dos", ms(900)));
        assert_eq!(tw.primary_text(), "");
        tw.advance(ms(1699));
        assert_eq!(tw.primary_text(), "");
        tw.advance(ms(1700));
        assert_eq!(tw.primary_text(), "u");
    }

    #[test]
    fn displayed_text_is_always_a_growing_prefix() {
        let cases = [
            ("", ""),
            ("a", ""),
            ("", "b"),
            ("Discover, Buy, and Sell\nDigital Products", "Join us."),
            ("ümlaut", "日本語テキスト"),
        ];
        for (p, s) in cases {
            let clock = ManualClock::new();
            let mut tw = Typewriter::new(p, s, &timing());
            tw.mount(clock.now());
            let mut last = (0, 0);
            for _ in 0..400 {
                clock.advance_ms(17);
                tw.advance(clock.now());
                let (pt, st) = (tw.primary_text(), tw.secondary_text());
                assert!(p.starts_with(pt));
                assert!(s.starts_with(st));
                if !st.is_empty() {
                    assert_eq!(pt, p, "secondary began before primary completed");
                }
                let now = (pt.len(), st.len());
                assert!(now.0 >= last.0 && now.1 >= last.1);
                last = now;
            }
            assert_eq!(tw.primary_text(), p);
            assert_eq!(tw.secondary_text(), s);
            assert!(tw.is_done());
        }
    }
}
