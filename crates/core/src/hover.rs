use std::time::Duration;

/// Exclusive hover selection: at most one element is active.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HoverState {
    active: Option<Active>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Active {
    index: usize,
    since: Duration,
}

impl HoverState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> Option<usize> {
        self.active.map(|a| a.index)
    }

    pub fn is_active(&self, index: usize) -> bool {
        self.active() == Some(index)
    }

    /// Make `index` the active element, replacing any other. Returns whether
    /// the selection changed.
    pub fn enter(&mut self, index: usize, now: Duration) -> bool {
        if self.is_active(index) {
            return false;
        }
        self.active = Some(Active { index, since: now });
        true
    }

    /// Pointer left `index`. Only clears the selection if `index` is the
    /// active element, so a late leave from a previous element cannot hide
    /// the current one.
    pub fn leave(&mut self, index: usize) -> bool {
        if !self.is_active(index) {
            return false;
        }
        self.active = None;
        true
    }

    pub fn clear(&mut self) -> bool {
        self.active.take().is_some()
    }

    /// Fade-in opacity of the active element's popup, `0.0..=1.0`.
    pub fn opacity(&self, now: Duration, fade: Duration) -> f64 {
        let Some(active) = self.active else {
            return 0.0;
        };
        if fade.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_sub(active.since);
        (elapsed.as_secs_f64() / fade.as_secs_f64()).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FADE: Duration = Duration::from_millis(200);

    #[test]
    fn entering_b_replaces_a() {
        let mut hover = HoverState::new();
        assert!(hover.enter(0, Duration::ZERO));
        assert!(hover.enter(1, Duration::from_millis(50)));
        assert_eq!(hover.active(), Some(1));
        assert!(!hover.is_active(0));
    }

    #[test]
    fn stale_leave_does_not_clear_new_selection() {
        let mut hover = HoverState::new();
        hover.enter(0, Duration::ZERO);
        hover.enter(1, Duration::ZERO);
        assert!(!hover.leave(0));
        assert_eq!(hover.active(), Some(1));
        assert!(hover.leave(1));
        assert_eq!(hover.active(), None);
    }

    #[test]
    fn reentering_same_element_keeps_fade_progress() {
        let mut hover = HoverState::new();
        hover.enter(2, Duration::ZERO);
        assert!(!hover.enter(2, Duration::from_millis(150)));
        assert!((hover.opacity(Duration::from_millis(200), FADE) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn opacity_ramps_over_fade() {
        let mut hover = HoverState::new();
        assert_eq!(hover.opacity(Duration::ZERO, FADE), 0.0);
        hover.enter(0, Duration::from_millis(1000));
        assert_eq!(hover.opacity(Duration::from_millis(1000), FADE), 0.0);
        assert!((hover.opacity(Duration::from_millis(1100), FADE) - 0.5).abs() < 1e-9);
        assert_eq!(hover.opacity(Duration::from_millis(5000), FADE), 1.0);
        assert_eq!(hover.opacity(Duration::from_millis(1000), Duration::ZERO), 1.0);
    }
}
