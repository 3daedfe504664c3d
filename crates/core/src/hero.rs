//! The hero section as one stateful view.
//!
//! `HeroView` owns the typewriter, scroll tracker and hover selection and
//! exposes the lifecycle a front end drives: `mount`, then any mix of
//! `advance` / `on_scroll` / `on_resize` / `pointer_enter` /
//! `pointer_leave`, then `unmount`. Every entry point returns whether
//! visible state changed. Outside the mounted window they are no-ops.

use std::time::Duration;

use dimli_protocol::{RenderCommand, TooltipAnchor, Viewport};

use crate::config::{DecorativeIcon, HeroConfig};
use crate::easing;
use crate::hover::HoverState;
use crate::particles::ParticleField;
use crate::scroll::{ScrollTracker, ViewportMetrics, parallax, ParallaxTransform};
use crate::tooltip::resolve_placement;
use crate::typewriter::{CaretTarget, Typewriter};
use crate::views;

#[derive(Debug, Clone)]
pub struct HeroView {
    config: HeroConfig,
    typewriter: Typewriter,
    scroll: ScrollTracker,
    hover: HoverState,
    particles: ParticleField,
    mounted_at: Option<Duration>,
}

impl HeroView {
    pub fn new(config: HeroConfig) -> Self {
        let typewriter = Typewriter::new(
            config.content.title.as_str(),
            config.content.subtitle.as_str(),
            &config.typing,
        );
        let particles = ParticleField::new(&config.particles);
        Self {
            config,
            typewriter,
            scroll: ScrollTracker::new(),
            hover: HoverState::new(),
            particles,
            mounted_at: None,
        }
    }

    pub fn config(&self) -> &HeroConfig {
        &self.config
    }

    pub fn icons(&self) -> &[DecorativeIcon] {
        &self.config.icons
    }

    pub fn typewriter(&self) -> &Typewriter {
        &self.typewriter
    }

    pub fn particles(&self) -> &ParticleField {
        &self.particles
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted_at.is_some()
    }

    /// Time since mount, or zero when unmounted.
    pub fn elapsed(&self, now: Duration) -> Duration {
        self.mounted_at
            .map_or(Duration::ZERO, |at| now.saturating_sub(at))
    }

    pub fn progress(&self) -> f64 {
        self.scroll.progress()
    }

    pub fn hovered(&self) -> Option<usize> {
        self.hover.active()
    }

    /// When the typewriter next needs `advance`, if at all.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.typewriter.next_deadline()
    }

    pub fn mount(&mut self, now: Duration, metrics: &dyn ViewportMetrics) {
        self.mounted_at = Some(now);
        self.typewriter.mount(now);
        self.scroll.reset();
        self.scroll.recompute(metrics);
        self.hover.clear();
        tracing::info!(
            icons = self.config.icons.len(),
            progress = self.scroll.progress(),
            "hero mounted"
        );
    }

    /// Cancel pending work and drop all transient state.
    pub fn unmount(&mut self) {
        if self.mounted_at.take().is_none() {
            return;
        }
        self.typewriter.unmount();
        self.scroll.reset();
        self.hover.clear();
        tracing::info!("hero unmounted");
    }

    pub fn advance(&mut self, now: Duration) -> bool {
        if !self.is_mounted() {
            return false;
        }
        self.typewriter.advance(now)
    }

    pub fn on_scroll(&mut self, metrics: &dyn ViewportMetrics) -> bool {
        if !self.is_mounted() {
            return false;
        }
        self.scroll.recompute(metrics)
    }

    pub fn on_resize(&mut self, metrics: &dyn ViewportMetrics) -> bool {
        self.on_scroll(metrics)
    }

    /// Pointer entered icon `index`. Ignored for unknown or not yet
    /// visible icons.
    pub fn pointer_enter(&mut self, index: usize, now: Duration) -> bool {
        if !self.is_mounted() || !self.icon_visible(index, now) {
            return false;
        }
        let changed = self.hover.enter(index, now);
        if changed {
            tracing::debug!(index, "icon hovered");
        }
        changed
    }

    pub fn pointer_leave(&mut self, index: usize) -> bool {
        if !self.is_mounted() {
            return false;
        }
        self.hover.leave(index)
    }

    /// Swap the headline copy. The typewriter restarts if it changed.
    pub fn set_copy(&mut self, title: &str, subtitle: &str, now: Duration) -> bool {
        if !self.typewriter.set_sources(title, subtitle, now) {
            return false;
        }
        self.config.content.title = title.to_owned();
        self.config.content.subtitle = subtitle.to_owned();
        true
    }

    /// Whether icon `index` exists and its display delay has passed.
    pub fn icon_visible(&self, index: usize, now: Duration) -> bool {
        let Some(icon) = self.config.icons.get(index) else {
            return false;
        };
        self.is_mounted() && self.elapsed(now) >= icon.display_delay()
    }

    /// Fade-in of icon `index`, `0.0..=1.0`.
    pub fn icon_opacity(&self, index: usize, now: Duration) -> f64 {
        let Some(icon) = self.config.icons.get(index) else {
            return 0.0;
        };
        let Some(since) = self.elapsed(now).checked_sub(icon.display_delay()) else {
            return 0.0;
        };
        easing::power3_out(easing::progress(since, ICON_FADE))
    }

    /// Current parallax of icon `index`.
    pub fn icon_transform(&self, index: usize) -> Option<ParallaxTransform> {
        let icon = self.config.icons.get(index)?;
        Some(parallax(icon.position(), self.scroll.progress(), &self.config.parallax))
    }

    /// Tooltip anchor for icon `index`, derived from its configured position.
    pub fn tooltip_placement(&self, index: usize) -> Option<TooltipAnchor> {
        let icon = self.config.icons.get(index)?;
        Some(resolve_placement(icon.position(), &self.config.tooltip))
    }

    /// Opacity of the active tooltip.
    pub fn tooltip_opacity(&self, now: Duration) -> f64 {
        self.hover.opacity(now, self.config.tooltip.fade())
    }

    /// The caret to draw at `now`, accounting for blink.
    pub fn visible_caret(&self, now: Duration) -> Option<CaretTarget> {
        let target = self.typewriter.caret()?;
        easing::blink(self.elapsed(now), self.config.typing.caret_period()).then_some(target)
    }

    pub fn render(&self, viewport: &Viewport, now: Duration) -> Vec<RenderCommand> {
        views::hero::render_hero(self, viewport, now)
    }
}

/// Fade-in duration of an icon once its display delay has passed.
pub const ICON_FADE: Duration = Duration::from_millis(600);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::{Clock, ManualClock};
    use crate::scroll::StaticMetrics;
    use dimli_protocol::{HorizontalAnchor, VerticalAnchor};

    fn at_top() -> StaticMetrics {
        StaticMetrics::new(0.0, 0.0, 800.0)
    }

    fn mounted() -> (HeroView, ManualClock) {
        let clock = ManualClock::new();
        let mut view = HeroView::new(HeroConfig::default());
        view.mount(clock.now(), &at_top());
        (view, clock)
    }

    #[test]
    fn full_sequence_reveals_configured_copy() {
        let (mut view, clock) = mounted();
        while !view.typewriter().is_done() {
            clock.advance_ms(16);
            view.advance(clock.now());
        }
        let content = &view.config().content;
        assert_eq!(view.typewriter().primary_text(), content.title);
        assert_eq!(view.typewriter().secondary_text(), content.subtitle);
    }

    #[test]
    fn scroll_updates_progress_and_parallax() {
        let (mut view, _) = mounted();
        assert!(view.on_scroll(&StaticMetrics::new(400.0, 0.0, 800.0)));
        assert!((view.progress() - 0.5).abs() < 1e-12);
        let t = view.icon_transform(0).unwrap_or_else(|| panic!("icon 0"));
        assert!((t.scale - 0.85).abs() < 1e-9);
        assert!(view.on_resize(&StaticMetrics::new(400.0, 0.0, 0.0)));
        assert_eq!(view.progress(), 0.0);
    }

    #[test]
    fn hovering_b_hides_a() {
        let (mut view, clock) = mounted();
        clock.advance_ms(5_000);
        assert!(view.pointer_enter(0, clock.now()));
        assert!(view.pointer_enter(1, clock.now()));
        assert_eq!(view.hovered(), Some(1));
        assert!(!view.pointer_leave(0));
        assert!(view.pointer_leave(1));
        assert_eq!(view.hovered(), None);
    }

    #[test]
    fn hidden_or_unknown_icons_ignore_hover() {
        let (mut view, clock) = mounted();
        // Icon 5 appears after 1200ms.
        clock.advance_ms(1_000);
        assert!(!view.pointer_enter(5, clock.now()));
        assert!(!view.pointer_enter(99, clock.now()));
        clock.advance_ms(200);
        assert!(view.pointer_enter(5, clock.now()));
    }

    #[test]
    fn placement_for_default_icons() {
        let view = HeroView::new(HeroConfig::default());
        // "models" sits at (12, 18): top-left corner.
        let a = view.tooltip_placement(0).unwrap_or_else(|| panic!("icon 0"));
        assert_eq!(a.vertical, VerticalAnchor::Below);
        assert_eq!(a.horizontal, HorizontalAnchor::LeftFlush);
        // "printing" sits at (90, 66).
        let b = view.tooltip_placement(3).unwrap_or_else(|| panic!("icon 3"));
        assert_eq!(b.vertical, VerticalAnchor::Above);
        assert_eq!(b.horizontal, HorizontalAnchor::RightFlush);
        assert!(view.tooltip_placement(42).is_none());
    }

    #[test]
    fn unmount_freezes_everything() {
        let (mut view, clock) = mounted();
        clock.advance_ms(1_200);
        view.advance(clock.now());
        view.pointer_enter(0, clock.now());
        view.unmount();

        assert!(!view.is_mounted());
        assert_eq!(view.hovered(), None);
        assert_eq!(view.next_deadline(), None);
        for _ in 0..100 {
            clock.advance_ms(250);
            assert!(!view.advance(clock.now()));
            assert!(!view.on_scroll(&StaticMetrics::new(300.0, 0.0, 600.0)));
            assert!(!view.pointer_enter(0, clock.now()));
        }
        assert_eq!(view.typewriter().primary_text(), "");
        assert_eq!(view.progress(), 0.0);
        assert_eq!(view.visible_caret(clock.now()), None);
    }

    #[test]
    fn caret_blinks_on_primary_while_waiting() {
        let (view, _) = mounted();
        assert_eq!(
            view.visible_caret(Duration::from_millis(100)),
            Some(CaretTarget::Primary)
        );
        assert_eq!(view.visible_caret(Duration::from_millis(600)), None);
    }

    #[test]
    fn set_copy_restarts_reveal() {
        let (mut view, clock) = mounted();
        clock.advance_ms(1_000);
        view.advance(clock.now());
        assert!(!view.typewriter().primary_text().is_empty());
        assert!(view.set_copy("New", "", clock.now()));
        assert_eq!(view.typewriter().primary_text(), "");
        assert_eq!(view.config().content.title, "New");
    }

    #[test]
    fn remount_starts_over() {
        let (mut view, clock) = mounted();
        clock.advance_ms(2_000);
        view.advance(clock.now());
        view.unmount();
        view.mount(clock.now(), &at_top());
        assert_eq!(view.typewriter().primary_text(), "");
        assert_eq!(view.elapsed(clock.now()), Duration::ZERO);
        assert!(view.is_mounted());
    }
}
