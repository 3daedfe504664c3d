//! Scroll depth through the hero section and the parallax it drives.

use dimli_protocol::NormalizedPos;

use crate::config::ParallaxConfig;

/// Document-relative geometry of the tracked section.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectionGeometry {
    pub top: f64,
    pub height: f64,
}

/// One consistent reading of viewport state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricsSample {
    pub scroll_y: f64,
    pub section: SectionGeometry,
}

/// Viewport facts the tracker depends on, supplied by the host platform
/// (window scroll offset, element bounding box, ...).
pub trait ViewportMetrics {
    fn scroll_y(&self) -> f64;
    fn section(&self) -> SectionGeometry;

    /// Read everything needed for one recompute. Providers backed by
    /// expensive layout queries should override this to read once.
    fn sample(&self) -> MetricsSample {
        MetricsSample {
            scroll_y: self.scroll_y(),
            section: self.section(),
        }
    }
}

/// Plain-data metrics, for hosts that already know the numbers and for tests.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StaticMetrics {
    pub scroll_y: f64,
    pub section_top: f64,
    pub section_height: f64,
}

impl StaticMetrics {
    pub fn new(scroll_y: f64, section_top: f64, section_height: f64) -> Self {
        Self {
            scroll_y,
            section_top,
            section_height,
        }
    }
}

impl ViewportMetrics for StaticMetrics {
    fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    fn section(&self) -> SectionGeometry {
        SectionGeometry {
            top: self.section_top,
            height: self.section_height,
        }
    }
}

/// How far `scroll_y` has travelled through `[section_top, section_top +
/// section_height]`, in `0.0..=1.0`.
///
/// Degenerate geometry (zero, negative or non-finite height, non-finite
/// top) and a NaN scroll offset all yield `0.0`.
pub fn scroll_progress(section_top: f64, section_height: f64, scroll_y: f64) -> f64 {
    if !section_top.is_finite()
        || !section_height.is_finite()
        || section_height <= 0.0
        || scroll_y.is_nan()
    {
        return 0.0;
    }
    if scroll_y <= section_top {
        return 0.0;
    }
    if scroll_y >= section_top + section_height {
        return 1.0;
    }
    ((scroll_y - section_top) / section_height).clamp(0.0, 1.0)
}

/// Holds the latest scroll progress and recomputes it on viewport events.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScrollTracker {
    progress: f64,
}

impl ScrollTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }

    /// Recompute from one metrics sample. Returns whether progress changed.
    pub fn recompute(&mut self, metrics: &dyn ViewportMetrics) -> bool {
        let sample = metrics.sample();
        let next = scroll_progress(sample.section.top, sample.section.height, sample.scroll_y);
        if next == self.progress {
            return false;
        }
        tracing::trace!(progress = next, scroll_y = sample.scroll_y, "scroll progress");
        self.progress = next;
        true
    }

    pub fn reset(&mut self) {
        self.progress = 0.0;
    }
}

/// Where an icon sits and how large it is at a given scroll progress.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParallaxTransform {
    pub position: NormalizedPos,
    pub scale: f64,
}

/// Pull `origin` toward the configured center and shrink it as the hero
/// scrolls away.
pub fn parallax(origin: NormalizedPos, progress: f64, config: &ParallaxConfig) -> ParallaxTransform {
    let p = if progress.is_finite() {
        progress.clamp(0.0, 1.0)
    } else {
        0.0
    };
    let center = config.center();
    let pull = p * config.damping;
    ParallaxTransform {
        position: NormalizedPos::new(
            origin.x + (center.x - origin.x) * pull,
            origin.y + (center.y - origin.y) * pull,
        ),
        scale: 1.0 - p * config.shrink,
    }
}
