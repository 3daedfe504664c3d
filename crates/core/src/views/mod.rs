//! View transforms: turn view state into `RenderCommand` lists.
//!
//! The core has no font metrics, so layout that depends on text size uses
//! the estimates below. Renderers with real metrics (egui) only rely on
//! them for hit-testing rects, never for glyph placement.

pub mod hero;
pub mod nav;

/// Average advance of a proportional UI glyph relative to its font size.
const GLYPH_ASPECT: f64 = 0.55;
pub const LINE_HEIGHT: f64 = 1.25;

pub const TOOLTIP_MAX_WIDTH: f64 = 260.0;
pub const TOOLTIP_PADDING: f64 = 12.0;
pub const TOOLTIP_TITLE_SIZE: f64 = 14.0;
pub const TOOLTIP_BODY_SIZE: f64 = 12.0;

/// Estimated width of the widest line of `text`.
pub fn estimate_text_width(text: &str, font_size: f64) -> f64 {
    let widest = text.lines().map(|l| l.chars().count()).max().unwrap_or(0);
    widest as f64 * font_size * GLYPH_ASPECT
}

/// Estimated height of `text`, counting explicit newlines only.
pub fn estimate_text_height(text: &str, font_size: f64) -> f64 {
    let lines = text.lines().count().max(1);
    lines as f64 * font_size * LINE_HEIGHT
}

/// How many glyphs of `font_size` fit in `width`, at least one.
pub fn chars_per_line(width: f64, font_size: f64) -> usize {
    if font_size <= 0.0 {
        return 1;
    }
    ((width / (font_size * GLYPH_ASPECT)).floor() as usize).max(1)
}

/// Estimated tooltip box size for renderers without text measurement.
/// The body wraps at [`TOOLTIP_MAX_WIDTH`].
pub fn estimate_tooltip_size(title: &str, body: &str) -> (f64, f64) {
    let inner_max = TOOLTIP_MAX_WIDTH - 2.0 * TOOLTIP_PADDING;
    let title_w = estimate_text_width(title, TOOLTIP_TITLE_SIZE);
    let body_w = estimate_text_width(body, TOOLTIP_BODY_SIZE);
    let body_lines = (body_w / inner_max).ceil().max(1.0);
    let w = title_w.max(body_w.min(inner_max)) + 2.0 * TOOLTIP_PADDING;
    let h = TOOLTIP_TITLE_SIZE * LINE_HEIGHT
        + body_lines * TOOLTIP_BODY_SIZE * LINE_HEIGHT
        + 2.0 * TOOLTIP_PADDING
        + 4.0;
    (w.min(TOOLTIP_MAX_WIDTH), h)
}

/// Greedy word wrap to at most `max_chars` per line.
pub fn wrap_words(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();
    for word in text.split_whitespace() {
        let needed = if line.is_empty() {
            word.chars().count()
        } else {
            line.chars().count() + 1 + word.chars().count()
        };
        if needed > max_chars && !line.is_empty() {
            lines.push(std::mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(word);
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}
