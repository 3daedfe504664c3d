use serde::{Deserialize, Serialize};

use crate::anchor::TooltipAnchor;
use crate::theme::ThemeToken;
use crate::types::{Point, Rect};

/// Logical element a drawn shape stands for, reported back by renderers
/// for hit-testing (hover, clicks).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HitTarget {
    /// Decorative hero icon, by index into the configured icon list.
    Icon(usize),
    /// The hero call-to-action link.
    Cta,
    /// Navigation bar link, by index.
    NavLink(usize),
    /// Navigation bar action button (search, discord, upload, ...), by index.
    NavAction(usize),
    /// The profile button that toggles the profile menu.
    ProfileButton,
    /// The open profile menu panel itself.
    ProfileMenu,
    /// Profile menu entry, by index.
    MenuItem(usize),
}

/// A single, stateless render instruction.
///
/// Views emit a `Vec<RenderCommand>` per frame. Renderers consume this list
/// sequentially; each command carries all the data it needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RenderCommand {
    /// Draw a filled (optionally rounded) rectangle.
    DrawRect {
        rect: Rect,
        color: ThemeToken,
        border_color: Option<ThemeToken>,
        corner_radius: f64,
        hit: Option<HitTarget>,
    },

    /// Draw a filled circle.
    DrawCircle {
        center: Point,
        radius: f64,
        color: ThemeToken,
    },

    /// Draw a text string. `text` may contain newlines. `position.x` is
    /// interpreted per `align`; `position.y` is the vertical center of the
    /// whole block. When `caret` is set the renderer appends a text cursor
    /// after the last glyph.
    DrawText {
        position: Point,
        text: String,
        color: ThemeToken,
        font_size: f64,
        align: TextAlign,
        caret: bool,
    },

    /// Draw a line segment.
    DrawLine {
        from: Point,
        to: Point,
        color: ThemeToken,
        width: f64,
    },

    /// Draw a tooltip for `target`. Placement is resolved by the renderer
    /// from `anchor` once the tooltip content is measured.
    DrawTooltip {
        target: Rect,
        anchor: TooltipAnchor,
        title: String,
        body: String,
    },

    /// Restrict subsequent drawing to a rectangular region.
    SetClip { rect: Rect },

    /// Remove the active clip region.
    ClearClip,

    /// Push an affine transform (applied to all subsequent commands until
    /// the matching `PopTransform`).
    PushTransform { translate: Point, scale: Point },

    /// Pop the most recent transform.
    PopTransform,

    /// Multiply the opacity of subsequent commands by `alpha` until the
    /// matching `PopOpacity`.
    PushOpacity { alpha: f64 },

    /// Pop the most recent opacity.
    PopOpacity,

    /// Begin a logical group (e.g. an icon with its tooltip). Renderers may
    /// use this for batching, layer separation, or accessibility.
    BeginGroup { id: String, label: Option<String> },

    /// End the current group.
    EndGroup,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}
