pub mod anchor;
pub mod commands;
pub mod theme;
pub mod types;

pub use anchor::{HorizontalAnchor, TooltipAnchor, VerticalAnchor};
pub use commands::{HitTarget, RenderCommand, TextAlign};
pub use theme::ThemeToken;
pub use types::{NormalizedPos, Point, Rect, Viewport};
