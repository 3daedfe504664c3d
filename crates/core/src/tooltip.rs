use dimli_protocol::{HorizontalAnchor, NormalizedPos, TooltipAnchor, VerticalAnchor};

use crate::config::TooltipConfig;

/// Pick a tooltip anchor that keeps the tooltip inside the section.
///
/// Icons near the top get their tooltip below; everything else above.
/// Icons near the left or right edge get a tooltip flush with that side of
/// the icon; the rest are centered.
pub fn resolve_placement(position: NormalizedPos, config: &TooltipConfig) -> TooltipAnchor {
    let vertical = if position.y < config.top_threshold {
        VerticalAnchor::Below
    } else {
        VerticalAnchor::Above
    };
    let horizontal = if position.x > config.right_threshold {
        HorizontalAnchor::RightFlush
    } else if position.x < config.left_threshold {
        HorizontalAnchor::LeftFlush
    } else {
        HorizontalAnchor::Centered
    };
    TooltipAnchor {
        vertical,
        horizontal,
        offset: config.offset,
    }
}
