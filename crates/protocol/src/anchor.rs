use serde::{Deserialize, Serialize};

use crate::types::Rect;

/// Which side of its target a popup attaches to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VerticalAnchor {
    /// Popup's top edge sits on the target's bottom edge.
    Below,
    /// Popup's bottom edge sits on the target's top edge.
    Above,
}

/// How a popup is aligned horizontally against its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HorizontalAnchor {
    /// Popup's left edge flush with the target's left edge.
    LeftFlush,
    /// Popup centered on the target.
    Centered,
    /// Popup's right edge flush with the target's right edge.
    RightFlush,
}

/// Declarative placement of a tooltip relative to the element it describes.
///
/// The core never computes pixel positions for tooltips; it hands this
/// descriptor to the renderer, which knows the measured tooltip size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TooltipAnchor {
    pub vertical: VerticalAnchor,
    pub horizontal: HorizontalAnchor,
    /// Gap between target and popup along the vertical axis, in logical px.
    pub offset: f64,
}

impl TooltipAnchor {
    /// Resolve the descriptor against a concrete target rect and popup size.
    pub fn place(&self, target: &Rect, width: f64, height: f64) -> Rect {
        let x = match self.horizontal {
            HorizontalAnchor::LeftFlush => target.x,
            HorizontalAnchor::Centered => target.center().x - width / 2.0,
            HorizontalAnchor::RightFlush => target.right() - width,
        };
        let y = match self.vertical {
            VerticalAnchor::Below => target.bottom() + self.offset,
            VerticalAnchor::Above => target.y - self.offset - height,
        };
        Rect::new(x, y, width, height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn icon() -> Rect {
        Rect::new(100.0, 100.0, 40.0, 40.0)
    }

    #[test]
    fn below_left_flush() {
        let anchor = TooltipAnchor {
            vertical: VerticalAnchor::Below,
            horizontal: HorizontalAnchor::LeftFlush,
            offset: 8.0,
        };
        let r = anchor.place(&icon(), 200.0, 60.0);
        assert_eq!(r, Rect::new(100.0, 148.0, 200.0, 60.0));
    }

    #[test]
    fn above_right_flush() {
        let anchor = TooltipAnchor {
            vertical: VerticalAnchor::Above,
            horizontal: HorizontalAnchor::RightFlush,
            offset: 8.0,
        };
        let r = anchor.place(&icon(), 200.0, 60.0);
        assert_eq!(r.right(), icon().right());
        assert_eq!(r.bottom(), icon().y - 8.0);
    }

    #[test]
    fn centered_shares_center_x() {
        let anchor = TooltipAnchor {
            vertical: VerticalAnchor::Above,
            horizontal: HorizontalAnchor::Centered,
            offset: 0.0,
        };
        let r = anchor.place(&icon(), 90.0, 30.0);
        assert!((r.center().x - icon().center().x).abs() < f64::EPSILON);
    }
}
