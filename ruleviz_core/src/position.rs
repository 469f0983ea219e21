use serde::{Deserialize, Serialize};

use crate::ids::Role;

/// Horizontal distance between the cursor and the tooltip's left edge.
pub const CURSOR_OFFSET: f64 = 20.0;
/// Gap kept above a source span.
pub const SOURCE_GAP: f64 = 21.0;
/// Gap kept below a target span.
pub const TARGET_GAP: f64 = 5.0;

/// Measurements taken on each pointer move. `element_top` is in document
/// coordinates, `cursor_x` in client coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerGeometry {
    pub cursor_x: f64,
    pub element_top: f64,
    pub element_height: f64,
    pub tooltip_width: f64,
    pub tooltip_height: f64,
    pub viewport_width: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HorizontalAnchor {
    Left(f64),
    Right(f64),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TooltipPlacement {
    pub top: f64,
    pub horizontal: HorizontalAnchor,
}

impl TooltipPlacement {
    /// Sets `top` and exactly one of `left`/`right`.
    pub fn to_css(&self) -> String {
        match self.horizontal {
            HorizontalAnchor::Left(left) => format!("top: {}px; left: {left}px;", self.top),
            HorizontalAnchor::Right(right) => format!("top: {}px; right: {right}px;", self.top),
        }
    }
}

/// Source tooltips go above the span, everything else below. Flips to the
/// right edge only when the tooltip would run past the viewport; vertical
/// overflow is not handled.
pub fn place_tooltip(role: Role, geometry: &PointerGeometry) -> TooltipPlacement {
    let candidate = geometry.cursor_x + CURSOR_OFFSET;
    let horizontal = if candidate + geometry.tooltip_width < geometry.viewport_width {
        HorizontalAnchor::Left(candidate)
    } else {
        HorizontalAnchor::Right(0.0)
    };

    let top = match role {
        Role::Source => geometry.element_top - geometry.tooltip_height - SOURCE_GAP,
        Role::Target => geometry.element_top + geometry.element_height + TARGET_GAP,
    };

    TooltipPlacement { top, horizontal }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn geometry(cursor_x: f64) -> PointerGeometry {
        PointerGeometry {
            cursor_x,
            element_top: 300.0,
            element_height: 18.0,
            tooltip_width: 200.0,
            tooltip_height: 40.0,
            viewport_width: 1000.0,
        }
    }

    #[test]
    fn anchors_right_when_tooltip_would_overflow() {
        let placement = place_tooltip(Role::Source, &geometry(850.0));
        assert_eq!(placement.horizontal, HorizontalAnchor::Right(0.0));
    }

    #[test]
    fn anchors_left_of_cursor_when_it_fits() {
        let placement = place_tooltip(Role::Target, &geometry(100.0));
        assert_eq!(placement.horizontal, HorizontalAnchor::Left(120.0));
    }

    #[test]
    fn exact_fit_still_flips() {
        // 780 + 20 + 200 == 1000 is not strictly inside the viewport
        let placement = place_tooltip(Role::Target, &geometry(780.0));
        assert_eq!(placement.horizontal, HorizontalAnchor::Right(0.0));
        let placement = place_tooltip(Role::Target, &geometry(779.0));
        assert_eq!(placement.horizontal, HorizontalAnchor::Left(799.0));
    }

    #[test]
    fn source_goes_above_target_goes_below() {
        let above = place_tooltip(Role::Source, &geometry(0.0));
        assert_eq!(above.top, 300.0 - 40.0 - 21.0);
        let below = place_tooltip(Role::Target, &geometry(0.0));
        assert_eq!(below.top, 300.0 + 18.0 + 5.0);
    }

    #[test]
    fn css_sets_a_single_horizontal_side() {
        let left = TooltipPlacement {
            top: 12.0,
            horizontal: HorizontalAnchor::Left(870.0),
        };
        assert_eq!(left.to_css(), "top: 12px; left: 870px;");
        let right = TooltipPlacement {
            top: -3.5,
            horizontal: HorizontalAnchor::Right(0.0),
        };
        assert_eq!(right.to_css(), "top: -3.5px; right: 0px;");
    }
}
