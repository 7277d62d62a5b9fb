#![forbid(unsafe_code)]

//! Spotlight geometry for highlighting the target of the current step.
//!
//! # Invariants
//!
//! 1. The mask covers the viewport minus a "cutout" around the target: the
//!    cutout and the mask regions tile the viewport without overlap.
//! 2. The hotspot sits at the target's center.
//! 3. The arrow tip lies on the modal edge facing the target, kept at least
//!    `inset` pixels away from the modal's corners when the edge allows it.
//!
//! # Example
//!
//! ```ignore
//! use tourguide_layout::{Spotlight, Rect};
//!
//! let spotlight = Spotlight::new(Rect::new(10, 5, 20, 3)).padding(4);
//! let regions = spotlight.mask_regions(Rect::from_size(800, 600));
//! ```

use tourguide_core::geometry::{Rect, Sides};

use crate::placement::{Placement, Side};

/// Position of the arrow that points from the modal to the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Arrow {
    /// Edge of the modal the arrow is drawn on.
    pub edge: Side,
    /// Tip x coordinate.
    pub x: i32,
    /// Tip y coordinate.
    pub y: i32,
}

/// Spotlight around a target rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Spotlight {
    target: Rect,
    padding: i32,
}

impl Spotlight {
    /// Create a spotlight with no padding.
    #[must_use]
    pub fn new(target: Rect) -> Self {
        Self { target, padding: 0 }
    }

    /// Padding around the target (spotlight "breathing room").
    #[must_use]
    pub fn padding(mut self, padding: i32) -> Self {
        self.padding = padding.max(0);
        self
    }

    pub fn target(&self) -> Rect {
        self.target
    }

    /// Get padded target bounds.
    pub fn padded_target(&self) -> Rect {
        self.target.outer(Sides::all(self.padding))
    }

    /// The visible cutout: the padded target clipped to the viewport.
    pub fn cutout(&self, viewport: Rect) -> Option<Rect> {
        self.padded_target().intersection_opt(&viewport)
    }

    /// Rectangles the mask should dim.
    ///
    /// Up to four bands (above, below, left, right of the cutout). When the
    /// target is entirely off-screen the whole viewport is dimmed.
    pub fn mask_regions(&self, viewport: Rect) -> Vec<Rect> {
        let Some(cut) = self.cutout(viewport) else {
            return if viewport.is_empty() {
                Vec::new()
            } else {
                vec![viewport]
            };
        };

        [
            Rect::new(
                viewport.x,
                viewport.y,
                viewport.width,
                cut.y.saturating_sub(viewport.y),
            ),
            Rect::new(
                viewport.x,
                cut.bottom(),
                viewport.width,
                viewport.bottom().saturating_sub(cut.bottom()),
            ),
            Rect::new(viewport.x, cut.y, cut.x.saturating_sub(viewport.x), cut.height),
            Rect::new(
                cut.right(),
                cut.y,
                viewport.right().saturating_sub(cut.right()),
                cut.height,
            ),
        ]
        .into_iter()
        .filter(|r| !r.is_empty())
        .collect()
    }

    /// Center of the target, where the hotspot marker goes.
    pub fn hotspot(&self) -> (i32, i32) {
        self.target.center()
    }

    /// Arrow tip for a modal placed at `modal` with the effective `placement`.
    pub fn arrow(&self, modal: Rect, placement: Placement, inset: i32) -> Arrow {
        let (cx, cy) = self.target.center();
        match placement.side() {
            // Modal below the target: arrow on its top edge, pointing up.
            Side::Bottom => Arrow {
                edge: Side::Top,
                x: clamp_within(cx, modal.x, modal.right(), inset),
                y: modal.y,
            },
            Side::Top => Arrow {
                edge: Side::Bottom,
                x: clamp_within(cx, modal.x, modal.right(), inset),
                y: modal.bottom(),
            },
            Side::Right => Arrow {
                edge: Side::Left,
                x: modal.x,
                y: clamp_within(cy, modal.y, modal.bottom(), inset),
            },
            Side::Left => Arrow {
                edge: Side::Right,
                x: modal.right(),
                y: clamp_within(cy, modal.y, modal.bottom(), inset),
            },
        }
    }
}

/// Clamp `v` into `[lo + inset, hi - inset]`, shrinking the inset when the
/// span is too short to honor it.
fn clamp_within(v: i32, lo: i32, hi: i32, inset: i32) -> i32 {
    let span = hi.saturating_sub(lo).max(0);
    let inset = inset.clamp(0, span / 2);
    v.clamp(lo + inset, (hi - inset).max(lo + inset))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport() -> Rect {
        Rect::from_size(100, 50)
    }

    #[test]
    fn padded_target_grows_every_side() {
        let s = Spotlight::new(Rect::new(10, 10, 20, 5)).padding(2);
        assert_eq!(s.padded_target(), Rect::new(8, 8, 24, 9));
    }

    #[test]
    fn mask_regions_tile_viewport() {
        let s = Spotlight::new(Rect::new(10, 10, 20, 5)).padding(1);
        let regions = s.mask_regions(viewport());
        assert_eq!(regions.len(), 4);
        let cut = s.cutout(viewport()).unwrap();
        let covered: i64 = regions.iter().map(Rect::area).sum::<i64>() + cut.area();
        assert_eq!(covered, viewport().area());
        for r in &regions {
            assert!(r.intersection_opt(&cut).is_none());
        }
    }

    #[test]
    fn target_at_corner_drops_empty_bands() {
        let s = Spotlight::new(Rect::new(0, 0, 10, 10));
        let regions = s.mask_regions(viewport());
        assert_eq!(regions.len(), 2);
    }

    #[test]
    fn offscreen_target_dims_everything() {
        let s = Spotlight::new(Rect::new(500, 500, 10, 10));
        assert_eq!(s.mask_regions(viewport()), vec![viewport()]);
    }

    #[test]
    fn hotspot_is_target_center() {
        let s = Spotlight::new(Rect::new(10, 20, 30, 10));
        assert_eq!(s.hotspot(), (25, 25));
    }

    #[test]
    fn arrow_points_at_target_from_modal_edge() {
        let s = Spotlight::new(Rect::new(100, 100, 40, 20));
        let below = Rect::new(60, 120, 200, 80);
        let arrow = s.arrow(below, Placement::Bottom, 8);
        assert_eq!(arrow, Arrow { edge: Side::Top, x: 120, y: 120 });

        let left = Rect::new(0, 60, 100, 200);
        let arrow = s.arrow(left, Placement::LeftTop, 8);
        assert_eq!(arrow, Arrow { edge: Side::Right, x: 100, y: 110 });
    }

    #[test]
    fn arrow_clamped_inside_modal_edge() {
        let s = Spotlight::new(Rect::new(0, 100, 10, 10));
        let modal = Rect::new(50, 110, 100, 40);
        let arrow = s.arrow(modal, Placement::BottomLeft, 12);
        assert_eq!(arrow.x, 62);
    }

    #[test]
    fn arrow_inset_shrinks_on_narrow_modal() {
        let s = Spotlight::new(Rect::new(0, 0, 10, 10));
        let modal = Rect::new(20, 10, 6, 30);
        let arrow = s.arrow(modal, Placement::Bottom, 12);
        assert_eq!(arrow.x, 23);
    }

    #[test]
    fn extreme_coordinates_stay_on_grid() {
        let s = Spotlight::new(Rect::new(i32::MAX - 4, i32::MIN, 10, 10)).padding(i32::MAX);
        let view = Rect::new(-50, i32::MIN, 100, 50);
        let cut = s.cutout(view).unwrap();
        assert_eq!(cut, Rect::new(-4, i32::MIN, 54, 50));
        let regions = s.mask_regions(view);
        assert_eq!(regions, vec![Rect::new(-50, i32::MIN, 46, 50)]);
        let covered: i64 = regions.iter().map(Rect::area).sum::<i64>() + cut.area();
        assert_eq!(covered, view.area());
        assert_eq!(s.hotspot(), (i32::MAX, i32::MIN + 5));

        let modal = Rect::new(i32::MAX - 20, 0, i32::MAX, 40);
        let arrow = s.arrow(modal, Placement::Bottom, i32::MAX);
        assert_eq!((arrow.x, arrow.y), (i32::MAX - 10, 0));
    }
}
