//! Anchored placement with flip and clamp.
//!
//! [`PlacementCalculator`] positions a modal of known size next to a target
//! rectangle. It automatically flips to the opposite side when there isn't
//! enough space, then clamps the result into the viewport.
//!
//! # Edge policy
//!
//! 1. The space needed on the main axis is the modal extent plus the gap.
//!    If the preferred side offers that much, it is kept.
//! 2. Otherwise the opposite side (same alignment) is used if it fits, or if
//!    it offers strictly more room than the preferred side.
//! 3. Otherwise the preferred side is kept.
//! 4. The offset is added, then the origin is clamped into the viewport on
//!    both axes. A modal larger than the viewport is pinned to the
//!    viewport's top-left corner.
//! 5. Intermediate sums are taken in `i64`; only the final origin is
//!    narrowed, saturating at the `i32` bounds.
//!
//! # Example
//!
//! ```ignore
//! use tourguide_layout::{Placement, PlacementCalculator, Rect, Size};
//!
//! let target = Rect::new(100, 40, 200, 30);
//! let pos = PlacementCalculator::new(target, Placement::BottomLeft)
//!     .gap(8)
//!     .compute(Size::new(320, 160), Rect::from_size(1280, 800));
//! assert_eq!((pos.x, pos.y), (100, 78));
//! ```

#![forbid(unsafe_code)]

use std::fmt;
use std::str::FromStr;

use tourguide_core::geometry::{Offset, Rect, Size};

/// Side of the target the modal sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Top,
    Bottom,
    Left,
    Right,
}

impl Side {
    /// The opposite side.
    pub const fn opposite(self) -> Self {
        match self {
            Self::Top => Self::Bottom,
            Self::Bottom => Self::Top,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Whether the modal is stacked above/below the target.
    pub const fn is_vertical(self) -> bool {
        matches!(self, Self::Top | Self::Bottom)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Bottom => "bottom",
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

/// Cross-axis alignment between the modal and the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Align {
    /// Left edges (vertical sides) or top edges (horizontal sides) line up.
    Start,
    /// Centers line up.
    Center,
    /// Right edges (vertical sides) or bottom edges (horizontal sides) line up.
    End,
}

/// Where to place the modal relative to the target.
///
/// `top-left` means above the target with left edges aligned; `left-top`
/// means left of the target with top edges aligned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Placement {
    Top,
    Left,
    #[default]
    Bottom,
    Right,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
    LeftTop,
    LeftBottom,
    RightTop,
    RightBottom,
}

impl Placement {
    pub const ALL: [Placement; 12] = [
        Placement::Top,
        Placement::Left,
        Placement::Bottom,
        Placement::Right,
        Placement::TopLeft,
        Placement::TopRight,
        Placement::BottomLeft,
        Placement::BottomRight,
        Placement::LeftTop,
        Placement::LeftBottom,
        Placement::RightTop,
        Placement::RightBottom,
    ];

    pub const fn side(self) -> Side {
        match self {
            Self::Top | Self::TopLeft | Self::TopRight => Side::Top,
            Self::Bottom | Self::BottomLeft | Self::BottomRight => Side::Bottom,
            Self::Left | Self::LeftTop | Self::LeftBottom => Side::Left,
            Self::Right | Self::RightTop | Self::RightBottom => Side::Right,
        }
    }

    pub const fn align(self) -> Align {
        match self {
            Self::Top | Self::Bottom | Self::Left | Self::Right => Align::Center,
            Self::TopLeft | Self::BottomLeft | Self::LeftTop | Self::RightTop => Align::Start,
            Self::TopRight | Self::BottomRight | Self::LeftBottom | Self::RightBottom => {
                Align::End
            }
        }
    }

    /// Rebuild a placement from its parts.
    pub const fn from_parts(side: Side, align: Align) -> Self {
        match (side, align) {
            (Side::Top, Align::Center) => Self::Top,
            (Side::Top, Align::Start) => Self::TopLeft,
            (Side::Top, Align::End) => Self::TopRight,
            (Side::Bottom, Align::Center) => Self::Bottom,
            (Side::Bottom, Align::Start) => Self::BottomLeft,
            (Side::Bottom, Align::End) => Self::BottomRight,
            (Side::Left, Align::Center) => Self::Left,
            (Side::Left, Align::Start) => Self::LeftTop,
            (Side::Left, Align::End) => Self::LeftBottom,
            (Side::Right, Align::Center) => Self::Right,
            (Side::Right, Align::Start) => Self::RightTop,
            (Side::Right, Align::End) => Self::RightBottom,
        }
    }

    /// Return the opposite placement for flip logic, keeping the alignment.
    pub const fn flip(self) -> Self {
        Self::from_parts(self.side().opposite(), self.align())
    }

    /// Whether this is a vertical (above/below) placement.
    pub const fn is_vertical(self) -> bool {
        self.side().is_vertical()
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Left => "left",
            Self::Bottom => "bottom",
            Self::Right => "right",
            Self::TopLeft => "top-left",
            Self::TopRight => "top-right",
            Self::BottomLeft => "bottom-left",
            Self::BottomRight => "bottom-right",
            Self::LeftTop => "left-top",
            Self::LeftBottom => "left-bottom",
            Self::RightTop => "right-top",
            Self::RightBottom => "right-bottom",
        }
    }
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Placement {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| format!("unknown placement '{s}'"))
    }
}

/// Computed modal origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModalPosition {
    /// Left edge of the modal.
    pub x: i32,
    /// Top edge of the modal.
    pub y: i32,
    /// Placement actually used, after flipping. `None` for an unanchored
    /// (viewport-centered) modal.
    pub placement: Option<Placement>,
    /// Whether the preferred placement was flipped.
    pub flipped: bool,
    /// Whether clamping moved the origin.
    pub clamped: bool,
}

impl ModalPosition {
    /// The modal's rectangle at this position.
    pub const fn rect(&self, modal: Size) -> Rect {
        Rect::new(self.x, self.y, modal.width, modal.height)
    }
}

/// Configuration for one anchored placement.
#[derive(Debug, Clone)]
pub struct PlacementCalculator {
    /// The anchor rectangle to position relative to.
    pub target: Rect,
    /// Preferred placement.
    pub placement: Placement,
    /// Offset added after placement.
    pub offset: Offset,
    /// Gap between target and modal on the main axis.
    pub gap: i32,
    /// Whether to auto-flip when there isn't enough space.
    pub auto_flip: bool,
    /// Whether to clamp the result into the viewport.
    pub clamp: bool,
}

impl PlacementCalculator {
    /// Create a calculator anchored to the given rectangle.
    pub fn new(target: Rect, placement: Placement) -> Self {
        Self {
            target,
            placement,
            offset: Offset::ZERO,
            gap: 0,
            auto_flip: true,
            clamp: true,
        }
    }

    /// Set the pixel offset.
    #[must_use]
    pub fn offset(mut self, offset: Offset) -> Self {
        self.offset = offset;
        self
    }

    /// Set the gap between target and modal.
    #[must_use]
    pub fn gap(mut self, gap: i32) -> Self {
        self.gap = gap.max(0);
        self
    }

    /// Enable or disable auto-flip.
    #[must_use]
    pub fn auto_flip(mut self, flip: bool) -> Self {
        self.auto_flip = flip;
        self
    }

    /// Enable or disable viewport clamping.
    #[must_use]
    pub fn clamp(mut self, clamp: bool) -> Self {
        self.clamp = clamp;
        self
    }

    /// Compute the modal's origin within the viewport.
    pub fn compute(&self, modal: Size, viewport: Rect) -> ModalPosition {
        let placement = if self.auto_flip {
            self.resolve_placement(modal, viewport)
        } else {
            self.placement
        };

        let (x, y) = self.origin(placement, modal);
        let (x, y) = (x + i64::from(self.offset.x), y + i64::from(self.offset.y));
        let (cx, cy) = if self.clamp {
            clamp_into(x, y, modal, viewport)
        } else {
            (x, y)
        };

        ModalPosition {
            x: saturate(cx),
            y: saturate(cy),
            placement: Some(placement),
            flipped: placement != self.placement,
            clamped: (cx, cy) != (x, y),
        }
    }

    /// Center a modal in the viewport, for steps without an anchor.
    pub fn centered(modal: Size, viewport: Rect, offset: Offset) -> ModalPosition {
        let v = Edges::of(viewport);
        let x = v.left
            + (i64::from(viewport.width) - i64::from(modal.width)).div_euclid(2)
            + i64::from(offset.x);
        let y = v.top
            + (i64::from(viewport.height) - i64::from(modal.height)).div_euclid(2)
            + i64::from(offset.y);
        let (cx, cy) = clamp_into(x, y, modal, viewport);
        ModalPosition {
            x: saturate(cx),
            y: saturate(cy),
            placement: None,
            flipped: false,
            clamped: (cx, cy) != (x, y),
        }
    }

    /// Resolve placement with flip logic.
    fn resolve_placement(&self, modal: Size, viewport: Rect) -> Placement {
        let primary = self.placement;
        let available = self.available_space(primary.side(), viewport);
        let needed = self.needed_space(primary.side(), modal);

        if available >= needed {
            return primary;
        }

        // Try the opposite direction
        let flipped = primary.flip();
        let flipped_available = self.available_space(flipped.side(), viewport);
        if flipped_available >= needed || flipped_available > available {
            flipped
        } else {
            primary
        }
    }

    /// How much space is available on the given side of the target.
    fn available_space(&self, side: Side, viewport: Rect) -> i64 {
        let (t, v) = (Edges::of(self.target), Edges::of(viewport));
        let space = match side {
            Side::Top => t.top - v.top,
            Side::Bottom => v.bottom - t.bottom,
            Side::Left => t.left - v.left,
            Side::Right => v.right - t.right,
        };
        space.max(0)
    }

    /// Minimum space needed for the modal on the given side.
    fn needed_space(&self, side: Side, modal: Size) -> i64 {
        let extent = if side.is_vertical() {
            modal.height
        } else {
            modal.width
        };
        i64::from(extent) + i64::from(self.gap)
    }

    /// Unclamped origin for a placement.
    fn origin(&self, placement: Placement, modal: Size) -> (i64, i64) {
        let t = Edges::of(self.target);
        let gap = i64::from(self.gap);
        let (width, height) = (i64::from(modal.width), i64::from(modal.height));
        let cross = |start: i64, end: i64, size: i64| match placement.align() {
            Align::Start => start,
            Align::Center => start + (end - start - size).div_euclid(2),
            Align::End => end - size,
        };

        match placement.side() {
            Side::Top => (cross(t.left, t.right, width), t.top - gap - height),
            Side::Bottom => (cross(t.left, t.right, width), t.bottom + gap),
            Side::Left => (t.left - gap - width, cross(t.top, t.bottom, height)),
            Side::Right => (t.right + gap, cross(t.top, t.bottom, height)),
        }
    }
}

/// Rectangle edges widened so sums of `i32` coordinates cannot overflow.
#[derive(Debug, Clone, Copy)]
struct Edges {
    left: i64,
    top: i64,
    right: i64,
    bottom: i64,
}

impl Edges {
    fn of(r: Rect) -> Self {
        let (left, top) = (i64::from(r.x), i64::from(r.y));
        Self {
            left,
            top,
            right: left + i64::from(r.width.max(0)),
            bottom: top + i64::from(r.height.max(0)),
        }
    }
}

fn clamp_into(x: i64, y: i64, modal: Size, viewport: Rect) -> (i64, i64) {
    let v = Edges::of(viewport);
    (
        clamp_axis(x, i64::from(modal.width), v.left, v.right),
        clamp_axis(y, i64::from(modal.height), v.top, v.bottom),
    )
}

/// Clamp one axis so `[pos, pos + size)` stays inside `[lo, hi)`.
///
/// When `size` exceeds the range the start edge wins.
fn clamp_axis(pos: i64, size: i64, lo: i64, hi: i64) -> i64 {
    let pos = if pos + size > hi { hi - size } else { pos };
    pos.max(lo)
}

/// Narrow a wide coordinate back to the pixel grid.
fn saturate(v: i64) -> i32 {
    i32::try_from(v).unwrap_or(if v < 0 { i32::MIN } else { i32::MAX })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport() -> Rect {
        Rect::from_size(800, 600)
    }

    const MODAL: Size = Size::new(200, 100);

    #[test]
    fn bottom_centered_under_target() {
        let target = Rect::new(300, 100, 100, 40);
        let pos = PlacementCalculator::new(target, Placement::Bottom).compute(MODAL, viewport());
        assert_eq!((pos.x, pos.y), (250, 140));
        assert_eq!(pos.placement, Some(Placement::Bottom));
        assert!(!pos.flipped);
        assert!(!pos.clamped);
    }

    #[test]
    fn top_variants_align_edges() {
        let target = Rect::new(300, 300, 100, 40);
        let calc = |p| PlacementCalculator::new(target, p).compute(MODAL, viewport());
        assert_eq!((calc(Placement::Top).x, calc(Placement::Top).y), (250, 200));
        assert_eq!(calc(Placement::TopLeft).x, 300);
        assert_eq!(calc(Placement::TopRight).x, 200);
    }

    #[test]
    fn side_anchored_variants_align_vertical_edges() {
        let target = Rect::new(300, 300, 100, 40);
        let calc = |p| PlacementCalculator::new(target, p).compute(MODAL, viewport());
        let left = calc(Placement::Left);
        assert_eq!((left.x, left.y), (100, 270));
        assert_eq!(calc(Placement::LeftTop).y, 300);
        assert_eq!(calc(Placement::LeftBottom).y, 240);
        let right = calc(Placement::RightBottom);
        assert_eq!((right.x, right.y), (400, 240));
        assert_eq!(calc(Placement::RightTop).y, 300);
    }

    #[test]
    fn gap_creates_space() {
        let target = Rect::new(300, 100, 100, 40);
        let pos = PlacementCalculator::new(target, Placement::BottomLeft)
            .gap(12)
            .compute(MODAL, viewport());
        assert_eq!(pos.y, 152);
    }

    #[test]
    fn offset_applies_after_placement() {
        let target = Rect::new(300, 100, 100, 40);
        let pos = PlacementCalculator::new(target, Placement::BottomLeft)
            .offset(Offset::new(-10, 5))
            .compute(MODAL, viewport());
        assert_eq!((pos.x, pos.y), (290, 145));
    }

    #[test]
    fn bottom_flips_to_top_near_bottom_edge() {
        let target = Rect::new(300, 540, 100, 40);
        let pos = PlacementCalculator::new(target, Placement::Bottom).compute(MODAL, viewport());
        assert_eq!(pos.placement, Some(Placement::Top));
        assert!(pos.flipped);
        assert_eq!(pos.y, 440);
    }

    #[test]
    fn flip_keeps_alignment() {
        let target = Rect::new(300, 540, 100, 40);
        let pos =
            PlacementCalculator::new(target, Placement::BottomRight).compute(MODAL, viewport());
        assert_eq!(pos.placement, Some(Placement::TopRight));
        assert_eq!(pos.x, 200);
    }

    #[test]
    fn right_flips_to_left_near_right_edge() {
        let target = Rect::new(700, 200, 60, 40);
        let pos = PlacementCalculator::new(target, Placement::Right).compute(MODAL, viewport());
        assert_eq!(pos.placement, Some(Placement::Left));
        assert_eq!(pos.x, 500);
    }

    #[test]
    fn no_flip_when_opposite_is_tighter() {
        // 60px below, 20px above; neither fits 100px, below is roomier.
        let target = Rect::new(300, 20, 100, 520);
        let pos = PlacementCalculator::new(target, Placement::Bottom).compute(MODAL, viewport());
        assert_eq!(pos.placement, Some(Placement::Bottom));
        assert!(!pos.flipped);
        assert!(pos.clamped);
        assert_eq!(pos.y, 500);
    }

    #[test]
    fn auto_flip_disabled_keeps_side() {
        let target = Rect::new(300, 540, 100, 40);
        let pos = PlacementCalculator::new(target, Placement::Bottom)
            .auto_flip(false)
            .clamp(false)
            .compute(MODAL, viewport());
        assert_eq!(pos.placement, Some(Placement::Bottom));
        assert_eq!(pos.y, 580);
    }

    #[test]
    fn cross_axis_clamped_to_viewport() {
        let target = Rect::new(760, 100, 30, 20);
        let pos = PlacementCalculator::new(target, Placement::Bottom).compute(MODAL, viewport());
        assert_eq!(pos.x, 600);
        assert!(pos.clamped);
    }

    #[test]
    fn oversized_modal_pins_to_origin() {
        let target = Rect::new(100, 100, 10, 10);
        let pos = PlacementCalculator::new(target, Placement::Bottom)
            .compute(Size::new(900, 700), viewport());
        assert_eq!((pos.x, pos.y), (0, 0));
    }

    #[test]
    fn centered_for_unanchored() {
        let pos = PlacementCalculator::centered(MODAL, viewport(), Offset::ZERO);
        assert_eq!((pos.x, pos.y), (300, 250));
        assert_eq!(pos.placement, None);
        let nudged = PlacementCalculator::centered(MODAL, viewport(), Offset::new(0, -40));
        assert_eq!(nudged.y, 210);
    }

    #[test]
    fn huge_offset_is_clamped_not_overflowed() {
        let far = Offset::new(i32::MAX, i32::MIN);
        let pos = PlacementCalculator::centered(MODAL, viewport(), far);
        assert_eq!((pos.x, pos.y), (600, 0));
        assert!(pos.clamped);

        let target = Rect::new(300, 100, 100, 40);
        let pos = PlacementCalculator::new(target, Placement::Bottom)
            .offset(far)
            .compute(MODAL, viewport());
        assert_eq!((pos.x, pos.y), (600, 0));
    }

    #[test]
    fn target_far_above_viewport() {
        let target = Rect::new(0, -2_147_483_600, 10, 10);
        let pos = PlacementCalculator::new(target, Placement::Top).compute(MODAL, viewport());
        assert_eq!(pos.placement, Some(Placement::Bottom));
        assert_eq!((pos.x, pos.y), (0, 0));
        assert!(pos.clamped);

        let pos = PlacementCalculator::new(target, Placement::Top)
            .auto_flip(false)
            .clamp(false)
            .compute(MODAL, viewport());
        assert_eq!(pos.y, i32::MIN);
    }

    #[test]
    fn unclamped_origin_saturates_at_grid_edge() {
        let target = Rect::new(i32::MAX - 5, i32::MIN, 10, 10);
        let calc = |p| {
            PlacementCalculator::new(target, p)
                .gap(i32::MAX)
                .auto_flip(false)
                .clamp(false)
                .compute(MODAL, viewport())
        };
        assert_eq!(calc(Placement::Right).x, i32::MAX);
        assert_eq!(calc(Placement::Top).y, i32::MIN);
    }

    #[test]
    fn viewport_at_coordinate_extremes() {
        let low = Rect::new(i32::MIN, i32::MIN, 800, 600);
        let pos = PlacementCalculator::centered(MODAL, low, Offset::new(i32::MIN, 0));
        assert_eq!((pos.x, pos.y), (i32::MIN, i32::MIN + 250));

        let high = Rect::new(i32::MAX - 800, i32::MAX - 600, 800, 600);
        let target = Rect::new(i32::MAX - 10, i32::MAX - 10, 10, 10);
        let pos = PlacementCalculator::new(target, Placement::BottomRight).compute(MODAL, high);
        assert!(high.contains_rect(&pos.rect(MODAL)));
    }

    #[test]
    fn placement_parts_roundtrip() {
        for p in Placement::ALL {
            assert_eq!(Placement::from_parts(p.side(), p.align()), p);
            assert_eq!(p.flip().flip(), p);
            assert_eq!(p.as_str().parse::<Placement>(), Ok(p));
        }
    }

    #[test]
    fn placement_flip_pairs() {
        assert_eq!(Placement::Top.flip(), Placement::Bottom);
        assert_eq!(Placement::LeftBottom.flip(), Placement::RightBottom);
        assert_eq!(Placement::TopLeft.flip(), Placement::BottomLeft);
    }

    #[test]
    fn unknown_placement_rejected() {
        assert!("middle".parse::<Placement>().is_err());
    }
}
